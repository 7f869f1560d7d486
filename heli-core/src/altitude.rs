// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Altitude estimation from the 12-bit altitude sensor.
//!
//! ADC conversions land in a [`SampleBuffer`] from the end-of-conversion interrupt. The altitude
//! task then averages the whole ring and, once calibrated, maps the mean onto a percentage where
//! the resting reading is 0 % and one volt of sensor swing below it is 100 %.
//!
//! The sensor voltage *drops* as the vehicle climbs, hence the inverted mapping.

use crate::error::CalibrationError;

/// Fixed-capacity ring holding the `N` most recent raw samples.
#[derive(Clone, Debug)]
pub struct SampleBuffer<const N: usize> {
    slots: [u16; N],
    write: usize,
}

impl<const N: usize> SampleBuffer<N> {
    pub const fn new() -> Self {
        Self {
            slots: [0; N],
            write: 0,
        }
    }

    /// Overwrite the oldest slot.
    #[inline]
    pub fn push(&mut self, raw: u16) {
        self.slots[self.write] = raw;
        self.write = (self.write + 1) % N;
    }

    /// Rounded mean of all `N` slots, `(2*sum + N) / (2*N)`.
    pub fn mean(&self) -> i32 {
        let sum: i32 = self.slots.iter().map(|&s| i32::from(s)).sum();
        let n = N as i32;
        (2 * sum + n) / (2 * n)
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-point calibration: resting (landed) reading and the reading at full altitude.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AltitudeCalibration {
    resting: i32,
    min: i32,
}

impl AltitudeCalibration {
    /// Calibrate from the resting reading; the minimum sits `one_volt_drop` below it.
    pub fn new(resting: i32, one_volt_drop: i32) -> Result<Self, CalibrationError> {
        let min = resting - one_volt_drop;
        if resting <= min {
            return Err(CalibrationError::DegenerateSpan { resting, min });
        }
        Ok(Self { resting, min })
    }

    #[inline]
    pub fn resting(&self) -> i32 {
        self.resting
    }

    #[inline]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// `100 - ((mean - min) * 100) / (resting - min)` with truncating division.
    ///
    /// Not clamped: readings above rest or below the minimum give values outside `0..=100`.
    #[inline]
    pub fn percent(&self, mean: i32) -> i32 {
        100 - ((mean - self.min) * 100) / (self.resting - self.min)
    }
}

/// Result of one altitude task run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AltitudeReading {
    pub mean: i32,
    /// `None` until calibrated.
    pub percent: Option<i32>,
    /// True only on the run that performed calibration.
    pub calibrated_now: bool,
}

/// Buffer + calibration + last computed percentage.
#[derive(Clone, Debug)]
pub struct AltitudeEstimator<const N: usize> {
    buffer: SampleBuffer<N>,
    sample_count: u32,
    warmup_samples: u32,
    one_volt_drop: i32,
    calibration: Option<AltitudeCalibration>,
    percent: i32,
    out_of_range: bool,
}

impl<const N: usize> AltitudeEstimator<N> {
    pub const fn new(warmup_samples: u32, one_volt_drop: i32) -> Self {
        Self {
            buffer: SampleBuffer::new(),
            sample_count: 0,
            warmup_samples,
            one_volt_drop,
            calibration: None,
            percent: 0,
            out_of_range: false,
        }
    }

    /// Record one conversion result. Called from the sample-ready interrupt.
    #[inline]
    pub fn push_sample(&mut self, raw: u16) {
        self.buffer.push(raw);
        self.sample_count = self.sample_count.saturating_add(1);
    }

    /// Average the buffer, calibrating on the first eligible run.
    ///
    /// Calibration waits until more than `warmup_samples` samples have arrived and the mean is
    /// non-zero. A rejected calibration is reported and retried on the next run.
    pub fn compute_mean_altitude(&mut self) -> Result<AltitudeReading, CalibrationError> {
        let mean = self.buffer.mean();
        let mut calibrated_now = false;

        if self.calibration.is_none() && self.sample_count > self.warmup_samples && mean != 0 {
            let cal = AltitudeCalibration::new(mean, self.one_volt_drop)?;
            log::info!(
                "altitude calibrated: resting={} min={}",
                cal.resting(),
                cal.min()
            );
            self.calibration = Some(cal);
            calibrated_now = true;
        }

        let percent = self.calibration.map(|cal| {
            let p = cal.percent(mean);
            self.track_range(p);
            self.percent = p;
            p
        });

        Ok(AltitudeReading {
            mean,
            percent,
            calibrated_now,
        })
    }

    fn track_range(&mut self, percent: i32) {
        let outside = !(0..=100).contains(&percent);
        if outside && !self.out_of_range {
            log::warn!("altitude {}% outside calibrated span", percent);
        }
        self.out_of_range = outside;
    }

    /// Last computed altitude, 0 before calibration.
    #[inline]
    pub fn percent(&self) -> i32 {
        self.percent
    }

    #[inline]
    pub fn calibration(&self) -> Option<AltitudeCalibration> {
        self.calibration
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    #[inline]
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    #[inline]
    pub fn mean(&self) -> i32 {
        self.buffer.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_rounds_half_up() {
        let mut b = SampleBuffer::<4>::new();
        for s in [1, 2, 2, 2] {
            b.push(s);
        }
        // 7 / 4 = 1.75
        assert_eq!(b.mean(), 2);

        let mut b = SampleBuffer::<4>::new();
        for s in [1, 1, 2, 2] {
            b.push(s);
        }
        // 1.5 rounds up
        assert_eq!(b.mean(), 2);
    }

    #[test]
    fn mean_covers_only_latest_samples() {
        let mut b = SampleBuffer::<20>::new();
        for _ in 0..20 {
            b.push(4000);
        }
        for i in 0..20u16 {
            b.push(1000 + i);
        }
        // 1000..=1019 averages to 1009.5
        assert_eq!(b.mean(), 1010);
    }

    #[test]
    fn mean_of_sliding_window() {
        let mut b = SampleBuffer::<5>::new();
        let samples = [10u16, 20, 30, 40, 50, 60, 70, 80, 90];
        for (i, &s) in samples.iter().enumerate() {
            b.push(s);
            if i + 1 >= 5 {
                let window = &samples[i + 1 - 5..=i];
                let sum: i32 = window.iter().map(|&v| i32::from(v)).sum();
                assert_eq!(b.mean(), (2 * sum + 5) / 10);
            }
        }
    }

    #[test]
    fn calibration_waits_for_warmup() {
        let mut est = AltitudeEstimator::<4>::new(10, 1228);
        for _ in 0..10 {
            est.push_sample(2500);
            let r = est.compute_mean_altitude().unwrap();
            assert!(!r.calibrated_now);
            assert_eq!(r.percent, None);
        }
        est.push_sample(2500);
        let r = est.compute_mean_altitude().unwrap();
        assert!(r.calibrated_now);
        assert_eq!(r.percent, Some(0));
        assert_eq!(
            est.calibration(),
            Some(AltitudeCalibration {
                resting: 2500,
                min: 1272
            })
        );

        est.push_sample(2000);
        let r = est.compute_mean_altitude().unwrap();
        assert!(!r.calibrated_now);
        assert!(est.is_calibrated());
        assert_eq!(est.calibration().unwrap().resting(), 2500);
    }

    #[test]
    fn calibration_skips_zero_mean() {
        let mut est = AltitudeEstimator::<4>::new(2, 1228);
        for _ in 0..8 {
            est.push_sample(0);
        }
        assert!(!est.compute_mean_altitude().unwrap().calibrated_now);
        assert!(!est.is_calibrated());
    }

    #[test]
    fn degenerate_span_is_rejected() {
        let mut est = AltitudeEstimator::<4>::new(0, 0);
        for _ in 0..4 {
            est.push_sample(2000);
        }
        assert_eq!(
            est.compute_mean_altitude(),
            Err(CalibrationError::DegenerateSpan {
                resting: 2000,
                min: 2000
            })
        );
        assert!(!est.is_calibrated());
    }

    #[test]
    fn percent_spans_one_volt() {
        let cal = AltitudeCalibration::new(2500, 1228).unwrap();
        assert_eq!(cal.percent(2500), 0);
        assert_eq!(cal.percent(1272), 100);
        // 614 below rest: 100 - (614 * 100) / 1228 = 100 - 50
        assert_eq!(cal.percent(1886), 50);
    }

    #[test]
    fn percent_is_not_clamped() {
        let cal = AltitudeCalibration::new(2500, 1228).unwrap();
        assert!(cal.percent(2600) < 0);
        assert!(cal.percent(1000) > 100);
    }
}
