// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rig constants.
//!
//! [`Config::DEFAULT`] holds the values the rig is tuned for. Every component reads its limits
//! from a [`Config`] so tests can shrink rates or thresholds without touching the algorithms.

use crate::error::ConfigError;
use crate::Duty;

/// Ring buffer capacity for altitude samples.
pub const SAMPLE_BUFFER_LEN: usize = 20;

/// Rates (Hz) of the cooperative tasks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaskRates {
    pub status_hz: u32,
    pub display_hz: u32,
    pub altitude_hz: u32,
    pub actuators_hz: u32,
    pub buttons_hz: u32,
    pub switch_hz: u32,
    pub calibration_hz: u32,
}

/// PID gains plus the limits applied to one rotor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotorTuning {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Integral error is clamped to `±integral_limit`.
    pub integral_limit: f32,
    /// Additive offset, in duty percent.
    pub baseline: Duty,
    pub duty_max: Duty,
}

/// Landing and operator-step parameters of the flight state machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlightLimits {
    pub altitude_step: i16,
    pub yaw_step: i16,
    /// Yaw must be strictly inside `±landing_yaw_tolerance` before the altitude ramp advances.
    pub landing_yaw_tolerance: f32,
    /// Yaw must be inside `±landed_yaw_tolerance` (inclusive) to declare the vehicle landed.
    pub landed_yaw_tolerance: f32,
    pub landed_altitude_tolerance: i32,
    pub landing_ramp_step: i16,
    /// Altitude at or below which the baseline search keeps raising the main duty.
    pub grounded_altitude: i32,
    pub baseline_search_step: Duty,
    pub yaw_seek_tail_duty: Duty,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub tick_hz: u32,
    pub rates: TaskRates,

    /// Samples that must arrive before the altitude sensor may calibrate.
    pub warmup_samples: u32,
    /// Raw ADC drop between resting and one volt of sensor swing (full altitude).
    pub one_volt_drop: i32,

    pub edges_per_rotation: i32,

    pub duty_min: Duty,
    pub pwm_frequency_hz: u32,
    pub main: RotorTuning,
    pub tail: RotorTuning,
    /// Angle span (degrees) used by the yaw seam correction.
    pub proportional_angle_range: f32,

    pub flight: FlightLimits,
}

impl Config {
    pub const DEFAULT: Config = Config {
        tick_hz: 800,
        rates: TaskRates {
            status_hz: 4,
            display_hz: 2,
            altitude_hz: 300,
            actuators_hz: 300,
            buttons_hz: 30,
            switch_hz: 30,
            calibration_hz: 4,
        },

        warmup_samples: 500,
        // 4095 / 4 * 1.2, truncated the way the integer readings are
        one_volt_drop: 1228,

        edges_per_rotation: 448,

        duty_min: 2,
        pwm_frequency_hz: 200,
        main: RotorTuning {
            kp: 1.2,
            ki: 0.2,
            kd: 0.4,
            integral_limit: 200.0,
            baseline: 10,
            duty_max: 80,
        },
        tail: RotorTuning {
            kp: 4.0,
            ki: 0.3,
            kd: 0.4,
            integral_limit: 200.0,
            baseline: 5,
            duty_max: 70,
        },
        proportional_angle_range: 24.0,

        flight: FlightLimits {
            altitude_step: 10,
            yaw_step: 15,
            landing_yaw_tolerance: 1.0,
            landed_yaw_tolerance: 3.0,
            landed_altitude_tolerance: 5,
            landing_ramp_step: 1,
            grounded_altitude: 1,
            baseline_search_step: 1,
            yaw_seek_tail_duty: 50,
        },
    };

    /// Control period in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    /// Ticks between activations of a task running at `rate_hz`.
    #[inline]
    pub fn period_ticks(&self, rate_hz: u32) -> u32 {
        self.tick_hz / rate_hz
    }

    /// Check every rate, duty and sensor constant for values the components cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let r = &self.rates;
        for rate_hz in [
            r.status_hz,
            r.display_hz,
            r.altitude_hz,
            r.actuators_hz,
            r.buttons_hz,
            r.switch_hz,
            r.calibration_hz,
        ] {
            if rate_hz == 0 || rate_hz > self.tick_hz {
                return Err(ConfigError::TaskRate {
                    rate_hz,
                    tick_hz: self.tick_hz,
                });
            }
        }

        for rotor in [&self.main, &self.tail] {
            if rotor.duty_max > 100 {
                return Err(ConfigError::DutyAboveFull(rotor.duty_max));
            }
            if rotor.duty_max <= self.duty_min {
                return Err(ConfigError::EmptyDutyRange {
                    min: self.duty_min,
                    max: rotor.duty_max,
                });
            }
            if rotor.integral_limit <= 0.0 {
                return Err(ConfigError::NonPositiveIntegralLimit);
            }
        }
        if self.flight.yaw_seek_tail_duty > 100 {
            return Err(ConfigError::DutyAboveFull(self.flight.yaw_seek_tail_duty));
        }

        if self.edges_per_rotation <= 0 {
            return Err(ConfigError::ZeroEdges);
        }
        if self.one_volt_drop <= 0 {
            return Err(ConfigError::NonPositiveVoltDrop);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::DEFAULT.validate(), Ok(()));
    }

    #[test]
    fn default_periods_match_rig_rates() {
        let c = Config::DEFAULT;
        assert_eq!(c.period_ticks(c.rates.status_hz), 200);
        assert_eq!(c.period_ticks(c.rates.display_hz), 400);
        assert_eq!(c.period_ticks(c.rates.altitude_hz), 2);
        assert_eq!(c.period_ticks(c.rates.buttons_hz), 26);
        assert_eq!(c.period_ticks(c.rates.calibration_hz), 200);
    }

    #[test]
    fn rejects_task_faster_than_tick() {
        let mut c = Config::DEFAULT;
        c.rates.altitude_hz = 1000;
        assert_eq!(
            c.validate(),
            Err(ConfigError::TaskRate {
                rate_hz: 1000,
                tick_hz: 800
            })
        );
    }

    #[test]
    fn rejects_inverted_duty_range() {
        let mut c = Config::DEFAULT;
        c.tail.duty_max = 2;
        assert_eq!(
            c.validate(),
            Err(ConfigError::EmptyDutyRange { min: 2, max: 2 })
        );
    }

    #[test]
    fn rejects_zero_volt_drop() {
        let mut c = Config::DEFAULT;
        c.one_volt_drop = 0;
        assert_eq!(c.validate(), Err(ConfigError::NonPositiveVoltDrop));
    }
}
