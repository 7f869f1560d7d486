// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PID controller producing a saturated duty cycle.
//!
//! Works in `no_std` and does not allocate memory.

use micromath::F32Ext;

use crate::Duty;

/// PID controller with tunable gains, a baseline offset and output clamping.
#[derive(Clone, Debug)]
pub struct Pid {
    /// Proportional gain
    kp: f32,
    /// Integral gain
    ki: f32,
    /// Derivative gain
    kd: f32,

    /// Accumulated error, in error·seconds
    integral: f32,
    /// Error seen by the previous update (for derivative term)
    prev_error: f32,

    /// Integral anti-windup clamp, symmetric
    int_limit: f32,

    /// Output clamp
    out_min: Duty,
    out_max: Duty,

    /// Additive offset applied before clamping
    baseline: Duty,
}

impl Pid {
    /// Create a new PID controller.
    ///
    /// `kp`, `ki`, `kd` are the gain constants. Output defaults to the full `0..=100` duty range.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,

            integral: 0.0,
            prev_error: 0.0,

            int_limit: f32::MAX,

            out_min: 0,
            out_max: 100,

            baseline: 0,
        }
    }

    /// Set output limits.
    pub fn with_output_limits(mut self, min: Duty, max: Duty) -> Self {
        self.out_min = min;
        self.out_max = max;
        self
    }

    /// Clamp the integral to `±limit`.
    pub fn with_integral_limit(mut self, limit: f32) -> Self {
        self.int_limit = F32Ext::abs(limit);
        self
    }

    pub fn with_baseline(mut self, baseline: Duty) -> Self {
        self.baseline = baseline;
        self
    }

    /// Zero the integrator, keeping derivative history.
    #[inline]
    pub fn reset_integral(&mut self) {
        self.integral = 0.0;
    }

    /// Update the controller from a precomputed error.
    ///
    /// `error`: setpoint minus measurement, already wrapped where the axis needs it
    /// `dt`: timestep in seconds
    ///
    /// Returns a duty in [`out_min`, `out_max`].
    pub fn update_error(&mut self, error: f32, dt: f32) -> Duty {
        // ----- I term -----
        self.integral += error * dt;

        // Anti-windup clamp
        if self.integral > self.int_limit {
            self.integral = self.int_limit;
        }
        if self.integral < -self.int_limit {
            self.integral = -self.int_limit;
        }

        // ----- D term (on error, previous error starts at 0) -----
        let derivative = (error - self.prev_error) / dt;
        self.prev_error = error;

        let out = error * self.kp
            + self.integral * self.ki
            + derivative * self.kd
            + f32::from(self.baseline);

        // ----- Output clamp -----
        if out >= f32::from(self.out_max) {
            self.out_max
        } else if out > f32::from(self.out_min) {
            out as Duty
        } else {
            self.out_min
        }
    }

    /// Raise the baseline by `step`, never past `cap`.
    ///
    /// Returns `false` if the baseline was already at the cap.
    pub fn raise_baseline(&mut self, step: Duty, cap: Duty) -> bool {
        if self.baseline >= cap {
            return false;
        }
        self.baseline = self.baseline.saturating_add(step).min(cap);
        true
    }

    #[inline]
    pub fn set_baseline(&mut self, baseline: Duty) {
        self.baseline = baseline;
    }

    #[inline]
    pub fn baseline(&self) -> Duty {
        self.baseline
    }

    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    #[inline]
    pub fn kp(&self) -> f32 {
        self.kp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 800.0;

    fn main_pid() -> Pid {
        Pid::new(1.2, 0.2, 0.4)
            .with_output_limits(2, 80)
            .with_integral_limit(200.0)
            .with_baseline(10)
    }

    #[test]
    fn zero_error_outputs_baseline() {
        let mut pid = main_pid();
        assert_eq!(pid.update_error(0.0, DT), 10);
        assert_eq!(pid.update_error(0.0, DT), 10);
    }

    #[test]
    fn proportional_term_then_truncation() {
        let mut pid = Pid::new(1.2, 0.0, 0.0).with_baseline(10);
        // 10 * 1.2 + 10 = 22
        assert_eq!(pid.update_error(10.0, DT), 22);
        // 2.6 * 1.2 + 10 = 13.12
        assert_eq!(pid.update_error(2.6, DT), 13);
    }

    #[test]
    fn integral_is_clamped() {
        let mut pid = main_pid();
        for _ in 0..10_000 {
            pid.update_error(10_000.0, 1.0);
        }
        assert_eq!(pid.integral(), 200.0);
        for _ in 0..10_000 {
            pid.update_error(-10_000.0, 1.0);
        }
        assert_eq!(pid.integral(), -200.0);
    }

    #[test]
    fn output_never_leaves_duty_range() {
        let mut pid = main_pid();
        let errors = [1e6, -1e6, 0.0, 57.0, -300.0, 1e-3, 1e9, -1e9, 0.5];
        for _ in 0..50 {
            for &e in &errors {
                let duty = pid.update_error(e, DT);
                assert!((2..=80).contains(&duty), "duty {duty} for error {e}");
            }
        }
    }

    #[test]
    fn derivative_uses_previous_error() {
        let dt = 0.5;
        let mut pid = Pid::new(0.0, 0.0, 0.25).with_baseline(50);
        // (4 - 0) / 0.5 * 0.25 = 2
        assert_eq!(pid.update_error(4.0, dt), 52);
        // (14 - 4) / 0.5 * 0.25 = 5
        assert_eq!(pid.update_error(14.0, dt), 55);
        // Integral reset keeps history.
        pid.reset_integral();
        assert_eq!(pid.update_error(14.0, dt), 50);
    }

    #[test]
    fn first_update_takes_derivative_from_zero() {
        let mut pid = Pid::new(0.0, 0.0, 1.0).with_baseline(10);
        // 10 + (10 - 0) / 1 * 1
        assert_eq!(pid.update_error(10.0, 1.0), 20);
    }

    #[test]
    fn raise_baseline_stops_at_cap() {
        let mut pid = main_pid();
        let mut raised = 0;
        while pid.raise_baseline(1, 80) {
            raised += 1;
        }
        assert_eq!(raised, 70);
        assert_eq!(pid.baseline(), 80);
        assert!(!pid.raise_baseline(1, 80));
    }
}
