// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Main and tail rotor control loops.
//!
//! [`MainRotor`] holds altitude, [`TailRotor`] holds yaw. Each owns its [`Pid`] and returns the
//! duty the actuator task should apply, clamped to that rotor's configured range.

use crate::config::{Config, RotorTuning};
use crate::control::{yaw_error, Pid};
use crate::Duty;

fn pid_for(tuning: &RotorTuning, duty_min: Duty) -> Pid {
    Pid::new(tuning.kp, tuning.ki, tuning.kd)
        .with_output_limits(duty_min, tuning.duty_max)
        .with_integral_limit(tuning.integral_limit)
        .with_baseline(tuning.baseline)
}

/// Altitude loop driving the main rotor.
#[derive(Clone, Debug)]
pub struct MainRotor {
    pid: Pid,
}

impl MainRotor {
    pub fn new(config: &Config) -> Self {
        Self {
            pid: pid_for(&config.main, config.duty_min),
        }
    }

    /// One control step. Both arguments are altitude percentages.
    #[inline]
    pub fn update(&mut self, setpoint: f32, altitude: f32, dt: f32) -> Duty {
        self.pid.update_error(setpoint - altitude, dt)
    }

    #[inline]
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    #[inline]
    pub fn pid_mut(&mut self) -> &mut Pid {
        &mut self.pid
    }
}

/// Yaw loop driving the tail rotor.
#[derive(Clone, Debug)]
pub struct TailRotor {
    pid: Pid,
    angle_range: f32,
}

impl TailRotor {
    pub fn new(config: &Config) -> Self {
        Self {
            pid: pid_for(&config.tail, config.duty_min),
            angle_range: config.proportional_angle_range,
        }
    }

    /// One control step. Both arguments are in degrees on `[-180, 180]`.
    pub fn update(&mut self, setpoint: f32, yaw: f32, dt: f32) -> Duty {
        let error = yaw_error(setpoint, yaw, self.pid.kp(), self.angle_range);
        self.pid.update_error(error, dt)
    }

    #[inline]
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    #[inline]
    pub fn pid_mut(&mut self) -> &mut Pid {
        &mut self.pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_rotor_rests_at_baseline() {
        let c = Config::DEFAULT;
        let mut main = MainRotor::new(&c);
        assert_eq!(main.update(0.0, 0.0, c.dt()), c.main.baseline);
    }

    #[test]
    fn main_rotor_saturates_to_its_range() {
        let c = Config::DEFAULT;
        let mut main = MainRotor::new(&c);
        assert_eq!(main.update(100.0, 0.0, c.dt()), c.main.duty_max);
        assert_eq!(main.update(0.0, 100.0, c.dt()), c.duty_min);
    }

    #[test]
    fn tail_rotor_saturates_to_its_range() {
        let c = Config::DEFAULT;
        let mut tail = TailRotor::new(&c);
        assert_eq!(tail.update(90.0, 0.0, c.dt()), c.tail.duty_max);
        assert_eq!(tail.update(-90.0, 0.0, c.dt()), c.duty_min);
    }

    #[test]
    fn tail_rotor_uses_seam_swing() {
        let c = Config::DEFAULT;
        let mut tail = TailRotor::new(&c);
        // Across the seam the error is pinned to -(kp * range): strongly negative effort.
        assert_eq!(tail.update(170.0, -170.0, c.dt()), c.duty_min);
    }
}
