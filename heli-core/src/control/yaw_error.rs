// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Yaw error on the circular `[-180, 180]` domain.
//!
//! Plain `setpoint - yaw` jumps by 360° when the vehicle crosses the seam, which would spin the
//! tail rotor the wrong way. The branches below are checked in order and the first match wins.

/// Error between a yaw setpoint and the measured yaw, both in degrees.
///
/// `kp` is the yaw proportional gain and `range` the proportional angle range; their product
/// bounds the swing used near the seam.
pub fn yaw_error(setpoint: f32, yaw: f32, kp: f32, range: f32) -> f32 {
    let swing = kp * range;

    if (360.0 + yaw - setpoint) < (setpoint - yaw) {
        // The long way round is shorter: push with the full negative swing.
        -swing
    } else if setpoint < 0.0 && setpoint - swing <= -180.0 && yaw + swing > 180.0 {
        360.0 - yaw + setpoint
    } else if yaw < setpoint - 180.0 {
        let yaw = 180.0 - setpoint;
        setpoint - yaw
    } else if yaw > setpoint + 180.0 {
        let yaw = -180.0 + setpoint;
        setpoint - yaw
    } else {
        setpoint - yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KP: f32 = 4.0;
    const RANGE: f32 = 24.0;

    fn err(setpoint: f32, yaw: f32) -> f32 {
        yaw_error(setpoint, yaw, KP, RANGE)
    }

    #[test]
    fn plain_difference_away_from_seam() {
        assert_eq!(err(0.0, 0.0), 0.0);
        assert_eq!(err(30.0, 10.0), 20.0);
        assert_eq!(err(-45.0, 45.0), -90.0);
    }

    #[test]
    fn setpoint_zero_yaw_179_takes_short_path() {
        // -179° of error; the long way would be +181°.
        assert_eq!(err(0.0, 179.0), -179.0);
        assert_eq!(err(0.0, -179.0), 179.0);
    }

    #[test]
    fn long_way_shorter_forces_negative_swing() {
        // 360 + (-170) - 170 = 20 < 340
        assert_eq!(err(170.0, -170.0), -(KP * RANGE));
    }

    #[test]
    fn negative_setpoint_near_seam_wraps_through_180() {
        // setpoint - 96 <= -180 and yaw + 96 > 180
        assert_eq!(err(-170.0, 170.0), 360.0 - 170.0 - 170.0);
    }

    #[test]
    fn yaw_far_above_setpoint_is_reflected() {
        // Small swing keeps the second branch out of the way.
        assert_eq!(yaw_error(-100.0, 90.0, 0.1, 1.0), 180.0);
    }

    #[test]
    fn first_matching_branch_wins() {
        // Both the first and the third condition hold; the first decides.
        let (sp, yaw) = (179.0, -179.0);
        assert!((360.0 + yaw - sp) < (sp - yaw));
        assert!(yaw < sp - 180.0);
        assert_eq!(err(sp, yaw), -(KP * RANGE));
    }
}
