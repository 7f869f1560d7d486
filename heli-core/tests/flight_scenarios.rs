// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use common::{Bench, HOVER_RAW};
use heli_core::input::{Button, SwitchChange};
use heli_core::{Config, FlightState};
use pretty_assertions::assert_eq;

const CALIBRATION_PERIOD: u32 = 200;

#[test]
fn boot_to_flying() {
    let mut bench = Bench::new();

    bench.run_until_state(FlightState::WaitingForStart, 2_000);
    assert!(bench.ticks > Config::DEFAULT.warmup_samples);
    assert_eq!(bench.rig.altitude_percent(), 0);

    bench.operator.switch.push_back(SwitchChange::Up);
    bench.run_until_state(FlightState::CalibratingAltitudeBaseline, 100);

    // Still on the ground: one baseline step per calibration run.
    for _ in 0..5 {
        let before = bench.rig.main_baseline();
        bench.run(CALIBRATION_PERIOD);
        assert_eq!(bench.rig.main_baseline(), before + 1);
        assert_eq!(bench.rig.state(), FlightState::CalibratingAltitudeBaseline);
    }
    assert_eq!(bench.rig.main_baseline(), Config::DEFAULT.main.baseline + 5);

    bench.raw_altitude = HOVER_RAW;
    bench.run_until_state(FlightState::CalibratingYawReference, 2 * CALIBRATION_PERIOD);
    assert!(bench.rig.altitude_percent() > 1);
    let lifted_baseline = bench.rig.main_baseline();

    bench.run(10);
    let &(_, tail) = bench.outputs.actuations.last().unwrap();
    assert_eq!(tail, Config::DEFAULT.flight.yaw_seek_tail_duty);
    assert_eq!(bench.rig.state(), FlightState::CalibratingYawReference);

    bench.rig.on_reference_pulse();
    bench.tick();
    assert_eq!(bench.rig.state(), FlightState::Flying);
    assert_eq!(bench.rig.main_baseline(), lifted_baseline);
    assert_eq!(bench.rig.setpoints().yaw, 0);
}

#[test]
fn early_reference_pulse_skips_yaw_seek() {
    let mut bench = Bench::new();
    bench.run_until_state(FlightState::WaitingForStart, 2_000);
    bench.rig.on_reference_pulse();

    bench.operator.switch.push_back(SwitchChange::Up);
    bench.raw_altitude = HOVER_RAW;
    bench.run_until_state(FlightState::CalibratingYawReference, 1_000);
    bench.tick();
    assert_eq!(bench.rig.state(), FlightState::Flying);
}

#[test]
fn buttons_move_setpoints_only_when_flying() {
    let mut bench = Bench::new();
    bench.run_until_state(FlightState::WaitingForStart, 2_000);
    bench.operator.buttons.extend([Button::Up, Button::Right]);
    bench.run(100);
    assert_eq!(bench.rig.setpoints().altitude, 0);
    assert_eq!(bench.rig.setpoints().yaw, 0);

    bench.fly();
    bench
        .operator
        .buttons
        .extend([Button::Up, Button::Up, Button::Left]);
    bench.run(26 * 4);
    assert_eq!(bench.rig.setpoints().altitude, 20);
    assert_eq!(bench.rig.setpoints().yaw, -15);
}

#[test]
fn landing_ramps_altitude_then_lands() {
    let mut bench = Bench::new();
    bench.fly();

    bench.operator.buttons.extend([Button::Up; 5]);
    bench.run(26 * 6);
    assert_eq!(bench.rig.setpoints().altitude, 50);
    assert_eq!(bench.rig.yaw_degrees(), 0.0);

    bench.operator.switch.push_back(SwitchChange::Down);
    bench.run_until_state(FlightState::Landing, 30);

    // The actuator task may already have stepped once on the switch tick.
    let mut seen: Vec<i16> = vec![50];
    loop {
        let sp = bench.rig.setpoints().altitude;
        if sp != *seen.last().unwrap() {
            seen.push(sp);
        }
        if bench.rig.state() != FlightState::Landing {
            break;
        }
        assert!(bench.ticks < 10_000, "landing never completed");
        bench.tick();
    }
    let expected: Vec<i16> = (0..=50).rev().collect();
    assert_eq!(seen, expected);
    assert_eq!(bench.rig.state(), FlightState::Landed);

    bench.run(4);
    assert_eq!(bench.outputs.actuations.last(), Some(&(0, 0)));
    assert_eq!(bench.rig.setpoints().altitude, 0);
}

#[test]
fn landing_holds_altitude_until_yaw_settles() {
    let mut bench = Bench::new();
    bench.fly();
    bench.operator.buttons.extend([Button::Up; 3]);
    bench.run(26 * 4);

    // About 20 degrees off the reference.
    for _ in 0..25 {
        bench.rig.on_quadrature_edge(false, true);
    }
    assert!(bench.rig.yaw_degrees() > 19.0);

    bench.operator.switch.push_back(SwitchChange::Down);
    bench.run_until_state(FlightState::Landing, 30);
    bench.run(100);
    assert_eq!(bench.rig.setpoints().altitude, 30);
    assert_eq!(bench.rig.setpoints().yaw, 0);
    assert_eq!(bench.rig.state(), FlightState::Landing);

    bench.rig.on_reference_pulse();
    bench.run_until_state(FlightState::Landed, 200);
}

#[test]
fn landed_switch_up_resumes_flight() {
    let mut bench = Bench::new();
    bench.fly();
    bench.operator.switch.push_back(SwitchChange::Down);
    bench.run_until_state(FlightState::Landed, 200);

    bench.operator.switch.push_back(SwitchChange::Up);
    bench.run_until_state(FlightState::Flying, 30);
    bench.run(4);
    let &(main, _) = bench.outputs.actuations.last().unwrap();
    assert!(main >= Config::DEFAULT.duty_min);
}

#[test]
fn status_line_reports_mode() {
    let mut bench = Bench::new();
    bench.run(400);
    // Still calibrating the sensor: nothing is reported.
    assert!(bench.outputs.status.is_empty());
    assert_eq!(bench.outputs.frames, 0);

    bench.fly();
    bench.run(400);
    let last = bench.outputs.status.last().unwrap();
    assert!(last.starts_with("|YAW: S= 0 A= 0 |ALT: S= 0 A= 5 |PWM: M="));
    assert!(last.ends_with("|Mode: Flying\r\n"));
    assert!(bench.outputs.frames > 0);
}
