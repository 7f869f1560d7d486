// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host test bench: a simulated board around a [`Rig`].

#![allow(dead_code)]

use std::collections::VecDeque;

use heli_core::input::{Button, ButtonEvents, SwitchChange};
use heli_core::{Config, FlightState, Rig, Task, TaskOutput};

/// Resting altitude sensor reading used by the scenarios.
pub const RESTING_RAW: u16 = 2500;
/// Reading a little above the ground: 5 % with the default one-volt drop.
pub const HOVER_RAW: u16 = 2450;

/// Operator controls scripted by the test.
#[derive(Default)]
pub struct Operator {
    pub switch: VecDeque<SwitchChange>,
    pub buttons: VecDeque<Button>,
}

impl heli_core::OperatorInput for Operator {
    fn poll_switch(&mut self) -> SwitchChange {
        self.switch.pop_front().unwrap_or(SwitchChange::Unchanged)
    }

    fn poll_buttons(&mut self) -> ButtonEvents {
        self.buttons
            .pop_front()
            .map(ButtonEvents::pushed)
            .unwrap_or(ButtonEvents::NONE)
    }
}

/// Everything that left the rig during a run.
#[derive(Default)]
pub struct Outputs {
    pub actuations: Vec<(u8, u8)>,
    pub status: Vec<String>,
    pub frames: usize,
}

pub struct Bench {
    pub rig: Rig,
    pub operator: Operator,
    /// Value the simulated sensor returns on each conversion.
    pub raw_altitude: u16,
    pub outputs: Outputs,
    pub ticks: u32,
    pub serviced: Vec<(u32, Task)>,
}

impl Bench {
    pub fn new() -> Self {
        Self::with_config(Config::DEFAULT)
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            rig: Rig::new(config).unwrap(),
            operator: Operator::default(),
            raw_altitude: RESTING_RAW,
            outputs: Outputs::default(),
            ticks: 0,
            serviced: Vec::new(),
        }
    }

    /// One tick: a conversion, the tick handler, then every ready task.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.rig.on_sample(self.raw_altitude);
        self.rig.on_tick();
        while let Some(task) = self.rig.take_ready() {
            self.serviced.push((self.ticks, task));
            match self.rig.service(task, &mut self.operator) {
                TaskOutput::None => {}
                TaskOutput::Actuate { main, tail, .. } => self.outputs.actuations.push((main, tail)),
                TaskOutput::Status(line) => self.outputs.status.push(line.as_str().to_owned()),
                TaskOutput::Display(_) => self.outputs.frames += 1,
            }
        }
    }

    pub fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Tick until `done` holds; panics after `limit` ticks.
    pub fn run_until(&mut self, limit: u32, mut done: impl FnMut(&Rig) -> bool) {
        for _ in 0..limit {
            if done(&self.rig) {
                return;
            }
            self.tick();
        }
        assert!(done(&self.rig), "condition not reached in {limit} ticks");
    }

    pub fn run_until_state(&mut self, state: FlightState, limit: u32) {
        self.run_until(limit, |rig| rig.state() == state);
    }

    /// Boot, calibrate, arm, lift off and find the yaw reference.
    pub fn fly(&mut self) {
        self.run_until_state(FlightState::WaitingForStart, 2_000);
        self.operator.switch.push_back(SwitchChange::Up);
        self.run_until_state(FlightState::CalibratingAltitudeBaseline, 100);
        self.raw_altitude = HOVER_RAW;
        self.run_until_state(FlightState::CalibratingYawReference, 1_000);
        self.rig.on_reference_pulse();
        self.run_until_state(FlightState::Flying, 10);
    }
}
