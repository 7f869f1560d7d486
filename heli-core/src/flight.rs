// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Flight state machine.
//!
//! All sequencing goes through [`FlightStateMachine::handle`]: it takes one [`FlightEvent`],
//! updates the state and operator setpoints, and returns a [`Transition`] listing the controller
//! side effects for the caller to apply. Nothing in here touches a PID directly, so every path
//! can be driven from tests.

use core::fmt;

use heapless::Vec;

use crate::config::FlightLimits;
use crate::control::Axis;
use crate::input::{Button, SwitchChange};
use crate::Duty;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlightState {
    /// Waiting for the altitude sensor to settle and calibrate.
    CalibratingSensor,
    WaitingForStart,
    /// Raising the main rotor baseline until the vehicle leaves the ground.
    CalibratingAltitudeBaseline,
    /// Holding altitude and turning until the yaw reference marker is seen.
    CalibratingYawReference,
    Flying,
    Landing,
    Landed,
}

impl FlightState {
    /// Label used on the status line.
    pub fn name(self) -> &'static str {
        match self {
            FlightState::CalibratingSensor => "Calibrating Sensor",
            FlightState::WaitingForStart => "Waiting For Switch",
            FlightState::CalibratingAltitudeBaseline => "Calibrating Altitude",
            FlightState::CalibratingYawReference => "Calibrating Yaw",
            FlightState::Flying => "Flying",
            FlightState::Landing => "Landing",
            FlightState::Landed => "Landed",
        }
    }

    /// Whether the PID loops run on the tick.
    #[inline]
    pub fn runs_control(self) -> bool {
        self != FlightState::CalibratingSensor
    }

    /// Whether the status and display tasks produce output.
    #[inline]
    pub fn reports_status(self) -> bool {
        self != FlightState::CalibratingSensor
    }

    #[inline]
    pub fn accepts_buttons(self) -> bool {
        self == FlightState::Flying
    }

    /// What each rotor should be driven with in this state.
    pub fn actuator_demand(self, yaw_seek_tail_duty: Duty) -> ActuatorDemand {
        use RotorDemand::*;
        let (main, tail) = match self {
            FlightState::CalibratingSensor | FlightState::WaitingForStart | FlightState::Landed => {
                (Off, Off)
            }
            FlightState::CalibratingYawReference => (Control, Fixed(yaw_seek_tail_duty)),
            FlightState::CalibratingAltitudeBaseline | FlightState::Flying | FlightState::Landing => {
                (Control, Control)
            }
        };
        ActuatorDemand { main, tail }
    }
}

impl fmt::Display for FlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Duty source for one rotor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RotorDemand {
    Off,
    /// Latest PID output.
    Control,
    Fixed(Duty),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActuatorDemand {
    pub main: RotorDemand,
    pub tail: RotorDemand,
}

/// Operator setpoints. Altitude in percent `[0, 100]`, yaw in degrees `(-180, 180]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Setpoints {
    pub altitude: i16,
    pub yaw: i16,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlightEvent {
    /// The altitude sensor has its resting reading.
    SensorCalibrated,
    Switch(SwitchChange),
    Button(Button),
    /// Calibration task run with the current altitude and yaw-loop output.
    BaselineSearch { altitude_percent: i32, tail_duty: Duty },
    /// First yaw reference pulse since start-up.
    YawReferenced,
    /// Control tick.
    Tick { reference_seen: bool },
    /// Actuator task run with the current estimates.
    ActuatorTick { yaw_deg: f32, altitude_percent: i32 },
}

/// Side effect on the controllers, applied by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ResetIntegral(Axis),
    RaiseMainBaseline,
    SeedTailBaseline(Duty),
}

pub type Commands = Vec<Command, 4>;

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub from: FlightState,
    pub to: FlightState,
    pub commands: Commands,
}

impl Transition {
    #[inline]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Clone, Debug)]
pub struct FlightStateMachine {
    state: FlightState,
    setpoints: Setpoints,
    limits: FlightLimits,
}

impl FlightStateMachine {
    pub fn new(limits: FlightLimits) -> Self {
        Self {
            state: FlightState::CalibratingSensor,
            setpoints: Setpoints::default(),
            limits,
        }
    }

    #[inline]
    pub fn state(&self) -> FlightState {
        self.state
    }

    #[inline]
    pub fn setpoints(&self) -> Setpoints {
        self.setpoints
    }

    /// Apply one event. Events that do not apply to the current state are ignored.
    pub fn handle(&mut self, event: FlightEvent) -> Transition {
        let from = self.state;
        let mut commands = Commands::new();

        match (self.state, event) {
            (FlightState::CalibratingSensor, FlightEvent::SensorCalibrated) => {
                self.state = FlightState::WaitingForStart;
            }

            (FlightState::WaitingForStart, FlightEvent::Switch(SwitchChange::Up)) => {
                self.state = FlightState::CalibratingAltitudeBaseline;
            }
            (FlightState::Flying, FlightEvent::Switch(SwitchChange::Down)) => {
                self.state = FlightState::Landing;
                push_reset_both(&mut commands);
            }
            (FlightState::Landed, FlightEvent::Switch(SwitchChange::Up)) => {
                self.state = FlightState::Flying;
                push_reset_both(&mut commands);
            }

            (FlightState::Flying, FlightEvent::Button(button)) => {
                self.step_setpoint(button, &mut commands);
            }

            (
                FlightState::CalibratingAltitudeBaseline,
                FlightEvent::BaselineSearch {
                    altitude_percent,
                    tail_duty,
                },
            ) => {
                if altitude_percent <= self.limits.grounded_altitude {
                    log::debug!("baseline search: altitude {}%, raising main", altitude_percent);
                    push(&mut commands, Command::RaiseMainBaseline);
                    push(&mut commands, Command::ResetIntegral(Axis::Altitude));
                    push(&mut commands, Command::SeedTailBaseline(tail_duty));
                } else {
                    self.state = FlightState::CalibratingYawReference;
                }
            }

            (_, FlightEvent::YawReferenced) => {
                self.setpoints.yaw = 0;
                push(&mut commands, Command::ResetIntegral(Axis::Yaw));
            }

            (
                FlightState::CalibratingYawReference,
                FlightEvent::Tick {
                    reference_seen: true,
                },
            ) => {
                self.state = FlightState::Flying;
            }

            (
                FlightState::Landing,
                FlightEvent::ActuatorTick {
                    yaw_deg,
                    altitude_percent,
                },
            ) => self.land_step(yaw_deg, altitude_percent),

            (FlightState::Landed, FlightEvent::ActuatorTick { .. }) => {
                self.setpoints.altitude = 0;
            }

            _ => {}
        }

        if self.state != from {
            log::info!("flight state: {} -> {}", from, self.state);
        }

        Transition {
            from,
            to: self.state,
            commands,
        }
    }

    fn step_setpoint(&mut self, button: Button, commands: &mut Commands) {
        let sp = &mut self.setpoints;
        let limits = &self.limits;
        match button {
            Button::Up if sp.altitude < 100 => {
                sp.altitude = (sp.altitude + limits.altitude_step).min(100);
                push(commands, Command::ResetIntegral(Axis::Altitude));
            }
            Button::Down if sp.altitude > 0 => {
                sp.altitude = (sp.altitude - limits.altitude_step).max(0);
                push(commands, Command::ResetIntegral(Axis::Altitude));
            }
            Button::Left => {
                sp.yaw -= limits.yaw_step;
                if sp.yaw <= -180 {
                    sp.yaw += 360;
                }
            }
            Button::Right => {
                sp.yaw += limits.yaw_step;
                if sp.yaw > 180 {
                    sp.yaw -= 360;
                }
            }
            Button::Up | Button::Down => {}
        }
    }

    fn land_step(&mut self, yaw_deg: f32, altitude_percent: i32) {
        let limits = &self.limits;
        let sp = &mut self.setpoints;

        sp.yaw = 0;
        if yaw_deg > -limits.landing_yaw_tolerance && yaw_deg < limits.landing_yaw_tolerance {
            sp.altitude = (sp.altitude - limits.landing_ramp_step).max(0);
        }

        let yaw_settled =
            yaw_deg >= -limits.landed_yaw_tolerance && yaw_deg <= limits.landed_yaw_tolerance;
        if sp.altitude == 0
            && yaw_settled
            && altitude_percent <= limits.landed_altitude_tolerance
        {
            self.state = FlightState::Landed;
        }
    }
}

fn push_reset_both(commands: &mut Commands) {
    push(commands, Command::ResetIntegral(Axis::Altitude));
    push(commands, Command::ResetIntegral(Axis::Yaw));
}

#[inline]
fn push(commands: &mut Commands, command: Command) {
    // No event produces more commands than the vector holds.
    let _ = commands.push(command);
}
