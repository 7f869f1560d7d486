// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Application context for the rig.
//!
//! [`Rig`] owns every piece of flight state. The board layer calls the `on_*` methods from its
//! interrupt handlers and drives the cooperative loop with [`Rig::take_ready`] and
//! [`Rig::service`]. Each field has a single writing context, noted on the field; the firmware
//! wraps the whole context in one critical-section mutex.

use crate::altitude::AltitudeEstimator;
use crate::config::{Config, SAMPLE_BUFFER_LEN};
use crate::control::{Axis, MainRotor, TailRotor};
use crate::error::HeliResult;
use crate::flight::{
    Command, FlightEvent, FlightState, FlightStateMachine, RotorDemand, Setpoints, Transition,
};
use crate::input::{Button, ButtonEvents, SwitchChange};
use crate::scheduler::{Scheduler, Task};
use crate::status::{DisplayFrame, StatusLine, Telemetry};
use crate::yaw::Encoder;
use crate::Duty;

/// Operator controls, polled by the switch and button tasks.
pub trait OperatorInput {
    fn poll_switch(&mut self) -> SwitchChange;
    fn poll_buttons(&mut self) -> ButtonEvents;
}

/// What the board layer must do after servicing a task.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskOutput {
    None,
    /// Drive both rotors at these duties.
    Actuate {
        main: Duty,
        tail: Duty,
        frequency_hz: u32,
    },
    Status(StatusLine),
    Display(DisplayFrame),
}

/// Latest duty pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DutyPair {
    pub main: Duty,
    pub tail: Duty,
}

pub struct Rig {
    config: Config,

    /// Tick handler.
    scheduler: Scheduler,
    /// Samples from the conversion interrupt; mean and calibration from the altitude task.
    altitude: AltitudeEstimator<SAMPLE_BUFFER_LEN>,
    /// Quadrature and reference interrupts.
    encoder: Encoder,

    /// Tick handler, except integral resets and baseline changes from [`Transition`] commands.
    main: MainRotor,
    tail: TailRotor,
    /// Tick handler.
    control: DutyPair,

    /// Actuator task.
    applied: DutyPair,

    flight: FlightStateMachine,
    baseline_capped: bool,
}

impl Rig {
    /// Validate `config` and build a rig in [`FlightState::CalibratingSensor`].
    pub fn new(config: Config) -> HeliResult<Self> {
        config.validate()?;
        Ok(Self {
            scheduler: Scheduler::from_config(&config),
            altitude: AltitudeEstimator::new(config.warmup_samples, config.one_volt_drop),
            encoder: Encoder::new(config.edges_per_rotation, false),
            main: MainRotor::new(&config),
            tail: TailRotor::new(&config),
            control: DutyPair::default(),
            applied: DutyPair::default(),
            flight: FlightStateMachine::new(config.flight),
            baseline_capped: false,
            config,
        })
    }

    /// Start the encoder from the channel A level read at boot.
    pub fn with_encoder_level(mut self, a: bool) -> Self {
        self.encoder = Encoder::new(self.config.edges_per_rotation, a);
        self
    }

    /// Tick handler body: advance the scheduler and run both control loops.
    pub fn on_tick(&mut self) {
        self.scheduler.on_tick();

        if self.flight.state().runs_control() {
            let dt = self.config.dt();
            let sp = self.flight.setpoints();
            let altitude = self.altitude.percent() as f32;
            let yaw = self.encoder.angle_degrees();
            self.control = DutyPair {
                main: self.main.update(f32::from(sp.altitude), altitude, dt),
                tail: self.tail.update(f32::from(sp.yaw), yaw, dt),
            };
        }

        let t = self.flight.handle(FlightEvent::Tick {
            reference_seen: self.encoder.reference_seen(),
        });
        self.apply(&t);
    }

    /// Conversion-complete interrupt body.
    #[inline]
    pub fn on_sample(&mut self, raw: u16) {
        self.altitude.push_sample(raw);
    }

    /// Quadrature edge interrupt body.
    #[inline]
    pub fn on_quadrature_edge(&mut self, a: bool, b: bool) {
        self.encoder.on_quadrature_edge(a, b);
    }

    /// Reference marker interrupt body.
    pub fn on_reference_pulse(&mut self) {
        if self.encoder.on_reference_pulse() {
            let t = self.flight.handle(FlightEvent::YawReferenced);
            self.apply(&t);
        }
    }

    /// Next ready task in dispatch order, flag cleared.
    #[inline]
    pub fn take_ready(&mut self) -> Option<Task> {
        self.scheduler.take_ready()
    }

    /// Run one task to completion.
    pub fn service(&mut self, task: Task, input: &mut impl OperatorInput) -> TaskOutput {
        match task {
            Task::Switch => {
                let change = input.poll_switch();
                if change != SwitchChange::Unchanged {
                    self.dispatch(FlightEvent::Switch(change));
                }
                TaskOutput::None
            }
            Task::Buttons => {
                let events = input.poll_buttons();
                if self.flight.state().accepts_buttons() {
                    for button in Button::ALL {
                        if events.is_pushed(button) {
                            self.dispatch(FlightEvent::Button(button));
                        }
                    }
                }
                TaskOutput::None
            }
            Task::Actuators => self.actuate(),
            Task::Altitude => {
                match self.altitude.compute_mean_altitude() {
                    Ok(reading) if reading.calibrated_now => {
                        self.dispatch(FlightEvent::SensorCalibrated)
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("{}", e),
                }
                TaskOutput::None
            }
            Task::Status => {
                if !self.flight.state().reports_status() {
                    return TaskOutput::None;
                }
                TaskOutput::Status(StatusLine::format(&self.telemetry()))
            }
            Task::Calibration => {
                if self.flight.state() == FlightState::CalibratingAltitudeBaseline {
                    self.dispatch(FlightEvent::BaselineSearch {
                        altitude_percent: self.altitude.percent(),
                        tail_duty: self.control.tail,
                    });
                }
                TaskOutput::None
            }
            Task::Display => {
                if !self.flight.state().reports_status() {
                    return TaskOutput::None;
                }
                TaskOutput::Display(DisplayFrame::format(&self.telemetry()))
            }
        }
    }

    fn actuate(&mut self) -> TaskOutput {
        let demand = self
            .flight
            .state()
            .actuator_demand(self.config.flight.yaw_seek_tail_duty);
        let resolve = |d: RotorDemand, control: Duty| match d {
            RotorDemand::Off => 0,
            RotorDemand::Control => control,
            RotorDemand::Fixed(duty) => duty,
        };
        self.applied = DutyPair {
            main: resolve(demand.main, self.control.main),
            tail: resolve(demand.tail, self.control.tail),
        };

        self.dispatch(FlightEvent::ActuatorTick {
            yaw_deg: self.encoder.angle_degrees(),
            altitude_percent: self.altitude.percent(),
        });

        TaskOutput::Actuate {
            main: self.applied.main,
            tail: self.applied.tail,
            frequency_hz: self.config.pwm_frequency_hz,
        }
    }

    fn dispatch(&mut self, event: FlightEvent) {
        let t = self.flight.handle(event);
        self.apply(&t);
    }

    fn apply(&mut self, t: &Transition) {
        for command in &t.commands {
            match *command {
                Command::ResetIntegral(Axis::Altitude) => self.main.pid_mut().reset_integral(),
                Command::ResetIntegral(Axis::Yaw) => self.tail.pid_mut().reset_integral(),
                Command::RaiseMainBaseline => {
                    let step = self.config.flight.baseline_search_step;
                    let cap = self.config.main.duty_max;
                    if !self.main.pid_mut().raise_baseline(step, cap) && !self.baseline_capped {
                        log::warn!("main baseline reached {}% without lift-off", cap);
                        self.baseline_capped = true;
                    }
                }
                Command::SeedTailBaseline(duty) => self.tail.pid_mut().set_baseline(duty),
            }
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            setpoints: self.flight.setpoints(),
            yaw_deg: self.encoder.angle_degrees(),
            altitude_percent: self.altitude.percent(),
            main_duty: self.applied.main,
            tail_duty: self.applied.tail,
            state: self.flight.state(),
        }
    }

    #[inline]
    pub fn state(&self) -> FlightState {
        self.flight.state()
    }

    #[inline]
    pub fn setpoints(&self) -> Setpoints {
        self.flight.setpoints()
    }

    #[inline]
    pub fn altitude_percent(&self) -> i32 {
        self.altitude.percent()
    }

    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.encoder.angle_degrees()
    }

    /// Latest PID outputs.
    #[inline]
    pub fn control(&self) -> DutyPair {
        self.control
    }

    /// Duties sent by the last actuator run.
    #[inline]
    pub fn applied(&self) -> DutyPair {
        self.applied
    }

    #[inline]
    pub fn main_baseline(&self) -> Duty {
        self.main.pid().baseline()
    }

    #[inline]
    pub fn tail_baseline(&self) -> Duty {
        self.tail.pid().baseline()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
