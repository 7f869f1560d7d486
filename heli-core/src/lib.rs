// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Heli Rig Flight Core
//!
//! Hardware-independent estimation, control and sequencing for the tethered heli rig: a
//! rotorcraft constrained to climb and yaw, driven by a main rotor and a tail rotor.
//!
//! Everything in this crate is `no_std`, allocation-free and runs unchanged on the host, so the
//! whole control stack is exercised by `cargo test`. The `heli-fw` package wires it to the MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`scheduler`] | Tick-driven ready flags for the cooperative task loop |
//! | [`altitude`] | Sample ring buffer, two-point calibration, percentage altitude |
//! | [`yaw`] | Quadrature decoding and wrapped yaw angle |
//! | [`control`] | PID controllers for the main and tail rotors |
//! | [`flight`] | Flight state machine and operator setpoints |
//! | [`input`] | Edge-detected switch and button events |
//! | [`status`] | Status line and display frame formatting |
//! | [`rig`] | Application context tying the above to the tick and interrupt events |
//! | [`config`] | Rig constants and validation |
//! | [`error`] | Error types |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Build the firmware:
//!
//! ```bash
//! cargo build -p heli-fw --target thumbv7em-none-eabihf --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod altitude;
pub mod config;
pub mod control;
pub mod error;
pub mod flight;
pub mod input;
pub mod rig;
pub mod scheduler;
pub mod status;
pub mod yaw;

pub use config::Config;
pub use error::{CalibrationError, ConfigError, HeliError, HeliResult};
pub use flight::{FlightState, Setpoints};
pub use rig::{OperatorInput, Rig, TaskOutput};
pub use scheduler::{Scheduler, Task};

/// PWM duty cycle in whole percent.
pub type Duty = u8;
