// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! Closed-loop duty computation for the two rotors. Both loops run once per tick with a constant
//! `dt`, reading whatever altitude and yaw estimate is current.
//!
//! ## Modules
//!
//! - [`pid`] - PID controller with integral clamp, baseline offset and duty saturation.
//! - [`yaw_error`] - Shortest-path yaw error across the ±180° seam.
//! - [`rotor`] - Main (altitude) and tail (yaw) rotor loops built on [`Pid`].

pub mod pid;
pub mod rotor;
pub mod yaw_error;

pub use pid::Pid;
pub use rotor::{MainRotor, TailRotor};
pub use yaw_error::yaw_error;

/// Which control loop a command applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Altitude,
    Yaw,
}
