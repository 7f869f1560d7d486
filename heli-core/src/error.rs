// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error types for configuration and sensor calibration.
//!
//! Actuator saturation is not represented here: clamping duty to its configured range is the
//! intended behavior, not a fault.

use thiserror::Error;

/// Rejected rig configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick rate must be non-zero")]
    ZeroTickRate,

    #[error("task rate {rate_hz} Hz is zero or above the {tick_hz} Hz tick")]
    TaskRate { rate_hz: u32, tick_hz: u32 },

    #[error("duty range {min}..={max} is empty")]
    EmptyDutyRange { min: u8, max: u8 },

    #[error("duty {0} exceeds 100 %")]
    DutyAboveFull(u8),

    #[error("encoder must have at least one edge per rotation")]
    ZeroEdges,

    #[error("one-volt drop must be positive")]
    NonPositiveVoltDrop,

    #[error("integral limit must be positive")]
    NonPositiveIntegralLimit,
}

/// Rejected two-point altitude calibration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("resting reading {resting} does not exceed minimum reading {min}")]
    DegenerateSpan { resting: i32, min: i32 },
}

/// Any error raised by the rig core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),
}

pub type HeliResult<T> = Result<T, HeliError>;
