// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Heli Rig Firmware
//!
//! Board support for the tethered heli rig on an STM32F767ZI Nucleo board. Everything that
//! decides anything lives in `heli-core`; this crate moves bytes and pin levels in and out.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Peripheral wrappers: ADC, rotor PWM, yaw EXTI lines, USART, LEDs, operator inputs |
//! | [`logger`] | `log` backend and the serial output queue |
//!
//! ## Getting Started
//!
//! Flash the board:
//!
//! ```bash
//! cargo run -p heli-fw --target thumbv7em-none-eabihf --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod hw;
pub mod logger;
