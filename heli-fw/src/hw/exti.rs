// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! External interrupt routing for the yaw sensor on port E.
//!
//! - PE2: quadrature channel A, both edges (EXTI2)
//! - PE3: quadrature channel B, both edges (EXTI3)
//! - PE4: reference marker, active low, falling edge (EXTI4)

use stm32f7xx_hal::pac;

pub const CHANNEL_A: u8 = 2;
pub const CHANNEL_B: u8 = 3;
pub const REFERENCE: u8 = 4;

/// `EXTICRx` source value for port E.
const PORT_E: u32 = 4;

/// Route PE2/PE3/PE4 to their EXTI lines and unmask them.
///
/// The pins must already be configured as inputs.
pub fn init_yaw_lines(syscfg: &pac::SYSCFG, exti: &pac::EXTI) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

    // EXTICR1 holds lines 0..=3, EXTICR2 lines 4..=7; four bits per line.
    syscfg.exticr1.modify(|r, w| unsafe {
        let v = r.bits() & !((0xF << 8) | (0xF << 12));
        w.bits(v | (PORT_E << 8) | (PORT_E << 12))
    });
    syscfg
        .exticr2
        .modify(|r, w| unsafe { w.bits((r.bits() & !0xF) | PORT_E) });

    let quad = (1 << CHANNEL_A) | (1 << CHANNEL_B);
    let reference = 1 << REFERENCE;

    exti.rtsr.modify(|r, w| unsafe { w.bits(r.bits() | quad) });
    exti.ftsr
        .modify(|r, w| unsafe { w.bits(r.bits() | quad | reference) });
    exti.pr.write(|w| unsafe { w.bits(quad | reference) });
    exti.imr
        .modify(|r, w| unsafe { w.bits(r.bits() | quad | reference) });
}

/// Clear the pending flag of `line`. Call from its handler.
#[inline]
pub fn clear_pending(line: u8) {
    let exti = unsafe { &*pac::EXTI::ptr() };
    exti.pr.write(|w| unsafe { w.bits(1 << line) });
}

/// Levels of quadrature channels A and B.
#[inline]
pub fn read_quadrature() -> (bool, bool) {
    let gpioe = unsafe { &*pac::GPIOE::ptr() };
    let idr = gpioe.idr.read().bits();
    (idr & (1 << CHANNEL_A) != 0, idr & (1 << CHANNEL_B) != 0)
}
