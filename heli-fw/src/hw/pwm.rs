// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rotor PWM outputs on timer channel 1, configured through direct PAC register access.
//!
//! The main rotor uses TIM4_CH1 and the tail rotor TIM3_CH1. Each timer counts at 1 MHz, so a
//! 200 Hz output has 5000 counts per period.

use stm32f7xx_hal::pac;

use heli_core::Duty;

/// Counter clock after prescaling.
const COUNTER_HZ: u32 = 1_000_000;

/// Single-channel PWM output.
pub struct RotorPwm<TIM> {
    tim: TIM,
    timer_clock_hz: u32,
    frequency_hz: u32,
    period: u32,
}

impl<TIM> RotorPwm<TIM> {
    #[inline]
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }
}

macro_rules! rotor_pwm {
    ($TIM:ident, $ctor:ident, $timen:ident) => {
        impl RotorPwm<pac::$TIM> {
            /// Configure channel 1 as PWM mode 1 at `frequency_hz`, output enabled at 0 % duty.
            ///
            /// `timer_clock_hz` is the kernel clock of the timer (APB1 timer clock).
            pub fn $ctor(tim: pac::$TIM, timer_clock_hz: u32, frequency_hz: u32) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$timen().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                let psc = (timer_clock_hz / COUNTER_HZ).saturating_sub(1);
                tim.psc.write(|w| unsafe { w.bits(psc) });

                // OC1M = 110 (PWM mode 1), OC1PE = 1 (preload)
                tim.ccmr1_output().modify(|r, w| unsafe {
                    w.bits((r.bits() & !0x0001_00FF) | (0b110 << 4) | (1 << 3))
                });

                // CC1E, active high
                tim.ccer
                    .modify(|r, w| unsafe { w.bits((r.bits() & !0b1010) | 0b1) });

                let mut pwm = Self {
                    tim,
                    timer_clock_hz,
                    frequency_hz: 0,
                    period: 1,
                };
                pwm.set(frequency_hz, 0);

                // ARPE, then enable the counter
                pwm.tim
                    .cr1
                    .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 7)) });
                pwm.tim.cr1.modify(|_, w| w.cen().set_bit());

                pwm
            }

            /// Set output frequency and duty. The new values take effect at the next update event.
            pub fn set(&mut self, frequency_hz: u32, duty: Duty) {
                if frequency_hz != self.frequency_hz && frequency_hz > 0 {
                    let counter_hz = self.timer_clock_hz / (self.tim.psc.read().bits() + 1);
                    self.period = (counter_hz / frequency_hz).max(1);
                    self.frequency_hz = frequency_hz;
                    self.tim
                        .arr
                        .write(|w| unsafe { w.bits(self.period - 1) });
                    // Latch PSC/ARR now rather than at the next wrap.
                    self.tim.egr.write(|w| unsafe { w.bits(1) });
                }

                let duty = u32::from(duty.min(100));
                let compare = self.period * duty / 100;
                self.tim.ccr1().write(|w| unsafe { w.bits(compare) });
            }
        }
    };
}

rotor_pwm!(TIM4, tim4, tim4en);
rotor_pwm!(TIM3, tim3, tim3en);

/// Main and tail outputs.
pub struct Rotors {
    pub main: RotorPwm<pac::TIM4>,
    pub tail: RotorPwm<pac::TIM3>,
}

impl Rotors {
    #[inline]
    pub fn drive(&mut self, main: Duty, tail: Duty, frequency_hz: u32) {
        self.main.set(frequency_hz, main);
        self.tail.set(frequency_hz, tail);
    }
}
