// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-driven ADC1 sampling for the altitude sensor.
//!
//! The tick handler starts one conversion with [`AltitudeAdc::trigger`]; the end-of-conversion
//! interrupt collects it with [`AltitudeAdc::take_sample`].
//!
//! Example:
//! ```no_run
//! let adc = AltitudeAdc::new(dp.ADC1, 3);
//! adc.trigger();
//! ```

use stm32f7xx_hal::pac;

/// ADC1 configured for single conversions of one channel.
pub struct AltitudeAdc {
    adc: pac::ADC1,
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

impl AltitudeAdc {
    /// Power up ADC1 for 12-bit, right-aligned, software-triggered reads of `channel`.
    pub fn new(adc: pac::ADC1, channel: u8) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();

        // Power off to configure
        adc.cr2.modify(|_, w| w.adon().clear_bit());

        adc.cr1.modify(|_, w| w.res().bits(0b00).eocie().set_bit());
        adc.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Long sample time; the sensor output has a high source impedance.
        if channel <= 9 {
            let shift = 3 * u32::from(channel);
            adc.smpr2
                .modify(|r, w| unsafe { w.bits(r.bits() | (0b111 << shift)) });
        }

        // One conversion of `channel`
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc }
    }

    /// Start one conversion.
    #[inline]
    pub fn trigger(&self) {
        self.adc.cr2.modify(|_, w| w.swstart().set_bit());
    }

    /// Read a finished conversion, clearing the end-of-conversion flag.
    #[inline]
    pub fn take_sample(&self) -> Option<u16> {
        if self.adc.sr.read().eoc().bit_is_clear() {
            return None;
        }
        // Reading DR clears EOC.
        Some(self.adc.dr.read().data().bits() as u16)
    }
}
