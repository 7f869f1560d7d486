// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the heli rig on the STM32F767ZI Nucleo board.

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpiob, gpiod, gpioe, gpiof, gpiog, Alternate, Analog, Floating, Input, Output,
        PullDown, PullUp, PushPull,
    },
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF, dp.GPIOG);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart3: Usart3Pins,
    pub altitude: gpioa::PA3<Analog>,
    pub rotors: RotorPins,
    pub yaw: YawPins,
    pub operator: OperatorPins,
}

pub struct LedPins {
    pub blue: gpiob::PB7<Output<PushPull>>, // LD2
    pub red: gpiob::PB14<Output<PushPull>>, // LD3
}

pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

pub struct RotorPins {
    /// TIM4_CH1
    pub main: gpiod::PD12<Alternate<2>>,
    /// TIM3_CH1
    pub tail: gpioa::PA6<Alternate<2>>,
}

/// Yaw sensor inputs, read by the EXTI handlers through the port E input register.
pub struct YawPins {
    pub a: gpioe::PE2<Input<Floating>>,
    pub b: gpioe::PE3<Input<Floating>>,
    pub reference: gpioe::PE4<Input<PullUp>>,
}

/// Flight switch and setpoint buttons.
pub struct OperatorPins {
    pub switch: gpiog::PG2<Input<PullDown>>,
    pub up: gpiof::PF12<Input<PullDown>>,
    pub down: gpiof::PF13<Input<PullDown>>,
    pub left: gpiof::PF14<Input<PullUp>>,
    pub right: gpiof::PF15<Input<PullUp>>,
}

impl BoardPins {
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
        gpiof: pac::GPIOF,
        gpiog: pac::GPIOG,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();
        let gpiog = gpiog.split();

        Self {
            leds: LedPins {
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            altitude: gpioa.pa3.into_analog(),

            rotors: RotorPins {
                main: gpiod.pd12.into_alternate::<2>(),
                tail: gpioa.pa6.into_alternate::<2>(),
            },

            yaw: YawPins {
                a: gpioe.pe2.into_floating_input(),
                b: gpioe.pe3.into_floating_input(),
                // Open-collector marker
                reference: gpioe.pe4.into_pull_up_input(),
            },

            // Up/Down idle low, Left/Right idle high.
            operator: OperatorPins {
                switch: gpiog.pg2.into_pull_down_input(),
                up: gpiof.pf12.into_pull_down_input(),
                down: gpiof.pf13.into_pull_down_input(),
                left: gpiof.pf14.into_pull_up_input(),
                right: gpiof.pf15.into_pull_up_input(),
            },
        }
    }
}
