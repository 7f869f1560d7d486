// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use log::LevelFilter;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use heli_core::{Config, Rig, TaskOutput};
use heli_fw::hw::{
    exti, pins::RotorPins, pwm::RotorPwm, AltitudeAdc, BoardInputs, BoardPins, Led, Rotors,
    Usart,
};
use heli_fw::logger;

/// ADC1 channel wired to the altitude sensor (PA3).
const ALTITUDE_CHANNEL: u8 = 3;

static RIG: Mutex<RefCell<Option<Rig>>> = Mutex::new(RefCell::new(None));
static ALTITUDE_ADC: Mutex<RefCell<Option<AltitudeAdc>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    logger::init(LevelFilter::Info);

    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let BoardPins {
        leds,
        usart3,
        altitude: _altitude_pin,
        rotors: RotorPins {
            main: _main_pin,
            tail: _tail_pin,
        },
        yaw,
        operator,
    } = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF, dp.GPIOG);

    let mut heartbeat = Led::new(leds.blue);
    let mut fault = Led::new(leds.red);

    // USART3 (ST-LINK VCP)
    let usart_cfg = serial::Config {
        baud_rate: 9_600.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (usart3.tx, usart3.rx), &clocks, usart_cfg);
    let mut usart = Usart::new(serial);
    usart.write_str("\r\nheli rig\r\n");

    let config = Config::DEFAULT;

    // Rotors
    let timer_clock_hz = clocks.timclk1().raw();
    let mut rotors = Rotors {
        main: RotorPwm::tim4(dp.TIM4, timer_clock_hz, config.pwm_frequency_hz),
        tail: RotorPwm::tim3(dp.TIM3, timer_clock_hz, config.pwm_frequency_hz),
    };

    // Yaw sensor
    exti::init_yaw_lines(&dp.SYSCFG, &dp.EXTI);
    let initial_a = yaw.a.is_high();

    let mut inputs = BoardInputs::new(operator);

    let rig = match Rig::new(config) {
        Ok(rig) => rig.with_encoder_level(initial_a),
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            fault.on();
            loop {
                logger::drain(|b| usart.try_write_byte(b));
            }
        }
    };

    let adc = AltitudeAdc::new(dp.ADC1, ALTITUDE_CHANNEL);
    critical_section::with(|cs| {
        RIG.borrow_ref_mut(cs).replace(rig);
        ALTITUDE_ADC.borrow_ref_mut(cs).replace(adc);
    });

    // 800 Hz system tick
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.sysclk().raw() / config.tick_hz - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    unsafe {
        NVIC::unmask(pac::Interrupt::ADC);
        NVIC::unmask(pac::Interrupt::EXTI2);
        NVIC::unmask(pac::Interrupt::EXTI3);
        NVIC::unmask(pac::Interrupt::EXTI4);
    }

    log::info!("running at {} Hz tick", config.tick_hz);

    loop {
        let output = critical_section::with(|cs| {
            let mut rig = RIG.borrow_ref_mut(cs);
            let rig = rig.as_mut()?;
            let task = rig.take_ready()?;
            Some(rig.service(task, &mut inputs))
        });

        match output {
            Some(TaskOutput::Actuate {
                main,
                tail,
                frequency_hz,
            }) => rotors.drive(main, tail, frequency_hz),
            Some(TaskOutput::Status(line)) => {
                logger::push_line(line.as_bytes());
            }
            Some(TaskOutput::Display(frame)) => {
                heartbeat.toggle();
                logger::push_line(frame.console_line().as_bytes());
            }
            Some(TaskOutput::None) | None => {}
        }

        logger::drain(|b| usart.try_write_byte(b));
    }
}

#[exception]
fn SysTick() {
    critical_section::with(|cs| {
        if let Some(rig) = RIG.borrow_ref_mut(cs).as_mut() {
            rig.on_tick();
        }
        if let Some(adc) = ALTITUDE_ADC.borrow_ref(cs).as_ref() {
            adc.trigger();
        }
    });
}

#[interrupt]
fn ADC() {
    critical_section::with(|cs| {
        let sample = ALTITUDE_ADC
            .borrow_ref(cs)
            .as_ref()
            .and_then(AltitudeAdc::take_sample);
        if let (Some(raw), Some(rig)) = (sample, RIG.borrow_ref_mut(cs).as_mut()) {
            rig.on_sample(raw);
        }
    });
}

fn quadrature_edge(line: u8) {
    exti::clear_pending(line);
    let (a, b) = exti::read_quadrature();
    critical_section::with(|cs| {
        if let Some(rig) = RIG.borrow_ref_mut(cs).as_mut() {
            rig.on_quadrature_edge(a, b);
        }
    });
}

#[interrupt]
fn EXTI2() {
    quadrature_edge(exti::CHANNEL_A);
}

#[interrupt]
fn EXTI3() {
    quadrature_edge(exti::CHANNEL_B);
}

#[interrupt]
fn EXTI4() {
    exti::clear_pending(exti::REFERENCE);
    critical_section::with(|cs| {
        if let Some(rig) = RIG.borrow_ref_mut(cs).as_mut() {
            rig.on_reference_pulse();
        }
    });
}
