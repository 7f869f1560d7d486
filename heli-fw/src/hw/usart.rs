// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Debug console on USART3 (the ST-LINK virtual COM port).
//!
//! The main loop feeds it from the log queue with [`Usart::try_write_byte`], which never waits
//! on the transmitter. [`Usart::write_str`] blocks and is only used before interrupts start.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```
//! $ screen /dev/tty.usbmodem* 9600
//! ```

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    /// Queue one byte if the transmitter has room. Returns `false` when it is busy.
    #[inline]
    pub fn try_write_byte(&mut self, b: u8) -> bool {
        !matches!(self.tx.write(b), Err(nb::Error::WouldBlock))
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }
}
