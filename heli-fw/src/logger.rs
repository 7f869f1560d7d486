// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` backend and serial output queue.
//!
//! Records and status lines are written into one byte queue from whatever context produced them.
//! The main loop moves bytes from the queue to the console as fast as the transmitter accepts
//! them with [`drain`]. Lines are queued whole: a line that does not fit is dropped.

use core::cell::RefCell;
use core::fmt::{self, Write};

use critical_section::Mutex;
use heapless::{Deque, String};
use log::{LevelFilter, Log, Metadata, Record};

use heli_core::status::enqueue_whole;

const QUEUE_LEN: usize = 1024;
const RECORD_LEN: usize = 160;

static QUEUE: Mutex<RefCell<Deque<u8, QUEUE_LEN>>> = Mutex::new(RefCell::new(Deque::new()));

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut line: String<RECORD_LEN> = String::new();
        let formatted: fmt::Result = writeln!(
            line,
            "[{} {}] {}\r",
            record.level(),
            record.target(),
            record.args()
        );
        // Records longer than one line are dropped.
        if formatted.is_ok() {
            push_line(line.as_bytes());
        }
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;

pub fn init(level: LevelFilter) {
    log::set_logger(&LOGGER).ok();
    log::set_max_level(level);
}

/// Queue one complete line, such as a status line. Returns `false` if it did not fit.
pub fn push_line(bytes: &[u8]) -> bool {
    critical_section::with(|cs| {
        let mut queue = QUEUE.borrow_ref_mut(cs);
        enqueue_whole(&mut *queue, bytes)
    })
}

/// Hand queued bytes to `write` until the queue is empty or `write` returns `false`.
///
/// A byte refused by `write` stays at the front of the queue.
pub fn drain(mut write: impl FnMut(u8) -> bool) {
    loop {
        let sent = critical_section::with(|cs| {
            let mut queue = QUEUE.borrow_ref_mut(cs);
            match queue.front() {
                Some(&b) if write(b) => {
                    queue.pop_front();
                    true
                }
                _ => false,
            }
        });
        if !sent {
            break;
        }
    }
}
