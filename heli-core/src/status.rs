// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry text: the UART status line and the four-line display frame.
//!
//! Both are formatted into fixed-capacity `heapless` strings. Text that does not fit is cut off,
//! never reported as an error.

use core::fmt::{self, Write};

use heapless::{Deque, String};

use crate::flight::{FlightState, Setpoints};
use crate::Duty;

/// Display width in characters.
pub const DISPLAY_COLUMNS: usize = 16;

const STATUS_CAPACITY: usize = 160;
const CONSOLE_FRAME_CAPACITY: usize = 96;

/// Snapshot of everything the telemetry outputs show.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub setpoints: Setpoints,
    pub yaw_deg: f32,
    pub altitude_percent: i32,
    pub main_duty: Duty,
    pub tail_duty: Duty,
    pub state: FlightState,
}

impl Telemetry {
    /// Yaw as printed, truncated toward zero.
    #[inline]
    fn yaw_whole(&self) -> i32 {
        self.yaw_deg as i32
    }
}

/// `fmt::Write` adapter that silently drops whatever exceeds the string capacity.
struct Clipped<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Clipped<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// One `|YAW: ... |Mode: ...` line for the serial console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine(String<STATUS_CAPACITY>);

impl StatusLine {
    pub fn format(t: &Telemetry) -> Self {
        let mut s = String::new();
        let _ = write!(
            Clipped(&mut s),
            "|YAW: S={:2} A={:2} |ALT: S={:2} A={:2} |PWM: M={:2} T={:2} |Mode: {}\r\n",
            t.setpoints.yaw,
            t.yaw_whole(),
            t.setpoints.altitude,
            t.altitude_percent,
            t.main_duty,
            t.tail_duty,
            t.state,
        );
        Self(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

pub type DisplayLine = String<DISPLAY_COLUMNS>;

/// Text for the four display rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFrame {
    pub lines: [DisplayLine; 4],
}

impl DisplayFrame {
    pub fn format(t: &Telemetry) -> Self {
        let mut lines: [DisplayLine; 4] = Default::default();
        let _ = write!(Clipped(&mut lines[0]), "PWM: M {:3}", t.main_duty);
        let _ = write!(Clipped(&mut lines[1]), "PWM: T {:3}", t.tail_duty);
        let _ = write!(Clipped(&mut lines[2]), "Altitude: {:3}%", t.altitude_percent);
        let _ = write!(Clipped(&mut lines[3]), "Angle = {:4}", t.yaw_whole());
        Self { lines }
    }

    /// The four rows on one console line: `|LCD: <row> | <row> | <row> | <row>\r\n`.
    pub fn console_line(&self) -> String<CONSOLE_FRAME_CAPACITY> {
        let mut s = String::new();
        let [a, b, c, d] = &self.lines;
        let _ = write!(Clipped(&mut s), "|LCD: {} | {} | {} | {}\r\n", a, b, c, d);
        s
    }
}

/// Append `bytes` to `queue` only if every byte fits. Returns whether they were queued.
pub fn enqueue_whole<const N: usize>(queue: &mut Deque<u8, N>, bytes: &[u8]) -> bool {
    if queue.capacity() - queue.len() < bytes.len() {
        return false;
    }
    for &b in bytes {
        let _ = queue.push_back(b);
    }
    true
}
