// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-period task scheduler driven by the hardware tick.
//!
//! The tick handler calls [`Scheduler::on_tick`]; the main loop polls ready flags with
//! [`Scheduler::take_ready`] and services each task to completion. Nothing here allocates and a
//! tick costs one pass over the task table.

use crate::config::Config;

/// Cooperative tasks, listed in the order the main loop services them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Switch,
    Buttons,
    Actuators,
    Altitude,
    Status,
    Calibration,
    Display,
}

impl Task {
    pub const COUNT: usize = 7;

    /// Dispatch order.
    pub const ALL: [Task; Task::COUNT] = [
        Task::Switch,
        Task::Buttons,
        Task::Actuators,
        Task::Altitude,
        Task::Status,
        Task::Calibration,
        Task::Display,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Countdown state of one task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    /// Ticks left before the task becomes ready again.
    delay: u32,
    ready: bool,
    period: u32,
}

impl ScheduledTask {
    /// A task that first becomes ready `period` ticks after start.
    ///
    /// A zero period is treated as one (ready every tick).
    pub const fn new(period: u32) -> Self {
        let period = if period == 0 { 1 } else { period };
        Self {
            delay: period - 1,
            ready: false,
            period,
        }
    }

    /// Advance by one tick.
    #[inline]
    fn tick(&mut self) {
        if self.delay == 0 {
            self.ready = true;
            self.delay = self.period - 1;
        } else {
            self.delay -= 1;
        }
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Ready-flag table for all [`Task`]s.
#[derive(Clone, Debug)]
pub struct Scheduler {
    tasks: [ScheduledTask; Task::COUNT],
}

impl Scheduler {
    /// Build from per-task periods given in [`Task::ALL`] order.
    pub fn new(periods: [u32; Task::COUNT]) -> Self {
        let mut tasks = [ScheduledTask::new(1); Task::COUNT];
        for (task, period) in Task::ALL.iter().zip(periods) {
            tasks[task.index()] = ScheduledTask::new(period);
        }
        Self { tasks }
    }

    /// Derive task periods from the configured tick and task rates.
    pub fn from_config(config: &Config) -> Self {
        let r = &config.rates;
        let p = |hz| config.period_ticks(hz);
        Self::new([
            p(r.switch_hz),
            p(r.buttons_hz),
            p(r.actuators_hz),
            p(r.altitude_hz),
            p(r.status_hz),
            p(r.calibration_hz),
            p(r.display_hz),
        ])
    }

    /// Tick handler body. Must not be re-entered.
    pub fn on_tick(&mut self) {
        for task in self.tasks.iter_mut() {
            task.tick();
        }
    }

    #[inline]
    pub fn is_ready(&self, task: Task) -> bool {
        self.tasks[task.index()].ready
    }

    #[inline]
    pub fn clear_ready(&mut self, task: Task) {
        self.tasks[task.index()].ready = false;
    }

    /// Clear and return the first ready task in dispatch order.
    pub fn take_ready(&mut self) -> Option<Task> {
        let task = Task::ALL.into_iter().find(|&t| self.is_ready(t))?;
        self.clear_ready(task);
        Some(task)
    }

    #[inline]
    pub fn task(&self, task: Task) -> &ScheduledTask {
        &self.tasks[task.index()]
    }
}
