// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator switch and button edge detection.
//!
//! The board layer samples raw pin levels once per poll; these types turn them into debounced
//! change events.

/// Consecutive identical polls needed before a new level is accepted.
pub const DEBOUNCE_POLLS: u8 = 3;

/// Debounced single-line level.
#[derive(Copy, Clone, Debug)]
pub struct Debouncer {
    level: bool,
    count: u8,
}

impl Debouncer {
    pub const fn new(initial: bool) -> Self {
        Self {
            level: initial,
            count: 0,
        }
    }

    /// Feed one raw poll. Returns the new level when it has just been accepted.
    pub fn update(&mut self, raw: bool) -> Option<bool> {
        if raw == self.level {
            self.count = 0;
            return None;
        }
        self.count += 1;
        if self.count < DEBOUNCE_POLLS {
            return None;
        }
        self.count = 0;
        self.level = raw;
        Some(raw)
    }

    #[inline]
    pub fn level(&self) -> bool {
        self.level
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwitchChange {
    Up,
    Down,
    Unchanged,
}

/// Flight switch: up arms the rig, down lands it.
#[derive(Copy, Clone, Debug)]
pub struct SwitchInput {
    debouncer: Debouncer,
}

impl SwitchInput {
    /// `up` is the switch position read at start-up.
    pub const fn new(up: bool) -> Self {
        Self {
            debouncer: Debouncer::new(up),
        }
    }

    pub fn update(&mut self, up: bool) -> SwitchChange {
        match self.debouncer.update(up) {
            Some(true) => SwitchChange::Up,
            Some(false) => SwitchChange::Down,
            None => SwitchChange::Unchanged,
        }
    }

    #[inline]
    pub fn is_up(&self) -> bool {
        self.debouncer.level()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Left, Button::Right];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Pushed,
    Released,
    NoChange,
}

/// Result of one poll of all buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonEvents([ButtonState; 4]);

impl ButtonEvents {
    pub const NONE: ButtonEvents = ButtonEvents([ButtonState::NoChange; 4]);

    /// Events with only `button` pushed.
    pub fn pushed(button: Button) -> Self {
        let mut states = [ButtonState::NoChange; 4];
        states[button.index()] = ButtonState::Pushed;
        Self(states)
    }

    #[inline]
    pub fn state(&self, button: Button) -> ButtonState {
        self.0[button.index()]
    }

    #[inline]
    pub fn is_pushed(&self, button: Button) -> bool {
        self.state(button) == ButtonState::Pushed
    }
}

/// The four setpoint buttons.
///
/// Each button has its own released level: some are wired active-high, some active-low.
#[derive(Copy, Clone, Debug)]
pub struct ButtonInputs {
    lines: [Debouncer; 4],
    released_levels: [bool; 4],
}

impl ButtonInputs {
    /// `released_levels` are the raw levels of Up, Down, Left, Right when not pressed.
    pub const fn new(released_levels: [bool; 4]) -> Self {
        Self {
            lines: [
                Debouncer::new(released_levels[0]),
                Debouncer::new(released_levels[1]),
                Debouncer::new(released_levels[2]),
                Debouncer::new(released_levels[3]),
            ],
            released_levels,
        }
    }

    /// Feed one raw poll of Up, Down, Left, Right.
    pub fn update(&mut self, raw: [bool; 4]) -> ButtonEvents {
        let mut states = [ButtonState::NoChange; 4];
        for (i, state) in states.iter_mut().enumerate() {
            if let Some(level) = self.lines[i].update(raw[i]) {
                *state = if level == self.released_levels[i] {
                    ButtonState::Released
                } else {
                    ButtonState::Pushed
                };
            }
        }
        ButtonEvents(states)
    }
}
