// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator switch and buttons, polled by the main loop.

use heli_core::input::{ButtonEvents, ButtonInputs, SwitchChange, SwitchInput};
use heli_core::OperatorInput;

use crate::hw::pins::OperatorPins;

/// Raw levels of Up, Down, Left, Right while released.
const RELEASED_LEVELS: [bool; 4] = [false, false, true, true];

pub struct BoardInputs {
    pins: OperatorPins,
    switch: SwitchInput,
    buttons: ButtonInputs,
}

impl BoardInputs {
    /// Latch the current switch position so a switch left up at boot does not arm the rig.
    pub fn new(pins: OperatorPins) -> Self {
        let switch = SwitchInput::new(pins.switch.is_high());
        Self {
            pins,
            switch,
            buttons: ButtonInputs::new(RELEASED_LEVELS),
        }
    }

    fn button_levels(&self) -> [bool; 4] {
        [
            self.pins.up.is_high(),
            self.pins.down.is_high(),
            self.pins.left.is_high(),
            self.pins.right.is_high(),
        ]
    }
}

impl OperatorInput for BoardInputs {
    fn poll_switch(&mut self) -> SwitchChange {
        self.switch.update(self.pins.switch.is_high())
    }

    fn poll_buttons(&mut self) -> ButtonEvents {
        let raw = self.button_levels();
        self.buttons.update(raw)
    }
}
