//! Compile-time keypad configuration for the Teensy 2.0.
//!
//! Standard 4×4 membrane keypad, rows on PB0-PB3 and columns on
//! PF0, PF1, PF4, PF5. Rows are driven low to select them, so columns use
//! the internal pull-ups.

use keypad_core::{KeypadConfig, Level, Timing, LAYOUT_4X4};

use crate::pins::{Pin, PB0, PB1, PB2, PB3, PF0, PF1, PF4, PF5};

/// Scan loop period.
pub const LOOP_PERIOD_MS: u16 = 10;
/// A key must read the same after this long to be accepted.
pub const DEBOUNCE_MS: u16 = 40;
/// Keypad polarity.
pub const ACTIVE: Level = Level::Low;

/// Row pins, top to bottom.
pub static ROW_PINS: [Pin; 4] = [PB0, PB1, PB2, PB3];
/// Column pins, left to right.
pub static COL_PINS: [Pin; 4] = [PF0, PF1, PF4, PF5];

pub fn config() -> KeypadConfig<'static, Pin> {
    KeypadConfig {
        row_pins: &ROW_PINS,
        col_pins: &COL_PINS,
        keymap: &LAYOUT_4X4,
        active: ACTIVE,
        timing: Timing::new(LOOP_PERIOD_MS, DEBOUNCE_MS),
    }
}
