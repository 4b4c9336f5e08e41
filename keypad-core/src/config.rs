//! Keypad configuration: pin assignment, keymap, polarity and timing.
//!
//! A configuration is fixed for the lifetime of the program. It is checked
//! once at startup with [`KeypadConfig::validate`] before any pin is touched.

use core::fmt;
use core::ops::Not;

/// Logical level of a pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Direction of the bias resistor on an input pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
}

impl Pull {
    /// The pull that holds an idle column at the inactive level.
    pub const fn opposing(active: Level) -> Pull {
        match active {
            Level::Low => Pull::Up,
            Level::High => Pull::Down,
        }
    }
}

/// Loop period and debounce threshold, both in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timing {
    /// Time between two scans.
    pub loop_period_ms: u16,
    /// How long a candidate key must be held before it is accepted.
    pub debounce_ms: u16,
}

impl Timing {
    pub const fn new(loop_period_ms: u16, debounce_ms: u16) -> Self {
        Self {
            loop_period_ms,
            debounce_ms,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(10, 40)
    }
}

/// Standard 4×4 membrane keypad.
pub static LAYOUT_4X4: [&[char]; 4] = [
    &['1', '2', '3', 'A'],
    &['4', '5', '6', 'B'],
    &['7', '8', '9', 'C'],
    &['*', '0', '#', 'D'],
];

/// Everything the scanner and the debouncer need to know about the keypad.
///
/// `P` is the pin identifier of the target's [`PinDriver`](crate::PinDriver).
#[derive(Debug, Clone, Copy)]
pub struct KeypadConfig<'a, P> {
    /// Output pins, one per keymap row, in scan order.
    pub row_pins: &'a [P],
    /// Input pins, one per keymap column.
    pub col_pins: &'a [P],
    /// `keymap[row][col]` is the glyph reported for that intersection.
    pub keymap: &'a [&'a [char]],
    /// Level that means "row selected" on outputs and "key pressed" on inputs.
    pub active: Level,
    pub timing: Timing,
}

impl<'a, P: PartialEq> KeypadConfig<'a, P> {
    /// Check that pin lists and keymap agree and the timing is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_pins.is_empty() || self.col_pins.is_empty() {
            return Err(ConfigError::EmptyMatrix);
        }
        if self.keymap.len() != self.row_pins.len() {
            return Err(ConfigError::RowCountMismatch {
                pins: self.row_pins.len(),
                keymap: self.keymap.len(),
            });
        }
        for (row, glyphs) in self.keymap.iter().enumerate() {
            if glyphs.len() != self.col_pins.len() {
                return Err(ConfigError::ColumnCountMismatch {
                    row,
                    pins: self.col_pins.len(),
                    keymap: glyphs.len(),
                });
            }
        }

        // Rows first, then columns, as one list.
        let count = self.row_pins.len() + self.col_pins.len();
        for index in 0..count {
            let pin = self.pin_at(index);
            if (0..index).any(|earlier| self.pin_at(earlier) == pin) {
                return Err(ConfigError::DuplicatePin { index });
            }
        }

        if self.timing.loop_period_ms == 0 {
            return Err(ConfigError::ZeroLoopPeriod);
        }
        Ok(())
    }

    fn pin_at(&self, index: usize) -> &P {
        match self.row_pins.get(index) {
            Some(pin) => pin,
            None => &self.col_pins[index - self.row_pins.len()],
        }
    }
}

impl<'a, P> KeypadConfig<'a, P> {
    /// Pull to apply on column inputs.
    pub fn column_pull(&self) -> Pull {
        Pull::opposing(self.active)
    }

    pub fn rows(&self) -> usize {
        self.row_pins.len()
    }

    pub fn cols(&self) -> usize {
        self.col_pins.len()
    }

    /// Whether `glyph` appears anywhere in the keymap.
    pub fn contains(&self, glyph: char) -> bool {
        self.keymap.iter().any(|row| row.contains(&glyph))
    }
}

/// Startup-time configuration fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No row pins or no column pins.
    EmptyMatrix,
    /// Keymap has a different number of rows than there are row pins.
    RowCountMismatch { pins: usize, keymap: usize },
    /// A keymap row has a different width than there are column pins.
    ColumnCountMismatch {
        row: usize,
        pins: usize,
        keymap: usize,
    },
    /// The pin at `index` (rows first, then columns) is already assigned.
    DuplicatePin { index: usize },
    /// A zero loop period never advances the debounce timer.
    ZeroLoopPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyMatrix => write!(f, "keypad needs at least one row and one column"),
            ConfigError::RowCountMismatch { pins, keymap } => {
                write!(f, "{pins} row pins but keymap has {keymap} rows")
            }
            ConfigError::ColumnCountMismatch { row, pins, keymap } => write!(
                f,
                "{pins} column pins but keymap row {row} has {keymap} keys"
            ),
            ConfigError::DuplicatePin { index } => {
                write!(f, "pin #{index} is assigned more than once")
            }
            ConfigError::ZeroLoopPeriod => write!(f, "loop period must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn config<'a>(rows: &'a [u8], cols: &'a [u8], keymap: &'a [&'a [char]]) -> KeypadConfig<'a, u8> {
        KeypadConfig {
            row_pins: rows,
            col_pins: cols,
            keymap,
            active: Level::Low,
            timing: Timing::default(),
        }
    }

    #[test]
    fn test_standard_layout_is_valid() {
        let cfg = config(&[18, 17, 16, 15], &[7, 6, 5, 4], &LAYOUT_4X4);
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.rows(), 4);
        assert_eq!(cfg.cols(), 4);
        assert!(cfg.contains('#'));
        assert!(!cfg.contains('E'));
    }

    #[test]
    fn test_row_count_mismatch() {
        let cfg = config(&[18, 17, 16], &[7, 6, 5, 4], &LAYOUT_4X4);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::RowCountMismatch { pins: 3, keymap: 4 })
        );
    }

    #[test]
    fn test_ragged_keymap() {
        let keymap: [&[char]; 2] = [&['1', '2'], &['3']];
        let cfg = config(&[1, 2], &[3, 4], &keymap);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ColumnCountMismatch {
                row: 1,
                pins: 2,
                keymap: 1
            })
        );
    }

    #[test]
    fn test_empty_matrix() {
        let cfg = config(&[], &[3, 4], &[]);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyMatrix));
    }

    #[test]
    fn test_pin_shared_between_row_and_column() {
        let keymap: [&[char]; 2] = [&['1', '2'], &['3', '4']];
        let cfg = config(&[1, 2], &[3, 1], &keymap);
        assert_eq!(cfg.validate(), Err(ConfigError::DuplicatePin { index: 3 }));
    }

    #[test]
    fn test_zero_loop_period() {
        let keymap: [&[char]; 1] = [&['x']];
        let mut cfg = config(&[1], &[2], &keymap);
        cfg.timing = Timing::new(0, 40);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLoopPeriod));
    }

    #[test]
    fn test_pull_opposes_active_level() {
        assert_eq!(Pull::opposing(Level::Low), Pull::Up);
        assert_eq!(Pull::opposing(Level::High), Pull::Down);
        assert_eq!(!Level::Low, Level::High);
    }
}
