//! Row/column scanning of the key matrix.
//!
//! Rows are outputs, columns are inputs biased toward the inactive level.
//! A scan drives one row active at a time and reads every column; the first
//! active column found wins. Multiple simultaneous keys are not detected:
//! the lowest row, then the lowest column, is reported.

use core::fmt;

use crate::config::{ConfigError, KeypadConfig, Level, Pull};
use crate::Sample;

/// GPIO access needed by the scanner.
///
/// Configuration may fail (a pin may not support the requested pull);
/// reading and driving a configured pin may not.
pub trait PinDriver {
    /// Physical pin identifier.
    type Pin: Copy + PartialEq;
    type Error;

    fn configure_input(&mut self, pin: Self::Pin, pull: Pull) -> Result<(), Self::Error>;
    fn configure_output(&mut self, pin: Self::Pin, initial: Level) -> Result<(), Self::Error>;
    fn set_level(&mut self, pin: Self::Pin, level: Level);
    fn get_level(&self, pin: Self::Pin) -> Level;
}

/// Error while bringing up the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError<E> {
    Config(ConfigError),
    Pin(E),
}

impl<E> From<ConfigError> for InitError<E> {
    fn from(err: ConfigError) -> Self {
        InitError::Config(err)
    }
}

impl<E: fmt::Debug> fmt::Display for InitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Config(err) => write!(f, "invalid keypad configuration: {err}"),
            InitError::Pin(err) => write!(f, "pin setup failed: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for InitError<E> {}

pub struct Scanner<'a, D: PinDriver> {
    driver: D,
    config: KeypadConfig<'a, D::Pin>,
}

impl<'a, D: PinDriver> Scanner<'a, D> {
    /// Validate `config` and put every pin in its idle state.
    pub fn new(mut driver: D, config: KeypadConfig<'a, D::Pin>) -> Result<Self, InitError<D::Error>> {
        config.validate()?;

        let pull = config.column_pull();
        for &pin in config.col_pins {
            driver.configure_input(pin, pull).map_err(InitError::Pin)?;
        }
        let inactive = !config.active;
        for &pin in config.row_pins {
            driver.configure_output(pin, inactive).map_err(InitError::Pin)?;
        }

        log::debug!(
            "keypad: {}x{} matrix, active {:?}, columns pulled {:?}",
            config.rows(),
            config.cols(),
            config.active,
            pull
        );
        Ok(Self { driver, config })
    }

    /// Scan the whole matrix once.
    ///
    /// Returns the glyph of the first active intersection in row-major
    /// order, or `None`. Every row is inactive again when this returns.
    pub fn scan(&mut self) -> Sample {
        let active = self.config.active;

        for (row, &row_pin) in self.config.row_pins.iter().enumerate() {
            self.driver.set_level(row_pin, active);
            let hit = self
                .config
                .col_pins
                .iter()
                .position(|&col_pin| self.driver.get_level(col_pin) == active);
            self.driver.set_level(row_pin, !active);

            if let Some(col) = hit {
                return Some(self.config.keymap[row][col]);
            }
        }

        None
    }

    pub fn config(&self) -> &KeypadConfig<'a, D::Pin> {
        &self.config
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give the pin driver back.
    pub fn release(self) -> D {
        self.driver
    }
}
