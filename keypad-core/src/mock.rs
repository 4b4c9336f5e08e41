//! Simulated key matrix for tests.

use crate::config::{Level, Pull};
use crate::scanner::PinDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    UnsupportedPull(u8),
}

/// Switch matrix wired between `rows` and `cols`.
///
/// A column reads the active level when a pressed key connects it to a row
/// that is currently driven active; otherwise it reads what its pull gives.
pub struct MockMatrix {
    rows: Vec<u8>,
    cols: Vec<u8>,
    active: Level,
    pressed: Vec<(usize, usize)>,
    outputs: Vec<(u8, Level)>,
    inputs: Vec<(u8, Pull)>,
    activations: Vec<u8>,
    pull_down: bool,
}

impl MockMatrix {
    pub fn new(rows: &[u8], cols: &[u8], active: Level) -> Self {
        Self {
            rows: rows.to_vec(),
            cols: cols.to_vec(),
            active,
            pressed: Vec::new(),
            outputs: Vec::new(),
            inputs: Vec::new(),
            activations: Vec::new(),
            pull_down: true,
        }
    }

    pub fn press(&mut self, row: usize, col: usize) {
        self.pressed.push((row, col));
    }

    pub fn lift(&mut self, row: usize, col: usize) {
        self.pressed.retain(|&key| key != (row, col));
    }

    /// Behave like a part with pull-ups only.
    pub fn without_pull_down(&mut self) {
        self.pull_down = false;
    }

    pub fn output_level(&self, pin: u8) -> Option<Level> {
        self.outputs.iter().find(|(p, _)| *p == pin).map(|&(_, level)| level)
    }

    pub fn input_pull(&self, pin: u8) -> Option<Pull> {
        self.inputs.iter().find(|(p, _)| *p == pin).map(|&(_, pull)| pull)
    }

    /// Row pins in the order they were driven active.
    pub fn activations(&self) -> &[u8] {
        &self.activations
    }
}

impl PinDriver for MockMatrix {
    type Pin = u8;
    type Error = MockError;

    fn configure_input(&mut self, pin: u8, pull: Pull) -> Result<(), MockError> {
        if pull == Pull::Down && !self.pull_down {
            return Err(MockError::UnsupportedPull(pin));
        }
        self.inputs.push((pin, pull));
        Ok(())
    }

    fn configure_output(&mut self, pin: u8, initial: Level) -> Result<(), MockError> {
        self.outputs.push((pin, initial));
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: Level) {
        if level == self.active {
            self.activations.push(pin);
        }
        if let Some(slot) = self.outputs.iter_mut().find(|(p, _)| *p == pin) {
            slot.1 = level;
        }
    }

    fn get_level(&self, pin: u8) -> Level {
        let connected = self.pressed.iter().any(|&(row, col)| {
            self.cols[col] == pin && self.output_level(self.rows[row]) == Some(self.active)
        });
        match (connected, self.input_pull(pin)) {
            (true, _) => self.active,
            (false, Some(Pull::Up)) => Level::High,
            (false, Some(Pull::Down)) => Level::Low,
            (false, None) => !self.active,
        }
    }
}
