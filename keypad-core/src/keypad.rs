//! The polling loop: scan, debounce, emit, sleep.

use crate::config::KeypadConfig;
use crate::debounce::Debouncer;
use crate::scanner::{InitError, PinDriver, Scanner};

/// Blocking sleep used between scans.
pub trait Delay {
    fn sleep_ms(&mut self, ms: u16);
}

/// Receives each confirmed key press.
pub trait KeySink {
    fn emit(&mut self, key: char);
}

/// A scanner and its debouncer, driven by one loop.
pub struct Keypad<'a, D: PinDriver> {
    scanner: Scanner<'a, D>,
    debouncer: Debouncer,
}

impl<'a, D: PinDriver> Keypad<'a, D> {
    pub fn new(driver: D, config: KeypadConfig<'a, D::Pin>) -> Result<Self, InitError<D::Error>> {
        let debouncer = Debouncer::new(config.timing);
        let scanner = Scanner::new(driver, config)?;
        Ok(Self { scanner, debouncer })
    }

    /// Scan once and feed the result to the debouncer.
    pub fn poll(&mut self) -> Option<char> {
        let sample = self.scanner.scan();
        self.debouncer.update(sample)
    }

    /// One loop iteration.
    pub fn tick(&mut self, delay: &mut impl Delay, sink: &mut impl KeySink) {
        if let Some(key) = self.poll() {
            sink.emit(key);
        }
        delay.sleep_ms(self.debouncer.timing().loop_period_ms);
    }

    /// Poll forever.
    pub fn run(mut self, delay: &mut impl Delay, sink: &mut impl KeySink) -> ! {
        loop {
            self.tick(delay, sink);
        }
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner<'a, D> {
        &mut self.scanner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Level, Timing, LAYOUT_4X4};
    use crate::debounce::State;
    use crate::mock::MockMatrix;

    static ROWS: [u8; 4] = [18, 17, 16, 15];
    static COLS: [u8; 4] = [7, 6, 5, 4];

    #[derive(Default)]
    struct Recorder {
        keys: Vec<char>,
        slept_ms: u32,
    }

    impl Delay for Recorder {
        fn sleep_ms(&mut self, ms: u16) {
            self.slept_ms += u32::from(ms);
        }
    }

    impl KeySink for Recorder {
        fn emit(&mut self, key: char) {
            self.keys.push(key);
        }
    }

    fn keypad(pressed: Option<(usize, usize)>) -> Keypad<'static, MockMatrix> {
        let mut matrix = MockMatrix::new(&ROWS, &COLS, Level::Low);
        if let Some((row, col)) = pressed {
            matrix.press(row, col);
        }
        let config = KeypadConfig {
            row_pins: &ROWS,
            col_pins: &COLS,
            keymap: &LAYOUT_4X4,
            active: Level::Low,
            timing: Timing::default(),
        };
        Keypad::new(matrix, config).unwrap()
    }

    #[test]
    fn test_press_and_release() {
        let mut delay = Recorder::default();
        let mut sink = Recorder::default();
        let mut keypad = keypad(None);

        keypad.tick(&mut delay, &mut sink);
        keypad.scanner_mut().driver_mut().press(0, 3);
        for _ in 0..8 {
            keypad.tick(&mut delay, &mut sink);
        }
        assert!(sink.keys.is_empty());
        assert_eq!(keypad.debouncer().state(), State::WaitRelease { candidate: 'A' });

        keypad.scanner_mut().driver_mut().lift(0, 3);
        keypad.tick(&mut delay, &mut sink);
        keypad.tick(&mut delay, &mut sink);

        assert_eq!(sink.keys, vec!['A']);
        assert_eq!(delay.slept_ms, 11 * 10);
    }

    #[test]
    fn test_idle_never_emits() {
        let mut keypad = keypad(None);
        for _ in 0..20 {
            assert_eq!(keypad.poll(), None);
        }
        assert_eq!(keypad.debouncer().state(), State::WaitPress);
    }

    #[test]
    fn test_scanner_access() {
        let mut keypad = keypad(Some((3, 1)));
        assert_eq!(keypad.scanner_mut().scan(), Some('0'));
    }
}
