use anyhow::{bail, Result};
use keypad_core::{step, Sample, State, Timing};

/// Marks a tick where no key was read.
pub const NO_KEY: char = '.';

/// One replayed tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub tick: usize,
    pub sample: Sample,
    pub state: State,
    pub emitted: Option<char>,
}

/// Parse a sample script: one character per tick, `.` for no key.
///
/// Whitespace is ignored so long recordings can be wrapped, and `#` is a
/// keypad glyph, so there are no comments.
pub fn parse_samples(input: &str, is_glyph: impl Fn(char) -> bool) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        for (col, c) in line.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            if c == NO_KEY {
                samples.push(None);
            } else if is_glyph(c) {
                samples.push(Some(c));
            } else {
                bail!(
                    "line {}, column {}: '{}' is not a key on this keypad",
                    line_num + 1,
                    col + 1,
                    c
                );
            }
        }
    }

    if samples.is_empty() {
        bail!("no samples to replay");
    }
    Ok(samples)
}

/// Run `samples` through a fresh state machine.
pub fn replay(samples: &[Sample], timing: Timing) -> Vec<TickRecord> {
    let mut state = State::WaitPress;

    samples
        .iter()
        .enumerate()
        .map(|(tick, &sample)| {
            let (next, emitted) = step(state, sample, timing);
            state = next;
            TickRecord {
                tick,
                sample,
                state,
                emitted,
            }
        })
        .collect()
}

pub fn describe_state(state: &State) -> String {
    match state {
        State::WaitPress => "wait-press".to_string(),
        State::Debounce {
            candidate,
            elapsed_ms,
        } => format!("debounce({candidate}, {elapsed_ms}ms)"),
        State::WaitRelease { candidate } => format!("wait-release({candidate})"),
    }
}
