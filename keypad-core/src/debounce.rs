//! Press/release debounce state machine.
//!
//! A key is accepted only if the same glyph is still being read once the
//! debounce threshold has elapsed. The sample is checked on the tick that
//! reaches the threshold and not before, so a bounce that settles back to the
//! candidate in time is still accepted. The accepted key is emitted on
//! release, once per press; holding a key never repeats it.
//!
//! A column stuck at the active level keeps the machine in
//! [`State::WaitRelease`] forever. There is no timeout out of that state,
//! since it would also cut off keys that are genuinely held.

use crate::config::Timing;
use crate::Sample;

/// Debounce state. The candidate and its timer live in the variants, so a
/// new press always starts with a fresh timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum State {
    /// Idle, waiting for any key.
    #[default]
    WaitPress,
    /// A key was seen; waiting for the threshold before re-checking it.
    Debounce { candidate: char, elapsed_ms: u16 },
    /// Key accepted; waiting for the matrix to go quiet.
    WaitRelease { candidate: char },
}

/// Advance the machine by one tick.
///
/// Returns the next state and the key confirmed on this tick, if any.
pub fn step(state: State, sample: Sample, timing: Timing) -> (State, Option<char>) {
    match state {
        State::WaitPress => match sample {
            Some(candidate) => (
                State::Debounce {
                    candidate,
                    elapsed_ms: 0,
                },
                None,
            ),
            None => (State::WaitPress, None),
        },
        State::Debounce {
            candidate,
            elapsed_ms,
        } => {
            let elapsed_ms = elapsed_ms.saturating_add(timing.loop_period_ms);
            if elapsed_ms < timing.debounce_ms {
                (
                    State::Debounce {
                        candidate,
                        elapsed_ms,
                    },
                    None,
                )
            } else if sample == Some(candidate) {
                (State::WaitRelease { candidate }, None)
            } else {
                (State::WaitPress, None)
            }
        }
        State::WaitRelease { candidate } => match sample {
            Some(_) => (State::WaitRelease { candidate }, None),
            None => (State::WaitPress, Some(candidate)),
        },
    }
}

/// Owns the debounce state of one keypad.
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: State,
    timing: Timing,
}

impl Debouncer {
    pub const fn new(timing: Timing) -> Self {
        Self {
            state: State::WaitPress,
            timing,
        }
    }

    /// Feed one scan sample. Returns the key confirmed by this sample.
    pub fn update(&mut self, sample: Sample) -> Option<char> {
        let (next, emitted) = step(self.state, sample, self.timing);

        if next != self.state {
            match next {
                State::Debounce { candidate, .. } if self.state == State::WaitPress => {
                    log::trace!("debounce: candidate {:?}", candidate);
                }
                State::WaitRelease { candidate } => {
                    log::trace!("debounce: {:?} settled", candidate);
                }
                State::WaitPress => match emitted {
                    Some(key) => log::debug!("debounce: {:?} released", key),
                    None => log::trace!("debounce: rejected, read {:?}", sample),
                },
                _ => {}
            }
        }

        self.state = next;
        emitted
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Forget any press in progress.
    pub fn reset(&mut self) {
        self.state = State::WaitPress;
    }

    /// Run a sequence of samples through the machine, yielding each
    /// confirmed key.
    pub fn events<I>(&mut self, samples: I) -> Events<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Sample>,
    {
        Events {
            debouncer: self,
            samples: samples.into_iter(),
        }
    }
}

/// Iterator returned by [`Debouncer::events`].
pub struct Events<'a, I> {
    debouncer: &'a mut Debouncer,
    samples: I,
}

impl<'a, I: Iterator<Item = Sample>> Iterator for Events<'a, I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        for sample in self.samples.by_ref() {
            if let Some(key) = self.debouncer.update(sample) {
                return Some(key);
            }
        }
        None
    }
}
