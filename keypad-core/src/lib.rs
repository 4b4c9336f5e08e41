//! Matrix keypad scanning and debouncing.
//!
//! This crate is `no_std`-compatible so it can be used by both the AVR
//! firmware and the native CLI tool. It knows nothing about any particular
//! microcontroller: pins, timing and output are reached through the
//! [`PinDriver`], [`Delay`] and [`KeySink`] traits.
//!
//! One loop iteration scans the matrix once, feeds the sample to the
//! debounce state machine and sleeps for the loop period. A physical press
//! produces exactly one key, emitted when the key is released.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod debounce;
pub mod keypad;
pub mod scanner;

pub use config::{ConfigError, KeypadConfig, Level, Pull, Timing, LAYOUT_4X4};
pub use debounce::{step, Debouncer, Events, State};
pub use keypad::{Delay, KeySink, Keypad};
pub use scanner::{InitError, PinDriver, Scanner};

/// One scan result: the glyph at the first active intersection, or `None`
/// when no key is pressed.
pub type Sample = Option<char>;

#[cfg(test)]
pub(crate) mod mock;
