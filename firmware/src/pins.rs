//! GPIO access for the keypad on the Teensy 2.0 (ATmega32U4).
//!
//! Each pin is a bit in the PORTB or PORTF register set:
//!   DDRx  - direction, 1 = output
//!   PORTx - output level, or pull-up enable for inputs
//!   PINx  - input level
//!
//! The ATmega32U4 has internal pull-ups only, so active-high keypads
//! (which need columns pulled down) are rejected at startup.

use avr_device::atmega32u4::Peripherals;
use keypad_core::{Level, PinDriver, Pull};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Port {
    B,
    F,
}

/// One GPIO pin: port and bit number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pin {
    port: Port,
    bit: u8,
}

impl Pin {
    pub const fn new(port: Port, bit: u8) -> Self {
        Self { port, bit }
    }

    fn mask(self) -> u8 {
        1 << self.bit
    }
}

pub const PB0: Pin = Pin::new(Port::B, 0);
pub const PB1: Pin = Pin::new(Port::B, 1);
pub const PB2: Pin = Pin::new(Port::B, 2);
pub const PB3: Pin = Pin::new(Port::B, 3);
pub const PF0: Pin = Pin::new(Port::F, 0);
pub const PF1: Pin = Pin::new(Port::F, 1);
pub const PF4: Pin = Pin::new(Port::F, 4);
pub const PF5: Pin = Pin::new(Port::F, 5);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinError {
    /// No internal pull-down on this MCU.
    NoPullDown(Pin),
}

/// Set or clear `mask` in a read-modify-write register.
macro_rules! write_mask {
    ($reg:expr, $mask:expr, $on:expr) => {
        $reg.modify(|r, w| unsafe {
            if $on {
                w.bits(r.bits() | $mask)
            } else {
                w.bits(r.bits() & !$mask)
            }
        })
    };
}

pub struct AvrPins<'a> {
    dp: &'a Peripherals,
}

impl<'a> AvrPins<'a> {
    pub fn new(dp: &'a Peripherals) -> Self {
        Self { dp }
    }

    fn set_direction(&self, pin: Pin, output: bool) {
        match pin.port {
            Port::B => write_mask!(self.dp.PORTB.ddrb, pin.mask(), output),
            Port::F => write_mask!(self.dp.PORTF.ddrf, pin.mask(), output),
        }
    }

    fn set_port_bit(&self, pin: Pin, high: bool) {
        match pin.port {
            Port::B => write_mask!(self.dp.PORTB.portb, pin.mask(), high),
            Port::F => write_mask!(self.dp.PORTF.portf, pin.mask(), high),
        }
    }
}

impl PinDriver for AvrPins<'_> {
    type Pin = Pin;
    type Error = PinError;

    fn configure_input(&mut self, pin: Pin, pull: Pull) -> Result<(), PinError> {
        if pull == Pull::Down {
            return Err(PinError::NoPullDown(pin));
        }
        self.set_direction(pin, false);
        // PORTx bit on an input enables its pull-up.
        self.set_port_bit(pin, true);
        Ok(())
    }

    fn configure_output(&mut self, pin: Pin, initial: Level) -> Result<(), PinError> {
        // Level first so the pin never glitches to the active level.
        self.set_port_bit(pin, initial == Level::High);
        self.set_direction(pin, true);
        Ok(())
    }

    fn set_level(&mut self, pin: Pin, level: Level) {
        self.set_port_bit(pin, level == Level::High);
        settle();
    }

    fn get_level(&self, pin: Pin) -> Level {
        let bits = match pin.port {
            Port::B => self.dp.PORTB.pinb.read().bits(),
            Port::F => self.dp.PORTF.pinf.read().bits(),
        };
        if bits & pin.mask() != 0 {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Release PF4-PF7 from the JTAG interface.
///
/// JTD must be written twice within four cycles.
pub fn disable_jtag(dp: &Peripherals) {
    let mcucr = dp.CPU.mcucr.read().bits() | 0x80;
    dp.CPU.mcucr.write(|w| unsafe { w.bits(mcucr) });
    dp.CPU.mcucr.write(|w| unsafe { w.bits(mcucr) });
}

/// Short delay for row lines to settle (~5us at 16MHz).
#[inline(always)]
fn settle() {
    for _ in 0..20u8 {
        unsafe { core::arch::asm!("nop") };
    }
}
