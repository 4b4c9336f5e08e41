//! USART1 console output (TX on PD3).
//!
//! Confirmed keys are written one per line, so any serial terminal at
//! 38400 8N1 shows what was typed.

use avr_device::atmega32u4::USART1;
use keypad_core::KeySink;

/// UBRR for 38400 baud at 16MHz: 16MHz / (16 * 38400) - 1 = 25.
const UBRR_VALUE: u16 = 25;

// UCSR1A / UCSR1B / UCSR1C bits
const UDRE1: u8 = 1 << 5; // data register empty
const TXEN1: u8 = 1 << 3; // transmitter enable
const UCSZ_8BIT: u8 = 0x06; // UCSZ11 | UCSZ10: 8 data bits, no parity, 1 stop

pub struct Uart<'a> {
    usart: &'a USART1,
}

impl<'a> Uart<'a> {
    pub fn new(usart: &'a USART1) -> Self {
        Self { usart }
    }

    /// Enable the transmitter. The receiver stays off.
    pub fn init(&mut self) {
        self.usart.ubrr1.write(|w| unsafe { w.bits(UBRR_VALUE) });
        self.usart.ucsr1c.write(|w| unsafe { w.bits(UCSZ_8BIT) });
        self.usart.ucsr1b.write(|w| unsafe { w.bits(TXEN1) });
    }

    pub fn write_byte(&mut self, byte: u8) {
        while self.usart.ucsr1a.read().bits() & UDRE1 == 0 {}
        self.usart.udr1.write(|w| unsafe { w.bits(byte) });
    }
}

impl core::fmt::Write for Uart<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}

impl KeySink for Uart<'_> {
    fn emit(&mut self, key: char) {
        let byte = if key.is_ascii() { key as u8 } else { b'?' };
        self.write_byte(byte);
        self.write_byte(b'\r');
        self.write_byte(b'\n');
    }
}
