//! 4×4 matrix keypad firmware for ATmega32U4 (Teensy 2.0).
//!
//! Scans the keypad every 10ms, debounces each press and writes the
//! decoded key to USART1 when it is released.

#![no_std]
#![no_main]
#![feature(asm_experimental_arch)]

mod keymap;
mod pins;
mod uart;

use core::fmt::Write;

use avr_device::atmega32u4::Peripherals;
use keypad_core::{Delay, Keypad};

use pins::AvrPins;
use uart::Uart;

/// On-board LED on PD6.
const LED: u8 = 0x40;

/// Panic handler — on AVR we just loop forever.
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

/// Busy-wait scheduler for the scan loop.
struct BusyWait;

impl Delay for BusyWait {
    fn sleep_ms(&mut self, ms: u16) {
        delay_ms(ms);
    }
}

/// Main entry point.
#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = unsafe { Peripherals::steal() };

    // Disable clock prescaler (CLKPR)
    dp.CPU.clkpr.write(|w| w.clkpce().set_bit());
    dp.CPU.clkpr.write(|w| unsafe { w.bits(0) }); // Prescaler = 1

    // LED output, off until the keypad is up
    dp.PORTD.ddrd.modify(|r, w| unsafe { w.bits(r.bits() | LED) });
    dp.PORTD.portd.modify(|r, w| unsafe { w.bits(r.bits() & !LED) });

    pins::disable_jtag(&dp);

    let mut serial = Uart::new(&dp.USART1);
    serial.init();

    let keypad = match Keypad::new(AvrPins::new(&dp), keymap::config()) {
        Ok(keypad) => keypad,
        Err(err) => {
            // Configuration faults stop here, LED stays off.
            let _ = writeln!(serial, "keypad: {}", err);
            loop {}
        }
    };

    let _ = writeln!(
        serial,
        "keypad: {}x{} ready",
        keymap::ROW_PINS.len(),
        keymap::COL_PINS.len()
    );
    dp.PORTD.portd.modify(|r, w| unsafe { w.bits(r.bits() | LED) });

    keypad.run(&mut BusyWait, &mut serial)
}

/// Busy-wait delay in milliseconds (approximate, at 16MHz).
fn delay_ms(ms: u16) {
    for _ in 0..ms {
        // ~1ms at 16MHz: 16000 cycles / 4 cycles per loop iteration
        for _ in 0..4000u16 {
            unsafe { core::arch::asm!("nop") };
        }
    }
}
