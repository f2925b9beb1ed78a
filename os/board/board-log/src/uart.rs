//! Polled output on UART0.
//!
//! Assumes the boot loader left the port configured (baud rate, 8N1), which is
//! the case for every TQ2440 loader in circulation.

#![allow(unsafe_code)]

use crate::sink::LogSink;
use board_info::memory::uart_base;
use board_registers::Register;
use board_registers::uart::{UTXH_OFFSET, Utrstat};
use core::hint::spin_loop;
use core::ptr::{read_volatile, write_volatile};

/// Writes log bytes to UART0, translating `\n` to `\r\n`.
pub struct Uart0Sink {
    base: usize,
}

impl Uart0Sink {
    /// A sink for the UART0 register block at `base`.
    ///
    /// # Safety
    /// `base` must be the address, valid in every context that logs, of the
    /// UART0 registers; before the MMU is on that is the physical address
    /// from [`Uart0Sink::physical`].
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// UART0 at its physical address, for use while the MMU is off.
    ///
    /// # Safety
    /// The MMU must stay off (or map UART0 flat) while the sink is in use.
    #[must_use]
    pub const unsafe fn physical() -> Self {
        Self {
            base: uart_base(0).as_u32() as usize,
        }
    }

    fn put(&self, byte: u8) {
        let status = (self.base + Utrstat::OFFSET as usize) as *const u32;
        let txh = (self.base + UTXH_OFFSET as usize) as *mut u8;
        // SAFETY: `new`/`physical` guarantee `base` addresses the UART0 block.
        unsafe {
            while !Utrstat::from_raw(read_volatile(status)).tx_buffer_empty() {
                spin_loop();
            }
            write_volatile(txh, byte);
        }
    }
}

impl LogSink for Uart0Sink {
    fn write_bytes(&self, bytes: &[u8]) {
        for &b in bytes {
            if b == b'\n' {
                self.put(b'\r');
            }
            self.put(b);
        }
    }
}
