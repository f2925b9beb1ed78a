//! Early log output on UART0.

#![allow(unsafe_code)]

use board_log::BoardLogger;
use board_log::uart::Uart0Sink;
use log::{LevelFilter, SetLoggerError};

// SAFETY: the console is installed before the MMU is enabled and the kernel
// keeps the SFR area flat-mapped afterwards.
static CONSOLE: BoardLogger<Uart0Sink> =
    BoardLogger::new(unsafe { Uart0Sink::physical() }, LevelFilter::Info);

/// Route `log` records to UART0.
///
/// # Errors
/// Another logger was installed first.
pub fn init() -> Result<(), SetLoggerError> {
    CONSOLE.init()
}
