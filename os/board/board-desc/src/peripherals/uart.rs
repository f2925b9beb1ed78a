//! Serial port setup handed to the SoC's UART driver.

use crate::error::ConfigError;
use board_info::memory::{UART_CHANNELS, uart_base};
use board_memory_addresses::PhysicalAddress;
use board_registers::uart::{Ucon, Ufcon, Ulcon};
use log::{debug, error};
use utils_accessors_derive::Getters;

/// Initial register values for one UART channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters)]
pub struct UartChannelConfig {
    /// Hardware channel number, `0..UART_CHANNELS`.
    hwport: u8,
    /// Driver flags; unused on TQ2440 boards.
    flags: u32,
    ucon: Ucon,
    ulcon: Ulcon,
    ufcon: Ufcon,
}

impl UartChannelConfig {
    #[must_use]
    pub const fn new(hwport: u8, ucon: Ucon, ulcon: Ulcon, ufcon: Ufcon) -> Self {
        Self {
            hwport,
            flags: 0,
            ucon,
            ulcon,
            ufcon,
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Register block of this channel.
    #[must_use]
    pub const fn base(&self) -> PhysicalAddress {
        uart_base(self.hwport as u32)
    }
}

/// Check a board's serial port list.
///
/// # Errors
/// * [`ConfigError::UartChannelOutOfRange`] for a channel the SoC lacks
/// * [`ConfigError::DuplicateUartChannel`] for a channel listed twice
pub fn validate_uarts(uarts: &[UartChannelConfig]) -> Result<(), ConfigError> {
    let mut seen = 0u32;
    for uart in uarts {
        let channel = uart.hwport;
        if channel >= UART_CHANNELS {
            let err = ConfigError::UartChannelOutOfRange {
                channel,
                channels: UART_CHANNELS,
            };
            error!("{err}");
            return Err(err);
        }
        let bit = 1 << channel;
        if seen & bit != 0 {
            let err = ConfigError::DuplicateUartChannel { channel };
            error!("{err}");
            return Err(err);
        }
        seen |= bit;
        debug!(
            "uart{channel} @ {}: ucon={:#x} ulcon={:#x} ufcon={:#x}",
            uart.base(),
            uart.ucon.into_bits(),
            uart.ulcon.into_bits(),
            uart.ufcon.into_bits()
        );
    }
    Ok(())
}
