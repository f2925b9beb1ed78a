//! S3C24xx UART channel registers.
//!
//! Offsets are relative to a channel's register block (`0x5000_0000` for
//! channel 0, `0x4000` apart for the next ones).

use crate::impl_register;
use bitfield_struct::bitfield;

/// Transfer mode for either direction of a UART channel (UCONn\[1:0\], \[3:2\]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TransferMode {
    Disabled = 0,
    /// Interrupt request or polling mode.
    InterruptOrPolling = 1,
    Dma0 = 2,
    Dma1 = 3,
}

impl TransferMode {
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Disabled,
            1 => Self::InterruptOrPolling,
            2 => Self::Dma0,
            _ => Self::Dma1,
        }
    }
}

/// Baud clock source (UCONn\[11:10\]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClockSelect {
    Pclk = 0,
    Uextclk = 1,
    /// Also PCLK on the S3C2440; kept distinct so the raw value round-trips.
    Pclk2 = 2,
    /// FCLK divided by the divider in UCON0..2\[15:12\].
    FclkDivided = 3,
}

impl ClockSelect {
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Pclk,
            1 => Self::Uextclk,
            2 => Self::Pclk2,
            _ => Self::FclkDivided,
        }
    }
}

/// UART control register (UCONn).
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Ucon {
    /// Bits 0–1: Receive mode.
    #[bits(2)]
    pub receive_mode: TransferMode,

    /// Bits 2–3: Transmit mode.
    #[bits(2)]
    pub transmit_mode: TransferMode,

    /// Bit 4: Send a break signal during one frame.
    pub send_break: bool,

    /// Bit 5: Loopback mode (test only).
    pub loopback: bool,

    /// Bit 6: Generate an interrupt on receive errors.
    pub rx_error_status_irq: bool,

    /// Bit 7: Enable the receive time-out interrupt when the FIFO is enabled.
    pub rx_timeout: bool,

    /// Bit 8: Receive interrupt is level triggered (else pulse).
    pub rx_irq_level: bool,

    /// Bit 9: Transmit interrupt is level triggered (else pulse).
    pub tx_irq_level: bool,

    /// Bits 10–11: Baud clock source.
    #[bits(2)]
    pub clock_select: ClockSelect,

    /// Bits 12–15: FCLK divider, only meaningful with [`ClockSelect::FclkDivided`].
    #[bits(4)]
    pub fclk_divider: u8,

    /// Bits 16–31: Reserved (must be 0).
    #[bits(16, default = 0)]
    _reserved_16_31: u16,
}

impl_register!(Ucon, "UCON", 0x04);

/// Number of data bits per frame (ULCONn\[1:0\]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WordLength {
    Five = 0,
    Six = 1,
    Seven = 2,
    Eight = 3,
}

impl WordLength {
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Five,
            1 => Self::Six,
            2 => Self::Seven,
            _ => Self::Eight,
        }
    }

    /// Data bits per frame.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8 + 5
    }
}

/// Parity generation and checking (ULCONn\[5:3\]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Parity {
    None = 0b000,
    Odd = 0b100,
    Even = 0b101,
    ForcedOne = 0b110,
    ForcedZero = 0b111,
}

impl Parity {
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    /// Values `0b0xx` all mean "no parity".
    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b111 {
            0b100 => Self::Odd,
            0b101 => Self::Even,
            0b110 => Self::ForcedOne,
            0b111 => Self::ForcedZero,
            _ => Self::None,
        }
    }
}

/// UART line control register (ULCONn).
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Ulcon {
    /// Bits 0–1: Word length.
    #[bits(2)]
    pub word_length: WordLength,

    /// Bit 2: Two stop bits per frame (else one).
    pub two_stop_bits: bool,

    /// Bits 3–5: Parity mode.
    #[bits(3)]
    pub parity: Parity,

    /// Bit 6: Infrared (IrDA 1.0) mode.
    pub infrared: bool,

    /// Bits 7–31: Reserved (must be 0).
    #[bits(25, default = 0)]
    _reserved_7_31: u32,
}

impl_register!(Ulcon, "ULCON", 0x00);

/// UART FIFO control register (UFCONn).
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Ufcon {
    /// Bit 0: Enable both FIFOs.
    pub fifo_enable: bool,

    /// Bit 1: Reset the receive FIFO (auto-clears).
    pub rx_fifo_reset: bool,

    /// Bit 2: Reset the transmit FIFO (auto-clears).
    pub tx_fifo_reset: bool,

    /// Bit 3: Reserved (must be 0).
    #[bits(default = false)]
    _reserved_3: bool,

    /// Bits 4–5: Receive FIFO trigger level: 1, 8, 16 or 32 bytes.
    #[bits(2)]
    pub rx_trigger: u8,

    /// Bits 6–7: Transmit FIFO trigger level: empty, 16, 32 or 48 bytes.
    #[bits(2)]
    pub tx_trigger: u8,

    /// Bits 8–31: Reserved (must be 0).
    #[bits(24, default = 0)]
    _reserved_8_31: u32,
}

impl_register!(Ufcon, "UFCON", 0x08);

impl Ufcon {
    /// Receive trigger level in bytes.
    #[must_use]
    pub const fn rx_trigger_bytes(self) -> u8 {
        match self.rx_trigger() {
            0 => 1,
            1 => 8,
            2 => 16,
            _ => 32,
        }
    }
}

/// UART TX/RX status register (UTRSTATn), read-only.
#[bitfield(u32)]
pub struct Utrstat {
    /// Bit 0: Receive buffer holds data.
    pub rx_data_ready: bool,

    /// Bit 1: Transmit buffer (or FIFO) is empty.
    pub tx_buffer_empty: bool,

    /// Bit 2: Transmit buffer and shifter are both empty.
    pub transmitter_empty: bool,

    /// Bits 3–31: Reserved.
    #[bits(29)]
    _reserved_3_31: u32,
}

impl_register!(Utrstat, "UTRSTAT", 0x10);

/// Transmit holding register (UTXHn), little-endian byte lane.
pub const UTXH_OFFSET: u32 = 0x20;
