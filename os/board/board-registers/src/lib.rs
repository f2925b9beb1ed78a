//! # S3C24xx Register Models
//!
//! Bit-exact models of the control words a board description hands to
//! peripheral drivers: the UART line/FIFO/control registers, the LCD
//! controller's mode registers and the flag words of off-chip devices
//! (DM9000 Ethernet, AT24 EEPROM).
//!
//! Every model is a [`bitfield_struct::bitfield`] over the register's natural
//! width, with reserved bits kept private and forced to zero. All builders are
//! `const`, so board tables can be written as `const` items:
//!
//! ```rust
//! use board_registers::uart::{Ulcon, WordLength};
//!
//! const ULCON_8N1: Ulcon = Ulcon::new().with_word_length(WordLength::Eight);
//! assert_eq!(ULCON_8N1.into_bits(), 0x03);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod at24;
pub mod dm9000;
pub mod lcd;
pub mod uart;

/// A memory-mapped register inside a peripheral's register block.
pub trait Register: Copy {
    /// Mnemonic used by the SoC manual.
    const NAME: &'static str;

    /// Byte offset from the start of the peripheral's register block.
    const OFFSET: u32;

    /// Raw register value.
    fn to_raw(self) -> u32;

    /// Decode a raw register value.
    fn from_raw(raw: u32) -> Self;
}

/// Implements [`Register`] for a `u32`-backed bitfield.
macro_rules! impl_register {
    ($ty:ty, $name:literal, $offset:expr) => {
        impl $crate::Register for $ty {
            const NAME: &'static str = $name;
            const OFFSET: u32 = $offset;

            #[inline]
            fn to_raw(self) -> u32 {
                self.into_bits()
            }

            #[inline]
            fn from_raw(raw: u32) -> Self {
                Self::from_bits(raw)
            }
        }
    };
}

pub(crate) use impl_register;
