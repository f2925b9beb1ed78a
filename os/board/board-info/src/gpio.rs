//! # GPIO Numbering

use core::fmt;

/// Pins per bank in the linear GPIO numbering.
pub const PINS_PER_BANK: u32 = 32;

/// One of the S3C2440 GPIO ports A..J.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GpioBank {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    J,
}

impl GpioBank {
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::J => 'J',
        }
    }
}

/// A single GPIO pin, e.g. `GPE15`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GpioPin {
    bank: GpioBank,
    index: u8,
}

impl GpioPin {
    /// # Panics
    /// Panics (at compile time when used in a `const`) if `index` does not
    /// fit the bank.
    #[must_use]
    pub const fn new(bank: GpioBank, index: u8) -> Self {
        assert!((index as u32) < PINS_PER_BANK, "pin index out of range");
        Self { bank, index }
    }

    #[must_use]
    pub const fn bank(self) -> GpioBank {
        self.bank
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Linear GPIO number as used by the GPIO subsystem.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.bank as u32 * PINS_PER_BANK + self.index as u32
    }
}

impl fmt::Debug for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GP{}{}", self.bank.letter(), self.index)
    }
}

impl fmt::Display for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpe_numbering() {
        let sda = GpioPin::new(GpioBank::E, 15);
        assert_eq!(sda.number(), 4 * 32 + 15);
        assert_eq!(format!("{sda}"), "GPE15");
    }
}
