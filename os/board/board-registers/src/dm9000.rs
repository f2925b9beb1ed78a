//! DM9000 platform flag word.

use bitfield_struct::bitfield;

/// Bus width and wiring options the DM9000 driver reads from its platform
/// data.
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Dm9000Flags {
    /// Bit 0: Data bus is 8 bits wide.
    pub bus_8bit_only: bool,

    /// Bit 1: Data bus is 16 bits wide.
    pub bus_16bit_only: bool,

    /// Bit 2: Data bus is 32 bits wide.
    pub bus_32bit_only: bool,

    /// Bit 3: An external PHY is attached.
    pub external_phy: bool,

    /// Bit 4: No EEPROM holds the MAC address.
    pub no_eeprom: bool,

    /// Bit 5: Use the simple PHY link polling.
    pub simple_phy: bool,

    /// Bits 6–31: Reserved (must be 0).
    #[bits(26, default = 0)]
    _reserved_6_31: u32,
}

impl Dm9000Flags {
    /// Number of bus-width flags set; a valid configuration sets exactly one.
    #[must_use]
    pub const fn bus_width_flags(self) -> u32 {
        self.bus_8bit_only() as u32 + self.bus_16bit_only() as u32 + self.bus_32bit_only() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bit_only() {
        let f = Dm9000Flags::new().with_bus_16bit_only(true);
        assert_eq!(f.into_bits(), 0x0002);
        assert_eq!(f.bus_width_flags(), 1);
    }
}
