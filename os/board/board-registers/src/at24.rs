//! AT24 serial EEPROM platform flag byte.

use bitfield_struct::bitfield;

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct At24Flags {
    /// Bit 0: Reserved (must be 0).
    #[bits(default = false)]
    _reserved_0: bool,

    /// Bit 1: Skip the read-rollover quirk.
    pub no_rdrol: bool,

    /// Bit 2: Factory-programmed MAC area.
    pub mac: bool,

    /// Bit 3: Factory-programmed serial number area.
    pub serial: bool,

    /// Bit 4: Device answers on eight consecutive bus addresses.
    pub take8addr: bool,

    /// Bit 5: sysfs entry readable by root only.
    pub irugo: bool,

    /// Bit 6: Device is write protected.
    pub read_only: bool,

    /// Bit 7: 16-bit word addresses (else 8-bit).
    pub addr16: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take8addr_value() {
        assert_eq!(At24Flags::new().with_take8addr(true).into_bits(), 0x10);
        assert!(!At24Flags::from_bits(0x10).addr16());
    }
}
