//! Serial EEPROM geometry and I2C board info.
//!
//! Devices on the low-speed bus cannot be probed safely, so the board lists
//! them up front. The orchestrator instantiates a driver for each
//! [`I2cBoardInfo`] once the bus adapter appears.

use crate::error::ConfigError;
use alloc::vec::Vec;
use board_registers::at24::At24Flags;
use log::{debug, error};

/// Highest address in the 7-bit I2C address space.
pub const I2C_ADDRESS_MAX: u16 = 0x7f;

/// Geometry of an AT24-family EEPROM.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EepromConfig {
    /// Total capacity in bytes.
    byte_len: u32,
    /// Largest write that does not wrap within the device's page buffer.
    page_size: u16,
    flags: At24Flags,
}

impl EepromConfig {
    #[must_use]
    pub const fn new(byte_len: u32, page_size: u16, flags: At24Flags) -> Self {
        Self {
            byte_len,
            page_size,
            flags,
        }
    }

    #[must_use]
    pub const fn byte_len(&self) -> u32 {
        self.byte_len
    }

    #[must_use]
    pub const fn page_size(&self) -> u16 {
        self.page_size
    }

    #[must_use]
    pub const fn flags(&self) -> At24Flags {
        self.flags
    }

    /// Number of pages, if the geometry is valid.
    #[must_use]
    pub const fn pages(&self) -> Option<u32> {
        if self.page_size == 0 {
            return None;
        }
        Some(self.byte_len / self.page_size as u32)
    }

    /// Bus addresses the device answers on, starting at its base address.
    #[must_use]
    pub const fn address_span(&self) -> u16 {
        if self.flags.take8addr() { 8 } else { 1 }
    }

    /// # Errors
    /// [`ConfigError::InvalidEepromGeometry`] unless both sizes are positive and
    /// the capacity is a whole number of pages.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.byte_len == 0
            || self.page_size == 0
            || self.byte_len % self.page_size as u32 != 0
        {
            return Err(ConfigError::InvalidEepromGeometry {
                byte_len: self.byte_len,
                page_size: self.page_size,
            });
        }
        Ok(())
    }
}

/// A device to instantiate on an I2C bus.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct I2cBoardInfo<'a> {
    /// Driver match name, e.g. `"24c02"`.
    type_name: &'static str,
    /// 7-bit bus address.
    address: u16,
    platform_data: Option<&'a EepromConfig>,
}

impl<'a> I2cBoardInfo<'a> {
    #[must_use]
    pub const fn new(type_name: &'static str, address: u16) -> Self {
        Self {
            type_name,
            address,
            platform_data: None,
        }
    }

    #[must_use]
    pub const fn with_platform_data(mut self, eeprom: &'a EepromConfig) -> Self {
        self.platform_data = Some(eeprom);
        self
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub const fn address(&self) -> u16 {
        self.address
    }

    #[must_use]
    pub const fn platform_data(&self) -> Option<&'a EepromConfig> {
        self.platform_data
    }

    /// Bus addresses occupied, `first..=last`.
    const fn address_range(&self) -> (u16, u16) {
        let span = match self.platform_data {
            Some(eeprom) => eeprom.address_span(),
            None => 1,
        };
        (self.address, self.address + span - 1)
    }

    /// # Errors
    /// [`ConfigError::InvalidI2cAddress`] when the occupied addresses leave the
    /// 7-bit range, or the EEPROM geometry error.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.address > I2C_ADDRESS_MAX || self.address_range().1 > I2C_ADDRESS_MAX {
            return Err(ConfigError::InvalidI2cAddress {
                address: self.address,
            });
        }
        match self.platform_data {
            Some(eeprom) => eeprom.validate(),
            None => Ok(()),
        }
    }
}

/// Check every device of one bus, and that no two share an address.
///
/// # Errors
/// The first device that fails [`I2cBoardInfo::validate`], or
/// [`ConfigError::DuplicateI2cAddress`] for two devices whose address ranges
/// intersect.
pub fn validate_bus(bus: u8, devices: &[I2cBoardInfo<'_>]) -> Result<(), ConfigError> {
    for device in devices {
        device.validate().inspect_err(|e| error!("{e}"))?;
        debug!(
            "i2c-{bus}: {} @ {:#04x}",
            device.type_name, device.address
        );
    }

    let mut ranges: Vec<(u16, u16, &'static str)> = devices
        .iter()
        .map(|d| {
            let (first, last) = d.address_range();
            (first, last, d.type_name)
        })
        .collect();
    ranges.sort_unstable();
    for pair in ranges.windows(2) {
        let (a_first, a_last, a_name) = pair[0];
        let (b_first, _, b_name) = pair[1];
        if b_first <= a_last {
            let err = ConfigError::DuplicateI2cAddress {
                bus,
                address: b_first.max(a_first),
                first: a_name,
                second: b_name,
            };
            error!("{err}");
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT24C02: EepromConfig =
        EepromConfig::new(256, 8, At24Flags::new().with_take8addr(true));

    #[test]
    fn at24c02_geometry() {
        assert_eq!(AT24C02.validate(), Ok(()));
        assert_eq!(AT24C02.pages(), Some(32));
        assert_eq!(AT24C02.address_span(), 8);
    }

    #[test]
    fn partial_page_is_rejected() {
        let e = EepromConfig::new(250, 8, At24Flags::new());
        assert_eq!(
            e.validate(),
            Err(ConfigError::InvalidEepromGeometry {
                byte_len: 250,
                page_size: 8
            })
        );
        assert!(EepromConfig::new(256, 0, At24Flags::new()).validate().is_err());
        assert!(EepromConfig::new(0, 8, At24Flags::new()).validate().is_err());
    }

    #[test]
    fn address_must_be_seven_bits() {
        assert_eq!(
            I2cBoardInfo::new("x", 0x80).validate(),
            Err(ConfigError::InvalidI2cAddress { address: 0x80 })
        );
        assert!(I2cBoardInfo::new("x", 0x7f).validate().is_ok());
    }

    #[test]
    fn take8addr_must_fit_the_address_space() {
        let ok = I2cBoardInfo::new("24c02", 0x50).with_platform_data(&AT24C02);
        assert!(ok.validate().is_ok());
        let bad = I2cBoardInfo::new("24c02", 0x7c).with_platform_data(&AT24C02);
        assert_eq!(
            bad.validate(),
            Err(ConfigError::InvalidI2cAddress { address: 0x7c })
        );
    }

    #[test]
    fn shared_address_is_rejected() {
        let devices = [
            I2cBoardInfo::new("24c02", 0x50).with_platform_data(&AT24C02),
            I2cBoardInfo::new("rtc", 0x51),
        ];
        assert_eq!(
            validate_bus(0, &devices),
            Err(ConfigError::DuplicateI2cAddress {
                bus: 0,
                address: 0x51,
                first: "24c02",
                second: "rtc"
            })
        );
        assert!(validate_bus(0, &devices[..1]).is_ok());
    }
}
