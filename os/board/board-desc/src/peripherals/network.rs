//! DM9000 Ethernet controller platform data.

use crate::error::ConfigError;
use board_registers::dm9000::Dm9000Flags;

/// What the DM9000 driver reads from the board.
///
/// The chip sits on an external chip select with separate address and data
/// ports; those are device resources, not part of this record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dm9000Config {
    flags: Dm9000Flags,
    /// MAC address to program when no EEPROM provides one.
    mac: Option<[u8; 6]>,
}

impl Dm9000Config {
    #[must_use]
    pub const fn new(flags: Dm9000Flags) -> Self {
        Self { flags, mac: None }
    }

    #[must_use]
    pub const fn with_mac(mut self, mac: [u8; 6]) -> Self {
        self.mac = Some(mac);
        self
    }

    #[must_use]
    pub const fn flags(&self) -> Dm9000Flags {
        self.flags
    }

    #[must_use]
    pub const fn mac(&self) -> Option<[u8; 6]> {
        self.mac
    }

    /// # Errors
    /// [`ConfigError::InvalidBusWidth`] unless exactly one bus width is set.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.flags.bus_width_flags() != 1 {
            return Err(ConfigError::InvalidBusWidth {
                flags: self.flags.into_bits(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_bus_width() {
        let sixteen = Dm9000Flags::new().with_bus_16bit_only(true);
        assert!(Dm9000Config::new(sixteen).validate().is_ok());
        assert_eq!(
            Dm9000Config::new(Dm9000Flags::new()).validate(),
            Err(ConfigError::InvalidBusWidth { flags: 0 })
        );
        assert_eq!(
            Dm9000Config::new(sixteen.with_bus_8bit_only(true)).validate(),
            Err(ConfigError::InvalidBusWidth { flags: 0b11 })
        );
    }

    #[test]
    fn mac_is_optional() {
        let cfg = Dm9000Config::new(Dm9000Flags::new().with_bus_16bit_only(true));
        assert_eq!(cfg.mac(), None);
        let mac = [0x02, 0, 0, 0, 0, 1];
        assert_eq!(cfg.with_mac(mac).mac(), Some(mac));
    }
}
