//! Low-speed (I2C) bus setup: the SoC controller or a bit-banged pin pair.

use crate::error::ConfigError;
use board_info::gpio::GpioPin;
use utils_accessors_derive::{Getters, Setters};

/// Platform data of the SoC's I2C controller.
///
/// Boards usually pass none and accept the driver's defaults.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters, Setters)]
pub struct I2cControllerConfig {
    /// Adapter number the bus registers as.
    bus_num: u8,
    /// Own slave address of the controller.
    slave_addr: u8,
    /// Upper bound for the SCL frequency.
    frequency_hz: u32,
    /// SDA output delay in nanoseconds.
    sda_delay_ns: u32,
}

impl I2cControllerConfig {
    /// The defaults the controller driver uses when handed nothing.
    pub const DEFAULT: Self = Self {
        bus_num: 0,
        slave_addr: 0x10,
        frequency_hz: 100_000,
        sda_delay_ns: 100,
    };
}

impl Default for I2cControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pin setup of a bit-banged I2C bus.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters, Setters)]
pub struct GpioI2cConfig {
    sda: GpioPin,
    scl: GpioPin,
    sda_is_open_drain: bool,
    scl_is_open_drain: bool,
    /// SCL is never read back, so clock stretching is not supported.
    scl_is_output_only: bool,
    /// Half clock period in microseconds; `None` lets the driver choose.
    udelay: Option<u32>,
}

impl GpioI2cConfig {
    #[must_use]
    pub const fn new(sda: GpioPin, scl: GpioPin) -> Self {
        Self {
            sda,
            scl,
            sda_is_open_drain: false,
            scl_is_open_drain: false,
            scl_is_output_only: false,
            udelay: None,
        }
    }

    /// # Errors
    /// [`ConfigError::GpioI2cPinsShared`] when SDA and SCL are the same pin.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.sda.number() == self.scl.number() {
            return Err(ConfigError::GpioI2cPinsShared { pin: self.sda });
        }
        Ok(())
    }
}
