//! # Device Descriptors
//!
//! The record handed to the orchestrator's device-activation mechanism for
//! every on-board peripheral: a driver match name, an instance id, the
//! resources the device occupies and an optional typed configuration.
//!
//! ```rust
//! use board_desc::{DeviceDescriptor, InstanceId, ResourceClaim, Trigger};
//! use board_memory_addresses::PhysicalAddress;
//!
//! const RTC: [ResourceClaim; 2] = [
//!     ResourceClaim::mem(PhysicalAddress::new(0x5700_0000), 0x100),
//!     ResourceClaim::irq_with(46, Trigger::Default),
//! ];
//! const DEV: DeviceDescriptor<'static> =
//!     DeviceDescriptor::new("s3c2410-rtc", InstanceId::Single, &RTC);
//! assert_eq!(DEV.to_string(), "s3c2410-rtc");
//! ```

use crate::peripherals::{
    Dm9000Config, EepromConfig, FramebufferConfig, GpioI2cConfig, I2cControllerConfig,
    NandPlatformConfig, UartChannelConfig,
};
use crate::resource::ResourceClaim;
use core::fmt;

/// Distinguishes several devices bound to the same driver.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum InstanceId {
    /// The only device of its kind; no number is appended to its name.
    Single,
    Numbered(u32),
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => Ok(()),
            Self::Numbered(n) => write!(f, ".{n}"),
        }
    }
}

/// Typed platform data attached to a device.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeviceConfig<'a> {
    /// The driver needs no board-specific data.
    #[default]
    None,
    Display(&'a FramebufferConfig<'a>),
    Storage(&'a NandPlatformConfig<'a>),
    /// `None` selects the controller driver's defaults.
    I2cController(Option<&'a I2cControllerConfig>),
    GpioI2c(&'a GpioI2cConfig),
    Network(&'a Dm9000Config),
    Eeprom(&'a EepromConfig),
    Uart(&'a UartChannelConfig),
}

impl DeviceConfig<'_> {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Display(_) => "display",
            Self::Storage(_) => "storage",
            Self::I2cController(_) => "i2c controller",
            Self::GpioI2c(_) => "gpio i2c",
            Self::Network(_) => "network",
            Self::Eeprom(_) => "eeprom",
            Self::Uart(_) => "uart",
        }
    }
}

/// One peripheral as presented to the orchestrator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DeviceDescriptor<'a> {
    name: &'static str,
    id: InstanceId,
    resources: &'a [ResourceClaim],
    config: DeviceConfig<'a>,
}

impl<'a> DeviceDescriptor<'a> {
    #[must_use]
    pub const fn new(name: &'static str, id: InstanceId, resources: &'a [ResourceClaim]) -> Self {
        Self {
            name,
            id,
            resources,
            config: DeviceConfig::None,
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: DeviceConfig<'a>) -> Self {
        self.config = config;
        self
    }

    /// Driver match name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Claims in the order the driver indexes them.
    #[must_use]
    pub const fn resources(&self) -> &'a [ResourceClaim] {
        self.resources
    }

    #[must_use]
    pub const fn config(&self) -> DeviceConfig<'a> {
        self.config
    }

    /// Whether both descriptors refer to the same `(name, id)` slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl fmt::Display for DeviceDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::Dm9000Config;
    use board_registers::dm9000::Dm9000Flags;

    #[test]
    fn numbered_instances_print_their_id() {
        let dev = DeviceDescriptor::new("dm9000", InstanceId::Numbered(0), &[]);
        assert_eq!(dev.to_string(), "dm9000.0");
        assert_eq!(
            DeviceDescriptor::new("s3c2410-wdt", InstanceId::Single, &[]).to_string(),
            "s3c2410-wdt"
        );
    }

    #[test]
    fn slot_identity_ignores_resources() {
        const IRQ3: [ResourceClaim; 1] = [ResourceClaim::irq(3)];
        let a = DeviceDescriptor::new("x", InstanceId::Numbered(1), &[]);
        let b = DeviceDescriptor::new("x", InstanceId::Numbered(1), &IRQ3);
        let c = DeviceDescriptor::new("x", InstanceId::Numbered(2), &[]);
        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
    }

    #[test]
    fn config_is_attached_by_reference() {
        let net = Dm9000Config::new(Dm9000Flags::new().with_bus_16bit_only(true));
        let dev = DeviceDescriptor::new("dm9000", InstanceId::Numbered(0), &[])
            .with_config(DeviceConfig::Network(&net));
        assert_eq!(dev.config().kind(), "network");
        assert!(matches!(dev.config(), DeviceConfig::Network(n) if core::ptr::eq(n, &net)));
    }
}
