//! # Device Registry
//!
//! The ordered list of devices a board presents to the orchestrator. Order is
//! significant only as enumeration order; the registry allocates nothing.
//!
//! Exactly one entry may be a low-speed (I2C) bus, and a board chooses
//! between two mutually exclusive implementations of it:
//!
//! ```text
//!              ┌─────────────────────────────┐
//!              │        LowSpeedBus          │
//!              └──────┬───────────────┬──────┘
//!                     │               │
//!      ┌──────────────▼───┐       ┌───▼────────────────┐
//!      │ Controller       │       │ GpioBitBang        │
//!      │ SoC IIC block,   │  xor  │ two GPIO pins,     │
//!      │ optional platform│       │ GpioI2cConfig      │
//!      │ data             │       │                    │
//!      └──────────────────┘       └────────────────────┘
//! ```
//!
//! The variant occupies one slot in the device order, wherever
//! [`RegistryBuilder::low_speed_bus`] was called.

use crate::device::{DeviceConfig, DeviceDescriptor};
use crate::error::ConfigError;
use crate::peripherals::{GpioI2cConfig, I2cControllerConfig};
use crate::resource::check_conflicts;
use alloc::vec::Vec;
use log::{debug, error};

/// The board's I2C bus, in one of its two implementations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LowSpeedBus<'a> {
    /// The SoC's I2C controller.
    Controller {
        device: DeviceDescriptor<'a>,
        /// `None` accepts the controller driver's defaults.
        platform_data: Option<&'a I2cControllerConfig>,
    },
    /// Software I2C on two GPIO pins.
    GpioBitBang {
        device: DeviceDescriptor<'a>,
        config: &'a GpioI2cConfig,
    },
}

impl<'a> LowSpeedBus<'a> {
    /// The registry entry, with the variant's configuration attached.
    #[must_use]
    pub const fn device(&self) -> DeviceDescriptor<'a> {
        match *self {
            Self::Controller {
                device,
                platform_data,
            } => device.with_config(DeviceConfig::I2cController(platform_data)),
            Self::GpioBitBang { device, config } => {
                device.with_config(DeviceConfig::GpioI2c(config))
            }
        }
    }

    #[must_use]
    pub const fn is_controller(&self) -> bool {
        matches!(self, Self::Controller { .. })
    }

    /// # Errors
    /// The bit-banged variant's pin check.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Controller { .. } => Ok(()),
            Self::GpioBitBang { config, .. } => config.validate(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Entry<'a> {
    Device(DeviceDescriptor<'a>),
    LowSpeedBus(LowSpeedBus<'a>),
}

/// Collects devices in presentation order.
///
/// Errors are reported by [`build`](Self::build), so registrations can be
/// chained.
#[derive(Debug, Default)]
pub struct RegistryBuilder<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> RegistryBuilder<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a device.
    #[must_use]
    pub fn device(mut self, device: DeviceDescriptor<'a>) -> Self {
        self.entries.push(Entry::Device(device));
        self
    }

    /// Append several devices, keeping their order.
    #[must_use]
    pub fn devices(mut self, devices: &[DeviceDescriptor<'a>]) -> Self {
        self.entries
            .extend(devices.iter().copied().map(Entry::Device));
        self
    }

    /// Append the board's low-speed bus.
    #[must_use]
    pub fn low_speed_bus(mut self, bus: LowSpeedBus<'a>) -> Self {
        self.entries.push(Entry::LowSpeedBus(bus));
        self
    }

    /// Validate and freeze the registry.
    ///
    /// # Errors
    /// * [`ConfigError::DuplicateLowSpeedBus`] when more than one bus
    ///   implementation is present, either through two
    ///   [`low_speed_bus`](Self::low_speed_bus) calls or through a plain device
    ///   carrying I2C bus configuration
    /// * [`ConfigError::DuplicateDevice`] for a repeated `(name, id)` pair
    /// * the bus variant's own validation error
    /// * any resource conflict reported by [`check_conflicts`]
    pub fn build(self) -> Result<DeviceRegistry<'a>, ConfigError> {
        let mut devices: Vec<DeviceDescriptor<'a>> = Vec::with_capacity(self.entries.len());
        let mut bus = None;
        let mut bus_like = 0usize;

        for entry in self.entries {
            let device = match entry {
                Entry::Device(device) => {
                    if matches!(
                        device.config(),
                        DeviceConfig::I2cController(_) | DeviceConfig::GpioI2c(_)
                    ) {
                        bus_like += 1;
                    }
                    device
                }
                Entry::LowSpeedBus(b) => {
                    bus_like += 1;
                    b.validate().inspect_err(|e| error!("{e}"))?;
                    bus = Some((devices.len(), b));
                    b.device()
                }
            };

            if let Some(existing) = devices.iter().find(|d| d.same_slot(&device)) {
                let err = ConfigError::DuplicateDevice {
                    name: existing.name(),
                    id: existing.id(),
                };
                error!("{err}");
                return Err(err);
            }
            devices.push(device);
        }

        if bus_like > 1 {
            error!("{}", ConfigError::DuplicateLowSpeedBus);
            return Err(ConfigError::DuplicateLowSpeedBus);
        }

        check_conflicts(&devices)?;

        for (index, device) in devices.iter().enumerate() {
            debug!(
                "device #{index}: {device} ({} resources, {} config)",
                device.resources().len(),
                device.config().kind()
            );
        }

        Ok(DeviceRegistry { devices, bus })
    }
}

/// A validated, ordered device list.
///
/// Entries are small descriptor handles; their resource lists and platform
/// data stay borrowed from the board's tables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceRegistry<'a> {
    devices: Vec<DeviceDescriptor<'a>>,
    /// Position and variant of the low-speed bus, if the board has one.
    bus: Option<(usize, LowSpeedBus<'a>)>,
}

impl<'a> DeviceRegistry<'a> {
    #[must_use]
    pub const fn builder() -> RegistryBuilder<'a> {
        RegistryBuilder::new()
    }

    /// All devices in presentation order, the bus entry included.
    #[must_use]
    pub fn devices(&self) -> &[DeviceDescriptor<'a>] {
        &self.devices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    #[must_use]
    pub fn low_speed_bus(&self) -> Option<&LowSpeedBus<'a>> {
        self.bus.as_ref().map(|(_, bus)| bus)
    }

    /// Index of the low-speed bus within [`devices`](Self::devices).
    #[must_use]
    pub fn low_speed_bus_slot(&self) -> Option<usize> {
        self.bus.as_ref().map(|(slot, _)| *slot)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&DeviceDescriptor<'a>> {
        self.devices.iter().find(|d| d.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor<'a>> {
        self.devices.iter()
    }
}
