//! # Board Descriptor
//!
//! The single immutable record that describes a board to the boot
//! orchestrator. It is assembled by [`BoardBuilder`] from `const` tables and
//! can only come into existence once every table has passed its checks.
//!
//! ```text
//! BoardBuilder ──build()──► BoardDescriptor
//!   │                          │
//!   ├─ memory map   ─────────► MemoryMapTable     (stage: map I/O)
//!   ├─ clock, uarts, timer ──► stage inputs       (stage: map I/O)
//!   ├─ framebuffer, nand ────► platform data      (stage: machine init)
//!   ├─ registry     ─────────► DeviceRegistry     (stage: machine init)
//!   └─ i2c board info ───────► bus devices        (stage: machine init)
//! ```

use crate::device::DeviceConfig;
use crate::error::ConfigError;
use crate::memmap::{MemoryMapTable, MemoryRegion};
use crate::peripherals::eeprom::validate_bus;
use crate::peripherals::uart::validate_uarts;
use crate::peripherals::{
    ClockConfig, FramebufferConfig, I2cBoardInfo, NandPlatformConfig, TimerSelection,
    UartChannelConfig,
};
use crate::registry::{DeviceRegistry, RegistryBuilder};
use board_info::clock::LCD_FRAMEBUFFER_BUDGET;
use board_info::memory::BOOT_TAG_OFFSET;
use log::{error, info};

/// Everything the boot stages consume, validated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardDescriptor<'a> {
    name: &'static str,
    boot_tag_offset: u32,
    memory_map: MemoryMapTable<'a>,
    clock: ClockConfig,
    uarts: &'a [UartChannelConfig],
    timer: TimerSelection,
    framebuffer: Option<&'a FramebufferConfig<'a>>,
    framebuffer_budget: u32,
    nand: Option<&'a NandPlatformConfig<'a>>,
    registry: DeviceRegistry<'a>,
    i2c_bus: u8,
    i2c_devices: &'a [I2cBoardInfo<'a>],
}

impl<'a> BoardDescriptor<'a> {
    /// Start describing the board called `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> BoardBuilder<'a> {
        BoardBuilder::new(name)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Where the boot loader leaves its tag list, relative to the start of RAM.
    #[must_use]
    pub const fn boot_tag_offset(&self) -> u32 {
        self.boot_tag_offset
    }

    #[must_use]
    pub const fn memory_map(&self) -> &MemoryMapTable<'a> {
        &self.memory_map
    }

    #[must_use]
    pub const fn clock(&self) -> ClockConfig {
        self.clock
    }

    #[must_use]
    pub const fn uarts(&self) -> &'a [UartChannelConfig] {
        self.uarts
    }

    #[must_use]
    pub const fn timer(&self) -> TimerSelection {
        self.timer
    }

    #[must_use]
    pub const fn framebuffer(&self) -> Option<&'a FramebufferConfig<'a>> {
        self.framebuffer
    }

    #[must_use]
    pub const fn framebuffer_budget(&self) -> u32 {
        self.framebuffer_budget
    }

    #[must_use]
    pub const fn nand(&self) -> Option<&'a NandPlatformConfig<'a>> {
        self.nand
    }

    #[must_use]
    pub const fn registry(&self) -> &DeviceRegistry<'a> {
        &self.registry
    }

    /// Bus number the I2C devices are registered on.
    #[must_use]
    pub const fn i2c_bus(&self) -> u8 {
        self.i2c_bus
    }

    #[must_use]
    pub const fn i2c_devices(&self) -> &'a [I2cBoardInfo<'a>] {
        self.i2c_devices
    }
}

/// Collects a board's tables; see [`BoardDescriptor::builder`].
#[derive(Debug)]
pub struct BoardBuilder<'a> {
    name: &'static str,
    boot_tag_offset: u32,
    memory_map: &'a [MemoryRegion],
    clock: Option<ClockConfig>,
    uarts: &'a [UartChannelConfig],
    timer: Option<TimerSelection>,
    framebuffer: Option<&'a FramebufferConfig<'a>>,
    framebuffer_budget: u32,
    nand: Option<&'a NandPlatformConfig<'a>>,
    registry: Option<RegistryBuilder<'a>>,
    i2c_bus: u8,
    i2c_devices: &'a [I2cBoardInfo<'a>],
}

impl<'a> BoardBuilder<'a> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            boot_tag_offset: BOOT_TAG_OFFSET,
            memory_map: &[],
            clock: None,
            uarts: &[],
            timer: None,
            framebuffer: None,
            framebuffer_budget: LCD_FRAMEBUFFER_BUDGET,
            nand: None,
            registry: None,
            i2c_bus: 0,
            i2c_devices: &[],
        }
    }

    #[must_use]
    pub const fn boot_tag_offset(mut self, offset: u32) -> Self {
        self.boot_tag_offset = offset;
        self
    }

    #[must_use]
    pub const fn memory_map(mut self, regions: &'a [MemoryRegion]) -> Self {
        self.memory_map = regions;
        self
    }

    #[must_use]
    pub const fn clock(mut self, clock: ClockConfig) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub const fn uarts(mut self, uarts: &'a [UartChannelConfig]) -> Self {
        self.uarts = uarts;
        self
    }

    #[must_use]
    pub const fn timer(mut self, timer: TimerSelection) -> Self {
        self.timer = Some(timer);
        self
    }

    #[must_use]
    pub const fn framebuffer(mut self, framebuffer: &'a FramebufferConfig<'a>) -> Self {
        self.framebuffer = Some(framebuffer);
        self
    }

    /// Bytes available to one frame; defaults to one LCD bank.
    #[must_use]
    pub const fn framebuffer_budget(mut self, bytes: u32) -> Self {
        self.framebuffer_budget = bytes;
        self
    }

    #[must_use]
    pub const fn nand(mut self, nand: &'a NandPlatformConfig<'a>) -> Self {
        self.nand = Some(nand);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: RegistryBuilder<'a>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Devices to announce on I2C bus `bus` once its adapter is up.
    #[must_use]
    pub const fn i2c_board_info(mut self, bus: u8, devices: &'a [I2cBoardInfo<'a>]) -> Self {
        self.i2c_bus = bus;
        self.i2c_devices = devices;
        self
    }

    /// Run every check and produce the descriptor.
    ///
    /// # Errors
    /// The first [`ConfigError`] found, in this order: missing parts, memory
    /// map, clock, UARTs, timer selection, frame buffer, NAND, device registry
    /// (including resource conflicts and attached device configuration), I2C
    /// board info.
    pub fn build(self) -> Result<BoardDescriptor<'a>, ConfigError> {
        let name = self.name;
        let result = self.check();
        if let Err(e) = &result {
            error!("board {name}: {e}");
        }
        result
    }

    fn check(self) -> Result<BoardDescriptor<'a>, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Missing { field: "name" });
        }
        let clock = self.clock.ok_or(ConfigError::Missing { field: "clock" })?;
        let timer = self
            .timer
            .ok_or(ConfigError::Missing { field: "timer selection" })?;
        let registry = self
            .registry
            .ok_or(ConfigError::Missing { field: "device registry" })?;

        let memory_map = MemoryMapTable::new(self.memory_map)?;
        clock.validate()?;
        validate_uarts(self.uarts)?;
        timer.validate()?;
        if let Some(fb) = self.framebuffer {
            fb.validate(self.framebuffer_budget)?;
        }
        if let Some(nand) = self.nand {
            nand.validate()?;
        }

        let registry = registry.build()?;
        for device in registry.iter() {
            match device.config() {
                DeviceConfig::Display(fb) => fb.validate(self.framebuffer_budget)?,
                DeviceConfig::Storage(nand) => nand.validate()?,
                DeviceConfig::Network(net) => net.validate()?,
                DeviceConfig::Eeprom(eeprom) => eeprom.validate()?,
                DeviceConfig::GpioI2c(gpio) => gpio.validate()?,
                DeviceConfig::None
                | DeviceConfig::I2cController(_)
                | DeviceConfig::Uart(_) => {}
            }
        }

        if !self.i2c_devices.is_empty() && registry.low_speed_bus().is_none() {
            return Err(ConfigError::Missing {
                field: "low-speed bus",
            });
        }
        validate_bus(self.i2c_bus, self.i2c_devices)?;

        info!(
            "board {}: {} I/O mappings, {} UARTs, {} devices, {} I2C devices on bus {}",
            self.name,
            memory_map.len(),
            self.uarts.len(),
            registry.len(),
            self.i2c_devices.len(),
            self.i2c_bus
        );

        Ok(BoardDescriptor {
            name: self.name,
            boot_tag_offset: self.boot_tag_offset,
            memory_map,
            clock,
            uarts: self.uarts,
            timer,
            framebuffer: self.framebuffer,
            framebuffer_budget: self.framebuffer_budget,
            nand: self.nand,
            registry,
            i2c_bus: self.i2c_bus,
            i2c_devices: self.i2c_devices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceDescriptor, InstanceId};
    use crate::memmap::MemoryType;
    use crate::peripherals::{Dm9000Config, EepromConfig, PwmTimer};
    use board_memory_addresses::{PhysicalAddress, VirtualAddress};
    use board_registers::at24::At24Flags;
    use board_registers::dm9000::Dm9000Flags;

    const MAP: [MemoryRegion; 1] = [MemoryRegion::new(
        VirtualAddress::new(0xF800_0000),
        PhysicalAddress::new(0x1000_0000),
        0x1_0000,
        MemoryType::Device,
    )];
    const TIMER: TimerSelection = TimerSelection::new(PwmTimer::Pwm3, PwmTimer::Pwm4);
    const EEPROM: EepromConfig = EepromConfig::new(256, 8, At24Flags::new());

    fn minimal() -> BoardBuilder<'static> {
        BoardDescriptor::builder("test")
            .memory_map(&MAP)
            .clock(ClockConfig::new(12_000_000))
            .timer(TIMER)
            .registry(RegistryBuilder::new())
    }

    #[test]
    fn minimal_board_builds_with_defaults() {
        let board = minimal().build().unwrap();
        assert_eq!(board.name(), "test");
        assert_eq!(board.boot_tag_offset(), 0x100);
        assert_eq!(board.framebuffer_budget(), 4 * 1024 * 1024);
        assert_eq!(board.memory_map().len(), 1);
        assert!(board.registry().is_empty());
    }

    #[test]
    fn missing_parts_are_named() {
        assert_eq!(
            BoardDescriptor::builder("x").build(),
            Err(ConfigError::Missing { field: "clock" })
        );
        assert_eq!(
            BoardDescriptor::builder("")
                .clock(ClockConfig::new(1))
                .build(),
            Err(ConfigError::Missing { field: "name" })
        );
    }

    #[test]
    fn i2c_devices_need_a_bus() {
        let infos = [I2cBoardInfo::new("24c02", 0x50).with_platform_data(&EEPROM)];
        assert_eq!(
            minimal().i2c_board_info(0, &infos).build(),
            Err(ConfigError::Missing {
                field: "low-speed bus"
            })
        );
    }

    #[test]
    fn attached_device_config_is_validated() {
        let bad = Dm9000Config::new(Dm9000Flags::new());
        let dev = DeviceDescriptor::new("dm9000", InstanceId::Numbered(0), &[])
            .with_config(DeviceConfig::Network(&bad));
        assert_eq!(
            minimal().registry(RegistryBuilder::new().device(dev)).build(),
            Err(ConfigError::InvalidBusWidth { flags: 0 })
        );
    }

    #[test]
    fn memory_map_errors_surface() {
        const BAD: [MemoryRegion; 1] = [MemoryRegion::new(
            VirtualAddress::new(0xF800_0000),
            PhysicalAddress::new(0x1000_0000),
            0,
            MemoryType::Device,
        )];
        assert!(matches!(
            minimal().memory_map(&BAD).build(),
            Err(ConfigError::EmptyRegion { .. })
        ));
    }
}
