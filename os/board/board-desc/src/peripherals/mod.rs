//! # Peripheral Configuration
//!
//! Typed configuration records for the on-board peripherals, plus the checks
//! each record must pass before a driver may consume it. Records are `Copy`
//! values built in `const` context; validation is a pure function of the
//! record and never touches hardware.
//!
//! | Module | Record | Checked invariant |
//! |--------|--------|-------------------|
//! | [`uart`] | [`UartChannelConfig`] | channel exists and is configured once |
//! | [`display`] | [`DisplayTimingConfig`], [`FramebufferConfig`] | timing sane, depth supported, frame fits its budget |
//! | [`nand`] | [`NandPlatformConfig`] | partitions tile each chip without gaps |
//! | [`eeprom`] | [`EepromConfig`], [`I2cBoardInfo`] | whole pages, valid 7-bit bus addresses |
//! | [`network`] | [`Dm9000Config`] | exactly one bus width |
//! | [`i2c`] | [`I2cControllerConfig`], [`GpioI2cConfig`] | distinct SDA/SCL pins |
//! | [`timer`] | [`TimerSelection`], [`ClockConfig`] | event and source on different channels |

pub mod display;
pub mod eeprom;
pub mod i2c;
pub mod nand;
pub mod network;
pub mod timer;
pub mod uart;

pub use display::{DisplayTimingConfig, FramebufferConfig, LcdGpioConfig};
pub use eeprom::{EepromConfig, I2cBoardInfo};
pub use i2c::{GpioI2cConfig, I2cControllerConfig};
pub use nand::{
    NandPlatformConfig, NandTiming, PartitionSize, ResolvedPartition, StorageDeviceSet,
    StoragePartition,
};
pub use network::Dm9000Config;
pub use timer::{ClockConfig, PwmTimer, TimerSelection};
pub use uart::UartChannelConfig;
