//! # EmbedSky TQ2440
//!
//! Board definition of the TQ2440: a Samsung S3C2440 (ARM920T) with 64 MiB
//! SDRAM, 256 MiB NAND, a DM9000 Ethernet controller on nGCS4, an AT24C02
//! EEPROM on I2C bus 0 and a 4.3" 480x272 TFT panel.
//!
//! ```text
//!  tables (static, const) ──► BoardDescriptor ──► Machine ──boot()──► running
//!                                 ▲
//!                 LowSpeedBus ────┘  IIC controller  xor  GPIO bit-bang
//! ```
//!
//! The I2C bus implementation defaults to the SoC controller. Building with the
//! `eeprom-gpio-i2c` feature makes the bit-banged bus on GPE14/GPE15 the
//! default instead; [`board_with`] accepts either explicitly.
//!
//! ```rust
//! let machine = mach_tq2440::board().unwrap();
//! assert_eq!(machine.name(), "TQ2440");
//! assert_eq!(machine.board().registry().len(), 8);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "console")]
pub mod console;
pub mod tables;

use board_boot::Machine;
use board_desc::{BoardDescriptor, ConfigError, LowSpeedBus, RegistryBuilder};
use log::debug;

/// The bus selected at build time.
#[must_use]
pub const fn default_low_speed_bus() -> LowSpeedBus<'static> {
    if cfg!(feature = "eeprom-gpio-i2c") {
        tables::GPIO_BUS
    } else {
        tables::IIC_CONTROLLER
    }
}

/// The validated descriptor of the TQ2440 with the given I2C bus.
///
/// # Errors
/// The first configuration invariant the tables violate.
pub fn descriptor(bus: LowSpeedBus<'static>) -> Result<BoardDescriptor<'static>, ConfigError> {
    debug!(
        "low-speed bus: {}",
        if bus.is_controller() {
            "IIC controller"
        } else {
            "GPIO bit-bang"
        }
    );
    let registry = RegistryBuilder::new()
        .devices(&tables::DEVICES_BEFORE_BUS)
        .low_speed_bus(bus)
        .devices(&tables::DEVICES_AFTER_BUS);

    BoardDescriptor::builder(tables::MACHINE_NAME)
        .memory_map(&tables::IO_DESC)
        .clock(tables::CLOCK)
        .uarts(&tables::UARTS)
        .timer(tables::TIMER)
        .framebuffer(&tables::FRAMEBUFFER)
        .nand(&tables::NAND)
        .registry(registry)
        .i2c_board_info(0, &tables::I2C_DEVICES)
        .build()
}

/// The TQ2440 machine record with the given I2C bus.
///
/// # Errors
/// See [`descriptor`].
pub fn board_with(bus: LowSpeedBus<'static>) -> Result<Machine<'static>, ConfigError> {
    descriptor(bus).map(Machine::new)
}

/// The TQ2440 machine record with the build-time default I2C bus.
///
/// # Errors
/// See [`descriptor`].
pub fn board() -> Result<Machine<'static>, ConfigError> {
    board_with(default_low_speed_bus())
}
