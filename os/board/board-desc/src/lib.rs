//! # Board Descriptors
//!
//! The data model that describes *what hardware exists on a board and how it
//! is wired*, and the checks that keep that description consistent before a
//! boot orchestrator ever consumes it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  BoardDescriptor                         │
//! │   name, boot-tag offset, stage inputs, device registry   │
//! └───────┬───────────────┬──────────────────┬───────────────┘
//!         │               │                  │
//! ┌───────▼──────┐ ┌──────▼────────────┐ ┌───▼──────────────┐
//! │ MemoryMap    │ │ Peripheral        │ │ DeviceRegistry   │
//! │ Table        │ │ configurations    │ │ (ordered device  │
//! │ (static I/O  │ │ UART, display,    │ │  descriptors +   │
//! │  windows)    │ │ NAND, EEPROM, ... │ │  low-speed bus)  │
//! └──────────────┘ └───────────────────┘ └───┬──────────────┘
//!                                            │
//!                                   ┌────────▼─────────┐
//!                                   │ Resource claims  │
//!                                   │ (memory ranges,  │
//!                                   │  interrupt lines)│
//!                                   └──────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! All configuration records are plain `Copy` values that board crates write
//! as `const` items. They are referenced, never copied, by the aggregate
//! types. [`BoardDescriptor::builder`] assembles them and
//! [`BoardBuilder::build`] runs every consistency check:
//!
//! * static I/O windows are non-empty, aligned and disjoint
//!   ([`memmap::MemoryMapTable`])
//! * no two devices claim overlapping memory or the same interrupt line with
//!   different trigger modes ([`resource::check_conflicts`])
//! * UART channels are unique, display timing is sane, NAND partitions tile
//!   the chip, EEPROM geometry is whole pages ([`peripherals`])
//! * exactly one low-speed bus implementation is registered
//!   ([`registry::LowSpeedBus`])
//!
//! A failed check is a [`ConfigError`] naming the offending region, device,
//! partition or channel. There is no way to obtain a `BoardDescriptor` that
//! violates these invariants.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod board;
pub mod device;
mod error;
pub mod memmap;
pub mod peripherals;
pub mod registry;
pub mod resource;

pub use board::{BoardBuilder, BoardDescriptor};
pub use device::{DeviceConfig, DeviceDescriptor, InstanceId};
pub use error::{ConfigError, HardwareError};
pub use memmap::{IoMapper, MemoryMapTable, MemoryRegion, MemoryType};
pub use registry::{DeviceRegistry, LowSpeedBus, RegistryBuilder};
pub use resource::{InterruptClaim, MemoryClaim, ResourceClaim, Trigger};
