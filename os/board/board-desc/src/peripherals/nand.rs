//! # NAND Flash Platform Data
//!
//! The NAND controller driver receives bus timing and one or more chip
//! *sets*, each with a partition table. Partition tables are written the way
//! they are read in a board file: a list of `(name, offset, size)` with the
//! last entry optionally taking whatever space is left.
//!
//! ```text
//!  0        2 MiB            5 MiB                                capacity
//!  ├─ Boot ─┼──── Kernel ────┼──────────── Rootfs (remainder) ───────┤
//! ```
//!
//! [`resolve_partitions`] turns such a table into concrete byte ranges and
//! rejects tables with gaps, overlaps, a misplaced remainder entry, or
//! partitions reaching past the end of the chip.

use crate::error::ConfigError;
use alloc::vec::Vec;
use log::{debug, error, trace};

/// Size of a partition as written in the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PartitionSize {
    Bytes(u64),
    /// Everything from the partition's offset to the end of the device.
    Remainder,
}

/// One entry of a partition table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StoragePartition {
    name: &'static str,
    offset: u64,
    size: PartitionSize,
}

impl StoragePartition {
    #[must_use]
    pub const fn new(name: &'static str, offset: u64, bytes: u64) -> Self {
        Self {
            name,
            offset,
            size: PartitionSize::Bytes(bytes),
        }
    }

    /// A partition extending to the end of the device.
    #[must_use]
    pub const fn remainder(name: &'static str, offset: u64) -> Self {
        Self {
            name,
            offset,
            size: PartitionSize::Remainder,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub const fn size(&self) -> PartitionSize {
        self.size
    }
}

/// A partition with its size worked out against the device capacity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolvedPartition {
    pub name: &'static str,
    pub offset: u64,
    pub size: u64,
}

impl ResolvedPartition {
    /// First byte past the partition.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Resolve a partition table against a device of `capacity` bytes.
///
/// Partitions are considered in offset order. The first one may start
/// anywhere; every later one must start exactly where its predecessor ends.
///
/// # Errors
/// * [`ConfigError::PartitionMisplaced`] for a gap or overlap, with the
///   offset the partition should have had
/// * [`ConfigError::RemainderNotLast`] when a remainder entry is followed by
///   another partition (this also rejects a second remainder entry)
/// * [`ConfigError::EmptyPartition`] for a zero-sized partition, or a
///   remainder that starts at the very end of the device
/// * [`ConfigError::PartitionExceedsDevice`] when a partition ends past
///   `capacity`
pub fn resolve_partitions(
    partitions: &[StoragePartition],
    capacity: u64,
) -> Result<Vec<ResolvedPartition>, ConfigError> {
    let mut ordered: Vec<&StoragePartition> = partitions.iter().collect();
    ordered.sort_by_key(|p| p.offset);

    let mut resolved = Vec::with_capacity(ordered.len());
    let mut expected = ordered.first().map_or(0, |p| p.offset);
    let last = ordered.len().saturating_sub(1);

    for (i, part) in ordered.into_iter().enumerate() {
        if part.offset != expected {
            return Err(fail(ConfigError::PartitionMisplaced {
                name: part.name,
                expected,
                actual: part.offset,
            }));
        }

        let size = match part.size {
            PartitionSize::Bytes(bytes) => bytes,
            PartitionSize::Remainder if i != last => {
                return Err(fail(ConfigError::RemainderNotLast { name: part.name }));
            }
            PartitionSize::Remainder => {
                capacity
                    .checked_sub(part.offset)
                    .ok_or(ConfigError::PartitionExceedsDevice {
                        name: part.name,
                        end: part.offset,
                        capacity,
                    })
                    .inspect_err(|e| error!("{e}"))?
            }
        };

        if size == 0 {
            return Err(fail(ConfigError::EmptyPartition { name: part.name }));
        }

        let end = part.offset.saturating_add(size);
        if end > capacity {
            return Err(fail(ConfigError::PartitionExceedsDevice {
                name: part.name,
                end,
                capacity,
            }));
        }

        trace!("partition {} at {:#x}, {:#x} bytes", part.name, part.offset, size);
        resolved.push(ResolvedPartition {
            name: part.name,
            offset: part.offset,
            size,
        });
        expected = end;
    }

    Ok(resolved)
}

fn fail(err: ConfigError) -> ConfigError {
    error!("{err}");
    err
}

/// NAND bus timing in nanoseconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NandTiming {
    /// CLE/ALE setup before nWE.
    pub tacls: u8,
    /// nWE/nRE strobe width.
    pub twrph0: u8,
    /// CLE/ALE hold after nWE.
    pub twrph1: u8,
}

impl NandTiming {
    #[must_use]
    pub const fn new(tacls: u8, twrph0: u8, twrph1: u8) -> Self {
        Self {
            tacls,
            twrph0,
            twrph1,
        }
    }

    /// Convert `ns` to whole bus clock cycles at `hclk_hz`, rounding up.
    #[must_use]
    pub const fn cycles(ns: u8, hclk_hz: u32) -> u64 {
        (ns as u64 * hclk_hz as u64).div_ceil(1_000_000_000)
    }

    /// # Errors
    /// [`ConfigError::InvalidNandTiming`] for a zero strobe width.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.twrph0 == 0 {
            return Err(ConfigError::InvalidNandTiming { field: "twrph0" });
        }
        Ok(())
    }
}

/// A group of identical chips sharing one partition table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StorageDeviceSet<'a> {
    name: &'static str,
    nr_chips: u8,
    /// Bytes addressable through the partition table.
    capacity: u64,
    partitions: &'a [StoragePartition],
}

impl<'a> StorageDeviceSet<'a> {
    #[must_use]
    pub const fn new(
        name: &'static str,
        nr_chips: u8,
        capacity: u64,
        partitions: &'a [StoragePartition],
    ) -> Self {
        Self {
            name,
            nr_chips,
            capacity,
            partitions,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn nr_chips(&self) -> u8 {
        self.nr_chips
    }

    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub const fn partitions(&self) -> &'a [StoragePartition] {
        self.partitions
    }

    /// The partition table as concrete byte ranges.
    ///
    /// # Errors
    /// [`ConfigError::NoNandChips`], [`ConfigError::EmptyPartitionTable`], or
    /// any error of [`resolve_partitions`].
    pub fn resolve(&self) -> Result<Vec<ResolvedPartition>, ConfigError> {
        if self.nr_chips == 0 {
            return Err(fail(ConfigError::NoNandChips { set: self.name }));
        }
        if self.partitions.is_empty() {
            return Err(fail(ConfigError::EmptyPartitionTable { set: self.name }));
        }
        resolve_partitions(self.partitions, self.capacity)
    }
}

/// Platform data of the NAND controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NandPlatformConfig<'a> {
    timing: NandTiming,
    sets: &'a [StorageDeviceSet<'a>],
}

impl<'a> NandPlatformConfig<'a> {
    #[must_use]
    pub const fn new(timing: NandTiming, sets: &'a [StorageDeviceSet<'a>]) -> Self {
        Self { timing, sets }
    }

    #[must_use]
    pub const fn timing(&self) -> NandTiming {
        self.timing
    }

    #[must_use]
    pub const fn sets(&self) -> &'a [StorageDeviceSet<'a>] {
        self.sets
    }

    /// # Errors
    /// [`ConfigError::NoNandSets`], a timing error, or the first set that
    /// fails to resolve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sets.is_empty() {
            return Err(fail(ConfigError::NoNandSets));
        }
        self.timing.validate().inspect_err(|e| error!("{e}"))?;
        for set in self.sets {
            let parts = set.resolve()?;
            debug!(
                "nand set {}: {} chip(s), {} partition(s)",
                set.name,
                set.nr_chips,
                parts.len()
            );
        }
        Ok(())
    }
}
