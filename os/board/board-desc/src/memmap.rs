//! # Static I/O Mappings
//!
//! Translation entries a board needs before any driver runs: off-chip buses
//! and register blocks that the kernel reaches through fixed virtual windows.
//!
//! A [`MemoryMapTable`] can only be created from regions that satisfy the
//! table invariants:
//!
//! * every region is non-empty and does not wrap past `u32::MAX`,
//! * virtual base, physical base and length are multiples of the minimum
//!   mapping granularity ([`MinimumGranularity`], 4 KiB),
//! * no two regions overlap in the **virtual** address space.
//!
//! Several regions may alias the same physical range; that is how the ISA-style
//! bus exposes separate byte and word access windows.
//!
//! ```rust
//! use board_desc::memmap::{MemoryMapTable, MemoryRegion, MemoryType};
//! use board_memory_addresses::{PhysicalAddress, VirtualAddress};
//!
//! const IO: [MemoryRegion; 2] = [
//!     MemoryRegion::new(VirtualAddress::new(0xF800_0000), PhysicalAddress::new(0x1000_0000), 0x1_0000, MemoryType::Device),
//!     MemoryRegion::new(VirtualAddress::new(0xF900_0000), PhysicalAddress::new(0x1000_0000), 0x1_0000, MemoryType::Device),
//! ];
//! let table = MemoryMapTable::new(&IO).unwrap();
//! assert_eq!(table.len(), 2);
//! ```

use crate::error::{ConfigError, HardwareError};
use alloc::vec::Vec;
use board_memory_addresses::{
    MinimumGranularity, PageFrameNumber, PageSize, PhysicalAddress, VirtualAddress,
};
use core::fmt;
use log::{debug, error};

/// Memory attributes of a static mapping.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemoryType {
    /// Shared device memory: strongly ordered, non-cacheable, non-bufferable.
    Device,
    /// Device memory private to one CPU.
    DeviceNonShared,
    /// Device memory that tolerates write buffering.
    DeviceWriteCombined,
    /// Normal memory with caching disabled.
    Uncached,
    /// Normal write-back cached memory.
    Cached,
}

impl MemoryType {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Device => "device, non-cacheable",
            Self::DeviceNonShared => "device, non-shared, non-cacheable",
            Self::DeviceWriteCombined => "device, write-combining",
            Self::Uncached => "normal, non-cacheable",
            Self::Cached => "normal, write-back",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One physical-to-virtual mapping request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryRegion {
    virt: VirtualAddress,
    phys: PhysicalAddress,
    length: u32,
    kind: MemoryType,
}

impl MemoryRegion {
    #[must_use]
    pub const fn new(
        virt: VirtualAddress,
        phys: PhysicalAddress,
        length: u32,
        kind: MemoryType,
    ) -> Self {
        Self {
            virt,
            phys,
            length,
            kind,
        }
    }

    #[must_use]
    pub const fn virt(&self) -> VirtualAddress {
        self.virt
    }

    #[must_use]
    pub const fn phys(&self) -> PhysicalAddress {
        self.phys
    }

    /// Physical side expressed as a page frame number.
    #[must_use]
    pub const fn pfn(&self) -> PageFrameNumber {
        self.phys.pfn()
    }

    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub const fn kind(&self) -> MemoryType {
        self.kind
    }

    /// Last virtual byte covered, or `None` for an empty or wrapping region.
    #[must_use]
    pub const fn virt_last(&self) -> Option<VirtualAddress> {
        self.virt.last_of(self.length)
    }

    /// Whether the virtual ranges of both regions share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.virt_last(), other.virt_last()) {
            (Some(a_last), Some(b_last)) => self.virt <= b_last && other.virt <= a_last,
            _ => false,
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::EmptyRegion {
                index,
                virt: self.virt,
            });
        }

        let granularity = MinimumGranularity::SIZE;
        if !self.virt.is_aligned::<MinimumGranularity>()
            || !self.phys.is_aligned::<MinimumGranularity>()
            || !self.length.is_multiple_of(granularity)
        {
            return Err(ConfigError::MisalignedRegion {
                index,
                virt: self.virt,
                phys: self.phys,
                length: self.length,
                granularity,
            });
        }

        if self.virt_last().is_none() || self.phys.last_of(self.length).is_none() {
            return Err(ConfigError::RegionWraps {
                index,
                virt: self.virt,
            });
        }

        Ok(())
    }
}

/// Installs static translation entries.
///
/// Implemented by the boot orchestrator's MMU code.
pub trait IoMapper {
    /// Establish one translation entry.
    ///
    /// # Errors
    /// The translation table could not accept the entry.
    fn map_io(&mut self, region: &MemoryRegion) -> Result<(), HardwareError>;
}

/// A validated, ordered list of static I/O mappings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryMapTable<'a> {
    regions: &'a [MemoryRegion],
}

impl<'a> MemoryMapTable<'a> {
    /// A table without mappings.
    #[must_use]
    pub const fn empty() -> Self {
        Self { regions: &[] }
    }

    /// Validate `regions` and wrap them.
    ///
    /// # Errors
    /// The first region (in table order) that is empty, misaligned or wraps,
    /// or the first pair of regions (in virtual address order) that overlap.
    pub fn new(regions: &'a [MemoryRegion]) -> Result<Self, ConfigError> {
        for (index, region) in regions.iter().enumerate() {
            region.validate(index).inspect_err(|e| error!("{e}"))?;
        }

        // Sweep in virtual address order; each region only needs comparing
        // with its predecessor since all of them are non-empty.
        let mut order: Vec<usize> = (0..regions.len()).collect();
        order.sort_unstable_by_key(|&i| regions[i].virt);
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if regions[a].overlaps(&regions[b]) {
                let (first, second) = if a < b { (a, b) } else { (b, a) };
                let err = ConfigError::OverlappingRegions {
                    first,
                    first_virt: regions[first].virt,
                    second,
                    second_virt: regions[second].virt,
                };
                error!("{err}");
                return Err(err);
            }
        }

        Ok(Self { regions })
    }

    #[must_use]
    pub const fn regions(&self) -> &'a [MemoryRegion] {
        self.regions
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Hand every region, in table order, to `mapper`.
    ///
    /// Installing the same table twice requests the same entries again; whether
    /// that is harmless is up to the mapper.
    ///
    /// # Errors
    /// The first entry the mapper rejects; later entries are not requested.
    pub fn install<M: IoMapper + ?Sized>(&self, mapper: &mut M) -> Result<(), HardwareError> {
        for region in self.regions {
            debug!(
                "map {} → {} ({:?}), {:#x} bytes, {}",
                region.virt,
                region.phys,
                region.pfn(),
                region.length,
                region.kind
            );
            mapper.map_io(region)?;
        }
        Ok(())
    }
}

impl Default for MemoryMapTable<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn region(virt: u32, phys: u32, length: u32) -> MemoryRegion {
        MemoryRegion::new(
            VirtualAddress::new(virt),
            PhysicalAddress::new(phys),
            length,
            MemoryType::Device,
        )
    }

    #[derive(Default)]
    struct Recorder {
        mapped: Vec<MemoryRegion>,
        reject_after: Option<usize>,
    }

    impl IoMapper for Recorder {
        fn map_io(&mut self, region: &MemoryRegion) -> Result<(), HardwareError> {
            if self.reject_after == Some(self.mapped.len()) {
                return Err(HardwareError::MappingRejected {
                    virt: region.virt(),
                    phys: region.phys(),
                });
            }
            self.mapped.push(*region);
            Ok(())
        }
    }

    #[test]
    fn physical_aliases_are_allowed() {
        let regions = [
            region(0xF800_0000, 0x1000_0000, 0x1_0000),
            region(0xF900_0000, 0x1000_0000, 0x1_0000),
        ];
        assert!(MemoryMapTable::new(&regions).is_ok());
    }

    #[test]
    fn adjacent_regions_do_not_overlap() {
        let regions = [
            region(0xF801_0000, 0x1100_0000, 0x40_0000),
            region(0xF800_0000, 0x1000_0000, 0x1_0000),
        ];
        assert!(MemoryMapTable::new(&regions).is_ok());
    }

    #[test]
    fn overlapping_virtual_ranges_are_rejected() {
        let regions = [
            region(0xF800_0000, 0x1000_0000, 0x2_0000),
            region(0xF900_0000, 0x1000_0000, 0x1000),
            region(0xF801_0000, 0x1100_0000, 0x1000),
        ];
        assert_eq!(
            MemoryMapTable::new(&regions).unwrap_err(),
            ConfigError::OverlappingRegions {
                first: 0,
                first_virt: VirtualAddress::new(0xF800_0000),
                second: 2,
                second_virt: VirtualAddress::new(0xF801_0000),
            }
        );
    }

    #[test]
    fn empty_region_is_rejected() {
        let regions = [region(0xF800_0000, 0x1000_0000, 0)];
        assert!(matches!(
            MemoryMapTable::new(&regions),
            Err(ConfigError::EmptyRegion { index: 0, .. })
        ));
    }

    #[test]
    fn misalignment_is_rejected_on_each_axis() {
        for bad in [
            region(0xF800_0800, 0x1000_0000, 0x1000),
            region(0xF800_0000, 0x1000_0800, 0x1000),
            region(0xF800_0000, 0x1000_0000, 0x1800),
        ] {
            assert!(matches!(
                MemoryMapTable::new(&[bad]),
                Err(ConfigError::MisalignedRegion { granularity: 0x1000, .. })
            ));
        }
    }

    #[test]
    fn wrapping_region_is_rejected() {
        let regions = [region(0xFFFF_F000, 0x1000_0000, 0x2000)];
        assert!(matches!(
            MemoryMapTable::new(&regions),
            Err(ConfigError::RegionWraps { index: 0, .. })
        ));
    }

    #[test]
    fn install_preserves_table_order() {
        let regions = [
            region(0xF900_0000, 0x1000_0000, 0x1000),
            region(0xF800_0000, 0x1000_0000, 0x1000),
        ];
        let table = MemoryMapTable::new(&regions).unwrap();
        let mut recorder = Recorder::default();
        table.install(&mut recorder).unwrap();
        assert_eq!(recorder.mapped, regions);
    }

    #[test]
    fn install_is_repeatable() {
        let regions = [region(0xF800_0000, 0x1000_0000, 0x1000)];
        let table = MemoryMapTable::new(&regions).unwrap();
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        table.install(&mut first).unwrap();
        table.install(&mut second).unwrap();
        assert_eq!(first.mapped, second.mapped);
    }

    #[test]
    fn install_stops_at_first_rejection() {
        let regions = [
            region(0xF800_0000, 0x1000_0000, 0x1000),
            region(0xF900_0000, 0x1000_0000, 0x1000),
        ];
        let table = MemoryMapTable::new(&regions).unwrap();
        let mut recorder = Recorder {
            reject_after: Some(1),
            ..Recorder::default()
        };
        assert!(table.install(&mut recorder).is_err());
        assert_eq!(recorder.mapped.len(), 1);
    }

    #[test]
    fn pfn_matches_physical_base() {
        let r = region(0xF801_0000, 0x1100_0000, 0x40_0000);
        assert_eq!(r.pfn().as_u32(), 0x1_1000);
    }
}
