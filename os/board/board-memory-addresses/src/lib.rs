//! # Physical and Virtual Addresses for 32-bit ARM Boards
//!
//! Strongly typed wrappers for the raw bus addresses that appear in board
//! descriptions: chip-select windows, peripheral register blocks and the
//! static I/O windows the kernel maps at boot.
//!
//! ## Overview
//!
//! Board tables mix two address spaces that must never be confused:
//!
//! | Wrapper | Meaning |
//! |----------|----------|
//! | [`PhysicalAddress`] | A bus address as seen by the SoC (RAM, MMIO, chip selects). |
//! | [`VirtualAddress`] | An address in the kernel's translated address space. |
//! | [`PageFrameNumber`] | A physical address shifted down by the small-page shift. |
//!
//! Both address kinds wrap a [`MemoryAddress`], a plain 32-bit value.
//!
//! ## Mapping Granularities
//!
//! The ARMv4/v5 MMU (short-descriptor format) maps memory in three sizes,
//! modelled as marker types implementing [`PageSize`]:
//!
//! - [`Size4K`]: 4 KiB small pages (the minimum mapping granularity)
//! - [`Size64K`]: 64 KiB large pages
//! - [`Size1M`]: 1 MiB sections
//!
//! ## Typical Usage
//!
//! ```rust
//! # use board_memory_addresses::*;
//! let pa = PhysicalAddress::new(0x1000_0000);
//! assert!(pa.is_aligned::<Size1M>());
//! assert_eq!(pa.pfn().as_u32(), 0x1_0000);
//!
//! let va = VirtualAddress::new(0xF800_0000);
//! assert_eq!(va.align_down::<Size4K>(), va);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod memory_address;
mod page_frame;
mod page_size;
mod physical_address;
mod virtual_address;

pub use memory_address::MemoryAddress;
pub use page_frame::PageFrameNumber;
pub use page_size::{PageSize, Size1M, Size4K, Size64K};
pub use physical_address::PhysicalAddress;
pub use virtual_address::VirtualAddress;

/// Convenience alias for the smallest mapping unit the MMU supports.
pub type MinimumGranularity = Size4K;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_helpers() {
        let a = MemoryAddress::new(0x0001_2345);
        assert_eq!(a.align_down::<Size4K>().as_u32(), 0x0001_2000);
        assert_eq!(a.offset_in::<Size4K>(), 0x345);
        assert!(!a.is_aligned::<Size4K>());
        assert!(MemoryAddress::new(0x0001_0000).is_aligned::<Size64K>());
        assert!(!MemoryAddress::new(0x0001_0000).is_aligned::<Size1M>());
    }

    #[test]
    fn pfn_round_trip() {
        let pa = PhysicalAddress::new(0x2000_0000);
        let pfn = pa.pfn();
        assert_eq!(pfn.as_u32(), 0x2_0000);
        assert_eq!(pfn.base(), pa);
    }

    #[test]
    fn pfn_drops_in_page_offset() {
        let pa = PhysicalAddress::new(0x1100_0123);
        assert_eq!(pa.pfn().base(), PhysicalAddress::new(0x1100_0000));
    }

    #[test]
    fn last_address_of_span() {
        let va = VirtualAddress::new(0xF801_0000);
        assert_eq!(va.last_of(0x40_0000), Some(VirtualAddress::new(0xF840_FFFF)));
        assert_eq!(va.last_of(0), None);
        assert_eq!(
            VirtualAddress::new(0xFFFF_0000).last_of(0x1_0000),
            Some(VirtualAddress::new(u32::MAX))
        );
        assert_eq!(VirtualAddress::new(0xFFFF_0000).last_of(0x1_0001), None);
    }

    #[test]
    fn display_is_zero_padded_hex() {
        assert_eq!(format!("{}", PhysicalAddress::new(0x2000_0004)), "0x2000_0004");
        assert_eq!(format!("{:?}", VirtualAddress::new(0xF800_0000)), "VA(0xF800_0000)");
        assert_eq!(format!("{}", Size1M), "1M");
    }
}
