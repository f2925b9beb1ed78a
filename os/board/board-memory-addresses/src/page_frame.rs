use crate::{PageSize, PhysicalAddress, Size4K};
use core::fmt;

/// Physical page frame number: a physical address divided by the small page
/// size. Static mapping tables traditionally describe their physical side this
/// way.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PageFrameNumber(u32);

impl PageFrameNumber {
    #[inline]
    #[must_use]
    pub const fn new(pfn: u32) -> Self {
        Self(pfn)
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The physical address of the first byte of this frame.
    #[inline]
    #[must_use]
    pub const fn base(self) -> PhysicalAddress {
        PhysicalAddress::new(self.0 << Size4K::SHIFT)
    }
}

impl fmt::Debug for PageFrameNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PFN({:#07X})", self.0)
    }
}
