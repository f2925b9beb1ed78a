use crate::{MemoryAddress, PageFrameNumber, PageSize, Size4K};
use core::fmt;
use core::ops::Add;

/// Physical bus address.
///
/// A thin wrapper around [`MemoryAddress`] that denotes **physical** addresses
/// (SDRAM, chip-select windows, peripheral register blocks). Like
/// [`VirtualAddress`](super::VirtualAddress), this type carries intent and
/// prevents accidental VA↔PA mix-ups in board tables.
///
/// ### Examples
/// ```rust
/// # use board_memory_addresses::*;
/// let cs2 = PhysicalAddress::new(0x1000_0000);
/// let upper = cs2 + (1 << 24);
/// assert_eq!(upper.as_u32(), 0x1100_0000);
/// assert_eq!(upper.pfn().as_u32(), 0x1_1000);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PhysicalAddress(pub(crate) MemoryAddress);

impl PhysicalAddress {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub const fn new(v: u32) -> Self {
        Self(MemoryAddress::new(v))
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0.as_u32()
    }

    #[inline]
    #[must_use]
    pub const fn is_aligned<S: PageSize>(self) -> bool {
        self.0.is_aligned::<S>()
    }

    #[inline]
    #[must_use]
    pub const fn align_down<S: PageSize>(self) -> Self {
        Self(self.0.align_down::<S>())
    }

    /// The frame number of the small page containing this address.
    #[inline]
    #[must_use]
    pub const fn pfn(self) -> PageFrameNumber {
        PageFrameNumber::new(self.as_u32() >> Size4K::SHIFT)
    }

    /// The last byte of a `len`-byte span starting here, if it fits.
    #[inline]
    #[must_use]
    pub const fn last_of(self, len: u32) -> Option<Self> {
        match self.0.last_of(len) {
            Some(a) => Some(Self(a)),
            None => None,
        }
    }

    /// Const-friendly addition; panics at compile time when used in a `const`
    /// and the sum overflows.
    #[inline]
    #[must_use]
    pub const fn offset(self, rhs: u32) -> Self {
        Self::new(self.as_u32() + rhs)
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PA({})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for PhysicalAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<PageFrameNumber> for PhysicalAddress {
    #[inline]
    fn from(value: PageFrameNumber) -> Self {
        value.base()
    }
}

impl Add<u32> for PhysicalAddress {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u32) -> Self::Output {
        self.offset(rhs)
    }
}
