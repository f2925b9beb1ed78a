use crate::PageSize;
use core::fmt;

/// Principal raw bus address ([virtual](crate::VirtualAddress) or [physical](crate::PhysicalAddress)).
///
/// The S3C24xx family is a 32-bit design, so every address fits a `u32`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MemoryAddress(u32);

impl MemoryAddress {
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Whether the address sits on an `S` boundary.
    #[inline]
    #[must_use]
    pub const fn is_aligned<S: PageSize>(self) -> bool {
        self.0 & (S::SIZE - 1) == 0
    }

    /// Align down to page boundary `S`.
    #[inline]
    #[must_use]
    pub const fn align_down<S: PageSize>(self) -> Self {
        Self(self.0 & !(S::SIZE - 1))
    }

    /// The offset within the `S`-sized page that contains this address.
    #[inline]
    #[must_use]
    pub const fn offset_in<S: PageSize>(self) -> u32 {
        self.0 & (S::SIZE - 1)
    }

    /// Checked add, returning `None` if the result leaves the 32-bit space.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, rhs: u32) -> Option<Self> {
        match self.0.checked_add(rhs) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The last byte of a span of `len` bytes starting here.
    ///
    /// Returns `None` for an empty span or one that wraps past `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn last_of(self, len: u32) -> Option<Self> {
        if len == 0 {
            return None;
        }
        match self.0.checked_add(len - 1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Debug for MemoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryAddress({self})")
    }
}

impl fmt::Display for MemoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 0xHHHH_HHHH style
        write!(f, "0x{:04X}_{:04X}", self.0 >> 16, self.0 & 0xFFFF)
    }
}

impl From<u32> for MemoryAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}
