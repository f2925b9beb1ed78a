use crate::{MemoryAddress, PageSize};
use core::fmt;
use core::ops::Add;

/// Virtual address in the kernel's translated address space.
///
/// Carries the *kind* of address at the type level so static I/O windows are
/// never handed to code expecting a bus address.
///
/// ### Examples
/// ```rust
/// # use board_memory_addresses::*;
/// let isa_word = VirtualAddress::new(0xF800_0000);
/// assert!(isa_word.is_aligned::<Size1M>());
/// assert_eq!((isa_word + 0x1_0000).as_u32(), 0xF801_0000);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(pub(crate) MemoryAddress);

impl VirtualAddress {
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

    /// The last byte of a `len`-byte span starting here, if it fits.
    #[inline]
    #[must_use]
    pub const fn last_of(self, len: u32) -> Option<Self> {
        match self.0.last_of(len) {
            Some(a) => Some(Self(a)),
            None => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn offset(self, rhs: u32) -> Self {
        Self::new(self.as_u32() + rhs)
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA({})", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for VirtualAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl Add<u32> for VirtualAddress {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u32) -> Self::Output {
        self.offset(rhs)
    }
}
