use core::fmt;
use core::hash::Hash;

/// Sealed trait pattern to restrict `PageSize` impls to our markers.
mod sealed {
    pub trait Sealed {}
}

/// Marker trait for the mapping sizes of the ARM short-descriptor MMU.
pub trait PageSize:
    sealed::Sealed + Clone + Copy + Eq + PartialEq + Ord + PartialOrd + Hash + fmt::Display + fmt::Debug
{
    /// Mapping size in bytes (power of two).
    const SIZE: u32;
    /// log2(SIZE), i.e., number of low bits used for the offset.
    const SHIFT: u32;

    fn as_str() -> &'static str;
}

/// 4 KiB small page (4096 bytes).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Size4K;
impl sealed::Sealed for Size4K {}
impl PageSize for Size4K {
    const SIZE: u32 = 4096;
    const SHIFT: u32 = 12;

    fn as_str() -> &'static str {
        "4K"
    }
}

/// 64 KiB large page (`65_536` bytes).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Size64K;
impl sealed::Sealed for Size64K {}
impl PageSize for Size64K {
    const SIZE: u32 = 64 * 1024;
    const SHIFT: u32 = 16;

    fn as_str() -> &'static str {
        "64K"
    }
}

/// 1 MiB section (`1_048_576` bytes).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Size1M;
impl sealed::Sealed for Size1M {}
impl PageSize for Size1M {
    const SIZE: u32 = 1024 * 1024;
    const SHIFT: u32 = 20;

    fn as_str() -> &'static str {
        "1M"
    }
}

const _: () = assert!(1 << Size4K::SHIFT == Size4K::SIZE);
const _: () = assert!(1 << Size64K::SHIFT == Size64K::SIZE);
const _: () = assert!(1 << Size1M::SHIFT == Size1M::SIZE);

impl fmt::Display for Size4K {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(Self::as_str())
    }
}

impl fmt::Display for Size64K {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(Self::as_str())
    }
}

impl fmt::Display for Size1M {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(Self::as_str())
    }
}

impl fmt::Debug for Size4K {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Debug for Size64K {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Debug for Size1M {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}
