//! # Memory Layout

use board_memory_addresses::{PhysicalAddress, Size1M, Size4K, VirtualAddress};

pub const SZ_256: u32 = 0x100;
pub const SZ_1K: u32 = 0x400;
pub const SZ_4K: u32 = 0x1000;
pub const SZ_64K: u32 = 0x1_0000;
pub const SZ_1M: u32 = 0x10_0000;
pub const SZ_4M: u32 = 0x40_0000;

/// Size of each nGCS chip-select window.
pub const CS_WINDOW_SIZE: u32 = 0x0800_0000;

/// Physical base of chip select `n`.
#[must_use]
pub const fn chip_select(n: u32) -> PhysicalAddress {
    PhysicalAddress::new(n * CS_WINDOW_SIZE)
}

/// nGCS2: ISA-style expansion bus.
pub const PA_CS2: PhysicalAddress = chip_select(2);

/// nGCS4: on TQ2440 boards the DM9000 Ethernet controller.
pub const PA_CS4: PhysicalAddress = chip_select(4);

/// Start of SDRAM (nGCS6).
pub const PA_SDRAM: PhysicalAddress = chip_select(6);

/// Where the boot loader leaves the ATAG list, relative to [`PA_SDRAM`].
pub const BOOT_TAG_OFFSET: u32 = 0x100;

pub const PA_USBHOST: PhysicalAddress = PhysicalAddress::new(0x4900_0000);
pub const SZ_USBHOST: u32 = SZ_1M;
pub const PA_LCD: PhysicalAddress = PhysicalAddress::new(0x4D00_0000);
pub const SZ_LCD: u32 = SZ_1M;
pub const PA_NAND: PhysicalAddress = PhysicalAddress::new(0x4E00_0000);
pub const SZ_NAND: u32 = SZ_1M;

/// UART channel 0; channels 1 and 2 follow at [`UART_STRIDE`].
pub const PA_UART: PhysicalAddress = PhysicalAddress::new(0x5000_0000);
pub const UART_STRIDE: u32 = 0x4000;

/// Number of UART channels on the SoC.
pub const UART_CHANNELS: u8 = 3;

pub const PA_WATCHDOG: PhysicalAddress = PhysicalAddress::new(0x5300_0000);
pub const SZ_WATCHDOG: u32 = SZ_1K;
pub const PA_IIC: PhysicalAddress = PhysicalAddress::new(0x5400_0000);
pub const SZ_IIC: u32 = SZ_4K;
pub const PA_IIS: PhysicalAddress = PhysicalAddress::new(0x5500_0000);
pub const SZ_IIS: u32 = SZ_1M;
pub const PA_RTC: PhysicalAddress = PhysicalAddress::new(0x5700_0000);
pub const SZ_RTC: u32 = SZ_256;

/// Physical base of UART channel `n`.
#[must_use]
pub const fn uart_base(n: u32) -> PhysicalAddress {
    PA_UART.offset(n * UART_STRIDE)
}

/// Start of the kernel's static I/O window.
pub const VA_IO_WINDOW: VirtualAddress = VirtualAddress::new(0xF600_0000);

/// Word (16-bit) access alias of the ISA-style bus.
pub const VA_ISA_WORD: VirtualAddress = VA_IO_WINDOW.offset(0x0200_0000);

/// Byte access alias of the ISA-style bus.
pub const VA_ISA_BYTE: VirtualAddress = VA_IO_WINDOW.offset(0x0300_0000);

/// Offset of the second ISA window (address line A24 selects it).
pub const ISA_UPPER_OFFSET: u32 = 1 << 24;

const _: () = {
    assert!(PA_CS2.is_aligned::<Size1M>());
    assert!(PA_CS4.is_aligned::<Size1M>());
    assert!(VA_ISA_WORD.is_aligned::<Size1M>());
    assert!(VA_ISA_BYTE.is_aligned::<Size1M>());
    // Both ISA aliases (64 KiB + 4 MiB each) must fit their 16 MiB slot.
    assert!(VA_ISA_WORD.as_u32() + SZ_64K + SZ_4M <= VA_ISA_BYTE.as_u32());
    assert!(PA_IIC.is_aligned::<Size4K>());
    assert!(uart_base(2).as_u32() == 0x5000_8000);
};
