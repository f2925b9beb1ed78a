//! # S3C2440 SoC Layout
//!
//! This crate is the single source of truth for the fixed facts of the
//! S3C2440 system-on-chip that every board description builds upon: where the
//! chip selects and peripheral register blocks live on the bus, which virtual
//! windows the kernel reserves for static I/O mappings, how interrupt lines
//! and GPIO pins are numbered, and which clocks feed the chip.
//!
//! ## Physical Bus Layout
//!
//! ```text
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │  nGCS0..nGCS5 (6 × 128 MiB)     │  boot ROM / NOR, ISA-style
//!             │                                 │  expansion (CS2), DM9000 (CS4)
//! 0x3000_0000 ├─────────────────────────────────┤
//!             │  nGCS6/7 - SDRAM                │
//! 0x4800_0000 ├─────────────────────────────────┤
//!             │  Special function registers     │  one 1 MiB slot per block:
//!             │  (USB host, LCD, NAND, UART,    │  0x4900_0000 .. 0x5B00_0000
//!             │   timers, WDT, IIC, IIS, RTC)   │
//! 0x6000_0000 └─────────────────────────────────┘
//! ```
//!
//! ## Virtual I/O Windows
//!
//! Board files map off-chip buses into a fixed window above `0xF600_0000`
//! before any driver runs. The ISA-style expansion bus on nGCS2 gets two
//! aliases, one for 16-bit (word) and one for 8-bit (byte) accesses:
//!
//! ```text
//! VA_ISA_WORD  0xF800_0000 ┌───────────────┐ → CS2 (64 KiB), CS2 + 16 MiB (4 MiB)
//! VA_ISA_BYTE  0xF900_0000 ├───────────────┤ → CS2 (64 KiB), CS2 + 16 MiB (4 MiB)
//!                          └───────────────┘
//! ```
//!
//! ## Modules
//!
//! * [`memory`]: chip selects, peripheral blocks, virtual windows, sizes
//! * [`irq`]: interrupt line numbering as used by the interrupt controller
//! * [`gpio`]: GPIO bank numbering
//! * [`clock`]: crystal and framebuffer budget constants
//!
//! All values are `const` and checked by compile-time assertions where the
//! layout has an invariant (alignment, non-overlap of the virtual windows).

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod irq;
pub mod memory;
