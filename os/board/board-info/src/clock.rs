//! # Clocks and Budgets

/// Frequency of the main crystal feeding the MPLL/UPLL on TQ2440 boards.
pub const XTAL_HZ: u32 = 12_000_000;

/// The LCD DMA engine addresses its frame buffer through a 4 MiB bank
/// (LCDSADDR1.LCDBANK selects A\[30:22\]), so no frame may exceed it.
pub const LCD_FRAMEBUFFER_BUDGET: u32 = 4 * 1024 * 1024;
