//! # LCD Controller Platform Data
//!
//! A [`FramebufferConfig`] lists the panels the board can drive (usually one)
//! together with the GPIO function-select values that route the LCD signals to
//! the pins. Each panel is described by a [`DisplayTimingConfig`]:
//!
//! ```text
//!            ◄─ hsync_len ─►◄ left_margin ►◄──── width ────►◄ right_margin ►
//!  HSYNC ────┐             ┌─────────────────────────────────────────────────
//!            └─────────────┘
//!  VDEN  ──────────────────────────────────┐               ┌─────────────────
//!                                          └───── data ────┘
//! ```
//!
//! Vertically the same shape applies with `vsync_len`, `upper_margin`,
//! `height` and `lower_margin`, counted in lines. The pixel clock is given as
//! a period in picoseconds.

use crate::error::ConfigError;
use board_registers::lcd::{Lcdcon1, Lcdcon5, PanelType};
use log::{debug, error};
use utils_accessors_derive::{Getters, Setters};

/// Colour depths the frame buffer driver accepts.
pub const VALID_BIT_DEPTHS: [u8; 7] = [1, 2, 4, 8, 16, 24, 32];

/// Timing and electrical setup of one LCD panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters, Setters)]
pub struct DisplayTimingConfig {
    /// Panel interface (LCDCON1.PNRMODE).
    panel: PanelType,
    /// Signal polarities and pixel format.
    lcdcon5: Lcdcon5,
    /// Visible pixels per line.
    width: u32,
    /// Visible lines per frame.
    height: u32,
    /// Pixel clock period in picoseconds.
    pixclock: u32,
    bits_per_pixel: u8,
    /// Horizontal back porch (HBPD), in pixel clocks.
    left_margin: u32,
    /// Horizontal front porch (HFPD), in pixel clocks.
    right_margin: u32,
    /// Horizontal sync pulse width (HSPW), in pixel clocks.
    hsync_len: u32,
    /// Vertical back porch (VBPD), in lines.
    upper_margin: u32,
    /// Vertical front porch (VFPD), in lines.
    lower_margin: u32,
    /// Vertical sync pulse width (VSPW), in lines.
    vsync_len: u32,
}

impl DisplayTimingConfig {
    /// A TFT panel with all porches and sync widths zero.
    #[must_use]
    pub const fn new(width: u32, height: u32, bits_per_pixel: u8, pixclock: u32) -> Self {
        Self {
            panel: PanelType::Tft,
            lcdcon5: Lcdcon5::new(),
            width,
            height,
            pixclock,
            bits_per_pixel,
            left_margin: 0,
            right_margin: 0,
            hsync_len: 0,
            upper_margin: 0,
            lower_margin: 0,
            vsync_len: 0,
        }
    }

    /// Bytes one frame occupies, rounded up to whole bytes.
    #[must_use]
    pub const fn framebuffer_bytes(&self) -> u64 {
        let bits = self.width as u64 * self.height as u64 * self.bits_per_pixel as u64;
        bits.div_ceil(8)
    }

    /// Pixel clocks per line, including blanking.
    #[must_use]
    pub const fn line_clocks(&self) -> u64 {
        self.hsync_len as u64 + self.left_margin as u64 + self.width as u64 + self.right_margin as u64
    }

    /// Lines per frame, including blanking.
    #[must_use]
    pub const fn frame_lines(&self) -> u64 {
        self.vsync_len as u64 + self.upper_margin as u64 + self.height as u64 + self.lower_margin as u64
    }

    /// LCDCON1 mode bits for a TFT panel, if the controller supports the depth.
    #[must_use]
    pub const fn lcdcon1(&self) -> Option<Lcdcon1> {
        match (self.panel, Lcdcon1::tft_bppmode(self.bits_per_pixel)) {
            (PanelType::Tft, Some(mode)) => Some(
                Lcdcon1::new()
                    .with_pnrmode(PanelType::Tft)
                    .with_bppmode(mode),
            ),
            _ => None,
        }
    }

    const fn is_valid_depth(bits_per_pixel: u8) -> bool {
        let mut i = 0;
        while i < VALID_BIT_DEPTHS.len() {
            if VALID_BIT_DEPTHS[i] == bits_per_pixel {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Check the timing against itself and against a frame memory budget.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidPixelClock`] for a zero clock period
    /// * [`ConfigError::InvalidBitDepth`] for a depth outside [`VALID_BIT_DEPTHS`]
    /// * [`ConfigError::EmptyResolution`] when width or height is zero
    /// * [`ConfigError::PixelFormatMismatch`] when LCDCON5 selects 5:6:5 on a
    ///   non-16 bpp panel, or 24 bpp packing on a non-24 bpp panel
    /// * [`ConfigError::FramebufferTooLarge`] when a frame exceeds `budget`
    pub const fn validate(&self, budget: u32) -> Result<(), ConfigError> {
        if self.pixclock == 0 {
            return Err(ConfigError::InvalidPixelClock);
        }
        if !Self::is_valid_depth(self.bits_per_pixel) {
            return Err(ConfigError::InvalidBitDepth {
                bits_per_pixel: self.bits_per_pixel,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyResolution {
                width: self.width,
                height: self.height,
            });
        }
        if (self.lcdcon5.frm565() && self.bits_per_pixel != 16)
            || (self.lcdcon5.bpp24bl() && self.bits_per_pixel != 24)
        {
            return Err(ConfigError::PixelFormatMismatch {
                bits_per_pixel: self.bits_per_pixel,
            });
        }
        let required = self.framebuffer_bytes();
        if required > budget as u64 {
            return Err(ConfigError::FramebufferTooLarge { required, budget });
        }
        Ok(())
    }
}

/// GPC/GPD setup that routes the LCD data, clock and sync signals.
///
/// Only the bits set in a mask are changed by the driver.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Getters, Setters)]
pub struct LcdGpioConfig {
    /// GPCUP pull-up disable bits.
    gpcup: u32,
    gpccon: u32,
    gpccon_mask: u32,
    /// GPDUP pull-up disable bits.
    gpdup: u32,
    gpdcon: u32,
    gpdcon_mask: u32,
}

impl LcdGpioConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gpcup: 0,
            gpccon: 0,
            gpccon_mask: 0,
            gpdup: 0,
            gpdcon: 0,
            gpdcon_mask: 0,
        }
    }

    /// # Errors
    /// [`ConfigError::LcdGpioOutsideMask`] when a function-select value sets
    /// bits its mask does not cover.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.gpccon & !self.gpccon_mask != 0 {
            return Err(ConfigError::LcdGpioOutsideMask {
                port: 'C',
                value: self.gpccon,
                mask: self.gpccon_mask,
            });
        }
        if self.gpdcon & !self.gpdcon_mask != 0 {
            return Err(ConfigError::LcdGpioOutsideMask {
                port: 'D',
                value: self.gpdcon,
                mask: self.gpdcon_mask,
            });
        }
        Ok(())
    }
}

/// Everything the frame buffer driver needs from the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters)]
pub struct FramebufferConfig<'a> {
    displays: &'a [DisplayTimingConfig],
    default_display: usize,
    gpio: LcdGpioConfig,
    /// LPC3600 timing controller select; zero for plain TFT panels.
    lpcsel: u32,
}

impl<'a> FramebufferConfig<'a> {
    #[must_use]
    pub const fn new(displays: &'a [DisplayTimingConfig], gpio: LcdGpioConfig) -> Self {
        Self {
            displays,
            default_display: 0,
            gpio,
            lpcsel: 0,
        }
    }

    #[must_use]
    pub const fn with_default_display(mut self, index: usize) -> Self {
        self.default_display = index;
        self
    }

    #[must_use]
    pub const fn with_lpcsel(mut self, lpcsel: u32) -> Self {
        self.lpcsel = lpcsel;
        self
    }

    /// The panel selected at boot.
    #[must_use]
    pub fn default_panel(&self) -> Option<&'a DisplayTimingConfig> {
        self.displays.get(self.default_display)
    }

    /// # Errors
    /// [`ConfigError::NoDisplays`], [`ConfigError::DefaultDisplayOutOfRange`],
    /// the first display that fails [`DisplayTimingConfig::validate`], or a
    /// GPIO setup that fails [`LcdGpioConfig::validate`].
    pub fn validate(&self, budget: u32) -> Result<(), ConfigError> {
        let result = self.check(budget);
        if let Err(e) = &result {
            error!("frame buffer: {e}");
        }
        result
    }

    fn check(&self, budget: u32) -> Result<(), ConfigError> {
        if self.displays.is_empty() {
            return Err(ConfigError::NoDisplays);
        }
        if self.default_display >= self.displays.len() {
            return Err(ConfigError::DefaultDisplayOutOfRange {
                index: self.default_display,
                displays: self.displays.len(),
            });
        }
        for (index, display) in self.displays.iter().enumerate() {
            display.validate(budget)?;
            debug!(
                "display #{index}: {}x{}@{}bpp, pixclock {} ps, {} bytes/frame, lcdcon1 {:?}",
                display.width,
                display.height,
                display.bits_per_pixel,
                display.pixclock,
                display.framebuffer_bytes(),
                display.lcdcon1().map(Lcdcon1::into_bits)
            );
        }
        self.gpio.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: u32 = 4 * 1024 * 1024;

    fn panel(bpp: u8) -> DisplayTimingConfig {
        DisplayTimingConfig::new(480, 272, bpp, 100_000)
            .with_lcdcon5(Lcdcon5::new().with_hwswp(true).with_pwren(true))
            .with_left_margin(2)
            .with_right_margin(2)
            .with_hsync_len(41)
            .with_upper_margin(2)
            .with_lower_margin(2)
            .with_vsync_len(10)
    }

    #[test]
    fn sixteen_bpp_panel_is_valid() {
        let p = panel(16);
        assert_eq!(p.validate(BUDGET), Ok(()));
        assert_eq!(p.framebuffer_bytes(), 480 * 272 * 2);
        assert_eq!(p.line_clocks(), 41 + 2 + 480 + 2);
        assert_eq!(p.frame_lines(), 10 + 2 + 272 + 2);
    }

    #[test]
    fn odd_depth_is_rejected() {
        assert_eq!(
            panel(3).validate(BUDGET),
            Err(ConfigError::InvalidBitDepth { bits_per_pixel: 3 })
        );
    }

    #[test]
    fn every_listed_depth_is_accepted() {
        for bpp in VALID_BIT_DEPTHS {
            assert_eq!(panel(bpp).validate(BUDGET), Ok(()), "{bpp} bpp");
        }
    }

    #[test]
    fn zero_pixclock_is_rejected() {
        assert_eq!(
            panel(16).with_pixclock(0).validate(BUDGET),
            Err(ConfigError::InvalidPixelClock)
        );
    }

    #[test]
    fn empty_resolution_is_rejected() {
        assert!(matches!(
            panel(16).with_height(0).validate(BUDGET),
            Err(ConfigError::EmptyResolution { .. })
        ));
    }

    #[test]
    fn frame_must_fit_budget() {
        // 1024 x 1024 x 32 bpp is exactly one 4 MiB bank.
        let p = panel(32).with_width(1024).with_height(1024);
        assert_eq!(p.validate(BUDGET), Ok(()));
        assert_eq!(
            p.validate(BUDGET - 1),
            Err(ConfigError::FramebufferTooLarge {
                required: 4 * 1024 * 1024,
                budget: BUDGET - 1
            })
        );
    }

    #[test]
    fn rgb565_needs_sixteen_bits() {
        let p = panel(8).with_lcdcon5(Lcdcon5::new().with_frm565(true));
        assert_eq!(
            p.validate(BUDGET),
            Err(ConfigError::PixelFormatMismatch { bits_per_pixel: 8 })
        );
    }

    #[test]
    fn lcdcon1_for_tft() {
        let mode = panel(16).lcdcon1().unwrap();
        assert_eq!(mode.pnrmode(), PanelType::Tft);
        assert_eq!(mode.bppmode(), 0b1100);
        assert!(panel(32).lcdcon1().is_none());
    }

    #[test]
    fn gpio_values_stay_inside_masks() {
        let ok = LcdGpioConfig::new()
            .with_gpccon(0b10 << 2)
            .with_gpccon_mask(0b11 << 2);
        assert_eq!(ok.validate(), Ok(()));

        let bad = ok.with_gpdcon(0b10 << 4);
        assert_eq!(
            bad.validate(),
            Err(ConfigError::LcdGpioOutsideMask {
                port: 'D',
                value: 0b10 << 4,
                mask: 0
            })
        );
    }

    #[test]
    fn default_display_must_exist() {
        let displays = [panel(16)];
        let fb = FramebufferConfig::new(&displays, LcdGpioConfig::new());
        assert_eq!(fb.validate(BUDGET), Ok(()));
        assert_eq!(fb.default_panel(), Some(&displays[0]));
        assert_eq!(
            fb.with_default_display(1).validate(BUDGET),
            Err(ConfigError::DefaultDisplayOutOfRange {
                index: 1,
                displays: 1
            })
        );
        assert_eq!(
            FramebufferConfig::new(&[], LcdGpioConfig::new()).validate(BUDGET),
            Err(ConfigError::NoDisplays)
        );
    }
}
