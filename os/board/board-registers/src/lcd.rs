//! S3C24xx LCD controller mode registers.

use crate::impl_register;
use bitfield_struct::bitfield;

/// Display panel type (LCDCON1.PNRMODE).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PanelType {
    /// 4-bit dual scan STN.
    Stn4Dual = 0,
    /// 4-bit single scan STN.
    Stn4 = 1,
    /// 8-bit single scan STN.
    Stn8 = 2,
    Tft = 3,
}

impl PanelType {
    #[must_use]
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Stn4Dual,
            1 => Self::Stn4,
            2 => Self::Stn8,
            _ => Self::Tft,
        }
    }
}

/// LCD control register 1 (LCDCON1).
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Lcdcon1 {
    /// Bit 0: Video output and logic enable.
    pub envid: bool,

    /// Bits 1–4: Bits-per-pixel mode, encoding depends on the panel type.
    #[bits(4)]
    pub bppmode: u8,

    /// Bits 5–6: Panel type.
    #[bits(2)]
    pub pnrmode: PanelType,

    /// Bit 7: VM toggle rate (STN only).
    pub mmode: bool,

    /// Bits 8–17: VCLK divider.
    #[bits(10)]
    pub clkval: u16,

    /// Bits 18–27: Line counter (read-only).
    #[bits(10, access = RO)]
    pub linecnt: u16,

    /// Bits 28–31: Reserved (must be 0).
    #[bits(4, default = 0)]
    _reserved_28_31: u8,
}

impl_register!(Lcdcon1, "LCDCON1", 0x00);

impl Lcdcon1 {
    /// BPPMODE encoding for a TFT panel of the given depth, if the controller
    /// supports it.
    #[must_use]
    pub const fn tft_bppmode(bits_per_pixel: u8) -> Option<u8> {
        match bits_per_pixel {
            1 => Some(0b1000),
            2 => Some(0b1001),
            4 => Some(0b1010),
            8 => Some(0b1011),
            16 => Some(0b1100),
            24 => Some(0b1101),
            _ => None,
        }
    }
}

/// LCD control register 5 (LCDCON5): output polarities and pixel format.
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Lcdcon5 {
    /// Bit 0: Half-word swap (16 bpp).
    pub hwswp: bool,

    /// Bit 1: Byte swap.
    pub bswp: bool,

    /// Bit 2: Enable the LEND output.
    pub enlend: bool,

    /// Bit 3: Enable the LCD_PWREN output.
    pub pwren: bool,

    /// Bit 4: Invert LEND.
    pub invlend: bool,

    /// Bit 5: Invert LCD_PWREN.
    pub invpwren: bool,

    /// Bit 6: Invert VDEN.
    pub invvden: bool,

    /// Bit 7: Invert video data.
    pub invvd: bool,

    /// Bit 8: Invert VFRAME/VSYNC.
    pub invvframe: bool,

    /// Bit 9: Invert VLINE/HSYNC.
    pub invvline: bool,

    /// Bit 10: Fetch video data on the VCLK rising edge.
    pub invvclk: bool,

    /// Bit 11: 16 bpp pixels use 5:6:5 (else 5:5:5:1).
    pub frm565: bool,

    /// Bit 12: 24 bpp pixels are LSB aligned.
    pub bpp24bl: bool,

    /// Bits 13–14: Reserved (must be 0).
    #[bits(2, default = 0)]
    _reserved_13_14: u8,

    /// Bits 15–16: Vertical status (read-only).
    #[bits(2, access = RO)]
    pub vstatus: u8,

    /// Bits 17–18: Horizontal status (read-only).
    #[bits(2, access = RO)]
    pub hstatus: u8,

    /// Bits 19–31: Reserved (must be 0).
    #[bits(13, default = 0)]
    _reserved_19_31: u16,
}

impl_register!(Lcdcon5, "LCDCON5", 0x10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tq2440_lcdcon5() {
        let v = Lcdcon5::new()
            .with_frm565(true)
            .with_invvline(true)
            .with_invvframe(true)
            .with_pwren(true)
            .with_hwswp(true);
        assert_eq!(v.into_bits(), (1 << 11) | (1 << 9) | (1 << 8) | (1 << 3) | 1);
    }

    #[test]
    fn tft_panel_type_bits() {
        let v = Lcdcon1::new().with_pnrmode(PanelType::Tft);
        assert_eq!(v.into_bits(), 3 << 5);
        assert_eq!(Lcdcon1::from_bits(3 << 5).pnrmode(), PanelType::Tft);
    }

    #[test]
    fn tft_bppmode_table() {
        assert_eq!(Lcdcon1::tft_bppmode(16), Some(0b1100));
        assert_eq!(Lcdcon1::tft_bppmode(32), None);
        assert_eq!(Lcdcon1::tft_bppmode(3), None);
    }
}
