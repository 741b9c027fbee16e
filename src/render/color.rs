// RGB565 helpers and the 16-step fg/bg blend table used by 4-bit icons.

const R_MASK: u16 = 0xF800;
const G_MASK: u16 = 0x07E0;
const B_MASK: u16 = 0x001F;

/// Pack 8-bit channels into RGB565, dropping the low bits.
#[inline]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

pub const WHITE: u16 = 0xFFFF;
pub const BLACK: u16 = 0x0000;
pub const RED: u16 = rgb565(0xFF, 0x00, 0x00);
pub const GREEN: u16 = rgb565(0x00, 0xAE, 0x0B);
pub const BLUE: u16 = rgb565(0x4A, 0x90, 0xE2);

/// Blend `fg` over `bg` at `step / 15`, per 5/6/5-bit channel, truncating.
///
/// `step` is clamped to 15.
pub const fn interpolate(fg: u16, bg: u16, step: u8) -> u16 {
    let s = if step > 15 { 15 } else { step as u32 };
    let inv = 15 - s;
    let fg = fg as u32;
    let bg = bg as u32;

    let r = (((fg & R_MASK as u32) >> 11) * s + ((bg & R_MASK as u32) >> 11) * inv) / 15;
    let g = (((fg & G_MASK as u32) >> 5) * s + ((bg & G_MASK as u32) >> 5) * inv) / 15;
    let b = ((fg & B_MASK as u32) * s + (bg & B_MASK as u32) * inv) / 15;

    ((r << 11) | (g << 5) | b) as u16
}

/// Nibble-indexed colours from `bg` (index 0) to `fg` (index 15).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTable([u16; 16]);

impl ColorTable {
    pub const fn new(fg: u16, bg: u16) -> Self {
        let mut table = [0u16; 16];
        let mut i = 0;
        while i < 16 {
            table[i] = interpolate(fg, bg, i as u8);
            i += 1;
        }
        Self(table)
    }

    /// Colour for a 4-bit level; only the low nibble of `index` is used.
    #[inline]
    pub const fn get(&self, index: u8) -> u16 {
        self.0[(index & 0x0F) as usize]
    }

    pub const fn as_array(&self) -> &[u16; 16] {
        &self.0
    }
}
