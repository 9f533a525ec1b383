//! 24-bit RGB colors and linear blending
//!
//! Colors are stored as three 8-bit channels. The display crate converts
//! them to the panel's native format at draw time, so all animation math
//! happens at full precision here.

/// Soft purple used at the small end of the breathing square
pub const LAVENDER: Color = Color::from_hex(0x9575CD);

/// Dark blue resting background
pub const MIDNIGHT_BLUE: Color = Color::from_hex(0x102840);

/// Label text color
pub const WHITE: Color = Color::from_hex(0xFFFFFF);

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    ///
    /// Bits above the low 24 are ignored.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Pack into a `0xRRGGBB` value
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::from_hex(rgb)
    }
}

/// Linear per-channel blend between two colors
///
/// Each channel is `start + (end - start) * factor`, truncated toward zero.
/// Callers keep `factor` within `[0, 1]`; every caller in this crate derives
/// it from a step index divided by the last index, so the range holds by
/// construction.
pub fn interpolate(start: Color, end: Color, factor: f32) -> Color {
    Color {
        r: blend_channel(start.r, end.r, factor),
        g: blend_channel(start.g, end.g, factor),
        b: blend_channel(start.b, end.b, factor),
    }
}

#[inline]
fn blend_channel(start: u8, end: u8, factor: f32) -> u8 {
    let start = f32::from(start);
    let delta = f32::from(end) - start;
    // `as` truncates toward zero and saturates, so the result stays a channel
    (start + delta * factor) as u8
}

/// Progress fraction of `index` within `count` evenly spaced steps
///
/// The first step is 0.0 and the last is exactly 1.0. `count` must be at
/// least 2; configuration validation guarantees this before any animation
/// is built.
#[inline]
pub fn step_factor(index: u16, count: u16) -> f32 {
    debug_assert!(count >= 2);
    f32::from(index) / f32::from(count - 1)
}
