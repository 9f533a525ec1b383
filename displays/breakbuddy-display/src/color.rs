//! Conversion to embedded-graphics colors

use breakbuddy_core::color::Color;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

/// Full-precision panel color
pub const fn to_rgb888(color: Color) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// 16-bit panel color (5-6-5)
pub fn to_rgb565(color: Color) -> Rgb565 {
    Rgb565::from(to_rgb888(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakbuddy_core::color::{LAVENDER, MIDNIGHT_BLUE, WHITE};
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_rgb888_keeps_channels() {
        let c = to_rgb888(LAVENDER);
        assert_eq!((c.r(), c.g(), c.b()), (0x95, 0x75, 0xCD));
    }

    #[test]
    fn test_rgb565_scales_channels() {
        // 0x10 of 255 is 2 of 31, 0x28 is 10 of 63, 0x40 is 8 of 31
        let c = to_rgb565(MIDNIGHT_BLUE);
        assert_eq!((c.r(), c.g(), c.b()), (2, 10, 8));
        assert_eq!(to_rgb565(WHITE), Rgb565::WHITE);
    }
}
