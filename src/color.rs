//! Color values and color adapters.
//!
//! The rasterizer itself only knows pixel positions. Colors come in at the
//! callback boundary: [`with_color`] turns a color-pixel callback into a
//! plain pixel callback for one color, and [`map_color`] applies a color
//! mapping on the way through.

use core::fmt;

// ============================================================================
// Argb
// ============================================================================

/// 32-bit color with alpha, `#AARRGGBB` when packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const BLACK: Argb = Argb::rgb(0x00, 0x00, 0x00);
    pub const SILVER: Argb = Argb::rgb(0xDD, 0xDD, 0xDD);
    pub const GRAY: Argb = Argb::rgb(0xCC, 0xCC, 0xCC);
    pub const RED: Argb = Argb::rgb(0xFF, 0x00, 0x00);
    pub const ORANGE: Argb = Argb::rgb(0xE9, 0x76, 0x00);
    pub const YELLOW: Argb = Argb::rgb(0xF6, 0xC7, 0x00);
    pub const GREEN: Argb = Argb::rgb(0x00, 0x80, 0x00);
    pub const LIME: Argb = Argb::rgb(0x32, 0xCD, 0x32);
    pub const BLUE: Argb = Argb::rgb(0x00, 0x00, 0xFF);
    pub const CYAN: Argb = Argb::rgb(0x00, 0xFF, 0xFF);
    pub const PURPLE: Argb = Argb::rgb(0x99, 0x46, 0x80);
    pub const WHITE: Argb = Argb::rgb(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Argb = Argb::new(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Opaque color from `0xRRGGBB`; the top byte is ignored.
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Color from `0xAARRGGBB`.
    pub const fn from_raw(raw: u32) -> Self {
        Self::new((raw >> 16) as u8, (raw >> 8) as u8, raw as u8, (raw >> 24) as u8)
    }

    /// Packed `0xAARRGGBB`.
    pub const fn raw(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Packed `0xRRGGBB` without alpha.
    pub const fn to_color24(self) -> u32 {
        self.raw() & 0x00FF_FFFF
    }

    /// RGB565: 5 bits red, 6 bits green, 5 bits blue.
    pub const fn to_color16(self) -> u16 {
        (((self.r as u16) & 0xF8) << 8) | (((self.g as u16) & 0xFC) << 3) | ((self.b as u16) >> 3)
    }

    /// Integer BT.709 luminance.
    pub const fn luminance(self) -> u8 {
        ((55u32 * self.r as u32 + 184u32 * self.g as u32 + 18u32 * self.b as u32) >> 8) as u8
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 0xFF
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<u32> for Argb {
    fn from(raw: u32) -> Self {
        Argb::from_raw(raw)
    }
}

impl From<Argb> for u32 {
    fn from(c: Argb) -> u32 {
        c.raw()
    }
}

/// `#AARRGGBB`
impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.raw())
    }
}

// ============================================================================
// Callback adapters
// ============================================================================

/// A pixel callback that draws every pixel in `color`.
pub fn with_color<'a>(
    draw: &'a mut dyn FnMut(i16, i16, Argb),
    color: Argb,
) -> impl FnMut(i16, i16) + 'a {
    move |x, y| draw(x, y, color)
}

/// A color-pixel callback that passes every color through `map` first.
pub fn map_color<'a>(
    draw: &'a mut dyn FnMut(i16, i16, Argb),
    map: &'a dyn Fn(Argb) -> Argb,
) -> impl FnMut(i16, i16, Argb) + 'a {
    move |x, y, color| draw(x, y, map(color))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Argb::ORANGE.to_color24(), 0xE97600);
        assert_eq!(Argb::PURPLE.raw(), 0xFF994680);
        assert!(Argb::WHITE.is_opaque());
        assert!(Argb::TRANSPARENT.is_transparent());
        assert_eq!(Argb::default(), Argb::TRANSPARENT);
    }

    #[test]
    fn test_raw_round_trip() {
        let c = Argb::from(0x80123456);
        assert_eq!((c.a, c.r, c.g, c.b), (0x80, 0x12, 0x34, 0x56));
        assert_eq!(u32::from(c), 0x80123456);
        assert_eq!(Argb::from_rgb24(0xAB123456), Argb::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_color16() {
        assert_eq!(Argb::WHITE.to_color16(), 0xFFFF);
        assert_eq!(Argb::BLACK.to_color16(), 0x0000);
        assert_eq!(Argb::RED.to_color16(), 0xF800);
        assert_eq!(Argb::rgb(0, 0xFF, 0).to_color16(), 0x07E0);
        assert_eq!(Argb::BLUE.to_color16(), 0x001F);
    }

    #[test]
    fn test_luminance() {
        assert_eq!(Argb::BLACK.luminance(), 0);
        assert_eq!(Argb::WHITE.luminance(), 255);
        assert!(Argb::GREEN.luminance() > Argb::BLUE.luminance());
    }

    #[test]
    fn test_display() {
        assert_eq!(Argb::LIME.to_string(), "#ff32cd32");
    }

    #[test]
    fn test_with_color_adapter() {
        let mut pixels = Vec::new();
        let mut draw = |x: i16, y: i16, c: Argb| pixels.push((x, y, c));
        {
            let mut red = with_color(&mut draw, Argb::RED);
            crate::line::draw_line(0, 0, 2, 0, &mut red);
        }
        assert_eq!(pixels.len(), 3);
        assert!(pixels.iter().all(|&(_, _, c)| c == Argb::RED));
    }

    #[test]
    fn test_map_color_adapter() {
        let mut seen = Vec::new();
        let mut draw = |_: i16, _: i16, c: Argb| seen.push(c);
        let half = |c: Argb| c.with_alpha(0x80);
        {
            let mut mapped = map_color(&mut draw, &half);
            mapped(1, 1, Argb::BLUE);
        }
        assert_eq!(seen, vec![Argb::BLUE.with_alpha(0x80)]);
    }
}
