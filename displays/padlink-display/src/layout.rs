//! Device framebuffer layout trait
//!
//! A layout knows how one device packs a pixel's gray level into its
//! framebuffer. The canvas handles bounds, blending and dirty tracking and
//! only ever calls the layout with in-range coordinates.

/// Pixel packing for one display variant
pub trait PixelLayout {
    /// Bits of gray per pixel
    const DEPTH: u8;

    /// Raw byte that renders every pixel as black when filled
    const BLACK_FILL: u8;

    /// Raw byte that renders every pixel as white when filled
    const WHITE_FILL: u8;

    /// Framebuffer bytes per row for a canvas `width` pixels wide
    fn row_bytes(&self, width: u16) -> usize;

    /// Whether `row_bytes(width)` holds every column `0..width`
    ///
    /// The canvas refuses widths the layout cannot address without spilling
    /// into the next row.
    fn supports_width(&self, width: u16) -> bool;

    /// Write `level` (0 = darkest, [`max_level`] = lightest) for pixel (x, y)
    ///
    /// Must leave bits belonging to other pixels untouched.
    ///
    /// [`max_level`]: PixelLayout::max_level
    fn pack(&self, buffer: &mut [u8], row_bytes: usize, x: u16, y: u16, level: u8);

    /// Read back the level stored for pixel (x, y)
    fn unpack(&self, buffer: &[u8], row_bytes: usize, x: u16, y: u16) -> u8;

    /// Lightest representable level
    fn max_level(&self) -> u8 {
        ((1u16 << Self::DEPTH) - 1) as u8
    }
}

/// Quantize a luminance (0-255) to a level in `0..=max_level`, rounding
pub fn luminance_to_level(luminance: u8, max_level: u8) -> u8 {
    ((u16::from(luminance) * u16::from(max_level) + 127) / 255) as u8
}

/// Scale a level in `0..=max_level` back to luminance (0-255)
pub fn level_to_luminance(level: u8, max_level: u8) -> u8 {
    if max_level == 0 {
        return 0;
    }
    let level = level.min(max_level);
    (u16::from(level) * 255 / u16::from(max_level)) as u8
}
