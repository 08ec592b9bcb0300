//! Color values as seen by the canvas
//!
//! Only what the pixel codecs consume: luminance, transparency and the
//! invert blend mode.

/// How a color combines with the pixel already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlendMode {
    /// Replace the pixel
    #[default]
    Normal,
    /// Invert the pixel already there; the color's own value is ignored
    Invert,
    /// Leave the pixel untouched
    Transparent,
}

/// RGB color with a blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub blend_mode: BlendMode,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            blend_mode: BlendMode::Normal,
        }
    }

    /// Gray with the given luminance
    pub const fn gray(luminance: u8) -> Self {
        Self::rgb(luminance, luminance, luminance)
    }

    pub const fn black() -> Self {
        Self::gray(0x00)
    }

    pub const fn white() -> Self {
        Self::gray(0xFF)
    }

    pub const fn transparent() -> Self {
        Self::black().with_blend_mode(BlendMode::Transparent)
    }

    /// Color that inverts whatever it is drawn over
    pub const fn invert() -> Self {
        Self::black().with_blend_mode(BlendMode::Invert)
    }

    pub const fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn is_transparent(&self) -> bool {
        self.blend_mode == BlendMode::Transparent
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0-255
    pub fn luminance(&self) -> u8 {
        let weighted =
            299 * u32::from(self.red) + 587 * u32::from(self.green) + 114 * u32::from(self.blue);
        (weighted / 1000) as u8
    }

    /// Complement of each channel, blend mode kept
    pub fn inverted(&self) -> Self {
        Self {
            red: !self.red,
            green: !self.green,
            blue: !self.blue,
            blend_mode: self.blend_mode,
        }
    }
}
