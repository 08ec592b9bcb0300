//! MK1 display layout
//!
//! 255 × 64 pixels, 5 bits of gray each. Three horizontal pixels share two
//! bytes (15 of 16 bits used):
//!
//! ```text
//!            byte n                  byte n+1
//! ┌────────────┬────────────┐ ┌────────────┬───┬────────────┐
//! │ p0 [4..0]  │ p1 [4..2]  │ │ p1 [1..0]  │ - │ p2 [4..0]  │
//! │ bits 7..3  │ bits 2..0  │ │ bits 7..6  │ 5 │ bits 4..0  │
//! └────────────┴────────────┘ └────────────┴───┴────────────┘
//! ```
//!
//! Storage is active-low: each field holds the complement of the level, so
//! an all-`0xFF` buffer is black and an all-`0x00` buffer is white.

use crate::backend::DisplayError;
use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::layout::PixelLayout;

/// Display width in pixels
pub const WIDTH: u16 = 255;

/// Display height in pixels
pub const HEIGHT: u16 = 64;

/// Dirty-tracking bands shipped to the device
pub const CHUNKS: u8 = 22;

const FIELD: u8 = 0x1F;

/// Packing for the MK1 display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mk1Layout;

impl Mk1Layout {
    /// MK1 canvas geometry
    pub const CONFIG: CanvasConfig = CanvasConfig::new(WIDTH, HEIGHT, CHUNKS);

    /// Create a black, fully dirty MK1 canvas
    pub fn canvas() -> Result<Canvas<Mk1Layout>, DisplayError> {
        Canvas::new(Mk1Layout, Self::CONFIG)
    }

    #[inline]
    fn byte_index(row_bytes: usize, x: u16, y: u16) -> usize {
        row_bytes * usize::from(y) + usize::from(x / 3) * 2
    }
}

impl PixelLayout for Mk1Layout {
    const DEPTH: u8 = 5;
    const BLACK_FILL: u8 = 0xFF;
    const WHITE_FILL: u8 = 0x00;

    fn row_bytes(&self, width: u16) -> usize {
        usize::from(width / 3) * 2
    }

    // A partial triple would have no bytes of its own
    fn supports_width(&self, width: u16) -> bool {
        width > 0 && width % 3 == 0
    }

    fn pack(&self, buffer: &mut [u8], row_bytes: usize, x: u16, y: u16, level: u8) {
        let index = Self::byte_index(row_bytes, x, y);
        let stored = !level & FIELD;

        match x % 3 {
            0 => {
                buffer[index] = (buffer[index] & !0xF8) | (stored << 3);
            }
            1 => {
                buffer[index] = (buffer[index] & !0x07) | (stored >> 2);
                buffer[index + 1] = (buffer[index + 1] & !0xC0) | ((stored & 0x03) << 6);
            }
            _ => {
                buffer[index + 1] = (buffer[index + 1] & !FIELD) | stored;
            }
        }
    }

    fn unpack(&self, buffer: &[u8], row_bytes: usize, x: u16, y: u16) -> u8 {
        let index = Self::byte_index(row_bytes, x, y);

        let stored = match x % 3 {
            0 => buffer[index] >> 3,
            1 => ((buffer[index] & 0x07) << 2) | (buffer[index + 1] >> 6),
            _ => buffer[index + 1] & FIELD,
        };

        !stored & FIELD
    }
}
