//! Canvas geometry configuration
//!
//! Geometry is plain data so it can be stored alongside other board
//! configuration as postcard binary (feature `serde`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::backend::DisplayError;

/// Largest supported number of dirty-tracking chunks
pub const MAX_CHUNKS: u8 = 64;

/// Canvas geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanvasConfig {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Number of horizontal bands used for dirty tracking
    pub chunks: u8,
}

impl CanvasConfig {
    pub const fn new(width: u16, height: u16, chunks: u8) -> Self {
        Self {
            width,
            height,
            chunks,
        }
    }

    /// Check the geometry can back a canvas
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.width == 0 || self.height == 0 {
            return Err(DisplayError::InvalidGeometry);
        }
        if self.chunks == 0 || self.chunks > MAX_CHUNKS {
            return Err(DisplayError::InvalidGeometry);
        }
        if u16::from(self.chunks) > self.height {
            return Err(DisplayError::InvalidGeometry);
        }
        // Every chunk must own at least one row
        let last_start = u32::from(self.chunks - 1) * u32::from(self.rows_per_chunk());
        if last_start >= u32::from(self.height) {
            return Err(DisplayError::InvalidGeometry);
        }
        Ok(())
    }

    /// Rows per chunk; the last chunk may be shorter but never empty
    pub fn rows_per_chunk(&self) -> u16 {
        self.height.div_ceil(u16::from(self.chunks.max(1)))
    }

    /// Serialize into `buffer`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_postcard<'b>(&self, buffer: &'b mut [u8]) -> Result<&'b mut [u8], DisplayError> {
        postcard::to_slice(self, buffer).map_err(|_| DisplayError::InvalidConfig)
    }

    /// Deserialize and validate
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, DisplayError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| DisplayError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }
}
