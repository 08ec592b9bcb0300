//! Pixel canvas with dirty-chunk tracking
//!
//! The canvas height is split into `chunks` equal bands of rows (the last
//! one may be shorter). Writing a pixel that actually changes marks its band
//! dirty; the transport ships only dirty bands.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::backend::{ChunkSink, DisplayError};
use crate::color::{BlendMode, Color};
use crate::config::CanvasConfig;
use crate::layout::{level_to_luminance, luminance_to_level, PixelLayout};

/// Device framebuffer plus dirty-chunk set
#[derive(Debug, Clone)]
pub struct Canvas<L: PixelLayout> {
    layout: L,
    config: CanvasConfig,
    row_bytes: usize,
    rows_per_chunk: u16,
    buffer: Vec<u8>,
    /// Bit `i` set when chunk `i` needs sending
    dirty: u64,
}

impl<L: PixelLayout> Canvas<L> {
    /// Create a canvas, cleared to black and fully dirty
    pub fn new(layout: L, config: CanvasConfig) -> Result<Self, DisplayError> {
        config.validate()?;

        let row_bytes = layout.row_bytes(config.width);
        if row_bytes == 0 || !layout.supports_width(config.width) {
            return Err(DisplayError::InvalidGeometry);
        }

        let mut canvas = Self {
            layout,
            config,
            row_bytes,
            rows_per_chunk: config.rows_per_chunk(),
            buffer: vec![0; row_bytes * usize::from(config.height)],
            dirty: 0,
        };
        canvas.black();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "canvas: {}x{}, {} bytes, {} chunks",
            config.width,
            config.height,
            canvas.buffer.len(),
            config.chunks
        );

        Ok(canvas)
    }

    pub fn width(&self) -> u16 {
        self.config.width
    }

    pub fn height(&self) -> u16 {
        self.config.height
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Framebuffer bytes per row
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Whole framebuffer in device layout
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.config.width && y < self.config.height
    }

    /// Set a pixel
    ///
    /// Out-of-bounds coordinates and transparent colors are ignored. With
    /// `mark_dirty`, the pixel's chunk is marked only if the stored level
    /// actually changed.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color, mark_dirty: bool) {
        if !self.in_bounds(x, y) || color.is_transparent() {
            return;
        }

        let max_level = self.layout.max_level();
        let old_level = self.layout.unpack(&self.buffer, self.row_bytes, x, y);
        let level = match color.blend_mode() {
            BlendMode::Invert => max_level - old_level.min(max_level),
            _ => luminance_to_level(color.luminance(), max_level),
        };

        self.layout.pack(&mut self.buffer, self.row_bytes, x, y, level);

        if mark_dirty && level != old_level {
            self.mark_row_dirty(y);
        }
    }

    /// Like [`set_pixel`](Self::set_pixel) but reports out-of-bounds writes
    pub fn try_set_pixel(
        &mut self,
        x: u16,
        y: u16,
        color: Color,
        mark_dirty: bool,
    ) -> Result<(), DisplayError> {
        if !self.in_bounds(x, y) {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.set_pixel(x, y, color, mark_dirty);
        Ok(())
    }

    /// Read a pixel back as gray
    ///
    /// Out-of-bounds coordinates return `Color::default()`. The result is
    /// quantized to the layout's depth.
    pub fn pixel(&self, x: u16, y: u16) -> Color {
        self.try_pixel(x, y).unwrap_or_default()
    }

    pub fn try_pixel(&self, x: u16, y: u16) -> Result<Color, DisplayError> {
        if !self.in_bounds(x, y) {
            return Err(DisplayError::InvalidCoordinates);
        }
        let level = self.layout.unpack(&self.buffer, self.row_bytes, x, y);
        Ok(Color::gray(level_to_luminance(level, self.layout.max_level())))
    }

    /// Set every framebuffer byte to `value`
    ///
    /// Raw fill, no per-pixel packing and no dirty marking.
    pub fn fill(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// Clear to black and mark everything dirty
    pub fn black(&mut self) {
        self.fill(L::BLACK_FILL);
        self.set_dirty();
    }

    /// Clear to white and mark everything dirty
    pub fn white(&mut self) {
        self.fill(L::WHITE_FILL);
        self.set_dirty();
    }

    /// Number of dirty-tracking chunks
    pub fn chunk_count(&self) -> u8 {
        self.config.chunks
    }

    /// Chunk containing row `y`
    pub fn chunk_of_row(&self, y: u16) -> u8 {
        (y / self.rows_per_chunk) as u8
    }

    /// Rows covered by chunk `index` (empty when out of range)
    pub fn chunk_rows(&self, index: u8) -> Range<u16> {
        if index >= self.config.chunks {
            return 0..0;
        }
        let start = (u16::from(index) * self.rows_per_chunk).min(self.config.height);
        let end = (start + self.rows_per_chunk).min(self.config.height);
        start..end
    }

    /// Framebuffer bytes of chunk `index`, whole rows in device layout
    pub fn chunk_bytes(&self, index: u8) -> &[u8] {
        let rows = self.chunk_rows(index);
        let start = usize::from(rows.start) * self.row_bytes;
        let end = usize::from(rows.end) * self.row_bytes;
        &self.buffer[start..end]
    }

    fn mark_row_dirty(&mut self, y: u16) {
        let chunk = self.chunk_of_row(y);
        self.dirty |= 1u64 << chunk;
    }

    fn all_chunks_mask(&self) -> u64 {
        if self.config.chunks >= 64 {
            u64::MAX
        } else {
            (1u64 << self.config.chunks) - 1
        }
    }

    /// Mark every chunk dirty
    pub fn set_dirty(&mut self) {
        self.dirty = self.all_chunks_mask();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn is_chunk_dirty(&self, index: u8) -> bool {
        index < self.config.chunks && self.dirty & (1u64 << index) != 0
    }

    /// Dirty chunk indices, ascending
    pub fn dirty_chunks(&self) -> impl Iterator<Item = u8> + '_ {
        let dirty = self.dirty;
        (0..self.config.chunks).filter(move |&i| dirty & (1u64 << i) != 0)
    }

    /// Forget all pending changes
    pub fn clear_dirty(&mut self) {
        self.dirty = 0;
    }

    /// Send each dirty chunk to `sink`, ascending
    ///
    /// A chunk is marked clean only after the sink accepted it, so chunks
    /// left over from a failed flush go out on the next one.
    pub fn flush<S: ChunkSink>(&mut self, mut sink: S) -> Result<usize, DisplayError> {
        let pending = self.dirty;
        let mut sent = 0;

        for index in (0..self.config.chunks).filter(|&i| pending & (1u64 << i) != 0) {
            if let Err(e) = sink.send_chunk(index, self.chunk_bytes(index)) {
                #[cfg(feature = "defmt")]
                defmt::warn!("canvas: chunk {} not sent: {:?}", index, e);
                return Err(e);
            }
            self.dirty &= !(1u64 << index);
            sent += 1;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("canvas: flushed {} chunks", sent);

        Ok(sent)
    }
}
