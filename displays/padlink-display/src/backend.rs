//! Display errors and the transport boundary
//!
//! The transport that moves framebuffer bytes to hardware lives outside this
//! crate. It plugs in through [`ChunkSink`].

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Coordinates outside the canvas
    InvalidCoordinates,
    /// Geometry the canvas cannot represent (zero size, bad chunk count)
    InvalidGeometry,
    /// Stored configuration could not be encoded or decoded
    InvalidConfig,
    /// Transport failed to deliver a chunk
    Transport,
}

/// Receiver of dirty framebuffer chunks
///
/// `bytes` covers whole rows of the device framebuffer, in device layout,
/// starting at the first row of chunk `index`.
pub trait ChunkSink {
    fn send_chunk(&mut self, index: u8, bytes: &[u8]) -> Result<(), DisplayError>;
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn send_chunk(&mut self, index: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        (**self).send_chunk(index, bytes)
    }
}
