//! Pixel canvas and device framebuffer layouts for Padlink controllers
//!
//! This crate provides:
//! - `Canvas`: a device-agnostic pixel surface with dirty-chunk tracking
//! - `PixelLayout` trait for device-specific pixel packing
//! - `Mk1Layout`: 5-bit grayscale, three pixels per two bytes
//! - `ChunkSink` trait for the transport that ships dirty chunks
//!
//! # Architecture
//!
//! The canvas owns the framebuffer bytes exactly as the device expects them.
//! Writes go through the layout, which packs a gray level into the buffer,
//! and mark the band of rows they touched as dirty. A transport drains the
//! dirty bands with [`Canvas::flush`] and sends them unmodified.
//!
//! Nothing here locks. A canvas shared between a renderer and a transport
//! needs external mutual exclusion.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod mk1;

// Re-export key types
pub use backend::{ChunkSink, DisplayError};
pub use canvas::Canvas;
pub use color::{BlendMode, Color};
pub use config::CanvasConfig;
pub use layout::PixelLayout;
pub use mk1::Mk1Layout;
