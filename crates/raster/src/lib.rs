#![deny(unsafe_code)]
//! CPU rendering for the flowfield visualizer.
//!
//! [`RasterSurface`] implements `flowfield_core::RenderSurface` by
//! rasterizing each frame's segments, points or triangles into a
//! [`Canvas`]. The canvas converts to RGBA8 bytes and, with the `png`
//! feature (default on), to PNG files.

pub mod canvas;
pub mod pixel;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::Canvas;
pub use surface::{RasterSurface, BACKGROUND};
