//! PNG snapshots of a [`Canvas`].
//!
//! Feature-gated behind `png` (default on) so hosts that only need the raw
//! bytes do not pull in the `image` crate.

use flowfield_core::error::EngineError;
use std::path::Path;

use crate::canvas::Canvas;
use crate::pixel::canvas_to_rgba;

/// Writes the canvas as an RGBA PNG.
///
/// Returns `EngineError::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), EngineError> {
    let rgba = canvas_to_rgba(canvas);
    let w = u32::try_from(canvas.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::{Srgb, Viewport};

    #[test]
    fn write_png_round_trip() {
        let mut canvas = Canvas::new(Viewport::new(16, 12).unwrap(), Srgb::BLACK).unwrap();
        canvas.set(3, 4, Srgb { r: 1.0, g: 1.0, b: 1.0 });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 12));
        assert_eq!(img.get_pixel(3, 4).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let canvas = Canvas::new(Viewport::new(2, 2).unwrap(), Srgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(write_png(&canvas, &path), Err(EngineError::Io(_))));
    }
}
