//! Pure-computation conversion from a [`Canvas`] to an RGBA8 buffer.
//!
//! Always available (no feature gate) so that hosts without the `png`
//! feature can still hand the bytes to their own encoder or texture upload.

use crate::canvas::Canvas;

/// Quantizes every pixel to four bytes (R, G, B, 255), row-major.
///
/// The buffer length is `width * height * 4`.
pub fn canvas_to_rgba(canvas: &Canvas) -> Vec<u8> {
    canvas
        .pixels()
        .iter()
        .flat_map(|&c| {
            let [r, g, b] = c.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
