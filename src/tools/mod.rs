//! Helpers bridging decoded image files into the descriptor pipeline.

use std::path::Path;

use crate::Result;
use crate::models::PixelBuffer;

/// Load an image file as a normalized pixel buffer.
///
/// Images with an alpha channel keep all four channels; opaque images load
/// as three. Samples are normalized to [0, 1] in the interleaved order the
/// descriptor pipeline expects.
pub fn load_pixel_buffer<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let img = image::open(path)?;
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::from_bytes(&rgba.into_raw(), width as usize, height as usize, 4)
    } else {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        PixelBuffer::from_bytes(&rgb.into_raw(), width as usize, height as usize, 3)
    }
}
