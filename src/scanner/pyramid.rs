//! Image pyramid generation for multi-scale scanning.
//!
//! Level 0 is the original image; every further level is the previous one
//! downscaled by `1 / scale_factor` with bilinear interpolation. Generation
//! is eager and stops before a level would be smaller than the detection
//! window in either dimension. Levels are consumed in order and rebuilt
//! from scratch for a new scan.

use rayon::prelude::*;

use crate::models::PixelBuffer;
use crate::{HogError, Result};

/// One pyramid level: the resized buffer plus its scale relative to the
/// original image (level 0 has scale 1).
#[derive(Debug, Clone)]
pub struct PyramidLevel {
    /// Resized pixel data for this level.
    pub buffer: PixelBuffer,
    /// Factor mapping level coordinates back to original-image pixels.
    pub scale: f32,
}

/// Build the scan pyramid for `base`.
///
/// Fails with `InvalidArgument` when `scale_factor` is not above 1 or when
/// either window dimension is zero. A base image smaller than the window
/// yields an empty pyramid.
pub fn build_pyramid(
    base: &PixelBuffer,
    scale_factor: f32,
    window_width: usize,
    window_height: usize,
) -> Result<Vec<PyramidLevel>> {
    if !(scale_factor > 1.0) {
        return Err(HogError::InvalidArgument(format!(
            "pyramid scale factor must be greater than 1, got {scale_factor}"
        )));
    }
    if window_width == 0 || window_height == 0 {
        return Err(HogError::InvalidArgument(
            "window dimensions must be non-zero".to_string(),
        ));
    }

    let mut levels = Vec::new();
    let mut current = base.clone();
    let mut scale = 1.0f32;
    while current.width() >= window_width && current.height() >= window_height {
        let next_width = (current.width() as f32 / scale_factor) as usize;
        let next_height = (current.height() as f32 / scale_factor) as usize;
        let next = if next_width >= window_width && next_height >= window_height {
            Some(resize_bilinear(&current, next_width, next_height)?)
        } else {
            None
        };
        levels.push(PyramidLevel {
            buffer: current,
            scale,
        });
        match next {
            Some(buffer) => {
                current = buffer;
                scale *= scale_factor;
            }
            None => break,
        }
    }
    Ok(levels)
}

/// Downscale `src` to `dst_width x dst_height` with bilinear sampling,
/// processing destination rows in parallel.
fn resize_bilinear(src: &PixelBuffer, dst_width: usize, dst_height: usize) -> Result<PixelBuffer> {
    let channels = src.channels();
    let src_width = src.width();
    let src_height = src.height();
    let src_stride = src_width * channels;
    let data = src.samples();

    let x_ratio = if dst_width > 1 {
        (src_width - 1) as f32 / (dst_width - 1) as f32
    } else {
        0.0
    };
    let y_ratio = if dst_height > 1 {
        (src_height - 1) as f32 / (dst_height - 1) as f32
    } else {
        0.0
    };

    let mut out = vec![0.0f32; dst_width * dst_height * channels];
    out.par_chunks_mut(dst_width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = y as f32 * y_ratio;
            let y0 = fy as usize;
            let y1 = (y0 + 1).min(src_height - 1);
            let dy = fy - y0 as f32;
            for x in 0..dst_width {
                let fx = x as f32 * x_ratio;
                let x0 = fx as usize;
                let x1 = (x0 + 1).min(src_width - 1);
                let dx = fx - x0 as f32;
                for ch in 0..channels {
                    let v00 = data[y0 * src_stride + x0 * channels + ch];
                    let v01 = data[y0 * src_stride + x1 * channels + ch];
                    let v10 = data[y1 * src_stride + x0 * channels + ch];
                    let v11 = data[y1 * src_stride + x1 * channels + ch];
                    let top = v00 + (v01 - v00) * dx;
                    let bottom = v10 + (v11 - v10) * dx;
                    row[x * channels + ch] = top + (bottom - top) * dy;
                }
            }
        });

    PixelBuffer::new(out, dst_width, dst_height, channels)
}
