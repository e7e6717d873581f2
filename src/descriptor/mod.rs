//! The HOG descriptor pipeline
//!
//! This module turns pixel buffers into fixed-length window descriptors:
//! - Central-difference gradients with per-sample magnitude/orientation
//! - 9-bin orientation histograms per 8x8 cell
//! - Overlapping 2x2-cell blocks, L2-normalized
//! - Two-stage normalized concatenation of all blocks

/// Final descriptor assembly and two-stage normalization
pub mod assemble;
/// Block gathering and L2 normalization
pub mod block;
/// Central-difference derivatives and the gradient field
pub mod gradient;
/// Per-cell orientation histograms
pub mod histogram;

pub use gradient::{Axis, GradientField};

use crate::models::params::{
    BIN_COUNT, BLOCK_COUNT, BLOCK_LEN, CELL_COUNT, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::utils::dispatcher::run_parallel;
use crate::{HogError, Result};

/// Compute the descriptor of the window whose top-left pixel sits at
/// `origin` within the field, sequentially.
///
/// Histograms for all cells are completed before any block is normalized,
/// and all blocks before assembly; the stages never overlap.
pub fn window_descriptor(field: &GradientField, origin: (usize, usize)) -> Vec<f32> {
    let mut histograms = vec![[0.0f32; BIN_COUNT]; CELL_COUNT];
    for (index, slot) in histograms.iter_mut().enumerate() {
        *slot = histogram::cell_histogram(field, index, origin);
    }

    let mut blocks = vec![[0.0f32; BLOCK_LEN]; BLOCK_COUNT];
    for (index, slot) in blocks.iter_mut().enumerate() {
        *slot = block::normalize_block(&histograms, index);
    }

    assemble::assemble(&blocks)
}

/// Like [`window_descriptor`], fanning the cell-histogram and
/// block-normalization stages out across a transient pool of `workers`
/// threads. The pool for each stage drains completely before the next
/// stage starts, and both are gone before this returns. Produces the same
/// values as the sequential path.
pub fn window_descriptor_parallel(
    field: &GradientField,
    origin: (usize, usize),
    workers: usize,
) -> Vec<f32> {
    let mut histograms = vec![[0.0f32; BIN_COUNT]; CELL_COUNT];
    run_parallel(
        CELL_COUNT,
        workers,
        |index| histogram::cell_histogram(field, index, origin),
        &mut histograms,
    );

    let mut blocks = vec![[0.0f32; BLOCK_LEN]; BLOCK_COUNT];
    run_parallel(
        BLOCK_COUNT,
        workers,
        |index| block::normalize_block(&histograms, index),
        &mut blocks,
    );

    assemble::assemble(&blocks)
}

/// Compute the descriptor of a field that is exactly one window in size.
///
/// Fails with `UnsupportedSize` for any other dimensions rather than
/// silently truncating or padding; positive training examples must be
/// exactly 64x128.
pub fn full_window_descriptor(field: &GradientField) -> Result<Vec<f32>> {
    if field.width() != WINDOW_WIDTH || field.height() != WINDOW_HEIGHT {
        return Err(HogError::UnsupportedSize {
            width: field.width(),
            height: field.height(),
            expected_width: WINDOW_WIDTH,
            expected_height: WINDOW_HEIGHT,
        });
    }
    Ok(window_descriptor(field, (0, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PixelBuffer;
    use crate::models::params::DESCRIPTOR_LEN;

    fn window_buffer() -> PixelBuffer {
        let len = WINDOW_WIDTH * WINDOW_HEIGHT * 3;
        let data: Vec<f32> = (0..len).map(|i| ((i * 17) % 256) as f32 / 255.0).collect();
        PixelBuffer::new(data, WINDOW_WIDTH, WINDOW_HEIGHT, 3).unwrap()
    }

    #[test]
    fn test_full_window_descriptor_length() {
        let field = GradientField::compute(&window_buffer());
        let descriptor = full_window_descriptor(&field).unwrap();
        assert_eq!(descriptor.len(), DESCRIPTOR_LEN);
    }

    #[test]
    fn test_full_window_rejects_other_sizes() {
        let data = vec![0.0f32; 70 * 130 * 3];
        let buffer = PixelBuffer::new(data, 70, 130, 3).unwrap();
        let field = GradientField::compute(&buffer);
        match full_window_descriptor(&field) {
            Err(HogError::UnsupportedSize { width, height, .. }) => {
                assert_eq!(width, 70);
                assert_eq!(height, 130);
            }
            other => panic!("expected UnsupportedSize, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_children_match_sequential() {
        let field = GradientField::compute(&window_buffer());
        let sequential = window_descriptor(&field, (0, 0));
        let parallel = window_descriptor_parallel(&field, (0, 0), 4);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_four_channel_window() {
        let len = WINDOW_WIDTH * WINDOW_HEIGHT * 4;
        let data: Vec<f32> = (0..len).map(|i| ((i * 29) % 200) as f32 / 199.0).collect();
        let buffer = PixelBuffer::new(data, WINDOW_WIDTH, WINDOW_HEIGHT, 4).unwrap();
        let field = GradientField::compute(&buffer);
        let descriptor = full_window_descriptor(&field).unwrap();
        assert_eq!(descriptor.len(), DESCRIPTOR_LEN);
    }
}
