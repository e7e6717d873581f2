//! Training-vector production and the classifier seam.
//!
//! Support-vector training and prediction live outside this crate; the
//! scanner only needs something that labels a descriptor. This module
//! produces the vectors such a collaborator trains on: one full-window
//! descriptor per positive example, and descriptors at random window
//! positions of larger images for negatives.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::descriptor::gradient::GradientField;
use crate::descriptor::{full_window_descriptor, window_descriptor};
use crate::models::params::{DEFAULT_STEP, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::models::{PixelBuffer, WindowGrid};
use crate::utils::dispatcher::run_parallel;
use crate::{HogError, Result};

/// Labels a window descriptor as match or no-match.
///
/// Implemented by the external classifier collaborator; the crate only
/// calls `predict`.
pub trait Classifier {
    /// Whether `descriptor` is a match.
    fn predict(&self, descriptor: &[f32]) -> bool;
}

/// Positive and negative training vectors ready for an external trainer.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    /// One full-window descriptor per positive example.
    pub positives: Vec<Vec<f32>>,
    /// Randomly sampled window descriptors from negative images.
    pub negatives: Vec<Vec<f32>>,
}

/// Compute the training vector of one positive example.
///
/// The image must be exactly one detection window (64x128); anything else
/// fails with `UnsupportedSize`.
pub fn positive_vector(buffer: &PixelBuffer) -> Result<Vec<f32>> {
    let field = GradientField::compute(buffer);
    full_window_descriptor(&field)
}

/// Compute training vectors for a batch of positive examples on a worker
/// pool, silently skipping images that are not window-sized.
pub fn positive_vectors(buffers: &[PixelBuffer], workers: usize) -> Vec<Vec<f32>> {
    let mut slots: Vec<Option<Vec<f32>>> = vec![None; buffers.len()];
    run_parallel(
        buffers.len(),
        workers,
        |index| positive_vector(&buffers[index]).ok(),
        &mut slots,
    );
    slots.into_iter().flatten().collect()
}

/// Sample `samples` training vectors at random window positions of a
/// negative example.
///
/// Fails with `UnsupportedSize` when the image is smaller than the window.
/// Positions are drawn from the same row-major grid the scanner uses at
/// the default step, so a seeded generator reproduces the same vectors.
pub fn negative_vectors(
    buffer: &PixelBuffer,
    samples: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Vec<f32>>> {
    let Some(grid) = WindowGrid::new(buffer.width(), buffer.height(), DEFAULT_STEP) else {
        return Err(HogError::UnsupportedSize {
            width: buffer.width(),
            height: buffer.height(),
            expected_width: WINDOW_WIDTH,
            expected_height: WINDOW_HEIGHT,
        });
    };

    let field = GradientField::compute(buffer);
    let mut vectors = Vec::with_capacity(samples);
    for _ in 0..samples {
        let position = rng.gen_range(0..grid.len());
        vectors.push(window_descriptor(&field, grid.origin(position)));
    }
    Ok(vectors)
}

/// Sample negative training vectors from a batch of images on a worker
/// pool.
///
/// Each image gets its own generator seeded from `seed` and the image
/// index, so results are reproducible regardless of worker scheduling.
/// Images smaller than the window contribute nothing.
pub fn negative_vectors_batch(
    buffers: &[PixelBuffer],
    samples_per_image: usize,
    seed: u64,
    workers: usize,
) -> Vec<Vec<f32>> {
    let mut slots: Vec<Vec<Vec<f32>>> = vec![Vec::new(); buffers.len()];
    run_parallel(
        buffers.len(),
        workers,
        |index| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            negative_vectors(&buffers[index], samples_per_image, &mut rng).unwrap_or_default()
        },
        &mut slots,
    );
    slots.into_iter().flatten().collect()
}

/// Produce a complete training set from positive and negative image
/// batches.
pub fn collect_training_set(
    positives: &[PixelBuffer],
    negatives: &[PixelBuffer],
    samples_per_image: usize,
    seed: u64,
    workers: usize,
) -> TrainingSet {
    TrainingSet {
        positives: positive_vectors(positives, workers),
        negatives: negative_vectors_batch(negatives, samples_per_image, seed, workers),
    }
}
