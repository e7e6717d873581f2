//! RustHOG - Histogram of Oriented Gradients in pure Rust
//!
//! Extracts HOG descriptors from raster images and scans a multi-scale
//! pyramid with a fixed 64x128 sliding window, producing one fixed-length
//! feature vector per window position for an external classifier to label.
//! Image decode, display and the classifier itself are collaborators, not
//! part of this crate.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// The descriptor pipeline (gradients, cell histograms, blocks, assembly)
pub mod descriptor;
/// Core data structures (pixel buffers, window grids, constants)
pub mod models;
/// Pyramid generation and sliding-window scanning
pub mod scanner;
/// Image-file loading helpers
pub mod tools;
/// Training-vector production and the classifier seam
pub mod training;
/// Worker-pool fan-out utilities
pub mod utils;

mod debug;

pub use descriptor::{Axis, GradientField, full_window_descriptor, window_descriptor};
pub use models::{LevelScan, PixelBuffer, WindowGrid, WindowMatch, WindowPosition};
pub use scanner::{PyramidLevel, ScanParams, build_pyramid, detect, scan, slide_window};
pub use training::{Classifier, TrainingSet};

/// Convenience alias for results carrying a [`HogError`].
pub type Result<T> = std::result::Result<T, HogError>;

/// Errors reported by the descriptor and scanning pipelines.
///
/// The numeric pipeline is pure and deterministic; nothing here is a
/// transient fault, so no operation is ever retried.
#[derive(Debug, thiserror::Error)]
pub enum HogError {
    /// A caller-supplied value was malformed: unknown derivative direction,
    /// mismatched array lengths, bad buffer geometry, or an out-of-range
    /// scan parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A full-window operation was applied to an image of the wrong size.
    #[error(
        "unsupported image size {width}x{height}, the detection window requires {expected_width}x{expected_height}"
    )]
    UnsupportedSize {
        /// Width of the rejected image.
        width: usize,
        /// Height of the rejected image.
        height: usize,
        /// Window width the operation requires.
        expected_width: usize,
        /// Window height the operation requires.
        expected_height: usize,
    },

    /// Decoding an image file failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
