//! Multi-scale sliding-window scanning
//!
//! This module drives the descriptor pipeline across a whole image:
//! - Pyramid generation (progressively downscaled copies of the source)
//! - Sliding-window enumeration per level at a fixed step
//! - Coarse (per-window) and fine (per-cell/per-block) parallel fan-out

/// Pyramid generation and bilinear downscaling
pub mod pyramid;
/// Per-level sliding-window descriptor computation
pub mod window;

pub use pyramid::{PyramidLevel, build_pyramid};
pub use window::slide_window;

use crate::models::params::{
    DEFAULT_SCALE_FACTOR, DEFAULT_STEP, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::models::{LevelScan, PixelBuffer, WindowGrid, WindowMatch};
use crate::training::Classifier;
use crate::{HogError, Result};

/// Configuration for a pyramid scan.
///
/// `workers` is the total thread budget: when both parallel switches are on
/// it is split between the outer (per-window) and inner (per-cell/block)
/// pools so their product never exceeds it.
#[derive(Debug, Clone)]
pub struct ScanParams {
    /// Downscale factor between pyramid levels. Must be above 1.
    pub scale_factor: f32,
    /// Sliding-window step in pixels. Must be at least 1.
    pub step: usize,
    /// Fan whole-window computations out across a worker pool.
    pub parallel: bool,
    /// Additionally parallelize the cell and block stages inside each
    /// window.
    pub parallel_children: bool,
    /// Worker-thread budget shared by both pools.
    pub workers: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            step: DEFAULT_STEP,
            parallel: true,
            parallel_children: false,
            workers: default_workers(),
        }
    }
}

impl ScanParams {
    /// Check the numeric constraints, failing with `InvalidArgument` on a
    /// scale factor at or below 1 or a zero step.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor > 1.0) {
            return Err(HogError::InvalidArgument(format!(
                "pyramid scale factor must be greater than 1, got {}",
                self.scale_factor
            )));
        }
        if self.step == 0 {
            return Err(HogError::InvalidArgument(
                "window step must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Split the worker budget into (outer, inner) pool sizes.
    pub(crate) fn worker_split(&self) -> (usize, usize) {
        let budget = self.workers.max(1);
        if self.parallel && self.parallel_children {
            let outer = (budget / 2).max(1);
            let inner = (budget / outer).max(1);
            (outer, inner)
        } else {
            (budget, budget)
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Scan the full pyramid of `base`, producing every window descriptor of
/// every level.
pub fn scan(base: &PixelBuffer, params: &ScanParams) -> Result<Vec<LevelScan>> {
    params.validate()?;
    let levels = build_pyramid(base, params.scale_factor, WINDOW_WIDTH, WINDOW_HEIGHT)?;

    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!(
            "SCAN: {} pyramid levels for {}x{}",
            levels.len(),
            base.width(),
            base.height()
        );
    }

    let mut scans = Vec::with_capacity(levels.len());
    for (index, level) in levels.iter().enumerate() {
        let (rows, cols) = WindowGrid::new(level.buffer.width(), level.buffer.height(), params.step)
            .map(|grid| (grid.rows(), grid.cols()))
            .unwrap_or((0, 0));
        let descriptors = slide_window(&level.buffer, params)?;

        if cfg!(debug_assertions) && crate::debug::debug_enabled() {
            eprintln!(
                "SCAN: level {index} ({}x{}, scale {:.3}): {rows}x{cols} windows",
                level.buffer.width(),
                level.buffer.height(),
                level.scale
            );
        }

        scans.push(LevelScan {
            level: index,
            scale: level.scale,
            rows,
            cols,
            descriptors,
        });
    }
    Ok(scans)
}

/// Scan `base` and report every window the classifier labels a match as a
/// (level, position) pair with its grid coordinates and level scale.
pub fn detect<C: Classifier>(
    base: &PixelBuffer,
    classifier: &C,
    params: &ScanParams,
) -> Result<Vec<WindowMatch>> {
    let scans = scan(base, params)?;
    let mut matches = Vec::new();
    for level_scan in &scans {
        for (position, descriptor) in level_scan.descriptors.iter().enumerate() {
            if classifier.predict(descriptor) {
                matches.push(WindowMatch {
                    level: level_scan.level,
                    position,
                    row: position / level_scan.cols,
                    col: position % level_scan.cols,
                    scale: level_scan.scale,
                });
            }
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params::DESCRIPTOR_LEN;

    fn textured_buffer(width: usize, height: usize) -> PixelBuffer {
        let data: Vec<f32> = (0..width * height * 3)
            .map(|i| ((i * 53) % 199) as f32 / 198.0)
            .collect();
        PixelBuffer::new(data, width, height, 3).unwrap()
    }

    struct ThresholdClassifier {
        threshold: f32,
    }

    impl Classifier for ThresholdClassifier {
        fn predict(&self, descriptor: &[f32]) -> bool {
            descriptor.iter().sum::<f32>() > self.threshold
        }
    }

    #[test]
    fn test_scan_covers_all_levels() {
        let base = textured_buffer(150, 300);
        let params = ScanParams {
            workers: 2,
            ..ScanParams::default()
        };
        let scans = scan(&base, &params).unwrap();
        assert!(!scans.is_empty());
        for (index, level_scan) in scans.iter().enumerate() {
            assert_eq!(level_scan.level, index);
            assert_eq!(level_scan.descriptors.len(), level_scan.rows * level_scan.cols);
            for descriptor in &level_scan.descriptors {
                assert_eq!(descriptor.len(), DESCRIPTOR_LEN);
            }
        }
    }

    #[test]
    fn test_scan_rejects_bad_params() {
        let base = textured_buffer(100, 200);
        let bad_scale = ScanParams {
            scale_factor: 1.0,
            ..ScanParams::default()
        };
        assert!(scan(&base, &bad_scale).is_err());

        let bad_step = ScanParams {
            step: 0,
            ..ScanParams::default()
        };
        assert!(scan(&base, &bad_step).is_err());
    }

    #[test]
    fn test_small_image_scans_to_nothing() {
        let base = textured_buffer(32, 32);
        let scans = scan(&base, &ScanParams::default()).unwrap();
        assert!(scans.is_empty());
    }

    #[test]
    fn test_detect_reports_grid_coordinates() {
        let base = textured_buffer(100, 200);
        let params = ScanParams {
            workers: 2,
            ..ScanParams::default()
        };
        // Everything matches at threshold zero: positive descriptor sums.
        let matches = detect(&base, &ThresholdClassifier { threshold: 0.0 }, &params).unwrap();
        let scans = scan(&base, &params).unwrap();
        let total: usize = scans.iter().map(|s| s.descriptors.len()).sum();
        assert_eq!(matches.len(), total);

        let level0 = &scans[0];
        let reported = matches.iter().find(|m| m.level == 0 && m.position == 9).unwrap();
        assert_eq!(reported.row, 9 / level0.cols);
        assert_eq!(reported.col, 9 % level0.cols);
        assert_eq!(reported.scale, 1.0);

        // Nothing clears an impossible threshold.
        let none = detect(&base, &ThresholdClassifier { threshold: 1e9 }, &params).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_worker_split_respects_budget() {
        let both = ScanParams {
            parallel: true,
            parallel_children: true,
            workers: 8,
            ..ScanParams::default()
        };
        let (outer, inner) = both.worker_split();
        assert!(outer * inner <= 8);
        assert!(outer >= 1 && inner >= 1);

        let single = ScanParams {
            parallel: true,
            parallel_children: false,
            workers: 8,
            ..ScanParams::default()
        };
        assert_eq!(single.worker_split().0, 8);
    }
}
