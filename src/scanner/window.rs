//! Sliding-window descriptor computation over one pyramid level.

use crate::descriptor::gradient::GradientField;
use crate::descriptor::{window_descriptor, window_descriptor_parallel};
use crate::models::{PixelBuffer, WindowGrid};
use crate::scanner::ScanParams;
use crate::utils::dispatcher::run_parallel;
use crate::Result;

/// Compute one descriptor per valid window placement of `level`, row-major.
///
/// The level's gradient field is computed once and shared by every
/// placement. `params.parallel` fans whole-window computations out across a
/// worker pool; `params.parallel_children` additionally parallelizes the
/// cell and block stages inside each window. An image smaller than the
/// window produces an empty result.
pub fn slide_window(level: &PixelBuffer, params: &ScanParams) -> Result<Vec<Vec<f32>>> {
    params.validate()?;
    let Some(grid) = WindowGrid::new(level.width(), level.height(), params.step) else {
        return Ok(Vec::new());
    };

    let field = if params.parallel || params.parallel_children {
        GradientField::compute_parallel(level, params.workers)
    } else {
        GradientField::compute(level)
    };

    Ok(descriptors_for_grid(&field, &grid, params))
}

pub(crate) fn descriptors_for_grid(
    field: &GradientField,
    grid: &WindowGrid,
    params: &ScanParams,
) -> Vec<Vec<f32>> {
    let (outer_workers, inner_workers) = params.worker_split();
    let descriptor_at = |position: usize| {
        let origin = grid.origin(position);
        if params.parallel_children {
            window_descriptor_parallel(field, origin, inner_workers)
        } else {
            window_descriptor(field, origin)
        }
    };

    if params.parallel {
        let mut descriptors = vec![Vec::new(); grid.len()];
        run_parallel(grid.len(), outer_workers, descriptor_at, &mut descriptors);
        descriptors
    } else {
        (0..grid.len()).map(descriptor_at).collect()
    }
}
