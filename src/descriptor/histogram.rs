//! Orientation histograms of single cells.

use crate::descriptor::gradient::GradientField;
use crate::models::params::{BIN_COUNT, BIN_WIDTH_DEGREES, CELL_COLS, CELL_SIZE};

/// Build the 9-bin orientation histogram of one cell.
///
/// `cell_index` addresses the cell row-major within the window's cell grid;
/// `origin` is the window's top-left pixel inside the field, which lets one
/// per-level gradient field serve every window placement without
/// recomputing derivatives.
///
/// Each channel sample votes with its magnitude, split between the two bins
/// adjacent to its orientation by linear interpolation. Pure function of
/// its inputs; distinct cell indices may be computed concurrently without
/// synchronization.
pub fn cell_histogram(
    field: &GradientField,
    cell_index: usize,
    origin: (usize, usize),
) -> [f32; BIN_COUNT] {
    let (origin_row, origin_col) = origin;
    let cell_row = cell_index / CELL_COLS;
    let cell_col = cell_index % CELL_COLS;
    let top = origin_row + cell_row * CELL_SIZE;
    let left = origin_col + cell_col * CELL_SIZE;

    let channels = field.channels();
    let stride = field.width() * channels;
    let magnitude = field.magnitude();
    let orientation = field.orientation();

    let mut bins = [0.0f32; BIN_COUNT];
    for row in top..top + CELL_SIZE {
        let base = row * stride + left * channels;
        for offset in 0..CELL_SIZE * channels {
            let index = base + offset;
            let angle = orientation[index];
            let weight = magnitude[index];
            let bin = ((angle / BIN_WIDTH_DEGREES) as usize).min(BIN_COUNT - 1);
            let factor = (angle - bin as f32 * BIN_WIDTH_DEGREES) / BIN_WIDTH_DEGREES;
            bins[bin] += (1.0 - factor) * weight;
            bins[(bin + 1) % BIN_COUNT] += factor * weight;
        }
    }
    bins
}
