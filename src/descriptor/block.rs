//! Block gathering and L2 normalization.

use crate::models::params::{
    BIN_COUNT, BLOCK_COLS, BLOCK_LEN, BLOCK_SIZE, CELL_COLS, NORM_EPSILON,
};

/// Gather the 2x2 cell histograms covering one block and L2-normalize them.
///
/// Blocks overlap with a stride of one cell, so `block_index` addresses a
/// `(CELL_COLS - 1) x (CELL_ROWS - 1)` grid, row-major. The four histograms
/// are flattened row-major before normalization. Read-only over the
/// histogram slice; distinct block indices may run concurrently.
pub fn normalize_block(histograms: &[[f32; BIN_COUNT]], block_index: usize) -> [f32; BLOCK_LEN] {
    let block_row = block_index / BLOCK_COLS;
    let block_col = block_index % BLOCK_COLS;

    let mut flat = [0.0f32; BLOCK_LEN];
    let mut cursor = 0;
    for row in 0..BLOCK_SIZE {
        for col in 0..BLOCK_SIZE {
            let cell = (block_row + row) * CELL_COLS + (block_col + col);
            flat[cursor..cursor + BIN_COUNT].copy_from_slice(&histograms[cell]);
            cursor += BIN_COUNT;
        }
    }

    let sum_of_squares: f32 = flat.iter().map(|v| v * v).sum();
    let norm = (sum_of_squares + NORM_EPSILON).sqrt();
    for value in &mut flat {
        *value /= norm;
    }
    flat
}
