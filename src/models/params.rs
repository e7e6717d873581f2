//! Published detection-window geometry and normalization constants.
//!
//! Display-side code translates (level, window position) reports back into
//! pixel rectangles using these values, so they are part of the public
//! contract and must stay consistent with the descriptor pipeline.

/// Width of the detection window in pixels.
pub const WINDOW_WIDTH: usize = 64;

/// Height of the detection window in pixels.
pub const WINDOW_HEIGHT: usize = 128;

/// Side length of one square histogram cell in pixels.
pub const CELL_SIZE: usize = 8;

/// Number of cell columns in one window.
pub const CELL_COLS: usize = WINDOW_WIDTH / CELL_SIZE;

/// Number of cell rows in one window.
pub const CELL_ROWS: usize = WINDOW_HEIGHT / CELL_SIZE;

/// Total cells per window.
pub const CELL_COUNT: usize = CELL_COLS * CELL_ROWS;

/// Number of orientation bins per cell histogram.
pub const BIN_COUNT: usize = 9;

/// Angular width of one orientation bin in degrees.
pub const BIN_WIDTH_DEGREES: f32 = 20.0;

/// Side length of one block, in cells.
pub const BLOCK_SIZE: usize = 2;

/// Number of block columns per window (blocks overlap with stride 1 cell).
pub const BLOCK_COLS: usize = CELL_COLS - 1;

/// Number of block rows per window.
pub const BLOCK_ROWS: usize = CELL_ROWS - 1;

/// Total blocks per window.
pub const BLOCK_COUNT: usize = BLOCK_COLS * BLOCK_ROWS;

/// Length of one flattened, normalized block vector.
pub const BLOCK_LEN: usize = BLOCK_SIZE * BLOCK_SIZE * BIN_COUNT;

/// Length of one complete window descriptor.
pub const DESCRIPTOR_LEN: usize = BLOCK_COUNT * BLOCK_LEN;

/// Ceiling applied to descriptor components between the two
/// normalization passes.
pub const CLIP_THRESHOLD: f32 = 0.2;

/// Stabilizer added under every square root so normalization never divides
/// by zero, even for an all-zero input.
pub const NORM_EPSILON: f32 = 1e-5;

/// Default sliding-window step in pixels.
pub const DEFAULT_STEP: usize = 5;

/// Default pyramid downscale factor between levels. Must stay above 1.
pub const DEFAULT_SCALE_FACTOR: f32 = 1.2;

/// Default number of negative training vectors sampled per image.
pub const DEFAULT_NEGATIVE_SAMPLES: usize = 10;
