//! Central-difference image derivatives and the per-sample gradient field.
//!
//! Every interleaved channel sample is treated as its own scalar stream:
//! derivatives, magnitudes and orientations are computed per sample, never
//! aggregated into a per-pixel luminance. Classifiers trained on these
//! vectors depend on that layout.

use crate::models::PixelBuffer;
use crate::utils::dispatcher::run_parallel;
use crate::{HogError, Result};

/// Derivative direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal derivative (left/right neighbors).
    X,
    /// Vertical derivative (up/down neighbors).
    Y,
}

impl TryFrom<char> for Axis {
    type Error = HogError;

    fn try_from(token: char) -> Result<Self> {
        match token {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            other => Err(HogError::InvalidArgument(format!(
                "unknown derivative direction '{other}', expected 'x' or 'y'"
            ))),
        }
    }
}

fn validate_geometry(len: usize, width: usize, height: usize, channels: usize) -> Result<()> {
    let expected = width * height * channels;
    if len != expected {
        return Err(HogError::InvalidArgument(format!(
            "sample count {len} does not match {width}x{height}x{channels} = {expected}"
        )));
    }
    Ok(())
}

/// One row of the x-derivative: `dx[r,c] = I[r,c+1] - I[r,c-1]`, first and
/// last columns zero.
fn derive_row(data: &[f32], row: usize, width: usize, channels: usize) -> Vec<f32> {
    let stride = width * channels;
    let base = row * stride;
    let mut out = vec![0.0f32; stride];
    if width >= 3 {
        for col in 1..width - 1 {
            for ch in 0..channels {
                let offset = col * channels + ch;
                out[offset] = data[base + offset + channels] - data[base + offset - channels];
            }
        }
    }
    out
}

/// One column of the y-derivative: `dy[r,c] = I[r+1,c] - I[r-1,c]`, first
/// and last rows zero. Returned values are ordered by row, channels
/// interleaved.
fn derive_col(data: &[f32], col: usize, width: usize, height: usize, channels: usize) -> Vec<f32> {
    let stride = width * channels;
    let mut out = vec![0.0f32; height * channels];
    if height >= 3 {
        for row in 1..height - 1 {
            for ch in 0..channels {
                let index = row * stride + col * channels + ch;
                out[row * channels + ch] = data[index + stride] - data[index - stride];
            }
        }
    }
    out
}

fn derive_x(data: &[f32], width: usize, height: usize, channels: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(data.len());
    for row in 0..height {
        out.extend_from_slice(&derive_row(data, row, width, channels));
    }
    out
}

fn derive_y(data: &[f32], width: usize, height: usize, channels: usize) -> Vec<f32> {
    let stride = width * channels;
    let mut out = vec![0.0f32; data.len()];
    if height >= 3 {
        for row in 1..height - 1 {
            for offset in 0..stride {
                let index = row * stride + offset;
                out[index] = data[index + stride] - data[index - stride];
            }
        }
    }
    out
}

fn derive_x_parallel(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    workers: usize,
) -> Vec<f32> {
    let mut rows: Vec<Vec<f32>> = vec![Vec::new(); height];
    run_parallel(
        height,
        workers,
        |row| derive_row(data, row, width, channels),
        &mut rows,
    );
    rows.concat()
}

fn derive_y_parallel(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    workers: usize,
) -> Vec<f32> {
    let mut cols: Vec<Vec<f32>> = vec![Vec::new(); width];
    run_parallel(
        width,
        workers,
        |col| derive_col(data, col, width, height, channels),
        &mut cols,
    );

    // Scatter the per-column results back into row-major order.
    let stride = width * channels;
    let mut out = vec![0.0f32; data.len()];
    for (col, values) in cols.iter().enumerate() {
        for row in 0..height {
            let dst = row * stride + col * channels;
            let src = row * channels;
            out[dst..dst + channels].copy_from_slice(&values[src..src + channels]);
        }
    }
    out
}

/// Compute the central-difference derivative of `data` along `axis`.
///
/// `data` holds `width * height * channels` row-major interleaved samples;
/// anything else fails with `InvalidArgument`. Border rows/columns of the
/// derived axis are zero.
pub fn derive(
    data: &[f32],
    axis: Axis,
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<f32>> {
    validate_geometry(data.len(), width, height, channels)?;
    Ok(match axis {
        Axis::X => derive_x(data, width, height, channels),
        Axis::Y => derive_y(data, width, height, channels),
    })
}

/// Like [`derive`], fanning the independent rows (x) or columns (y) out
/// across a worker pool. Produces the same values as the sequential path.
pub fn derive_parallel(
    data: &[f32],
    axis: Axis,
    width: usize,
    height: usize,
    channels: usize,
    workers: usize,
) -> Result<Vec<f32>> {
    validate_geometry(data.len(), width, height, channels)?;
    Ok(match axis {
        Axis::X => derive_x_parallel(data, width, height, channels, workers),
        Axis::Y => derive_y_parallel(data, width, height, channels, workers),
    })
}

/// Per-sample gradient magnitude `sqrt(dx^2 + dy^2)`.
///
/// Fails with `InvalidArgument` when the inputs differ in length.
pub fn magnitude(dx: &[f32], dy: &[f32]) -> Result<Vec<f32>> {
    if dx.len() != dy.len() {
        return Err(HogError::InvalidArgument(format!(
            "derivative arrays differ in length: {} vs {}",
            dx.len(),
            dy.len()
        )));
    }
    Ok(dx
        .iter()
        .zip(dy)
        .map(|(&x, &y)| (x * x + y * y).sqrt())
        .collect())
}

/// Per-sample unsigned gradient orientation in degrees, range [0, 180).
///
/// Fails with `InvalidArgument` when the inputs differ in length.
pub fn orientation(dx: &[f32], dy: &[f32]) -> Result<Vec<f32>> {
    if dx.len() != dy.len() {
        return Err(HogError::InvalidArgument(format!(
            "derivative arrays differ in length: {} vs {}",
            dx.len(),
            dy.len()
        )));
    }
    Ok(dx
        .iter()
        .zip(dy)
        .map(|(&x, &y)| fold_angle(y.atan2(x).to_degrees()))
        .collect())
}

/// Fold a signed angle into the unsigned [0, 180) range. Gradient direction
/// carries no sign for histogram purposes.
fn fold_angle(mut degrees: f32) -> f32 {
    if degrees < 0.0 {
        degrees += 180.0;
    }
    if degrees >= 180.0 {
        degrees -= 180.0;
    }
    degrees
}

/// Derivatives and derived per-sample arrays of one pixel buffer.
///
/// Computed once per buffer (or pyramid level) and immutable afterwards, so
/// any number of window computations can read it concurrently.
#[derive(Debug, Clone)]
pub struct GradientField {
    dx: Vec<f32>,
    dy: Vec<f32>,
    magnitude: Vec<f32>,
    orientation: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl GradientField {
    /// Compute the field sequentially.
    pub fn compute(buffer: &PixelBuffer) -> Self {
        let dx = derive_x(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            buffer.channels(),
        );
        let dy = derive_y(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            buffer.channels(),
        );
        Self::from_validated(dx, dy, buffer.width(), buffer.height(), buffer.channels())
    }

    /// Compute the field with derivative rows/columns fanned out across
    /// `workers` threads. Yields the same values as [`GradientField::compute`].
    pub fn compute_parallel(buffer: &PixelBuffer, workers: usize) -> Self {
        let dx = derive_x_parallel(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            buffer.channels(),
            workers,
        );
        let dy = derive_y_parallel(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            buffer.channels(),
            workers,
        );
        Self::from_validated(dx, dy, buffer.width(), buffer.height(), buffer.channels())
    }

    /// Build a field from externally computed derivatives.
    ///
    /// Fails with `InvalidArgument` when the arrays do not both hold
    /// `width * height * channels` samples.
    pub fn from_derivatives(
        dx: Vec<f32>,
        dy: Vec<f32>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self> {
        validate_geometry(dx.len(), width, height, channels)?;
        validate_geometry(dy.len(), width, height, channels)?;
        Ok(Self::from_validated(dx, dy, width, height, channels))
    }

    fn from_validated(
        dx: Vec<f32>,
        dy: Vec<f32>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Self {
        let magnitude = dx
            .iter()
            .zip(&dy)
            .map(|(&x, &y)| (x * x + y * y).sqrt())
            .collect();
        let orientation = dx
            .iter()
            .zip(&dy)
            .map(|(&x, &y)| fold_angle(y.atan2(x).to_degrees()))
            .collect();
        Self {
            dx,
            dy,
            magnitude,
            orientation,
            width,
            height,
            channels,
        }
    }

    /// Field width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Horizontal derivative per sample.
    pub fn dx(&self) -> &[f32] {
        &self.dx
    }

    /// Vertical derivative per sample.
    pub fn dy(&self) -> &[f32] {
        &self.dy
    }

    /// Gradient magnitude per sample.
    pub fn magnitude(&self) -> &[f32] {
        &self.magnitude
    }

    /// Unsigned gradient orientation per sample, degrees in [0, 180).
    pub fn orientation(&self) -> &[f32] {
        &self.orientation
    }
}
