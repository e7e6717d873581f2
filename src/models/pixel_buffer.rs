use crate::{HogError, Result};

/// Immutable buffer of decoded pixel samples.
///
/// Samples are stored row-major and channel-interleaved, normalized to
/// [0, 1]. Three channels for opaque images, four when an alpha channel is
/// present. Once constructed the buffer is never mutated; the whole
/// descriptor pipeline reads from it.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl PixelBuffer {
    /// Create a buffer from already-normalized samples.
    ///
    /// Fails if `channels` is not 3 or 4, or if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn new(data: Vec<f32>, width: usize, height: usize, channels: usize) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(HogError::InvalidArgument(format!(
                "unsupported channel count {channels}, expected 3 or 4"
            )));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(HogError::InvalidArgument(format!(
                "sample count {} does not match {width}x{height}x{channels} = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Create a buffer from interleaved 8-bit samples, normalizing to [0, 1].
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize, channels: usize) -> Result<Self> {
        let data = bytes.iter().map(|&b| f32::from(b) / 255.0).collect();
        Self::new(data, width, height, channels)
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved channels per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// All samples, row-major and channel-interleaved.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Total number of samples (`width * height * channels`).
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// One sample by pixel row, pixel column and channel.
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> f32 {
        self.data[(row * self.width + col) * self.channels + channel]
    }
}
