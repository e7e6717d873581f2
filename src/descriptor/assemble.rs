//! Final descriptor assembly: concatenate blocks, normalize, clip,
//! renormalize.

use crate::models::params::{BLOCK_LEN, CLIP_THRESHOLD, NORM_EPSILON};

fn l2_norm(values: &[f32]) -> f32 {
    (values.iter().map(|v| v * v).sum::<f32>() + NORM_EPSILON).sqrt()
}

/// Concatenate the window's block vectors and apply the two-stage
/// normalization: global L2 divide, clip every component at
/// [`CLIP_THRESHOLD`], L2 divide again.
///
/// Block values are never negative, so the clip is a plain ceiling. The
/// second pass restores a final norm of roughly 1 while the clip caps the
/// influence of local illumination and contrast outliers.
pub fn assemble(blocks: &[[f32; BLOCK_LEN]]) -> Vec<f32> {
    let mut descriptor = Vec::with_capacity(blocks.len() * BLOCK_LEN);
    for block in blocks {
        descriptor.extend_from_slice(block);
    }

    let norm = l2_norm(&descriptor);
    for value in &mut descriptor {
        *value /= norm;
    }

    for value in &mut descriptor {
        *value = value.min(CLIP_THRESHOLD);
    }

    let norm = l2_norm(&descriptor);
    for value in &mut descriptor {
        *value /= norm;
    }

    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::params::BLOCK_COUNT;

    fn sample_blocks() -> Vec<[f32; BLOCK_LEN]> {
        (0..BLOCK_COUNT)
            .map(|b| {
                let mut block = [0.0f32; BLOCK_LEN];
                for (i, value) in block.iter_mut().enumerate() {
                    *value = ((b * 31 + i * 7) % 23) as f32 / 22.0;
                }
                block
            })
            .collect()
    }

    #[test]
    fn test_clip_caps_dominant_components() {
        // Both spikes exceed the ceiling after the first normalization, so
        // the clip flattens them to the same value before the second pass.
        let mut blocks = vec![[0.0f32; BLOCK_LEN]; BLOCK_COUNT];
        blocks[0][0] = 100.0;
        blocks[1][1] = 30.0;
        let descriptor = assemble(&blocks);
        let large = descriptor[0];
        let small = descriptor[BLOCK_LEN + 1];
        assert!(large > 0.0 && small > 0.0);
        assert!(
            (large - small).abs() < 1e-4,
            "clipped components should be equal: {large} vs {small}"
        );
    }

    #[test]
    fn test_dense_components_stay_below_ceiling() {
        let descriptor = assemble(&sample_blocks());
        for &value in &descriptor {
            assert!(value <= CLIP_THRESHOLD + 1e-6, "component {value} above clip");
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn test_final_norm_is_unit() {
        let descriptor = assemble(&sample_blocks());
        let norm: f32 = descriptor.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-3, "final norm {norm}");
    }

    #[test]
    fn test_all_zero_input_stays_finite() {
        let blocks = vec![[0.0f32; BLOCK_LEN]; BLOCK_COUNT];
        let descriptor = assemble(&blocks);
        assert_eq!(descriptor.len(), BLOCK_COUNT * BLOCK_LEN);
        assert!(descriptor.iter().all(|v| v.is_finite()));
        assert!(descriptor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_descriptor_length() {
        let descriptor = assemble(&sample_blocks());
        assert_eq!(descriptor.len(), BLOCK_COUNT * BLOCK_LEN);
    }
}
