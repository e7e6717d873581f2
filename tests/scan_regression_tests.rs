//! End-to-end regression tests for the descriptor and scanning pipelines.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rust_hog::models::params::{
    DEFAULT_NEGATIVE_SAMPLES, DESCRIPTOR_LEN, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use rust_hog::training::{negative_vectors, positive_vector};
use rust_hog::{GradientField, PixelBuffer, ScanParams, scan, slide_window};

fn textured_buffer(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let data: Vec<f32> = (0..width * height * channels)
        .map(|i| {
            let x = (i % 251) as f32 / 250.0;
            let y = ((i / 251) % 89) as f32 / 88.0;
            (x + y) / 2.0
        })
        .collect();
    PixelBuffer::new(data, width, height, channels).unwrap()
}

#[test]
fn level_scan_matches_hand_counted_scenario() {
    // 100x200 image, 64x128 window, step 5:
    // rows = (200 - 128) / 5 + 1 = 15, cols = (100 - 64) / 5 + 1 = 8.
    let level = textured_buffer(100, 200, 3);
    let params = ScanParams {
        step: 5,
        parallel: false,
        parallel_children: false,
        workers: 1,
        ..ScanParams::default()
    };
    let descriptors = slide_window(&level, &params).unwrap();
    assert_eq!(descriptors.len(), 120);
    for descriptor in &descriptors {
        assert_eq!(descriptor.len(), DESCRIPTOR_LEN);
    }
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let base = textured_buffer(140, 260, 3);
    let sequential = ScanParams {
        parallel: false,
        parallel_children: false,
        workers: 1,
        ..ScanParams::default()
    };
    let parallel = ScanParams {
        parallel: true,
        parallel_children: true,
        workers: 4,
        ..ScanParams::default()
    };

    let expected = scan(&base, &sequential).unwrap();
    let actual = scan(&base, &parallel).unwrap();

    assert_eq!(expected.len(), actual.len());
    for (a, b) in expected.iter().zip(&actual) {
        assert_eq!(a.level, b.level);
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.cols, b.cols);
        assert_eq!(a.descriptors, b.descriptors);
    }
}

#[test]
fn regenerated_pyramid_reproduces_descriptors() {
    let base = textured_buffer(120, 240, 3);
    let params = ScanParams {
        workers: 4,
        ..ScanParams::default()
    };
    let first = scan(&base, &params).unwrap();
    let second = scan(&base, &params).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.descriptors, b.descriptors);
    }
}

#[test]
fn pyramid_levels_shrink_and_stay_scannable() {
    let base = textured_buffer(200, 400, 3);
    let scans = scan(&base, &ScanParams::default()).unwrap();
    assert!(scans.len() > 1);
    let mut previous = usize::MAX;
    for level_scan in &scans {
        assert!(level_scan.rows >= 1);
        assert!(level_scan.cols >= 1);
        let windows = level_scan.descriptors.len();
        assert!(windows <= previous);
        previous = windows;
    }
}

#[test]
fn four_channel_images_scan_like_three_channel() {
    let base = textured_buffer(100, 200, 4);
    let params = ScanParams {
        parallel: false,
        workers: 1,
        ..ScanParams::default()
    };
    let descriptors = slide_window(&base, &params).unwrap();
    assert_eq!(descriptors.len(), 120);
    assert_eq!(descriptors[0].len(), DESCRIPTOR_LEN);
}

#[test]
fn training_vectors_come_from_the_same_pipeline() {
    let window = textured_buffer(WINDOW_WIDTH, WINDOW_HEIGHT, 3);
    let vector = positive_vector(&window).unwrap();

    let field = GradientField::compute(&window);
    let direct = rust_hog::full_window_descriptor(&field).unwrap();
    assert_eq!(vector, direct);

    let negative_image = textured_buffer(150, 250, 3);
    let mut rng = StdRng::seed_from_u64(1234);
    let negatives = negative_vectors(&negative_image, DEFAULT_NEGATIVE_SAMPLES, &mut rng).unwrap();
    assert_eq!(negatives.len(), DEFAULT_NEGATIVE_SAMPLES);
    for vector in &negatives {
        assert_eq!(vector.len(), DESCRIPTOR_LEN);
    }
}
