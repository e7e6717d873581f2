//! Scan an image with default parameters and print what the scanner sees.
//!
//! Usage: hogscan <image> [step]

use std::env;
use std::process;
use std::time::Instant;

use rust_hog::tools::load_pixel_buffer;
use rust_hog::{ScanParams, scan};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: hogscan <image> [step]");
        process::exit(2);
    }

    let buffer = match load_pixel_buffer(&args[1]) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("failed to load {}: {err}", args[1]);
            process::exit(1);
        }
    };
    println!(
        "Loaded {}: {}x{} ({} channels)",
        args[1],
        buffer.width(),
        buffer.height(),
        buffer.channels()
    );

    let mut params = ScanParams::default();
    if let Some(step) = args.get(2).and_then(|s| s.parse().ok()) {
        params.step = step;
    }

    let start = Instant::now();
    let scans = match scan(&buffer, &params) {
        Ok(scans) => scans,
        Err(err) => {
            eprintln!("scan failed: {err}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    let mut total = 0usize;
    for level in &scans {
        println!(
            "level {}: scale {:.3}, {}x{} windows",
            level.level, level.scale, level.rows, level.cols
        );
        total += level.descriptors.len();
    }
    println!(
        "{total} descriptors across {} levels in {:.1?} (step {}, {} workers)",
        scans.len(),
        elapsed,
        params.step,
        params.workers
    );
}
