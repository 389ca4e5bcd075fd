use bluemark_detect::{
    DetectionObserver, DetectorBuilder, MarkerCandidate, Point, SharedThreshold, Threshold,
};
use std::sync::Arc;

/// Prints what a debug view would draw for each frame
struct ConsoleObserver;

impl DetectionObserver for ConsoleObserver {
    fn on_points(&self, threshold: Threshold, points: &[Point]) {
        println!("   threshold {:>3}: {} candidate points", threshold, points.len());
    }

    fn on_groups(&self, seeds: (Point, Point), group_a: &[Point], group_b: &[Point]) {
        println!(
            "   seeds ({}, {}) / ({}, {}): groups {} / {}",
            seeds.0.x,
            seeds.0.y,
            seeds.1.x,
            seeds.1.y,
            group_a.len(),
            group_b.len()
        );
    }

    fn on_candidates(&self, candidates: &[MarkerCandidate]) {
        for m in candidates {
            println!(
                "   marker at ({:.1}, {:.1}) r~{:.1}",
                m.centroid.x, m.centroid.y, m.radius
            );
        }
    }
}

/// Synthetic 160x120 frame: a saturated disc and a pale one over gray
fn synthetic_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let d1 = (x as i64 - 40).pow(2) + (y as i64 - 40).pow(2);
            let d2 = (x as i64 - 120).pow(2) + (y as i64 - 80).pow(2);
            let px = if d1 <= 100 {
                [10, 30, 240, 255]
            } else if d2 <= 144 {
                [90, 110, 170, 255]
            } else {
                [120, 120, 125, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    data
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Threshold sweep over a synthetic frame");

    let (width, height) = (160, 120);
    let frame = synthetic_frame(width, height);

    let control = SharedThreshold::default();
    let detector = DetectorBuilder::new()
        .observer(Arc::new(ConsoleObserver))
        .build()?;

    // Stand-in for a slider moved between frames
    for threshold in [5, 35, 70, 150, 220] {
        control.set(threshold);
        println!("\nFrame with threshold {}", threshold);
        let markers = detector.detect_with_threshold(width, height, &frame, &control)?;
        println!("   => {} marker(s)", markers.len());
    }

    Ok(())
}
