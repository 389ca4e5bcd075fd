mod common;

use bluemark_detect::{
    blueness, CentroidEstimator, ClusterPartitioner, MarkerDetector, PixelBuffer, PixelScanner,
    Point,
};
use proptest::prelude::*;

/// Small random RGBA frame
fn frame_strategy() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
        (Just(w), Just(h), proptest::collection::vec(any::<u8>(), w * h * 4))
    })
}

fn points_strategy() -> impl Strategy<Value = Vec<Point>> {
    proptest::collection::vec(
        (0usize..64, 0usize..64, -255i16..=255).prop_map(|(x, y, blueness)| Point { x, y, blueness }),
        0..80,
    )
}

proptest! {
    #[test]
    fn blueness_matches_formula(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let expected = b as i32 - r.max(g) as i32;
        prop_assert_eq!(blueness(r, g, b) as i32, expected);
    }

    #[test]
    fn scan_keeps_exactly_pixels_above_threshold((w, h, data) in frame_strategy(), threshold in any::<u8>()) {
        let buf = PixelBuffer::new(w, h, &data).unwrap();
        let points = PixelScanner::scan(&buf, threshold);

        let expected = data
            .chunks_exact(4)
            .filter(|px| blueness(px[0], px[1], px[2]) > threshold as i16)
            .count();
        prop_assert_eq!(points.len(), expected);

        for p in &points {
            prop_assert!(p.x < w && p.y < h);
            prop_assert!(p.blueness > threshold as i16);
        }
        for pair in points.windows(2) {
            prop_assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
        }
    }

    #[test]
    fn raising_threshold_never_adds_points((w, h, data) in frame_strategy(), lo in any::<u8>(), hi in any::<u8>()) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let buf = PixelBuffer::new(w, h, &data).unwrap();
        prop_assert!(PixelScanner::scan(&buf, hi).len() <= PixelScanner::scan(&buf, lo).len());
    }

    #[test]
    fn parallel_scan_matches_sequential((w, h, data) in frame_strategy(), threshold in any::<u8>()) {
        let buf = PixelBuffer::new(w, h, &data).unwrap();
        prop_assert_eq!(PixelScanner::scan(&buf, threshold), PixelScanner::scan_parallel(&buf, threshold));
    }

    #[test]
    fn partition_assigns_each_point_at_most_once(points in points_strategy()) {
        let partitioner = ClusterPartitioner::default();
        match partitioner.partition(&points) {
            Err(_) => prop_assert!(points.len() < 2),
            Ok((a, b)) => {
                let seed_a = points[0];
                let seed_b = points[points.len() - 1];
                for p in &a {
                    prop_assert!(p.distance_sq(&seed_a) < p.distance_sq(&seed_b));
                }
                for p in &b {
                    prop_assert!(p.distance_sq(&seed_a) > p.distance_sq(&seed_b));
                }
                let tied = points
                    .iter()
                    .filter(|p| p.distance_sq(&seed_a) == p.distance_sq(&seed_b))
                    .count();
                prop_assert_eq!(a.len() + b.len() + tied, points.len());
            }
        }
    }

    #[test]
    fn centroid_inside_bounding_box(points in points_strategy()) {
        match CentroidEstimator::estimate(&points) {
            Err(_) => prop_assert!(points.is_empty()),
            Ok(m) => {
                let min_x = points.iter().map(|p| p.x).min().unwrap() as f32;
                let max_x = points.iter().map(|p| p.x).max().unwrap() as f32;
                let min_y = points.iter().map(|p| p.y).min().unwrap() as f32;
                let max_y = points.iter().map(|p| p.y).max().unwrap() as f32;
                prop_assert!(m.centroid.x >= min_x && m.centroid.x <= max_x);
                prop_assert!(m.centroid.y >= min_y && m.centroid.y <= max_y);
                prop_assert_eq!(m.point_count, points.len());
                prop_assert!((m.radius - (points.len() as f32).sqrt() / 2.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn radius_non_decreasing(n in 0usize..100_000) {
        prop_assert!(CentroidEstimator::radius(n + 1) >= CentroidEstimator::radius(n));
    }

    #[test]
    fn detect_is_idempotent_and_bounded((w, h, data) in frame_strategy(), threshold in any::<u8>()) {
        let detector = MarkerDetector::default();
        let first = detector.detect(w, h, &data, threshold).unwrap();
        let second = detector.detect(w, h, &data, threshold).unwrap();
        prop_assert!(first.len() <= 2);
        prop_assert_eq!(first, second);
    }
}
