use bluemark_core::{Point, SeedStrategy};
use std::cmp::Ordering;

use crate::error::{DetectError, DetectResult};
use crate::types::PointGroup;

/// Picks the two anchor points the partition splits around.
///
/// Returns `None` when fewer than two points are available.
pub trait SeedSelector: Send + Sync {
    fn select(&self, points: &[Point]) -> Option<(Point, Point)>;
}

/// First and last point in scan order.
///
/// Assumes the two markers are separated along the scan; a single marker
/// spanning the scan range gets split in two.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOrderSeeds;

impl SeedSelector for ScanOrderSeeds {
    fn select(&self, points: &[Point]) -> Option<(Point, Point)> {
        if points.len() < 2 {
            return None;
        }
        Some((points[0], points[points.len() - 1]))
    }
}

/// Bluest point (first in scan order) against the least blue (last in scan order)
#[derive(Debug, Clone, Copy, Default)]
pub struct BluenessExtremeSeeds;

impl SeedSelector for BluenessExtremeSeeds {
    fn select(&self, points: &[Point]) -> Option<(Point, Point)> {
        if points.len() < 2 {
            return None;
        }
        let mut strongest = points[0];
        let mut weakest = points[0];
        for p in &points[1..] {
            if p.blueness > strongest.blueness {
                strongest = *p;
            }
            if p.blueness <= weakest.blueness {
                weakest = *p;
            }
        }
        Some((strongest, weakest))
    }
}

/// Point nearest the top-left against the point nearest the bottom-right (by `x + y`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialExtremeSeeds;

impl SeedSelector for SpatialExtremeSeeds {
    fn select(&self, points: &[Point]) -> Option<(Point, Point)> {
        if points.len() < 2 {
            return None;
        }
        let mut low = points[0];
        let mut high = points[0];
        for p in &points[1..] {
            if p.x + p.y < low.x + low.y {
                low = *p;
            }
            if p.x + p.y >= high.x + high.y {
                high = *p;
            }
        }
        Some((low, high))
    }
}

/// Two-seed nearest-neighbour split of the candidate points
pub struct ClusterPartitioner {
    selector: Box<dyn SeedSelector>,
}

impl ClusterPartitioner {
    pub fn new(strategy: SeedStrategy) -> Self {
        let selector: Box<dyn SeedSelector> = match strategy {
            SeedStrategy::ScanOrder => Box::new(ScanOrderSeeds),
            SeedStrategy::BluenessExtremes => Box::new(BluenessExtremeSeeds),
            SeedStrategy::SpatialExtremes => Box::new(SpatialExtremeSeeds),
        };
        Self { selector }
    }

    /// Use a custom seed selector
    pub fn with_selector<S: SeedSelector + 'static>(selector: S) -> Self {
        Self {
            selector: Box::new(selector),
        }
    }

    pub fn from_boxed(selector: Box<dyn SeedSelector>) -> Self {
        Self { selector }
    }

    /// Seeds the partition would use for `points`
    pub fn seeds(&self, points: &[Point]) -> DetectResult<(Point, Point)> {
        self.selector
            .select(points)
            .ok_or(DetectError::InsufficientPoints { count: points.len() })
    }

    /// Split `points` into the groups nearer seed A and nearer seed B.
    ///
    /// Seeds are members of `points` and are assigned like any other point.
    /// A point equidistant from both seeds joins neither group.
    pub fn partition(&self, points: &[Point]) -> DetectResult<(PointGroup, PointGroup)> {
        let (seed_a, seed_b) = self.seeds(points)?;
        tracing::trace!(?seed_a, ?seed_b, "partition seeds");
        Ok(Self::split(points, &seed_a, &seed_b))
    }

    /// Nearest-seed assignment; ties are dropped
    pub fn split(points: &[Point], seed_a: &Point, seed_b: &Point) -> (PointGroup, PointGroup) {
        let mut group_a = Vec::new();
        let mut group_b = Vec::new();

        for p in points {
            // Squared distances order exactly like euclidean ones
            match p.distance_sq(seed_a).cmp(&p.distance_sq(seed_b)) {
                Ordering::Less => group_a.push(*p),
                Ordering::Greater => group_b.push(*p),
                Ordering::Equal => {}
            }
        }

        (group_a, group_b)
    }
}

impl Default for ClusterPartitioner {
    fn default() -> Self {
        Self::new(SeedStrategy::ScanOrder)
    }
}

impl std::fmt::Debug for ClusterPartitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterPartitioner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: usize, y: usize) -> Point {
        Point { x, y, blueness: 100 }
    }

    #[test]
    fn test_insufficient_points() {
        let partitioner = ClusterPartitioner::default();
        assert_eq!(
            partitioner.partition(&[]),
            Err(DetectError::InsufficientPoints { count: 0 })
        );
        assert_eq!(
            partitioner.partition(&[pt(1, 1)]),
            Err(DetectError::InsufficientPoints { count: 1 })
        );
    }

    #[test]
    fn test_two_clusters() {
        let points = vec![pt(0, 0), pt(1, 0), pt(0, 1), pt(9, 9), pt(10, 9), pt(10, 10)];
        let (a, b) = ClusterPartitioner::default().partition(&points).unwrap();
        assert_eq!(a, vec![pt(0, 0), pt(1, 0), pt(0, 1)]);
        assert_eq!(b, vec![pt(9, 9), pt(10, 9), pt(10, 10)]);
    }

    #[test]
    fn test_seeds_are_assigned_to_own_group() {
        let points = vec![pt(2, 0), pt(8, 0)];
        let (a, b) = ClusterPartitioner::default().partition(&points).unwrap();
        assert_eq!(a, vec![pt(2, 0)]);
        assert_eq!(b, vec![pt(8, 0)]);
    }

    #[test]
    fn test_equidistant_points_dropped() {
        // (5, 0) and (5, 3) are equidistant from (0, 0) and (10, 0)
        let points = vec![pt(0, 0), pt(5, 0), pt(5, 3), pt(10, 0)];
        let (a, b) = ClusterPartitioner::default().partition(&points).unwrap();
        assert_eq!(a, vec![pt(0, 0)]);
        assert_eq!(b, vec![pt(10, 0)]);
    }

    #[test]
    fn test_identical_seeds_yield_empty_groups() {
        let points = vec![pt(3, 3), pt(4, 4), pt(3, 3)];
        let (a, b) = ClusterPartitioner::default().partition(&points).unwrap();
        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_groups_are_disjoint() {
        let points: Vec<Point> = (0..20).map(|i| pt(i % 7, i / 7)).collect();
        let (a, b) = ClusterPartitioner::default().partition(&points).unwrap();
        assert!(a.len() + b.len() <= points.len());
        for p in &a {
            assert!(!b.contains(p));
        }
    }

    #[test]
    fn test_blueness_extreme_seeds() {
        let points = vec![
            Point { x: 0, y: 0, blueness: 50 },
            Point { x: 1, y: 0, blueness: 200 },
            Point { x: 2, y: 0, blueness: 40 },
            Point { x: 3, y: 0, blueness: 200 },
        ];
        let (a, b) = BluenessExtremeSeeds.select(&points).unwrap();
        assert_eq!((a.x, b.x), (1, 2));
    }

    #[test]
    fn test_blueness_extreme_seeds_uniform_falls_back_to_scan_order() {
        let points = vec![pt(0, 0), pt(5, 5), pt(9, 9)];
        assert_eq!(
            BluenessExtremeSeeds.select(&points),
            ScanOrderSeeds.select(&points)
        );
    }

    #[test]
    fn test_spatial_extreme_seeds() {
        // Scan order would seed (8, 0) against (0, 9)
        let points = vec![pt(8, 0), pt(1, 1), pt(9, 8), pt(0, 9)];
        let (a, b) = SpatialExtremeSeeds.select(&points).unwrap();
        assert_eq!((a.x, a.y), (1, 1));
        assert_eq!((b.x, b.y), (9, 8));
    }

    #[test]
    fn test_custom_selector() {
        struct Fixed;
        impl SeedSelector for Fixed {
            fn select(&self, points: &[Point]) -> Option<(Point, Point)> {
                (points.len() >= 2).then(|| (points[1], points[0]))
            }
        }

        let points = vec![pt(0, 0), pt(10, 0)];
        let (a, b) = ClusterPartitioner::with_selector(Fixed).partition(&points).unwrap();
        assert_eq!(a, vec![pt(10, 0)]);
        assert_eq!(b, vec![pt(0, 0)]);
    }
}
