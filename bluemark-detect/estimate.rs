use bluemark_core::{Centroid, MarkerCandidate, Point};

use crate::error::{DetectError, DetectResult};

/// Reduces a point group to centroid + size
pub struct CentroidEstimator;

impl CentroidEstimator {
    /// Mean position of the group and a `sqrt(n) / 2` radius.
    ///
    /// Fails with [`DetectError::MarkerNotFound`] on an empty group, before
    /// any division happens.
    pub fn estimate(group: &[Point]) -> DetectResult<MarkerCandidate> {
        if group.is_empty() {
            return Err(DetectError::MarkerNotFound);
        }

        let mut sum_x = 0u64;
        let mut sum_y = 0u64;
        let mut sum_blueness = 0i64;
        for p in group {
            sum_x += p.x as u64;
            sum_y += p.y as u64;
            sum_blueness += p.blueness as i64;
        }

        let n = group.len();
        let count = n as f64;

        Ok(MarkerCandidate {
            centroid: Centroid {
                x: (sum_x as f64 / count) as f32,
                y: (sum_y as f64 / count) as f32,
            },
            radius: Self::radius(n),
            point_count: n,
            mean_blueness: (sum_blueness as f64 / count) as f32,
        })
    }

    /// Area-based size proxy, not a fitted radius
    #[inline]
    pub fn radius(point_count: usize) -> f32 {
        (point_count as f32).sqrt() / 2.0
    }
}
