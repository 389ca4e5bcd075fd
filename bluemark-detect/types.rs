use bluemark_core::{MarkerCandidate, Point, Threshold};

/// Points assigned to one seed; disjoint from its sibling group
pub type PointGroup = Vec<Point>;

/// Every intermediate artifact of one detection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionTrace {
    /// Threshold snapshot the pass ran with
    pub threshold: Threshold,
    /// Candidate points in scan order
    pub points: Vec<Point>,
    /// Seed pair, when at least two points were found
    pub seeds: Option<(Point, Point)>,
    pub group_a: PointGroup,
    pub group_b: PointGroup,
    pub candidates: Vec<MarkerCandidate>,
}

impl DetectionTrace {
    /// Points that sat exactly between the seeds and joined neither group
    pub fn dropped_count(&self) -> usize {
        if self.seeds.is_none() {
            return 0;
        }
        self.points
            .len()
            .saturating_sub(self.group_a.len())
            .saturating_sub(self.group_b.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: usize, y: usize) -> Point {
        Point { x, y, blueness: 100 }
    }

    #[test]
    fn test_dropped_count_without_seeds() {
        let trace = DetectionTrace {
            points: vec![pt(0, 0)],
            ..DetectionTrace::default()
        };
        assert_eq!(trace.dropped_count(), 0);
    }

    #[test]
    fn test_dropped_count_counts_ties() {
        let trace = DetectionTrace {
            points: vec![pt(0, 0), pt(2, 0), pt(4, 0)],
            seeds: Some((pt(0, 0), pt(4, 0))),
            group_a: vec![pt(0, 0)],
            group_b: vec![pt(4, 0)],
            ..DetectionTrace::default()
        };
        assert_eq!(trace.dropped_count(), 1);
    }

    #[test]
    fn test_dropped_count_inconsistent_trace() {
        // Hand-built trace whose groups hold more than its points
        let trace = DetectionTrace {
            points: vec![pt(0, 0)],
            seeds: Some((pt(0, 0), pt(1, 0))),
            group_a: vec![pt(0, 0)],
            group_b: vec![pt(1, 0), pt(2, 0)],
            ..DetectionTrace::default()
        };
        assert_eq!(trace.dropped_count(), 0);
    }
}
