//! Hooks for debug visualizers and loggers.
//!
//! The detector calls every attached observer once per stage of each pass.
//! Observers never influence the result.

use bluemark_core::{MarkerCandidate, Point, Threshold};
use std::sync::Mutex;

use crate::types::DetectionTrace;

pub trait DetectionObserver: Send + Sync {
    /// Candidate points after thresholding, in scan order
    fn on_points(&self, _threshold: Threshold, _points: &[Point]) {}

    /// Seed pair and the two partition groups (skipped when fewer than two
    /// points were found)
    fn on_groups(&self, _seeds: (Point, Point), _group_a: &[Point], _group_b: &[Point]) {}

    /// Final 0-2 candidates
    fn on_candidates(&self, _candidates: &[MarkerCandidate]) {}
}

/// Adapts a closure over the final candidates
pub struct FnObserver<F>(pub F);

impl<F> DetectionObserver for FnObserver<F>
where
    F: Fn(&[MarkerCandidate]) + Send + Sync,
{
    fn on_candidates(&self, candidates: &[MarkerCandidate]) {
        (self.0)(candidates)
    }
}

/// Keeps the artifacts of the most recent pass
#[derive(Debug, Default)]
pub struct TraceRecorder {
    last: Mutex<DetectionTrace>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the last recorded pass
    pub fn last(&self) -> DetectionTrace {
        self.last.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl DetectionObserver for TraceRecorder {
    fn on_points(&self, threshold: Threshold, points: &[Point]) {
        if let Ok(mut t) = self.last.lock() {
            *t = DetectionTrace {
                threshold,
                points: points.to_vec(),
                ..DetectionTrace::default()
            };
        }
    }

    fn on_groups(&self, seeds: (Point, Point), group_a: &[Point], group_b: &[Point]) {
        if let Ok(mut t) = self.last.lock() {
            t.seeds = Some(seeds);
            t.group_a = group_a.to_vec();
            t.group_b = group_b.to_vec();
        }
    }

    fn on_candidates(&self, candidates: &[MarkerCandidate]) {
        if let Ok(mut t) = self.last.lock() {
            t.candidates = candidates.to_vec();
        }
    }
}
