use bluemark_core::{MarkerCandidate, MarkerConfig, PixelBuffer, SharedThreshold, Threshold};
use std::sync::Arc;

use crate::error::DetectResult;
use crate::estimate::CentroidEstimator;
use crate::observer::DetectionObserver;
use crate::partition::ClusterPartitioner;
use crate::scanner::PixelScanner;
use crate::types::DetectionTrace;

/// Per-frame pipeline: scan → partition → estimate.
///
/// Holds no per-frame state; the threshold is passed in (or snapshotted from a
/// [`SharedThreshold`]) on every call, so one detector can serve concurrent
/// frames.
pub struct MarkerDetector {
    partitioner: ClusterPartitioner,
    parallel_scan: bool,
    observers: Vec<Arc<dyn DetectionObserver>>,
}

impl MarkerDetector {
    pub fn new(cfg: &MarkerConfig) -> Self {
        Self {
            partitioner: ClusterPartitioner::new(cfg.seed_strategy),
            parallel_scan: cfg.parallel_scan,
            observers: Vec::new(),
        }
    }

    /// Replace the partitioner, e.g. one with a custom seed selector
    pub fn with_partitioner(mut self, partitioner: ClusterPartitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Attach an observer that sees every intermediate artifact
    pub fn add_observer(&mut self, observer: Arc<dyn DetectionObserver>) {
        self.observers.push(observer);
    }

    /// Detect up to two markers in a raw RGBA frame.
    ///
    /// Only a malformed frame is an error; finding zero or one marker is a
    /// normal, short result.
    pub fn detect(
        &self,
        width: usize,
        height: usize,
        data: &[u8],
        threshold: Threshold,
    ) -> DetectResult<Vec<MarkerCandidate>> {
        let buffer = Self::validate(width, height, data)?;
        Ok(self.detect_buffer(&buffer, threshold))
    }

    /// Like [`MarkerDetector::detect`], reading the threshold once up front
    pub fn detect_with_threshold(
        &self,
        width: usize,
        height: usize,
        data: &[u8],
        threshold: &SharedThreshold,
    ) -> DetectResult<Vec<MarkerCandidate>> {
        let snapshot = threshold.get();
        self.detect(width, height, data, snapshot)
    }

    /// Detection on an already validated buffer
    pub fn detect_buffer(&self, buffer: &PixelBuffer<'_>, threshold: Threshold) -> Vec<MarkerCandidate> {
        self.trace_buffer(buffer, threshold).candidates
    }

    /// Detection returning every intermediate artifact
    pub fn detect_traced(
        &self,
        width: usize,
        height: usize,
        data: &[u8],
        threshold: Threshold,
    ) -> DetectResult<DetectionTrace> {
        let buffer = Self::validate(width, height, data)?;
        Ok(self.trace_buffer(&buffer, threshold))
    }

    pub fn trace_buffer(&self, buffer: &PixelBuffer<'_>, threshold: Threshold) -> DetectionTrace {
        let points = if self.parallel_scan {
            PixelScanner::scan_parallel(buffer, threshold)
        } else {
            PixelScanner::scan(buffer, threshold)
        };
        self.notify(|o| o.on_points(threshold, &points));

        let mut trace = DetectionTrace {
            threshold,
            ..DetectionTrace::default()
        };

        // Fewer than two points: no seeds, zero markers
        let seeds = match self.partitioner.seeds(&points) {
            Ok(seeds) => seeds,
            Err(e) => {
                tracing::debug!(threshold, "no markers: {}", e);
                self.notify(|o| o.on_candidates(&[]));
                trace.points = points;
                return trace;
            }
        };

        let (group_a, group_b) = ClusterPartitioner::split(&points, &seeds.0, &seeds.1);
        self.notify(|o| o.on_groups(seeds, &group_a, &group_b));

        // Empty groups contribute nothing
        let candidates: Vec<MarkerCandidate> = [&group_a, &group_b]
            .into_iter()
            .filter_map(|group| CentroidEstimator::estimate(group).ok())
            .collect();
        self.notify(|o| o.on_candidates(&candidates));

        tracing::debug!(
            threshold,
            points = points.len(),
            group_a = group_a.len(),
            group_b = group_b.len(),
            markers = candidates.len(),
            "detection pass"
        );

        trace.points = points;
        trace.seeds = Some(seeds);
        trace.group_a = group_a;
        trace.group_b = group_b;
        trace.candidates = candidates;
        trace
    }

    fn validate<'a>(width: usize, height: usize, data: &'a [u8]) -> DetectResult<PixelBuffer<'a>> {
        PixelBuffer::new(width, height, data).map_err(|e| {
            tracing::warn!("rejected frame: {}", e);
            e.into()
        })
    }

    fn notify<F: Fn(&dyn DetectionObserver)>(&self, f: F) {
        for observer in &self.observers {
            f(observer.as_ref());
        }
    }

    /// Whether the row-parallel scan is used
    pub fn parallel_scan(&self) -> bool {
        self.parallel_scan
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new(&MarkerConfig::default())
    }
}
