//! Blue marker detection.
//!
//! A frame is scanned for pixels whose blueness (`blue - max(red, green)`)
//! exceeds a threshold; the resulting points are split around two seeds and
//! each half is reduced to a centroid and a rough radius.

pub mod builder;
pub mod config;
pub mod detector;
pub mod error;
pub mod estimate;
pub mod observer;
pub mod partition;
pub mod scanner;
pub mod types;
pub mod utils;

pub use builder::DetectorBuilder;
pub use config::DetectorConfig;
pub use detector::MarkerDetector;
pub use error::{ConfigError, ConfigResult, DetectError, DetectResult};
pub use estimate::CentroidEstimator;
pub use observer::{DetectionObserver, FnObserver, TraceRecorder};
pub use partition::{
    BluenessExtremeSeeds, ClusterPartitioner, ScanOrderSeeds, SeedSelector, SpatialExtremeSeeds,
};
pub use scanner::{blueness, PixelScanner};
pub use types::{DetectionTrace, PointGroup};
pub use utils::{blueness_chart, blueness_profile};

pub use bluemark_core::{
    BufferError, Centroid, MarkerCandidate, MarkerConfig, PixelBuffer, Point, SeedStrategy,
    SharedThreshold, Threshold, DEFAULT_THRESHOLD,
};
