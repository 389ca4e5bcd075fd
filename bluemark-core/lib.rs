use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum blueness (exclusive) a pixel needs to count as a marker pixel
pub type Threshold = u8;

pub const DEFAULT_THRESHOLD: Threshold = 35;

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid buffer dimensions: {width}x{height} (must be > 0)")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Buffer length mismatch: expected {expected_len}, got {actual_len}")]
    InvalidLength { expected_len: usize, actual_len: usize },
}

/// Borrowed row-major RGBA frame.
///
/// Only constructible through [`PixelBuffer::new`], so every instance
/// satisfies `data.len() == width * height * 4`.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }

        let expected_len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(BufferError::InvalidDimensions { width, height })?;
        if data.len() != expected_len {
            return Err(BufferError::InvalidLength {
                expected_len,
                actual_len: data.len(),
            });
        }

        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved RGBA bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// One row of RGBA bytes (`width * 4` long)
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Candidate pixel ≙ position + blueness score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: usize,
    pub y: usize,
    /// `blue - max(red, green)`, always in [-255, 255]
    pub blueness: i16,
}

impl Point {
    /// Squared euclidean distance, exact in integer arithmetic
    pub fn distance_sq(&self, other: &Point) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Centroid {
    pub x: f32,
    pub y: f32,
}

/// Summary of one detected cluster of blue pixels.
///
/// `radius` is `sqrt(point_count) / 2`: a size proxy for drawing and rough
/// comparison, not a fitted circle radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkerCandidate {
    pub centroid: Centroid,
    pub radius: f32,
    pub point_count: usize,
    pub mean_blueness: f32,
}

/// How the two partition seeds are picked from the candidate points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SeedStrategy {
    /// First and last point in scan order
    #[default]
    ScanOrder,
    /// Strongest and weakest blueness
    BluenessExtremes,
    /// Smallest and largest `x + y`
    SpatialExtremes,
}

impl std::str::FromStr for SeedStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan-order" => Ok(SeedStrategy::ScanOrder),
            "blueness" | "blueness-extremes" => Ok(SeedStrategy::BluenessExtremes),
            "spatial" | "spatial-extremes" => Ok(SeedStrategy::SpatialExtremes),
            other => Err(format!("unknown seed strategy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkerConfig {
    pub threshold: Threshold,
    pub seed_strategy: SeedStrategy,
    pub parallel_scan: bool,
    pub n_threads: usize,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            seed_strategy: SeedStrategy::ScanOrder,
            parallel_scan: false,
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Threshold handle shared between a control surface and the detector.
///
/// Writers call [`SharedThreshold::set`] at any time; the detector reads it
/// once per frame via [`SharedThreshold::get`].
#[derive(Debug, Clone)]
pub struct SharedThreshold(Arc<AtomicU8>);

impl SharedThreshold {
    pub fn new(value: Threshold) -> Self {
        Self(Arc::new(AtomicU8::new(value)))
    }

    pub fn get(&self) -> Threshold {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: Threshold) {
        self.0.store(value, Ordering::Relaxed);
    }
}

impl Default for SharedThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
