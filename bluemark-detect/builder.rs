use bluemark_core::{MarkerConfig, SeedStrategy, Threshold};
use std::sync::Arc;

use crate::config::DetectorConfig;
use crate::detector::MarkerDetector;
use crate::error::ConfigResult;
use crate::observer::DetectionObserver;
use crate::partition::{ClusterPartitioner, SeedSelector};

/// Builder for creating a `MarkerDetector`
pub struct DetectorBuilder {
    config: MarkerConfig,
    selector: Option<Box<dyn SeedSelector>>,
    observers: Vec<Arc<dyn DetectionObserver>>,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: MarkerConfig::default(),
            selector: None,
            observers: Vec::new(),
        }
    }

    /// Set the default blueness threshold carried in the config
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Pick one of the built-in seed strategies
    pub fn seed_strategy(mut self, strategy: SeedStrategy) -> Self {
        self.config.seed_strategy = strategy;
        self.selector = None;
        self
    }

    /// Use a custom seed selector instead of a built-in strategy
    pub fn seed_selector<S: SeedSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Enable or disable the row-parallel scan
    pub fn parallel_scan(mut self, enable: bool) -> Self {
        self.config.parallel_scan = enable;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Attach an observer to the built detector
    pub fn observer(mut self, observer: Arc<dyn DetectionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Apply the sensitive preset
    pub fn preset_sensitive(mut self) -> Self {
        self.config = DetectorConfig::sensitive_preset().core;
        self
    }

    /// Apply the strict preset
    pub fn preset_strict(mut self) -> Self {
        self.config = DetectorConfig::strict_preset().core;
        self
    }

    /// Build the `MarkerDetector`
    pub fn build(self) -> ConfigResult<MarkerDetector> {
        let config = DetectorConfig {
            core: self.config.clone(),
            ..DetectorConfig::new()
        };
        config.validate()?;

        let mut detector = MarkerDetector::new(&self.config);
        if let Some(selector) = self.selector {
            detector = detector.with_partitioner(ClusterPartitioner::from_boxed(selector));
        }
        for observer in self.observers {
            detector.add_observer(observer);
        }
        Ok(detector)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        let custom = if self.selector.is_some() { " (custom seeds)" } else { "" };
        format!(
            "DetectorBuilder: threshold={}, seeds={:?}{}, parallel_scan={}, threads={}, observers={}",
            self.config.threshold,
            self.config.seed_strategy,
            custom,
            self.config.parallel_scan,
            self.config.n_threads,
            self.observers.len()
        )
    }

    /// Create a builder from an existing `DetectorConfig`
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.core,
            selector: None,
            observers: Vec::new(),
        }
    }

    /// Convert the builder into a `DetectorConfig`
    pub fn to_config(&self) -> DetectorConfig {
        DetectorConfig {
            core: self.config.clone(),
            name: None,
            description: None,
            version: None,
        }
    }
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
