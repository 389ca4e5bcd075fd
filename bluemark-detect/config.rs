use bluemark_core::{MarkerConfig, SeedStrategy, Threshold};
use crate::builder::DetectorBuilder;
use crate::error::{ConfigError, ConfigResult};

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// Complete detector configuration with metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Core marker configuration
    pub core: MarkerConfig,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub version: Option<String>,
}

impl DetectorConfig {
    /// Create new configuration with default settings
    pub fn new() -> Self {
        Self {
            core: MarkerConfig::default(),
            name: None,
            description: None,
            version: None,
        }
    }

    /// Low threshold for dim or washed-out markers
    pub fn sensitive_preset() -> Self {
        Self {
            core: MarkerConfig {
                threshold: 20,
                seed_strategy: SeedStrategy::ScanOrder,
                parallel_scan: true,
                n_threads: num_cpus::get(),
            },
            name: Some("Sensitive".to_string()),
            description: Some("Low threshold for dim markers under poor lighting".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// High threshold for saturated markers against busy backgrounds
    pub fn strict_preset() -> Self {
        Self {
            core: MarkerConfig {
                threshold: 80,
                seed_strategy: SeedStrategy::SpatialExtremes,
                parallel_scan: true,
                n_threads: num_cpus::get(),
            },
            name: Some("Strict".to_string()),
            description: Some("High threshold that ignores bluish background clutter".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> ConfigResult<Self> {
        match name {
            "default" => Ok(Self::new().with_metadata("Default", "Stock threshold and scan-order seeds")),
            "sensitive" => Ok(Self::sensitive_preset()),
            "strict" => Ok(Self::strict_preset()),
            other => Err(ConfigError::Invalid(format!("unknown preset: {}", other))),
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self.version = Some("1.0".to_string());
        self
    }

    /// Convert to DetectorBuilder for further customization
    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    pub fn threshold(&self) -> Threshold {
        self.core.threshold
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: threshold={}, seeds={:?}, parallel_scan={}, threads={}",
            self.core.threshold, self.core.seed_strategy, self.core.parallel_scan, self.core.n_threads
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if self.core.n_threads == 0 {
            return Err(ConfigError::Invalid("n_threads must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> ConfigResult<()> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load by file extension (`.toml`, anything else as JSON)
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> ConfigResult<Self> {
        if Self::is_toml(path.as_ref()) {
            Self::load_toml(path)
        } else {
            Self::load_json(path)
        }
    }

    /// Save by file extension (`.toml`, anything else as JSON)
    #[cfg(feature = "serde")]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> ConfigResult<()> {
        if Self::is_toml(path.as_ref()) {
            self.save_toml(path)
        } else {
            self.save_json(path)
        }
    }

    #[cfg(feature = "serde")]
    fn is_toml(path: &std::path::Path) -> bool {
        path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluemark_core::DEFAULT_THRESHOLD;

    #[test]
    fn test_default_threshold() {
        assert_eq!(DetectorConfig::new().threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_presets() {
        assert_eq!(DetectorConfig::preset("sensitive").unwrap().threshold(), 20);
        assert_eq!(DetectorConfig::preset("strict").unwrap().threshold(), 80);
        assert_eq!(DetectorConfig::preset("default").unwrap().name.as_deref(), Some("Default"));
        assert!(matches!(DetectorConfig::preset("nope"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_threads() {
        let mut cfg = DetectorConfig::new();
        cfg.core.n_threads = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_summary() {
        let summary = DetectorConfig::strict_preset().summary();
        assert!(summary.contains("threshold=80"));
        assert!(summary.contains("SpatialExtremes"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_string() {
        let cfg = DetectorConfig::sensitive_preset();
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"seed_strategy\": \"scan-order\""));
        assert_eq!(DetectorConfig::from_json(&json).unwrap(), cfg);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_rejects_bad_threshold() {
        let toml_str = r#"
            [core]
            threshold = 300
            seed_strategy = "scan-order"
            parallel_scan = false
            n_threads = 1
        "#;
        assert!(matches!(DetectorConfig::from_toml(toml_str), Err(ConfigError::TomlDe(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("bluemark-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let cfg = DetectorConfig::strict_preset();

        let json_path = dir.join("strict.json");
        cfg.save(&json_path).unwrap();
        assert_eq!(DetectorConfig::load(&json_path).unwrap(), cfg);

        let toml_path = dir.join("strict.toml");
        cfg.save(&toml_path).unwrap();
        assert_eq!(DetectorConfig::load(&toml_path).unwrap(), cfg);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
