use bluemark_core::BufferError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// Malformed frame; the only error `MarkerDetector::detect` surfaces
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] BufferError),
    /// Fewer than two candidate points, so no seeds
    #[error("Insufficient points for partition: {count} (need at least 2)")]
    InsufficientPoints { count: usize },
    /// A partitioned group was empty
    #[error("Marker not found: empty point group")]
    MarkerNotFound,
}

pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "serde")]
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[cfg(feature = "serde")]
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
