//! Configuration system
//!
//! Files are read and written as TOML or RON depending on their extension.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check values that serde cannot express as types
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Parse configuration from a string in the given format
    fn from_str_with_format(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        log::debug!("Loading {:?} config from {}", format, path.display());
        Self::from_str_with_format(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Picking configuration
///
/// Controls how far picking rays reach, how close two hits must be to count as
/// a tie, and which layers are pickable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Hits further than this (world units) are ignored
    pub max_distance: f32,
    /// Hits closer together than this count as equally near; the earlier candidate wins
    pub tie_epsilon: f32,
    /// Only candidates whose layer bits intersect this mask are tested
    pub layer_mask: u32,
}

impl PickingConfig {
    /// Set the maximum pick distance
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the tie tolerance
    #[must_use]
    pub fn with_tie_epsilon(mut self, tie_epsilon: f32) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }

    /// Set the layer mask
    #[must_use]
    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            max_distance: 10_000.0,
            tie_epsilon: 1e-4,
            layer_mask: u32::MAX,
        }
    }
}

impl Config for PickingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance.is_nan() || self.max_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_distance must be non-negative, got {}",
                self.max_distance
            )));
        }
        if !self.tie_epsilon.is_finite() || self.tie_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tie_epsilon must be finite and non-negative, got {}",
                self.tie_epsilon
            )));
        }
        Ok(())
    }
}
