//! Configuration system
//!
//! Scene and gaze settings, loadable from TOML or RON files.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// On-disk encoding of a configuration file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format of `path`, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Settings loadable from and savable to TOML or RON files
///
/// Keys missing from a file take their `Default` values when the
/// implementor is `#[serde(default)]`.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        let config = match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Failure to load or save a configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid for the format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Value could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Extension is neither `.toml` nor `.ron`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Options for an interactive scene layer
///
/// Missing keys fall back to a non-interactive, rendered layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Whether pointer input should pick hotspots in this layer
    pub interactive: bool,

    /// Whether the layer is drawn
    pub enabled: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            enabled: true,
        }
    }
}

impl Config for SceneConfig {}

/// Gaze dwell timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    /// Time a target must stay hovered before the gaze selects it
    pub delay_ms: f64,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self { delay_ms: 2000.0 }
    }
}

impl Config for DwellConfig {}
