use quiz_content_engine::{FontScale, SegmenterOptions, parsing::DEFAULT_BLOCK_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid ledger font sizes: min {min} must be positive and not above base {base}")]
    InvalidFontScale { base: f32, min: f32 },
}

/// Settings shared by every front end. Any field missing from the file takes
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal token between content blocks.
    pub block_separator: String,
    /// Directory relative content paths are resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,
    pub ledger: LedgerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerStyle {
    pub base_font_size: f32,
    pub min_font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_separator: DEFAULT_BLOCK_SEPARATOR.to_string(),
            content_dir: None,
            ledger: LedgerStyle::default(),
        }
    }
}

impl Default for LedgerStyle {
    fn default() -> Self {
        let scale = FontScale::default();
        Self {
            base_font_size: scale.base_size,
            min_font_size: scale.min_size,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.ledger.validate()?;

        // Expand shell variables and tilde in the content directory
        config.content_dir = config
            .content_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the user config, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/quiz-content");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn segmenter_options(&self) -> SegmenterOptions {
        SegmenterOptions {
            block_separator: self.block_separator.clone(),
        }
    }

    pub fn font_scale(&self) -> FontScale {
        FontScale {
            base_size: self.ledger.base_font_size,
            min_size: self.ledger.min_font_size,
        }
    }

    /// Resolves a content path given on the command line. Absolute paths and
    /// configs without a content directory leave `path` untouched.
    pub fn resolve_content_path(&self, path: &Path) -> PathBuf {
        match &self.content_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl LedgerStyle {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_font_size <= 0.0 || self.min_font_size > self.base_font_size {
            return Err(ConfigError::InvalidFontScale {
                base: self.base_font_size,
                min: self.min_font_size,
            });
        }
        Ok(())
    }
}
