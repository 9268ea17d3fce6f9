//! Application configuration.
//!
//! Where books and media live and how the simulated player behaves. Reading
//! preferences are per session and never stored here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::media::coordinator::DEFAULT_SKIP_SECONDS;
use crate::media::PlayerConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Content settings
    pub content: ContentSettings,
    /// Media settings
    pub media: MediaSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            content: ContentSettings::default(),
            media: MediaSettings::default(),
        }
    }
}

/// Where book descriptors are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Directory containing `books/<id>.json`; empty means `<data dir>/content`
    pub root: PathBuf,
    /// Book opened when none is named
    pub default_book: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            default_book: "el-pollito-pito".to_string(),
        }
    }
}

impl ContentSettings {
    /// Content root, resolved against the data directory when unset.
    pub fn resolved_root(&self, data_dir: &Path) -> PathBuf {
        if self.root.as_os_str().is_empty() {
            data_dir.join("content")
        } else {
            self.root.clone()
        }
    }
}

/// Media playback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Directory media references resolve against; unset accepts everything
    pub media_root: Option<PathBuf>,
    /// Simulated delay before playback starts, in milliseconds
    pub play_latency_ms: u64,
    /// Simulated clip length, in seconds
    pub clip_seconds: f64,
    /// Narration skip distance, in seconds
    pub skip_seconds: f64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            media_root: None,
            play_latency_ms: 50,
            clip_seconds: 8.0,
            skip_seconds: DEFAULT_SKIP_SECONDS,
        }
    }
}

impl MediaSettings {
    /// Settings for the simulated player.
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            media_root: self.media_root.clone(),
            play_latency: Duration::from_millis(self.play_latency_ms),
            clip_length: Duration::from_secs_f64(self.clip_seconds.max(0.0)),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "storyreader", "StoryReader")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the data directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from a file, using defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save configuration to a file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
