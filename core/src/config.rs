//! Configuration management (`config.toml`)
//!
//! Handles loading, saving, and providing defaults for the soul's timing,
//! audio and mesh tuning. Settings are stored in TOML format in the
//! platform-specific config directory. Every field has a default, so a
//! partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::mesh::MeshTuning;
use crate::presentation::Language;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SoulConfig {
    /// Language of reading text (default: zh)
    #[serde(default)]
    pub language: Language,
    /// Seed for breathing intervals and prompt draws; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Emotion hold windows and breathing cadence
    #[serde(default)]
    pub timing: TimingConfig,
    /// Cue rendering and output
    #[serde(default)]
    pub audio: AudioConfig,
    /// Mesh generator constants
    #[serde(default)]
    pub mesh: MeshTuning,
}

/// Timer lengths, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long an update reaction is held before reverting to idle (default: 1000)
    #[serde(default = "default_update_hold")]
    pub update_hold_ms: u64,
    /// How long the bulk-replace excitement is held (default: 2000)
    #[serde(default = "default_bulk_hold")]
    pub bulk_hold_ms: u64,
    /// How long the proud pose is held after a discovery (default: 2000)
    #[serde(default = "default_discovery_hold")]
    pub discovery_hold_ms: u64,
    /// Shortest breathing interval (default: 3000)
    #[serde(default = "default_breathing_min")]
    pub breathing_min_ms: u64,
    /// Longest breathing interval (default: 5000)
    #[serde(default = "default_breathing_max")]
    pub breathing_max_ms: u64,
}

/// Audio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Whether cues are rendered at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Master volume level (default: 0.8, range: 0.0-1.0)
    #[serde(default = "default_volume")]
    pub master_volume: f32,
    /// Render rate for cues (default: 22050)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_update_hold() -> u64 {
    1000
}
fn default_bulk_hold() -> u64 {
    2000
}
fn default_discovery_hold() -> u64 {
    2000
}
fn default_breathing_min() -> u64 {
    3000
}
fn default_breathing_max() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
fn default_volume() -> f32 {
    0.8
}
fn default_sample_rate() -> u32 {
    proc_gen::audio::SAMPLE_RATE
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            update_hold_ms: default_update_hold(),
            bulk_hold_ms: default_bulk_hold(),
            discovery_hold_ms: default_discovery_hold(),
            breathing_min_ms: default_breathing_min(),
            breathing_max_ms: default_breathing_max(),
        }
    }
}

impl TimingConfig {
    pub fn update_hold(&self) -> Duration {
        Duration::from_millis(self.update_hold_ms)
    }

    pub fn bulk_hold(&self) -> Duration {
        Duration::from_millis(self.bulk_hold_ms)
    }

    pub fn discovery_hold(&self) -> Duration {
        Duration::from_millis(self.discovery_hold_ms)
    }

    /// Breathing interval bounds, ordered even if the file swaps them
    pub fn breathing_range(&self) -> (Duration, Duration) {
        let lo = self.breathing_min_ms.min(self.breathing_max_ms);
        let hi = self.breathing_min_ms.max(self.breathing_max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            master_volume: default_volume(),
            sample_rate: default_sample_rate(),
        }
    }
}

impl AudioConfig {
    /// Master volume forced into `0.0..=1.0`
    pub fn volume(&self) -> f32 {
        if self.master_volume.is_nan() {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Swirlsoul\config`
/// On macOS: `~/Library/Application Support/io.swirlsoul.Swirlsoul`
/// On Linux: `~/.config/swirlsoul`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.swirlsoul", "", "Swirlsoul")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of `config.toml` in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl SoulConfig {
    /// Loads the configuration from the platform config directory.
    ///
    /// Returns default values if the file doesn't exist or cannot be parsed.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// Well-formed TOML can still be rejected by [`MeshTuning::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.mesh.validate()?;
        Ok(config)
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes `config.toml` to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_err)
    }

    /// Writes `config.toml` to the platform config directory.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }
}
