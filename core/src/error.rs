//! Error types
//!
//! Derivations (prompt parsing, scoring, mesh generation) cannot fail. The
//! only fallible surfaces are the config file and the audio output.

use std::path::PathBuf;

/// Failure reading or writing `config.toml`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid [{section}] config: {reason}")]
    Invalid {
        section: &'static str,
        reason: String,
    },

    #[error("no platform config directory available")]
    NoConfigDir,
}

/// Failure inside an audio sink
///
/// These never escape `AudioChannel`; they are logged and dropped there.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoDevice,

    #[error("failed to query output config: {0}")]
    DeviceConfig(String),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to build audio stream: {0}")]
    BuildStream(String),

    #[error("failed to start audio stream: {0}")]
    Play(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audio channel is closed")]
    Closed,
}
