//! Swirlsoul Core - parameter-to-character derivation engine
//!
//! This crate turns a handful of numeric parameters into a character:
//!
//! - [`prompt`] - Free text to a [`ParameterSet`] via keyword tables
//! - [`scoring`] - Perfection score and rare-form detection
//! - [`mesh`] - Layered, swirled, noise-perturbed geometry
//! - [`material`] - Palette color and score-driven shine
//! - [`soul`] - The emotion state machine and its keyed timers
//! - [`audio`] - Tone and fanfare cues behind a failure-proof channel
//! - [`presentation`] - Poses, decoration dressing and reading text
//!
//! Derivations are pure and infallible. The soul runs on a virtual clock, so
//! a session can be replayed exactly from a seed and a list of timed actions.

pub mod audio;
pub mod config;
pub mod error;
pub mod material;
pub mod mesh;
#[cfg(feature = "playback")]
pub mod playback;
pub mod presentation;
pub mod prompt;
pub mod scoring;
pub mod soul;

pub use swirlsoul_shared::{
    Decoration, DecorationSet, EmotionState, Face, ParameterAxis, ParameterSet,
};

pub use audio::{AudioChannel, AudioCue, AudioSink, CaptureSink, NullSink};
#[cfg(feature = "wav-export")]
pub use audio::WavSink;
pub use config::{AudioConfig, SoulConfig, TimingConfig};
pub use error::{AudioError, ConfigError};
pub use material::{Material, MaterialTier, derive_material};
pub use mesh::{GeneratedMesh, LayerMesh, MeshGenerator, MeshTuning};
#[cfg(feature = "playback")]
pub use playback::DeviceSink;
pub use presentation::{EmotionPose, Language, Pose, Reading, SceneDressing, dress_scene, reading};
pub use prompt::{PromptAnalysis, analyze_prompt, example_prompts, parse_prompt, random_parameters};
pub use scoring::{PerfectionScorer, RareFormMatch, ScoreResult};
pub use soul::{CharacterSoul, SoulEvent, SoulState, TimedEvent, TimerKey};
