//! Shared types for the Swirlsoul character customizer.
//!
//! Everything here is plain data: the parameter record every derivation
//! consumes, the emotion enumeration the animation layer reads, and the
//! decoration tags earned through rare-form discovery.

pub mod constants;
pub mod decoration;
pub mod emotion;
pub mod params;

pub use decoration::{Decoration, DecorationSet};
pub use emotion::EmotionState;
pub use params::{Face, ParameterAxis, ParameterSet, UnknownAxis};
