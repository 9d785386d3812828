//! Descriptors for the rendering collaborator
//!
//! Nothing here draws. These functions turn soul state into plain data a
//! renderer can apply: the periodic transform for the current emotion, the
//! bonus geometry earned through decorations and score, and the flavor text
//! shown with the result.

mod dressing;
mod pose;
mod reading;

pub use dressing::{
    Crown, FaceOverlay, GlowSphere, Halo, PointLight, SPARKLE_COUNT, SceneDressing, Sparkle,
    dress_scene,
};
pub use pose::{EmotionPose, Pose};
pub use reading::{Language, Reading, ReadingTier, reading, stars};
