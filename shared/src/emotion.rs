//! Emotion states driving the idle and reactive animation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion of the character, read by the animation collaborator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionState {
    #[default]
    Idle,
    Happy,
    Strained,
    Proud,
    Excited,
    Sleepy,
}

impl EmotionState {
    pub const ALL: [EmotionState; 6] = [
        EmotionState::Idle,
        EmotionState::Happy,
        EmotionState::Strained,
        EmotionState::Proud,
        EmotionState::Excited,
        EmotionState::Sleepy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionState::Idle => "idle",
            EmotionState::Happy => "happy",
            EmotionState::Strained => "strained",
            EmotionState::Proud => "proud",
            EmotionState::Excited => "excited",
            EmotionState::Sleepy => "sleepy",
        }
    }

    /// Next state of the breathing oscillation: idle dozes off, anything else settles to idle
    pub fn breathe(self) -> Self {
        match self {
            EmotionState::Idle => EmotionState::Sleepy,
            _ => EmotionState::Idle,
        }
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathe_toggles() {
        assert_eq!(EmotionState::Idle.breathe(), EmotionState::Sleepy);
        assert_eq!(EmotionState::Sleepy.breathe(), EmotionState::Idle);
        assert_eq!(EmotionState::Proud.breathe(), EmotionState::Idle);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EmotionState::Strained).unwrap();
        assert_eq!(json, "\"strained\"");
    }
}
