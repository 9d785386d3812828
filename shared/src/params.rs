//! Character parameter record
//!
//! `ParameterSet` is the universal input of every derivation: prompt parsing
//! produces one, scoring and mesh generation consume one. Every constructor
//! and setter clamps, so a value outside `[0, 100]` is never observable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{BASELINE_VALUE, FACE_COUNT, PARAM_MAX, SESSION_DEFAULT, clamp_param};

/// Facial expression overlay, in asset order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Face {
    Sleepy = 0,
    Sad = 1,
    #[default]
    Calm = 2,
    Happy = 3,
    Excited = 4,
}

impl Face {
    /// All faces in index order
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Sleepy,
        Face::Sad,
        Face::Calm,
        Face::Happy,
        Face::Excited,
    ];

    /// Index into the face asset list (0..=4)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Face for an index, clamped to the last face
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index as usize).min(FACE_COUNT - 1)]
    }

    /// Face for a continuous slider value: rounded, then clamped
    pub fn from_value(value: f32) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Face::Sleepy;
        }
        Self::from_index(value.round().min(u8::MAX as f32) as u8)
    }

    /// Texture asset overlaid on the front of the mesh
    pub fn texture_path(self) -> &'static str {
        match self {
            Face::Sleepy => "/face-icon-05.png",
            Face::Sad => "/face-icon-04.png",
            Face::Calm => "/face-icon-03.png",
            Face::Happy => "/face-icon-02.png",
            Face::Excited => "/face-icon-01-.png",
        }
    }

    /// Chinese label shown by the face picker
    pub fn label_zh(self) -> &'static str {
        match self {
            Face::Sleepy => "困倦",
            Face::Sad => "伤心",
            Face::Calm => "平静",
            Face::Happy => "开心",
            Face::Excited => "兴奋",
        }
    }

    /// English label
    pub fn label_en(self) -> &'static str {
        match self {
            Face::Sleepy => "sleepy",
            Face::Sad => "sad",
            Face::Calm => "calm",
            Face::Happy => "happy",
            Face::Excited => "excited",
        }
    }
}

impl From<u8> for Face {
    fn from(index: u8) -> Self {
        Face::from_index(index)
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> Self {
        face.index()
    }
}

/// One adjustable field of a `ParameterSet`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterAxis {
    Color,
    Length,
    Width,
    Layers,
    Face,
}

impl ParameterAxis {
    pub const ALL: [ParameterAxis; 5] = [
        ParameterAxis::Color,
        ParameterAxis::Length,
        ParameterAxis::Width,
        ParameterAxis::Layers,
        ParameterAxis::Face,
    ];

    /// Axis name as used by input widgets and the audio collaborator
    pub fn name(self) -> &'static str {
        match self {
            ParameterAxis::Color => "color",
            ParameterAxis::Length => "length",
            ParameterAxis::Width => "width",
            ParameterAxis::Layers => "layers",
            ParameterAxis::Face => "face",
        }
    }
}

impl fmt::Display for ParameterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized axis name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parameter axis '{0}'")]
pub struct UnknownAxis(pub String);

impl FromStr for ParameterAxis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colour" => Ok(ParameterAxis::Color),
            "length" => Ok(ParameterAxis::Length),
            "width" => Ok(ParameterAxis::Width),
            "layers" | "layer" => Ok(ParameterAxis::Layers),
            "face" => Ok(ParameterAxis::Face),
            other => Err(UnknownAxis(other.to_string())),
        }
    }
}

/// The five-field description of a character
///
/// Deserialized sets are clamped like every other producer's.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParameterSet")]
pub struct ParameterSet {
    /// Position in the color spectrum (0-100)
    pub color: f32,
    /// Vertical extent (0-100)
    pub length: f32,
    /// Radial extent (0-100)
    pub width: f32,
    /// Layer count, swirl and noise intensity (0-100)
    pub layers: f32,
    /// Facial expression
    pub face: Face,
}

/// Wire shape of a `ParameterSet` before clamping
#[derive(Deserialize)]
struct RawParameterSet {
    color: f32,
    length: f32,
    width: f32,
    layers: f32,
    face: Face,
}

impl From<RawParameterSet> for ParameterSet {
    fn from(raw: RawParameterSet) -> Self {
        Self::new(raw.color, raw.length, raw.width, raw.layers, raw.face)
    }
}

impl ParameterSet {
    /// Create a parameter set, clamping every continuous field
    pub fn new(color: f32, length: f32, width: f32, layers: f32, face: Face) -> Self {
        Self {
            color: clamp_param(color),
            length: clamp_param(length),
            width: clamp_param(width),
            layers: clamp_param(layers),
            face,
        }
    }

    /// Neutral starting point of prompt parsing: all axes 50, calm face
    pub fn baseline() -> Self {
        Self::new(
            BASELINE_VALUE,
            BASELINE_VALUE,
            BASELINE_VALUE,
            BASELINE_VALUE,
            Face::Calm,
        )
    }

    /// Parameters a new session starts with
    pub fn session_default() -> Self {
        let [color, length, width, layers] = SESSION_DEFAULT;
        Self::new(color, length, width, layers, Face::Calm)
    }

    /// Copy with every field forced back into range
    pub fn clamped(&self) -> Self {
        Self::new(self.color, self.length, self.width, self.layers, self.face)
    }

    /// True when every continuous field is already within `[0, 100]`
    pub fn is_in_range(&self) -> bool {
        [self.color, self.length, self.width, self.layers]
            .iter()
            .all(|v| (0.0..=PARAM_MAX).contains(v))
    }

    /// Read one axis as a number (face reads as its index)
    pub fn get(&self, axis: ParameterAxis) -> f32 {
        match axis {
            ParameterAxis::Color => self.color,
            ParameterAxis::Length => self.length,
            ParameterAxis::Width => self.width,
            ParameterAxis::Layers => self.layers,
            ParameterAxis::Face => self.face.index() as f32,
        }
    }

    /// Write one axis, clamping the value
    pub fn set(&mut self, axis: ParameterAxis, value: f32) {
        match axis {
            ParameterAxis::Color => self.color = clamp_param(value),
            ParameterAxis::Length => self.length = clamp_param(value),
            ParameterAxis::Width => self.width = clamp_param(value),
            ParameterAxis::Layers => self.layers = clamp_param(value),
            ParameterAxis::Face => self.face = Face::from_value(value),
        }
    }

    /// Copy with one axis replaced
    pub fn with(mut self, axis: ParameterAxis, value: f32) -> Self {
        self.set(axis, value);
        self
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::session_default()
    }
}
