//! Periodic transforms per emotion

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::Serialize;
use swirlsoul_shared::EmotionState;

/// Whole-character transform for one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    /// Euler angles in radians, XYZ order
    pub rotation: [f32; 3],
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            rotation: [0.0; 3],
            position: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Pose {
    pub fn to_matrix(&self) -> Mat4 {
        let [rx, ry, rz] = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::from(self.scale),
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::from(self.position),
        )
    }
}

/// Animation lookup on [`EmotionState`]
pub trait EmotionPose {
    /// Transform at `t` seconds since the animation clock started
    fn pose(self, t: f32) -> Pose;

    /// Whether the camera should orbit on its own
    fn camera_auto_rotate(self) -> bool;
}

impl EmotionPose for EmotionState {
    fn pose(self, t: f32) -> Pose {
        let mut pose = Pose::default();
        match self {
            EmotionState::Happy => {
                pose.rotation[2] = (t * 4.0).sin() * 0.1;
                pose.position[1] = (t * 6.0).sin() * 0.1;
            }
            EmotionState::Excited => {
                pose.scale = [1.0 + (t * 8.0).sin() * 0.05; 3];
                pose.rotation[1] = (t * 4.0).sin() * 0.2;
            }
            EmotionState::Strained => {
                // Squash: shorter and wider
                pose.scale[0] = 1.1 + (t * 10.0).sin() * 0.05;
                pose.scale[1] = 0.9 + (t * 10.0).sin() * 0.05;
            }
            EmotionState::Proud => {
                pose.rotation[1] = t * 0.5;
                pose.position[1] = (t * 2.0).sin() * 0.2;
                pose.scale = [1.1; 3];
            }
            EmotionState::Sleepy => {
                pose.position[1] = t.sin() * 0.05;
                pose.scale = [0.95; 3];
            }
            EmotionState::Idle => {
                pose.scale = [1.0 + (t * 2.0).sin() * 0.02; 3];
            }
        }
        pose
    }

    fn camera_auto_rotate(self) -> bool {
        self == EmotionState::Proud
    }
}
