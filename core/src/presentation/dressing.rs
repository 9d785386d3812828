//! Bonus geometry around the character
//!
//! Decorations come from the soul's earned set. Sparkles, the point light and
//! the glow sphere follow the current score instead, so they disappear when
//! the score drops again.

use glam::{Mat4, Vec3};
use proc_gen::mesh::{
    MeshApply, Transform, UnpackedMesh, generate_cylinder, generate_sphere, generate_torus,
};
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, PI};
use swirlsoul_shared::{Decoration, DecorationSet, Face};

use crate::material::LEGENDARY_THRESHOLD;
use crate::scoring::DISCOVERY_THRESHOLD;

pub const SPARKLE_COUNT: usize = 6;

const GOLD: u32 = 0xFFD700;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceOverlay {
    pub texture: &'static str,
    pub position: [f32; 3],
    /// Plane width and height
    pub size: [f32; 2],
}

impl FaceOverlay {
    pub fn for_face(face: Face) -> Self {
        Self {
            texture: face.texture_path(),
            position: [0.0, 0.1, 0.6],
            size: [0.6, 0.6],
        }
    }
}

/// Eight-sided gold cone above the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crown {
    pub position: [f32; 3],
    pub radius: f32,
    pub height: f32,
    pub sides: u32,
    pub color: u32,
}

impl Default for Crown {
    fn default() -> Self {
        Self {
            position: [0.0, 0.8, 0.0],
            radius: 0.25,
            height: 0.3,
            sides: 8,
            color: GOLD,
        }
    }
}

impl Crown {
    pub fn mesh(&self) -> UnpackedMesh {
        let mut mesh: UnpackedMesh = generate_cylinder(self.radius, 0.0, self.height, self.sides);
        let [x, y, z] = self.position;
        mesh.apply(Transform::translate(x, y, z));
        mesh
    }
}

/// Flat ring floating over the crown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Halo {
    pub position: [f32; 3],
    pub radius: f32,
    pub tube: f32,
    /// Rotation about X in radians for renderers whose torus stands in XY
    pub tilt: f32,
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

impl Default for Halo {
    fn default() -> Self {
        Self {
            position: [0.0, 1.0, 0.0],
            radius: 0.5,
            tube: 0.04,
            tilt: FRAC_PI_2,
            color: 0xFFFFFF,
            emissive: GOLD,
            emissive_intensity: 0.3,
            opacity: 0.8,
        }
    }
}

impl Halo {
    /// Torus mesh, already laid flat in XZ
    pub fn mesh(&self) -> UnpackedMesh {
        let mut mesh: UnpackedMesh = generate_torus(self.radius, self.tube, 16, 8);
        let [x, y, z] = self.position;
        mesh.apply(Transform::translate(x, y, z));
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkle {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: u32,
    pub emissive_intensity: f32,
}

impl Sparkle {
    fn ring(index: usize) -> Self {
        let (sin_a, cos_a) = (index as f32 * PI / 3.0).sin_cos();
        Self {
            position: [sin_a * 1.2, cos_a * 0.3 + 0.2, cos_a * 1.2],
            radius: 0.03,
            color: 0xFFFF00,
            emissive_intensity: 0.5,
        }
    }

    pub fn mesh(&self) -> UnpackedMesh {
        let mut mesh: UnpackedMesh = generate_sphere(self.radius, 6, 4);
        let [x, y, z] = self.position;
        mesh.apply(Transform::translate(x, y, z));
        mesh
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 2.0],
            color: GOLD,
            intensity: 1.5,
            range: 8.0,
        }
    }
}

/// Translucent sphere enclosing the whole character
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlowSphere {
    pub radius: f32,
    pub color: u32,
    pub opacity: f32,
}

impl Default for GlowSphere {
    fn default() -> Self {
        Self {
            radius: 1.6,
            color: GOLD,
            opacity: 0.15,
        }
    }
}

/// Everything the renderer draws besides the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDressing {
    pub face: FaceOverlay,
    pub crown: Option<Crown>,
    pub halo: Option<Halo>,
    pub sparkles: Vec<Sparkle>,
    pub light: Option<PointLight>,
    pub glow: Option<GlowSphere>,
}

impl SceneDressing {
    /// Solid decoration meshes in world space, for export
    pub fn meshes(&self) -> Vec<(&'static str, UnpackedMesh)> {
        let mut meshes = Vec::new();
        if let Some(crown) = &self.crown {
            meshes.push(("crown", crown.mesh()));
        }
        if let Some(halo) = &self.halo {
            meshes.push(("halo", halo.mesh()));
        }
        for sparkle in &self.sparkles {
            meshes.push(("sparkle", sparkle.mesh()));
        }
        meshes
    }

    /// Placement of the face plane, for renderers that take matrices
    pub fn face_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::from(self.face.position))
    }
}

/// Build the dressing for a face, earned decorations and current score
///
/// Unknown decoration tags are ignored. The sparkles decoration shows its
/// ring even when the score has dropped below the sparkle threshold.
pub fn dress_scene(face: Face, decorations: &DecorationSet, score: f32) -> SceneDressing {
    let radiant = score > DISCOVERY_THRESHOLD;
    let sparkles = if radiant || decorations.contains(&Decoration::SPARKLES) {
        (0..SPARKLE_COUNT).map(Sparkle::ring).collect()
    } else {
        Vec::new()
    };

    SceneDressing {
        face: FaceOverlay::for_face(face),
        crown: decorations
            .contains(&Decoration::CROWN)
            .then(Crown::default),
        halo: decorations.contains(&Decoration::HALO).then(Halo::default),
        sparkles,
        light: radiant.then(PointLight::default),
        glow: (score > LEGENDARY_THRESHOLD).then(GlowSphere::default),
    }
}
