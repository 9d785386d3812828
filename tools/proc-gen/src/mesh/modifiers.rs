//! In-place mesh modifiers
//!
//! A modifier mutates an `UnpackedMesh`; `MeshApply` chains them:
//! ```no_run
//! use proc_gen::mesh::*;
//!
//! let mut layer: UnpackedMesh = generate_cylinder(0.4, 0.4, 0.6, 16);
//! layer
//!     .apply(Swirl { turns: 0.5 })
//!     .apply(SmoothNormals)
//!     .apply(Transform::translate(0.0, 0.3, 0.0));
//! ```

use glam::{Mat4, Quat, Vec3};

use super::types::UnpackedMesh;

/// A deformation or recomputation applied to a mesh in place
pub trait MeshModifier {
    fn apply(&self, mesh: &mut UnpackedMesh);
}

/// Chaining sugar over [`MeshModifier`]
pub trait MeshApply {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for UnpackedMesh {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Affine transform of positions and normals
///
/// Normals go through the inverse-transpose so a squashed layer keeps
/// perpendicular normals.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::from_matrix(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    /// Uniform scale, then yaw (radians), then translation
    pub fn placement(scale: f32, yaw_radians: f32, translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_rotation_y(yaw_radians),
            translation,
        ))
    }

    fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

impl MeshModifier for Transform {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        let normal_matrix = self.matrix.inverse().transpose();

        mesh.positions.iter_mut().for_each(|p| {
            *p = self.matrix.transform_point3(Vec3::from(*p)).to_array();
        });
        mesh.normals.iter_mut().for_each(|n| {
            *n = normal_matrix
                .transform_vector3(Vec3::from(*n))
                .normalize_or_zero()
                .to_array();
        });
    }
}

/// Recompute vertex normals from the current triangle geometry
///
/// Each triangle contributes its area-weighted face normal to its three
/// vertices. Separately indexed vertices never share a normal, so the edge
/// between a cap ring and the body ring above it stays hard.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmoothNormals;

impl MeshModifier for SmoothNormals {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        let mut accum = vec![Vec3::ZERO; mesh.positions.len()];

        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(mesh.positions[a]);
            let p1 = Vec3::from(mesh.positions[b]);
            let p2 = Vec3::from(mesh.positions[c]);

            // Unnormalized cross product weights by triangle area
            let face = (p1 - p0).cross(p2 - p0);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        mesh.normals.resize(mesh.positions.len(), [0.0, 1.0, 0.0]);
        for (normal, sum) in mesh.normals.iter_mut().zip(accum) {
            // Unreferenced or degenerate vertices keep their previous normal
            if let Some(n) = sum.try_normalize() {
                *normal = n.to_array();
            }
        }
    }
}
