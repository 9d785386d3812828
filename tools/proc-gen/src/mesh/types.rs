//! Procedural mesh types

use glam::Vec3;

/// Trait for mesh construction - lets primitive generators stay format-agnostic
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16);
}

/// Unpacked mesh data (f32 format) for modifiers and export
///
/// Positions and normals are full-precision so deformation passes can be
/// chained without quantization drift.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnpackedMesh {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u16>,
}

impl UnpackedMesh {
    /// Create empty unpacked mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max); `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(*self.positions.first()?);
        Some(self.positions.iter().skip(1).fold((first, first), |(lo, hi), p| {
            let p = Vec3::from(*p);
            (lo.min(p), hi.max(p))
        }))
    }
}

impl MeshBuilder for UnpackedMesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.positions.len() as u16;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_indices() {
        let mut mesh = UnpackedMesh::new();
        let a = mesh.add_vertex(Vec3::ZERO, Vec3::Y);
        let b = mesh.add_vertex(Vec3::X, Vec3::Y);
        let c = mesh.add_vertex(Vec3::Z, Vec3::Y);
        mesh.add_triangle(a, b, c);

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = UnpackedMesh::new();
        assert!(mesh.bounds().is_none());

        mesh.add_vertex(Vec3::new(-1.0, 2.0, 0.5), Vec3::Y);
        mesh.add_vertex(Vec3::new(3.0, -2.0, 0.0), Vec3::Y);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(hi, Vec3::new(3.0, 2.0, 0.5));
    }
}
