//! Deformation modifiers for organic shapes
//!
//! `Swirl` twists a mesh around its vertical axis by an amount that grows
//! with height. `OrganicNoise` perturbs each vertex radially using layered
//! Perlin noise so primitives stop looking like perfect solids.

use super::modifiers::MeshModifier;
use super::types::UnpackedMesh;
use glam::{Quat, Vec3};
use noise::{NoiseFn, Perlin};
use smallvec::SmallVec;
use std::f32::consts::PI;

/// Twist vertices around the Y axis proportionally to their height
///
/// A vertex at the bottom of the mesh bounds keeps its angle; a vertex at
/// the top is rotated by `turns * PI` radians. Normals are rotated with
/// their vertex so the result stays lit correctly without a smoothing pass.
#[derive(Clone, Copy, Debug)]
pub struct Swirl {
    /// Twist at the top of the mesh, in half-turns (1.0 = 180 degrees)
    pub turns: f32,
}

impl MeshModifier for Swirl {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        let Some((lo, hi)) = mesh.bounds() else {
            return;
        };
        let span = hi.y - lo.y;
        if span <= f32::EPSILON || self.turns == 0.0 {
            return;
        }

        for (pos, norm) in mesh.positions.iter_mut().zip(mesh.normals.iter_mut()) {
            let height_factor = (pos[1] - lo.y) / span;
            let rotation = Quat::from_rotation_y(-height_factor * self.turns * PI);

            // from_rotation_y turns +X toward -Z; negate so the polar angle atan2(z, x) grows
            *pos = (rotation * Vec3::from(*pos)).to_array();
            *norm = (rotation * Vec3::from(*norm)).to_array();
        }
    }
}

/// Radial noise displacement built from one or more octaves
///
/// For each vertex the octaves are summed:
/// `n = sum(noise(p * freq + (0, layer * (k + 1), 0)) * amp)`.
/// The horizontal position is scaled by `1 + n * intensity` and the height
/// shifted by `n * vertical`. `layer` decorrelates stacked pieces that share
/// one noise field.
///
/// Normals are left untouched; follow with `SmoothNormals`.
///
/// # Example
/// ```no_run
/// use proc_gen::mesh::*;
///
/// let mut mesh: UnpackedMesh = generate_cylinder(1.0, 0.9, 0.4, 20);
/// mesh.apply(
///     OrganicNoise::new(7)
///         .octave(2.0, 0.15)
///         .octave(5.0, 0.08)
///         .layer(1.0)
///         .intensity(0.8),
/// )
/// .apply(SmoothNormals);
/// ```
#[derive(Clone, Debug)]
pub struct OrganicNoise {
    seed: u32,
    octaves: SmallVec<[(f32, f32); 4]>,
    layer: f32,
    intensity: f32,
    vertical: f32,
}

impl OrganicNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            octaves: SmallVec::new(),
            layer: 0.0,
            intensity: 1.0,
            vertical: 0.0,
        }
    }

    /// Add an octave sampled at `frequency` and weighted by `amplitude`
    pub fn octave(mut self, frequency: f32, amplitude: f32) -> Self {
        self.octaves.push((frequency, amplitude));
        self
    }

    /// Offset into the noise field for this piece of a stack
    pub fn layer(mut self, layer: f32) -> Self {
        self.layer = layer;
        self
    }

    /// Radial gain applied to the summed noise
    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Vertical gain applied to the summed noise
    pub fn vertical(mut self, vertical: f32) -> Self {
        self.vertical = vertical;
        self
    }

    /// Summed noise at a point, before any gain
    pub fn sample(&self, noise: &Perlin, p: Vec3) -> f32 {
        self.octaves
            .iter()
            .enumerate()
            .map(|(k, &(freq, amp))| {
                let offset = self.layer * (k + 1) as f32;
                let v = noise.get([
                    (p.x * freq) as f64,
                    (p.y * freq + offset) as f64,
                    (p.z * freq) as f64,
                ]);
                v as f32 * amp
            })
            .sum()
    }
}

impl MeshModifier for OrganicNoise {
    fn apply(&self, mesh: &mut UnpackedMesh) {
        if self.octaves.is_empty() {
            return;
        }

        let perlin = Perlin::new(self.seed);
        for pos in &mut mesh.positions {
            let p = Vec3::from(*pos);
            let n = self.sample(&perlin, p);
            let bump = 1.0 + n * self.intensity;
            *pos = [p.x * bump, p.y + n * self.vertical, p.z * bump];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshApply, generate_cylinder};

    fn polar(p: [f32; 3]) -> f32 {
        p[2].atan2(p[0])
    }

    fn wrap(a: f32) -> f32 {
        (a + PI).rem_euclid(2.0 * PI) - PI
    }

    #[test]
    fn test_swirl_twists_with_height() {
        let before: UnpackedMesh = generate_cylinder(1.0, 1.0, 1.0, 16);
        let mut after = before.clone();
        Swirl { turns: 0.5 }.apply(&mut after);

        // Body vertex pairs: even = bottom, odd = top
        let bottom_delta = wrap(polar(after.positions[2]) - polar(before.positions[2]));
        let top_delta = wrap(polar(after.positions[3]) - polar(before.positions[3]));

        assert!(bottom_delta.abs() < 1e-4);
        assert!((top_delta - 0.5 * PI).abs() < 1e-3);
    }

    #[test]
    fn test_swirl_preserves_radius_and_height() {
        let before: UnpackedMesh = generate_cylinder(1.0, 0.7, 1.0, 12);
        let mut after = before.clone();
        Swirl { turns: 1.3 }.apply(&mut after);

        for (a, b) in before.positions.iter().zip(&after.positions) {
            let ra = (a[0] * a[0] + a[2] * a[2]).sqrt();
            let rb = (b[0] * b[0] + b[2] * b[2]).sqrt();
            assert!((ra - rb).abs() < 1e-5);
            assert!((a[1] - b[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_is_deterministic() {
        let noise = OrganicNoise::new(3)
            .octave(2.0, 0.15)
            .octave(5.0, 0.08)
            .layer(2.0)
            .intensity(1.0)
            .vertical(0.1);

        let mut a: UnpackedMesh = generate_cylinder(1.0, 0.9, 0.5, 20);
        let mut b = a.clone();
        a.apply(noise.clone());
        b.apply(noise);

        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_displaces_vertices() {
        let before: UnpackedMesh = generate_cylinder(1.0, 0.9, 0.5, 20);
        let mut after = before.clone();
        after.apply(OrganicNoise::new(0).octave(2.0, 0.15).layer(0.5).intensity(1.0));

        let moved = before
            .positions
            .iter()
            .zip(&after.positions)
            .filter(|(a, b)| Vec3::from(**a).distance(Vec3::from(**b)) > 1e-4)
            .count();
        assert!(moved > before.positions.len() / 2);
    }

    #[test]
    fn test_noise_without_octaves_is_identity() {
        let before: UnpackedMesh = generate_cylinder(1.0, 0.9, 0.5, 20);
        let mut after = before.clone();
        after.apply(OrganicNoise::new(0).intensity(5.0));
        assert_eq!(before, after);
    }

    #[test]
    fn test_layer_offset_changes_result() {
        let base: UnpackedMesh = generate_cylinder(1.0, 0.9, 0.5, 20);
        let mut a = base.clone();
        let mut b = base;
        a.apply(OrganicNoise::new(0).octave(2.0, 0.15).layer(0.0));
        b.apply(OrganicNoise::new(0).octave(2.0, 0.15).layer(1.37));
        assert_ne!(a.positions, b.positions);
    }
}
