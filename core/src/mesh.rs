//! Layered character mesh generation
//!
//! A character is a vertical stack of truncated cones. Each layer is built
//! in its own local frame, twisted, roughened with noise, re-lit, and then
//! placed in the stack with a small yaw and scale offset so the tower does
//! not read as a repeated tile. The whole stack is centered on the origin
//! and scaled uniformly.
//!
//! Every constant lives in [`MeshTuning`] so the shape can be adjusted from
//! `config.toml` without touching code.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use proc_gen::mesh::{
    MeshApply, OrganicNoise, SmoothNormals, Swirl, Transform, UnpackedMesh, generate_cylinder,
    write_obj_object,
};
use serde::{Deserialize, Serialize};
use swirlsoul_shared::ParameterSet;
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Minimum number of layers in any stack
pub const MIN_LAYERS: usize = 2;

/// Fewest distinct noise frequencies a layer is roughened with
pub const MIN_NOISE_OCTAVES: usize = 2;

/// One noise octave: spatial frequency and weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseOctave {
    pub frequency: f32,
    pub amplitude: f32,
}

/// Named tunable constants of the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshTuning {
    /// Radius every layer starts from before width is applied
    pub base_radius: f32,
    /// Top radius gained at width 100
    pub top_width_gain: f32,
    /// Bottom radius gained at width 100
    pub bottom_width_gain: f32,
    /// Extra bottom radius so each layer flares outward
    pub bottom_flare: f32,
    /// Radius lost per layer going up
    pub layer_taper: f32,
    /// Stack height at length 0
    pub height_base: f32,
    /// Stack height gained at length 100
    pub height_gain: f32,
    /// Radial divisions per layer
    pub segments: u32,
    /// Swirl (in half-turns) at layers 0
    pub swirl_base: f32,
    /// Swirl gained at layers 100
    pub swirl_gain: f32,
    pub noise_octaves: Vec<NoiseOctave>,
    /// Radial noise gain at layers 0; grows by 1.0 at layers 100
    pub bump_base: f32,
    /// Vertical noise gain
    pub vertical_noise: f32,
    /// Yaw step between layers, radians
    pub layer_yaw_step: f32,
    /// Amplitude of the sinusoidal yaw perturbation, radians
    pub layer_yaw_wobble: f32,
    /// Amplitude of the sinusoidal per-layer scale perturbation
    pub layer_scale_wobble: f32,
    /// Uniform scale of the assembled stack
    pub overall_scale: f32,
    pub noise_seed: u32,
}

impl Default for MeshTuning {
    fn default() -> Self {
        Self {
            base_radius: 0.8,
            top_width_gain: 0.6,
            bottom_width_gain: 0.7,
            bottom_flare: 0.2,
            layer_taper: 0.08,
            height_base: 0.5,
            height_gain: 0.8,
            segments: 20,
            swirl_base: 0.2,
            swirl_gain: 0.8,
            noise_octaves: vec![
                NoiseOctave {
                    frequency: 2.0,
                    amplitude: 0.15,
                },
                NoiseOctave {
                    frequency: 5.0,
                    amplitude: 0.08,
                },
            ],
            bump_base: 0.3,
            vertical_noise: 0.1,
            layer_yaw_step: 0.4,
            layer_yaw_wobble: 0.2,
            layer_scale_wobble: 0.05,
            overall_scale: 1.5,
            noise_seed: 0,
        }
    }
}

impl MeshTuning {
    /// Check the constants the generator cannot work around
    ///
    /// The noise needs at least [`MIN_NOISE_OCTAVES`] octaves at different
    /// frequencies, so broad undulation and fine bumps are both present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut frequencies: Vec<f32> = self
            .noise_octaves
            .iter()
            .filter(|o| o.frequency.is_finite() && o.frequency > 0.0)
            .map(|o| o.frequency)
            .collect();
        frequencies.sort_by(f32::total_cmp);
        frequencies.dedup();

        if frequencies.len() < MIN_NOISE_OCTAVES {
            return Err(ConfigError::Invalid {
                section: "mesh",
                reason: format!(
                    "noise_octaves needs at least {MIN_NOISE_OCTAVES} distinct positive frequencies, got {}",
                    frequencies.len()
                ),
            });
        }
        Ok(())
    }
}

/// Number of layers for a `layers` value: `max(2, floor(layers / 20) + 2)`
pub fn layer_count(layers: f32) -> usize {
    let steps = (swirlsoul_shared::constants::clamp_param(layers) / 20.0).floor() as usize;
    (steps + 2).max(MIN_LAYERS)
}

/// One deformed, placed layer of the stack
#[derive(Debug, Clone, PartialEq)]
pub struct LayerMesh {
    /// Position in the stack, 0 = bottom
    pub index: usize,
    pub radius_top: f32,
    pub radius_bottom: f32,
    /// Local height before the overall scale
    pub height: f32,
    /// Stack-space center height before the overall scale
    pub center_y: f32,
    /// Yaw offset in radians
    pub yaw: f32,
    /// Final vertex data in character space
    pub mesh: UnpackedMesh,
}

/// Ordered stack of layers, bottom first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedMesh {
    pub layers: Vec<LayerMesh>,
}

impl GeneratedMesh {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(|l| l.mesh.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.layers.iter().map(|l| l.mesh.triangle_count()).sum()
    }

    /// Bounds over every layer
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.layers
            .iter()
            .filter_map(|l| l.mesh.bounds())
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }

    /// Write every layer as its own object (`layer_0`, `layer_1`, ...) in one OBJ file
    pub fn write_obj(&self, path: &Path) -> io::Result<()> {
        self.write_obj_with(path, &[])
    }

    /// Like [`write_obj`](Self::write_obj), followed by extra named objects
    /// such as decorations (`crown_0`, `sparkle_3`, ...)
    pub fn write_obj_with(&self, path: &Path, extras: &[(&str, UnpackedMesh)]) -> io::Result<()> {
        let mut out = BufWriter::new(std::fs::File::create(path)?);
        writeln!(out, "# swirlsoul character, {} layers", self.layers.len())?;
        let mut base = 0;
        for layer in &self.layers {
            base = write_obj_object(&mut out, &layer.mesh, &format!("layer_{}", layer.index), base)?;
        }
        for (i, (name, mesh)) in extras.iter().enumerate() {
            base = write_obj_object(&mut out, mesh, &format!("{name}_{i}"), base)?;
        }
        out.flush()
    }
}

/// Turns a `ParameterSet` into a `GeneratedMesh`
#[derive(Debug, Clone, Default)]
pub struct MeshGenerator {
    tuning: MeshTuning,
}

impl MeshGenerator {
    /// Invalid noise octaves are replaced by the defaults
    pub fn new(mut tuning: MeshTuning) -> Self {
        if let Err(e) = tuning.validate() {
            warn!("{e}; using default noise octaves");
            tuning.noise_octaves = MeshTuning::default().noise_octaves;
        }
        Self { tuning }
    }

    pub fn tuning(&self) -> &MeshTuning {
        &self.tuning
    }

    /// Total stack height before the overall scale
    pub fn stack_height(&self, params: &ParameterSet) -> f32 {
        let t = &self.tuning;
        t.height_base + params.length / 100.0 * t.height_gain
    }

    /// Build the full character mesh
    pub fn generate(&self, params: &ParameterSet) -> GeneratedMesh {
        let params = params.clamped();
        let t = &self.tuning;

        let count = layer_count(params.layers);
        let total_height = self.stack_height(&params);
        let height = total_height / count as f32;
        let width = params.width / 100.0;
        let intensity = params.layers / 100.0;

        let swirl = Swirl {
            turns: intensity * t.swirl_gain + t.swirl_base,
        };

        let layers = (0..count)
            .map(|i| {
                let fi = i as f32;
                let taper = fi * t.layer_taper;
                let radius_top = (t.base_radius + width * t.top_width_gain - taper).max(0.0);
                let radius_bottom =
                    (t.base_radius + t.bottom_flare + width * t.bottom_width_gain - taper).max(0.0);

                let noise = t
                    .noise_octaves
                    .iter()
                    .fold(OrganicNoise::new(t.noise_seed), |n, o| {
                        n.octave(o.frequency, o.amplitude)
                    })
                    .layer(fi)
                    .intensity(intensity + t.bump_base)
                    .vertical(t.vertical_noise);

                let center_y = (fi + 0.5) * height - total_height / 2.0;
                let yaw = fi * t.layer_yaw_step + fi.sin() * t.layer_yaw_wobble;
                let scale = 1.0 + (fi * 0.5).sin() * t.layer_scale_wobble;
                // Overall scale folds into the per-layer placement
                let placement = Transform::placement(
                    t.overall_scale * scale,
                    yaw,
                    Vec3::new(0.0, center_y * t.overall_scale, 0.0),
                );

                let mut mesh: UnpackedMesh =
                    generate_cylinder(radius_bottom, radius_top, height, t.segments);
                mesh.apply(swirl)
                    .apply(noise)
                    .apply(SmoothNormals)
                    .apply(placement);

                LayerMesh {
                    index: i,
                    radius_top,
                    radius_bottom,
                    height,
                    center_y,
                    yaw,
                    mesh,
                }
            })
            .collect();

        debug!(
            layers = count,
            height = total_height,
            "generated character mesh"
        );

        GeneratedMesh { layers }
    }
}
