//! Mesh command - generate the layered character

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use swirlsoul_core::{DecorationSet, MeshGenerator, PerfectionScorer, dress_scene};

use crate::Session;
use crate::params::{ParamArgs, describe};

#[derive(Args)]
pub struct MeshArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Write the mesh to a Wavefront OBJ file
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Include the decoration for a matched rare form and score effects
    #[arg(long)]
    pub dress: bool,
}

#[derive(Serialize)]
struct LayerSummary {
    index: usize,
    radius_bottom: f32,
    radius_top: f32,
    height: f32,
    center_y: f32,
    yaw: f32,
    vertices: usize,
}

#[derive(Serialize)]
struct MeshSummary {
    layers: Vec<LayerSummary>,
    vertices: usize,
    triangles: usize,
    bounds: Option<([f32; 3], [f32; 3])>,
    extras: Vec<&'static str>,
    obj: Option<PathBuf>,
}

pub fn execute(args: MeshArgs, session: &mut Session) -> Result<()> {
    let params = args.params.resolve(&mut session.rng);
    let generator = MeshGenerator::new(session.config.mesh.clone());
    let mesh = generator.generate(&params);

    let extras = if args.dress {
        let result = PerfectionScorer::default().score(&params);
        let mut earned = DecorationSet::new();
        if let Some(rare) = &result.rare_form {
            earned.insert(rare.decoration.clone());
        }
        dress_scene(params.face, &earned, result.score).meshes()
    } else {
        Vec::new()
    };

    if let Some(path) = &args.obj {
        mesh.write_obj_with(path, &extras)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    let summary = MeshSummary {
        layers: mesh
            .layers
            .iter()
            .map(|l| LayerSummary {
                index: l.index,
                radius_bottom: l.radius_bottom,
                radius_top: l.radius_top,
                height: l.height,
                center_y: l.center_y,
                yaw: l.yaw,
                vertices: l.mesh.vertex_count(),
            })
            .collect(),
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        bounds: mesh.bounds().map(|(lo, hi)| (lo.to_array(), hi.to_array())),
        extras: extras.iter().map(|(name, _)| *name).collect(),
        obj: args.obj.clone(),
    };
    if session.json {
        return session.print_json(&summary);
    }

    println!("=== Mesh ===");
    println!("  {}", describe(&params));
    println!(
        "  {} layers, {} vertices, {} triangles",
        summary.layers.len(),
        summary.vertices,
        summary.triangles
    );
    for layer in &summary.layers {
        println!(
            "  layer {}: r {:.3} -> {:.3}, h {:.3} at y {:.3}, yaw {:.2}",
            layer.index,
            layer.radius_bottom,
            layer.radius_top,
            layer.height,
            layer.center_y,
            layer.yaw
        );
    }
    if let Some((lo, hi)) = summary.bounds {
        println!(
            "  bounds: ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
            lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
        );
    }
    if !summary.extras.is_empty() {
        println!("  extras: {}", summary.extras.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use swirlsoul_core::SoulConfig;

    fn session() -> Session {
        Session {
            config: SoulConfig::default(),
            rng: Pcg32::seed_from_u64(3),
            json: true,
        }
    }

    fn objects(path: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter_map(|l| l.strip_prefix("o ").map(str::to_owned))
            .collect()
    }

    #[test]
    fn test_obj_export_has_one_object_per_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soul.obj");
        let args = MeshArgs {
            params: ParamArgs {
                layers: Some(45.0),
                ..ParamArgs::default()
            },
            obj: Some(path.clone()),
            dress: false,
        };

        execute(args, &mut session()).unwrap();

        assert_eq!(objects(&path), vec!["layer_0", "layer_1", "layer_2", "layer_3"]);
    }

    #[test]
    fn test_dressed_export_appends_decorations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supreme.obj");
        let args = MeshArgs {
            params: ParamArgs {
                prompt: Some("supreme".into()),
                ..ParamArgs::default()
            },
            obj: Some(path.clone()),
            dress: true,
        };

        execute(args, &mut session()).unwrap();

        let names = objects(&path);
        assert_eq!(names.iter().filter(|n| n.starts_with("layer_")).count(), 6);
        assert!(names.contains(&"halo_0".to_string()));
        assert_eq!(names.iter().filter(|n| n.starts_with("sparkle_")).count(), 6);
        assert!(!names.iter().any(|n| n.starts_with("crown_")));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = MeshArgs {
            params: ParamArgs::default(),
            obj: Some(dir.path().join("missing").join("soul.obj")),
            dress: false,
        };
        assert!(execute(args, &mut session()).is_err());
    }
}
