//! Mesh generation and modification

mod export;
mod primitives;
mod types;

pub mod displacement;
pub mod modifiers;

pub use export::write_obj_object;
pub use primitives::{generate_cylinder, generate_sphere, generate_torus};
pub use types::{MeshBuilder, UnpackedMesh};

// Convenience re-exports
pub use displacement::{OrganicNoise, Swirl};
pub use modifiers::{MeshApply, MeshModifier, SmoothNormals, Transform};
