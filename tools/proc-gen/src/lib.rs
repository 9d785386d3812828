//! Procedural asset primitives for Swirlsoul
//!
//! Generic building blocks the character engine composes: an f32 mesh type
//! with primitive generators and in-place modifiers, HSL color conversion,
//! and a small tone synthesizer for audio cues.
//!
//! # Mesh Example
//! ```no_run
//! use proc_gen::mesh::*;
//!
//! // Generate a tapered cylinder
//! let mut mesh: UnpackedMesh = generate_cylinder(1.0, 0.8, 0.5, 20);
//!
//! // Twist it, roughen it, then fix the normals
//! mesh.apply(Swirl { turns: 0.5 })
//!     .apply(OrganicNoise::new(0).octave(2.0, 0.15).octave(5.0, 0.08))
//!     .apply(SmoothNormals);
//!
//! // Export to OBJ
//! let mut obj = Vec::new();
//! write_obj_object(&mut obj, &mesh, "layer", 0)?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Audio Example
//! ```no_run
//! use proc_gen::audio::*;
//!
//! let synth = Synth::new(SAMPLE_RATE);
//! let blip = synth.tone(440.0, 0.3, Envelope::exponential(0.1, 0.01));
//! let pcm = to_pcm_i16(&blip);
//! # let _ = pcm;
//! ```

pub mod audio;
pub mod color;
pub mod mesh;
