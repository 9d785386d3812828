//! Parameter-set arguments shared by several commands

use clap::Args;
use rand::Rng;
use swirlsoul_core::{Face, ParameterSet, parse_prompt};

/// A parameter set, given explicitly or through a prompt
///
/// With `--prompt`, the prompt is parsed first and any explicit value then
/// overrides the parsed one. Without it, unspecified axes use the baseline.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Derive parameters from a prompt
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Color, 0-100
    #[arg(long)]
    pub color: Option<f32>,

    /// Length, 0-100
    #[arg(long)]
    pub length: Option<f32>,

    /// Width, 0-100
    #[arg(long)]
    pub width: Option<f32>,

    /// Layers, 0-100
    #[arg(long)]
    pub layers: Option<f32>,

    /// Face index: 0 sleepy, 1 sad, 2 calm, 3 happy, 4 excited
    #[arg(long)]
    pub face: Option<u8>,
}

impl ParamArgs {
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> ParameterSet {
        let mut params = match &self.prompt {
            Some(prompt) => parse_prompt(prompt, rng),
            None => ParameterSet::baseline(),
        };
        if let Some(v) = self.color {
            params.color = v;
        }
        if let Some(v) = self.length {
            params.length = v;
        }
        if let Some(v) = self.width {
            params.width = v;
        }
        if let Some(v) = self.layers {
            params.layers = v;
        }
        if let Some(face) = self.face {
            params.face = Face::from_index(face);
        }
        params.clamped()
    }
}

/// One-line human summary of a parameter set
pub fn describe(params: &ParameterSet) -> String {
    format!(
        "color {:.1}  length {:.1}  width {:.1}  layers {:.1}  face {} ({})",
        params.color,
        params.length,
        params.width,
        params.layers,
        params.face.index(),
        params.face.label_en()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_to_baseline() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(ParamArgs::default().resolve(&mut rng), ParameterSet::baseline());
    }

    #[test]
    fn test_explicit_values_override_prompt() {
        let mut rng = Pcg32::seed_from_u64(0);
        let args = ParamArgs {
            prompt: Some("黄金比例".into()),
            width: Some(10.0),
            face: Some(9),
            ..ParamArgs::default()
        };
        let params = args.resolve(&mut rng);
        assert_eq!(params.color, 90.0);
        assert_eq!(params.width, 10.0);
        assert_eq!(params.face, Face::Excited);
    }

    #[test]
    fn test_values_are_clamped() {
        let mut rng = Pcg32::seed_from_u64(0);
        let args = ParamArgs {
            color: Some(150.0),
            ..ParamArgs::default()
        };
        assert_eq!(args.resolve(&mut rng).color, 100.0);
    }
}
