//! Surface material derivation
//!
//! Maps the color parameter onto a curated five-step brown palette and the
//! perfection score onto shininess and a tier: `Standard`, `Rare` (score
//! above 0.8, brighter with a faint self-glow) and `Legendary` (score 0.9 or
//! more, gold emissive glow).

use proc_gen::color::{hsl_to_rgb, lighten, pack_rgb, unpack_rgb};
use serde::Serialize;
use swirlsoul_shared::ParameterSet;

use crate::scoring::DISCOVERY_THRESHOLD;

/// Score at which the legendary variant takes over
pub const LEGENDARY_THRESHOLD: f32 = 0.9;

/// Palette as (hue degrees, saturation, lightness), dark to golden
pub const PALETTE: [(f32, f32, f32); 5] = [
    (30.0, 0.8, 0.2),
    (35.0, 0.7, 0.3),
    (40.0, 0.6, 0.4),
    (45.0, 0.5, 0.5),
    (50.0, 0.8, 0.6),
];

const SPECULAR: u32 = 0x222222;
const RARE_SPECULAR: u32 = 0x555555;
const LEGENDARY_SPECULAR: u32 = 0x998844;
const GOLD: u32 = 0xFFD700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialTier {
    Standard,
    Rare,
    Legendary,
}

impl MaterialTier {
    pub fn for_score(score: f32) -> Self {
        if score >= LEGENDARY_THRESHOLD {
            MaterialTier::Legendary
        } else if score > DISCOVERY_THRESHOLD {
            MaterialTier::Rare
        } else {
            MaterialTier::Standard
        }
    }
}

/// Phong-style material description for every layer of the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub tier: MaterialTier,
    /// Diffuse color, RGB in `0..=1`
    pub color: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Material {
    pub fn color_hex(&self) -> u32 {
        pack_rgb(self.color)
    }
}

/// Palette index for a color parameter: `floor(color / 100 * 4)`
pub fn palette_index(color: f32) -> usize {
    let t = swirlsoul_shared::constants::clamp_param(color) / 100.0;
    ((t * (PALETTE.len() - 1) as f32).floor() as usize).min(PALETTE.len() - 1)
}

/// Derive the body material from the parameters and perfection score
pub fn derive_material(params: &ParameterSet, score: f32) -> Material {
    let score = score.clamp(0.0, 1.0);
    let (h, s, l) = PALETTE[palette_index(params.color)];
    let base = hsl_to_rgb(h, s, l);
    let shininess = 10.0 + score * 40.0;

    match MaterialTier::for_score(score) {
        MaterialTier::Standard => Material {
            tier: MaterialTier::Standard,
            color: base,
            shininess,
            specular: unpack_rgb(SPECULAR),
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
        },
        MaterialTier::Rare => Material {
            tier: MaterialTier::Rare,
            color: lighten(base, 0.15),
            shininess: shininess + 10.0,
            specular: unpack_rgb(RARE_SPECULAR),
            emissive: base,
            emissive_intensity: 0.1,
        },
        MaterialTier::Legendary => Material {
            tier: MaterialTier::Legendary,
            color: lighten(base, 0.25),
            shininess: shininess + 30.0,
            specular: unpack_rgb(LEGENDARY_SPECULAR),
            emissive: unpack_rgb(GOLD),
            emissive_intensity: 0.3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swirlsoul_shared::Face;

    fn with_color(color: f32) -> ParameterSet {
        ParameterSet::new(color, 50.0, 50.0, 50.0, Face::Calm)
    }

    #[test]
    fn test_palette_index() {
        assert_eq!(palette_index(0.0), 0);
        assert_eq!(palette_index(24.9), 0);
        assert_eq!(palette_index(25.0), 1);
        assert_eq!(palette_index(74.9), 2);
        assert_eq!(palette_index(99.9), 3);
        assert_eq!(palette_index(100.0), 4);
        assert_eq!(palette_index(250.0), 4);
    }

    #[test]
    fn test_standard_material() {
        let m = derive_material(&with_color(0.0), 0.2);
        assert_eq!(m.tier, MaterialTier::Standard);
        assert!((m.shininess - 18.0).abs() < 1e-4);
        assert_eq!(pack_rgb(m.specular), 0x222222);
        assert_eq!(m.emissive_intensity, 0.0);
        assert_eq!(m.color, hsl_to_rgb(30.0, 0.8, 0.2));
    }

    #[test]
    fn test_tiers() {
        assert_eq!(MaterialTier::for_score(0.8), MaterialTier::Standard);
        assert_eq!(MaterialTier::for_score(0.85), MaterialTier::Rare);
        assert_eq!(MaterialTier::for_score(0.9), MaterialTier::Legendary);
        assert_eq!(MaterialTier::for_score(1.0), MaterialTier::Legendary);
    }

    #[test]
    fn test_higher_tiers_are_brighter_and_shinier() {
        let params = with_color(50.0);
        let standard = derive_material(&params, 0.75);
        let rare = derive_material(&params, 0.85);
        let legendary = derive_material(&params, 0.95);

        let luma = |c: [f32; 3]| c.iter().sum::<f32>();
        assert!(luma(rare.color) > luma(standard.color));
        assert!(luma(legendary.color) > luma(rare.color));
        assert!(rare.shininess > standard.shininess);
        assert!(legendary.shininess > rare.shininess);
        assert!(legendary.emissive_intensity > rare.emissive_intensity);
        assert_eq!(pack_rgb(legendary.emissive), GOLD);
    }

    #[test]
    fn test_hex_output() {
        let m = derive_material(&with_color(100.0), 0.0);
        assert_eq!(m.color_hex(), pack_rgb(hsl_to_rgb(50.0, 0.8, 0.6)));
    }
}
