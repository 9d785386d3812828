//! Rare-form rule table

use swirlsoul_shared::{Decoration, Face, ParameterSet};

/// A named parameter predicate that awards a score and a decoration
#[derive(Debug, Clone)]
pub struct RareFormRule {
    pub name: &'static str,
    pub name_zh: &'static str,
    pub decoration: Decoration,
    pub score: f32,
    pub predicate: fn(&ParameterSet) -> bool,
}

impl RareFormRule {
    pub fn matches(&self, params: &ParameterSet) -> bool {
        (self.predicate)(params)
    }
}

/// Golden ratio width with rich color and layering
fn golden_ratio(p: &ParameterSet) -> bool {
    p.color > 80.0 && p.layers > 70.0 && (p.width - 61.8).abs() < 10.0
}

fn supreme(p: &ParameterSet) -> bool {
    p.color > 90.0 && p.length > 85.0 && p.width > 85.0 && p.layers > 85.0
}

/// Dark, tall and thrilled
fn shadow(p: &ParameterSet) -> bool {
    p.face == Face::Excited && p.color < 20.0 && p.length > 80.0
}

/// Shipped rules in priority order
pub static RARE_FORMS: [RareFormRule; 3] = [
    RareFormRule {
        name: "Golden Ratio Form",
        name_zh: "黄金比例完美体",
        decoration: Decoration::CROWN,
        score: 0.9,
        predicate: golden_ratio,
    },
    RareFormRule {
        name: "Supreme Form",
        name_zh: "至尊卓越形态",
        decoration: Decoration::HALO,
        score: 0.95,
        predicate: supreme,
    },
    RareFormRule {
        name: "Mysterious Shadow Form",
        name_zh: "神秘暗影形态",
        decoration: Decoration::SPARKLES,
        score: 0.85,
        predicate: shadow,
    },
];
