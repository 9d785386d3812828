//! Keyword tables for prompt parsing
//!
//! Each axis has an ordered list of groups; the first group with any keyword
//! present in the prompt decides that axis. Chinese keywords come first in
//! each list, English after. Matching is substring-based on the lowercased
//! prompt, so single-character Chinese keywords match inside longer words.

use swirlsoul_shared::ParameterAxis;

/// What a matched group does to its axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Uniform draw in `[lo, hi)`
    Range(f32, f32),
    /// Fixed value (faces)
    Exact(f32),
}

/// Named keyword group
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub target: Target,
}

impl KeywordGroup {
    /// True when any keyword occurs in the already lowercased prompt
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Preset applied verbatim when its phrase appears
#[derive(Debug, Clone, Copy)]
pub struct SpecialCombo {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub assignments: &'static [(ParameterAxis, f32)],
}

impl SpecialCombo {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

const COLOR_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "gold",
        keywords: &["金", "黄", "金色", "gold", "yellow"],
        target: Target::Range(85.0, 100.0),
    },
    KeywordGroup {
        name: "brown",
        keywords: &["棕", "褐", "巧克力", "brown", "chocolate"],
        target: Target::Range(20.0, 50.0),
    },
    KeywordGroup {
        name: "rainbow",
        keywords: &["彩虹", "彩色", "多彩", "rainbow", "colorful"],
        target: Target::Range(60.0, 100.0),
    },
    KeywordGroup {
        name: "dark",
        keywords: &["深", "黑", "暗", "dark", "black"],
        target: Target::Range(0.0, 20.0),
    },
];

const LENGTH_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "long",
        keywords: &["长", "高", "拉伸", "long", "tall", "stretched"],
        target: Target::Range(70.0, 100.0),
    },
    KeywordGroup {
        name: "short",
        keywords: &["短", "小", "紧凑", "short", "compact", "small"],
        target: Target::Range(0.0, 40.0),
    },
];

const WIDTH_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "wide",
        keywords: &["宽", "胖", "厚", "wide", "fat", "thick"],
        target: Target::Range(70.0, 100.0),
    },
    KeywordGroup {
        name: "thin",
        keywords: &["瘦", "细", "窄", "thin", "skinny", "narrow"],
        target: Target::Range(0.0, 40.0),
    },
];

const LAYER_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "textured",
        keywords: &[
            "层", "旋", "纹理", "凹凸", "layer", "swirl", "texture", "bumpy",
        ],
        target: Target::Range(60.0, 100.0),
    },
    KeywordGroup {
        name: "smooth",
        keywords: &["光滑", "简单", "干净", "smooth", "simple", "clean"],
        target: Target::Range(0.0, 30.0),
    },
];

const FACE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "happy",
        keywords: &["开心", "快乐", "微笑", "happy", "joy", "smile"],
        target: Target::Exact(3.0),
    },
    KeywordGroup {
        name: "excited",
        keywords: &["兴奋", "激动", "惊人", "excited", "amazing"],
        target: Target::Exact(4.0),
    },
    KeywordGroup {
        name: "sad",
        keywords: &["伤心", "失望", "难过", "sad", "disappointed"],
        target: Target::Exact(1.0),
    },
    KeywordGroup {
        name: "sleepy",
        keywords: &["困倦", "累", "懒", "sleepy", "tired", "lazy"],
        target: Target::Exact(0.0),
    },
];

/// Axis tables in check order
pub const AXIS_GROUPS: &[(ParameterAxis, &[KeywordGroup])] = &[
    (ParameterAxis::Color, COLOR_GROUPS),
    (ParameterAxis::Length, LENGTH_GROUPS),
    (ParameterAxis::Width, WIDTH_GROUPS),
    (ParameterAxis::Layers, LAYER_GROUPS),
    (ParameterAxis::Face, FACE_GROUPS),
];

/// Signals that lift every continuous axis to at least [`QUALITY_FLOOR`]
pub const QUALITY_KEYWORDS: &[&str] = &[
    "完美",
    "杰作",
    "传奇",
    "perfect",
    "masterpiece",
    "legendary",
];

pub const QUALITY_FLOOR: &[(ParameterAxis, f32)] = &[
    (ParameterAxis::Color, 80.0),
    (ParameterAxis::Length, 70.0),
    (ParameterAxis::Width, 70.0),
    (ParameterAxis::Layers, 75.0),
];

/// Presets in application order; a later preset overwrites an earlier one
pub const SPECIAL_COMBOS: &[SpecialCombo] = &[
    SpecialCombo {
        name: "golden ratio",
        keywords: &["黄金比例", "golden ratio"],
        assignments: &[
            (ParameterAxis::Width, 62.0),
            (ParameterAxis::Color, 90.0),
            (ParameterAxis::Layers, 80.0),
        ],
    },
    SpecialCombo {
        name: "supreme",
        keywords: &["至尊", "supreme"],
        assignments: &[
            (ParameterAxis::Color, 95.0),
            (ParameterAxis::Length, 90.0),
            (ParameterAxis::Width, 90.0),
            (ParameterAxis::Layers, 90.0),
            (ParameterAxis::Face, 4.0),
        ],
    },
    SpecialCombo {
        name: "shadow",
        keywords: &["神秘", "暗影", "mysterious", "shadow"],
        assignments: &[
            (ParameterAxis::Color, 10.0),
            (ParameterAxis::Length, 85.0),
            (ParameterAxis::Face, 4.0),
        ],
    },
];

/// Curated prompts behind the "randomize" affordance
pub const EXAMPLE_PROMPTS: [&str; 12] = [
    "金色旋转杰作，完美层次",
    "彩虹色开心创作，光滑纹理",
    "巧克力棕色兴奋形态，凹凸表面",
    "困倦深色神秘形状，简单设计",
    "宽胖快乐黄色创作，多层次",
    "高瘦优雅形态，金色亮点",
    "紧凑完美球体，彩虹旋转",
    "传奇宇宙创作，天界色彩",
    "黄金比例完美体，至尊品质",
    "神秘暗影形态，深邃力量",
    "光滑简洁设计，纯净美感",
    "层次丰富纹理，艺术杰作",
];
