//! Free text to parameters
//!
//! Parsing is deterministic keyword matching, not language understanding.
//! Starting from the baseline (every axis 50, calm face), the parser runs
//! three passes over the lowercased prompt:
//!
//! 1. Per-axis keyword groups. The first matching group on an axis wins and
//!    either draws a value uniformly from its range or sets an exact value.
//! 2. Quality keywords raise color, length, width and layers to a floor
//!    with `max`, so they never lower a value the first pass set higher.
//! 3. Special phrases overwrite fields with fixed presets, in table order.
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator makes
//! parsing fully reproducible.

pub mod keywords;

use rand::Rng;
use serde::Serialize;
use swirlsoul_shared::{ParameterAxis, ParameterSet};
use tracing::debug;

pub use keywords::{EXAMPLE_PROMPTS, KeywordGroup, SpecialCombo, Target};
use keywords::{AXIS_GROUPS, QUALITY_FLOOR, QUALITY_KEYWORDS, SPECIAL_COMBOS};

/// Which pass produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Axis(ParameterAxis),
    QualityFloor,
    Special,
}

/// One rule that fired while parsing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatch {
    pub kind: MatchKind,
    pub group: &'static str,
}

/// Parse result together with the rules that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptAnalysis {
    pub params: ParameterSet,
    pub matches: Vec<KeywordMatch>,
}

/// Parse `prompt` and report every rule that fired
pub fn analyze_prompt<R: Rng>(prompt: &str, rng: &mut R) -> PromptAnalysis {
    let lowered = prompt.to_lowercase();
    let mut params = ParameterSet::baseline();
    let mut matches = Vec::new();

    for &(axis, groups) in AXIS_GROUPS {
        let Some(group) = groups.iter().find(|g| g.matches(&lowered)) else {
            continue;
        };
        let value = match group.target {
            Target::Range(lo, hi) => rng.random_range(lo..hi),
            Target::Exact(v) => v,
        };
        params.set(axis, value);
        matches.push(KeywordMatch {
            kind: MatchKind::Axis(axis),
            group: group.name,
        });
    }

    if QUALITY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        for &(axis, floor) in QUALITY_FLOOR {
            params.set(axis, params.get(axis).max(floor));
        }
        matches.push(KeywordMatch {
            kind: MatchKind::QualityFloor,
            group: "quality",
        });
    }

    for combo in SPECIAL_COMBOS.iter().filter(|c| c.matches(&lowered)) {
        for &(axis, value) in combo.assignments {
            params.set(axis, value);
        }
        matches.push(KeywordMatch {
            kind: MatchKind::Special,
            group: combo.name,
        });
    }

    debug!(matched = matches.len(), ?params, "parsed prompt");
    PromptAnalysis { params, matches }
}

/// Parse `prompt` into a parameter set; never fails
pub fn parse_prompt<R: Rng>(prompt: &str, rng: &mut R) -> ParameterSet {
    analyze_prompt(prompt, rng).params
}

/// The fixed list of example prompts
pub fn example_prompts() -> &'static [&'static str] {
    &EXAMPLE_PROMPTS
}

/// Pick one example prompt
pub fn random_prompt<R: Rng>(rng: &mut R) -> &'static str {
    EXAMPLE_PROMPTS[rng.random_range(0..EXAMPLE_PROMPTS.len())]
}

/// Parameters for the "randomize" affordance: a parsed example prompt
pub fn random_parameters<R: Rng>(rng: &mut R) -> ParameterSet {
    let prompt = random_prompt(rng);
    parse_prompt(prompt, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use swirlsoul_shared::Face;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_empty_prompt_is_baseline() {
        let params = parse_prompt("", &mut rng(0));
        assert_eq!(
            params,
            ParameterSet::new(50.0, 50.0, 50.0, 50.0, Face::Calm)
        );
    }

    #[test]
    fn test_unknown_words_are_baseline() {
        let analysis = analyze_prompt("a quiet afternoon", &mut rng(0));
        assert_eq!(analysis.params, ParameterSet::baseline());
        assert!(analysis.matches.is_empty());
    }

    #[test]
    fn test_gold_swirl_masterpiece() {
        for seed in 0..32 {
            let p = parse_prompt("金色旋转杰作，完美层次", &mut rng(seed));
            assert!(p.color >= 85.0 && p.color < 100.0);
            assert!(p.length >= 70.0);
            assert!(p.width >= 70.0);
            assert!(p.layers >= 75.0);
            assert_eq!(p.face, Face::Calm);
        }
    }

    #[test]
    fn test_golden_ratio_overrides_floor() {
        let p = parse_prompt("黄金比例完美体", &mut rng(3));
        assert_eq!(p.width, 62.0);
        assert_eq!(p.color, 90.0);
        assert_eq!(p.layers, 80.0);
        // Length only gets the quality floor
        assert_eq!(p.length, 70.0);
    }

    #[test]
    fn test_first_group_wins_per_axis() {
        for seed in 0..16 {
            let p = parse_prompt("gold and brown and black", &mut rng(seed));
            assert!(p.color >= 85.0, "seed {seed}: {}", p.color);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let p = parse_prompt("A TALL, THIN figure", &mut rng(1));
        assert!(p.length >= 70.0);
        assert!(p.width < 40.0);
    }

    #[test]
    fn test_faces() {
        let cases = [
            ("so happy", Face::Happy),
            ("amazing!", Face::Excited),
            ("disappointed", Face::Sad),
            ("lazy sunday", Face::Sleepy),
            // happy is checked before sad
            ("happy and sad", Face::Happy),
        ];
        for (prompt, face) in cases {
            assert_eq!(parse_prompt(prompt, &mut rng(0)).face, face, "{prompt}");
        }
    }

    #[test]
    fn test_quality_floor_never_lowers() {
        let plain = parse_prompt("gold", &mut rng(11));
        let lifted = parse_prompt("gold perfect", &mut rng(11));
        assert_eq!(plain.color, lifted.color);
        assert_eq!(lifted.length, 70.0);
        assert_eq!(lifted.width, 70.0);
        assert_eq!(lifted.layers, 75.0);
    }

    #[test]
    fn test_supreme_preset() {
        let p = parse_prompt("至尊", &mut rng(0));
        assert_eq!(p, ParameterSet::new(95.0, 90.0, 90.0, 90.0, Face::Excited));
    }

    #[test]
    fn test_later_special_overwrites_earlier() {
        let p = parse_prompt("supreme shadow", &mut rng(0));
        assert_eq!(p.color, 10.0);
        assert_eq!(p.length, 85.0);
        assert_eq!(p.width, 90.0);
        assert_eq!(p.layers, 90.0);
        assert_eq!(p.face, Face::Excited);
    }

    #[test]
    fn test_analysis_reports_passes() {
        let analysis = analyze_prompt("黄金比例完美体", &mut rng(0));
        let kinds: Vec<MatchKind> = analysis.matches.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MatchKind::Axis(ParameterAxis::Color),
                MatchKind::QualityFloor,
                MatchKind::Special,
            ]
        );
        assert_eq!(analysis.matches[0].group, "gold");
        assert_eq!(analysis.matches[2].group, "golden ratio");
    }

    #[test]
    fn test_seeded_parse_is_reproducible() {
        let a = parse_prompt("彩虹色开心创作，光滑纹理", &mut rng(42));
        let b = parse_prompt("彩虹色开心创作，光滑纹理", &mut rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_example_prompts_stay_in_range() {
        assert_eq!(example_prompts().len(), 12);
        let mut r = rng(5);
        for _ in 0..8 {
            for prompt in example_prompts() {
                let p = parse_prompt(prompt, &mut r);
                assert!(p.is_in_range(), "{prompt}: {p:?}");
            }
        }
    }

    #[test]
    fn test_random_parameters_come_from_examples() {
        let mut r = rng(9);
        for _ in 0..20 {
            let p = random_parameters(&mut r);
            assert!(p.is_in_range());
        }
    }
}
