//! Perfection scoring and rare-form detection
//!
//! The score starts at 0.2 and gains:
//! - 0.2 when `|color - width| + |length - layers| < 20` (harmony)
//! - 0.15 when the face is excited and color is above 80
//! - 0.15 when the face is sleepy and length is below 30
//!
//! Then the first rare-form rule whose predicate holds lifts the score to at
//! least that rule's score, and the result is capped at 1.0. Later rules are
//! not evaluated once one matches.

pub mod rules;

use serde::Serialize;
use swirlsoul_shared::{Decoration, DecorationSet, Face, ParameterSet};

pub use rules::{RARE_FORMS, RareFormRule};

pub const BASE_SCORE: f32 = 0.2;
pub const HARMONY_BONUS: f32 = 0.2;
pub const HARMONY_VARIANCE_LIMIT: f32 = 20.0;
pub const COHERENCE_BONUS: f32 = 0.15;

/// Scores above this unlock a discovery
pub const DISCOVERY_THRESHOLD: f32 = 0.8;

/// The rare form that shaped a score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RareFormMatch {
    /// Position in the scorer's table
    pub index: usize,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub decoration: Decoration,
    pub score: f32,
}

impl RareFormMatch {
    fn from_rule(index: usize, rule: &RareFormRule) -> Self {
        Self {
            index,
            name: rule.name,
            name_zh: rule.name_zh,
            decoration: rule.decoration.clone(),
            score: rule.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Perfection in `[0, 1]`
    pub score: f32,
    pub rare_form: Option<RareFormMatch>,
}

/// Scores parameter sets against a fixed, ordered rule table
#[derive(Debug, Clone, Copy)]
pub struct PerfectionScorer {
    rules: &'static [RareFormRule],
}

impl Default for PerfectionScorer {
    fn default() -> Self {
        Self { rules: &RARE_FORMS }
    }
}

impl PerfectionScorer {
    /// Scorer over a custom rule table, evaluated in slice order
    pub fn with_rules(rules: &'static [RareFormRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [RareFormRule] {
        self.rules
    }

    /// Base score plus bonuses, before any rare form
    pub fn base_score(params: &ParameterSet) -> f32 {
        let mut score = BASE_SCORE;

        let variance = (params.color - params.width).abs() + (params.length - params.layers).abs();
        if variance < HARMONY_VARIANCE_LIMIT {
            score += HARMONY_BONUS;
        }

        if params.face == Face::Excited && params.color > 80.0 {
            score += COHERENCE_BONUS;
        }
        if params.face == Face::Sleepy && params.length < 30.0 {
            score += COHERENCE_BONUS;
        }

        score
    }

    /// Score `params`; out-of-range values are clamped first
    pub fn score(&self, params: &ParameterSet) -> ScoreResult {
        let params = params.clamped();
        let mut score = Self::base_score(&params);

        let rare_form = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&params))
            .map(|(index, rule)| RareFormMatch::from_rule(index, rule));

        if let Some(rare) = &rare_form {
            score = score.max(rare.score);
        }

        ScoreResult {
            score: score.min(1.0),
            rare_form,
        }
    }

    /// First satisfied rule whose decoration has not been earned yet
    ///
    /// Returns `None` unless `score` is above [`DISCOVERY_THRESHOLD`].
    pub fn discoverable(
        &self,
        params: &ParameterSet,
        score: f32,
        earned: &DecorationSet,
    ) -> Option<RareFormMatch> {
        if score <= DISCOVERY_THRESHOLD {
            return None;
        }
        let params = params.clamped();
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&params) && !earned.contains(&rule.decoration))
            .map(|(index, rule)| RareFormMatch::from_rule(index, rule))
    }
}

/// Score with the shipped rule table
pub fn score(params: &ParameterSet) -> ScoreResult {
    PerfectionScorer::default().score(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(color: f32, length: f32, width: f32, layers: f32, face: Face) -> ParameterSet {
        ParameterSet::new(color, length, width, layers, face)
    }

    #[test]
    fn test_session_default_scores_base_only() {
        // variance = |70-70| + |50-70| = 20, which is not < 20
        let result = score(&ParameterSet::session_default());
        assert!((result.score - 0.2).abs() < 1e-6);
        assert!(result.rare_form.is_none());
    }

    #[test]
    fn test_harmony_bonus() {
        let result = score(&p(50.0, 50.0, 50.0, 50.0, Face::Calm));
        assert!((result.score - 0.4).abs() < 1e-6);

        let edge = score(&p(60.0, 50.0, 50.0, 60.0, Face::Calm));
        assert!((edge.score - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_coherence_bonuses() {
        let excited = score(&p(85.0, 50.0, 20.0, 10.0, Face::Excited));
        assert!((excited.score - 0.35).abs() < 1e-6);

        let sleepy = score(&p(50.0, 20.0, 0.0, 90.0, Face::Sleepy));
        assert!((sleepy.score - 0.35).abs() < 1e-6);

        // Wrong face, no bonus
        let calm = score(&p(85.0, 50.0, 20.0, 10.0, Face::Calm));
        assert!((calm.score - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_all_bonuses_without_rare_form() {
        let result = score(&p(85.0, 50.0, 85.0, 50.0, Face::Excited));
        assert!(result.rare_form.is_none());
        assert!((result.score - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_rare_form_lifts_score() {
        let result = score(&p(85.0, 50.0, 62.0, 75.0, Face::Calm));
        let rare = result.rare_form.unwrap();
        assert_eq!(rare.decoration, Decoration::CROWN);
        assert_eq!(rare.index, 0);
        assert!((result.score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_supreme_and_shadow() {
        let supreme = score(&p(95.0, 90.0, 90.0, 90.0, Face::Excited));
        assert_eq!(supreme.rare_form.unwrap().decoration, Decoration::HALO);
        assert!((supreme.score - 0.95).abs() < 1e-6);

        let shadow = score(&p(10.0, 85.0, 50.0, 50.0, Face::Excited));
        assert_eq!(shadow.rare_form.unwrap().decoration, Decoration::SPARKLES);
        assert!((shadow.score - 0.85).abs() < 1e-6);
    }

    static OVERLAPPING: [RareFormRule; 2] = [
        RareFormRule {
            name: "first",
            name_zh: "一",
            decoration: Decoration::SPARKLES,
            score: 0.5,
            predicate: |p| p.color > 50.0,
        },
        RareFormRule {
            name: "second",
            name_zh: "二",
            decoration: Decoration::HALO,
            score: 1.0,
            predicate: |p| p.color > 60.0,
        },
    ];

    #[test]
    fn test_first_declared_rule_wins() {
        let scorer = PerfectionScorer::with_rules(&OVERLAPPING);
        let result = scorer.score(&p(90.0, 50.0, 0.0, 0.0, Face::Calm));
        let rare = result.rare_form.unwrap();
        assert_eq!(rare.name, "first");
        // max(0.2, 0.5): the higher-scoring later rule is masked
        assert!((result.score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_score_can_reach_one() {
        static EXACT: [RareFormRule; 1] = [RareFormRule {
            name: "exact",
            name_zh: "满分",
            decoration: Decoration::CROWN,
            score: 1.0,
            predicate: |_| true,
        }];
        let exact = PerfectionScorer::with_rules(&EXACT).score(&ParameterSet::baseline());
        assert_eq!(exact.score, 1.0);
        assert_eq!(exact.rare_form.unwrap().name, "exact");

        static PERFECT: [RareFormRule; 1] = [RareFormRule {
            name: "perfect",
            name_zh: "完美",
            decoration: Decoration::HALO,
            score: 1.5,
            predicate: |_| true,
        }];
        let capped = PerfectionScorer::with_rules(&PERFECT).score(&ParameterSet::baseline());
        assert_eq!(capped.score, 1.0);
    }

    #[test]
    fn test_score_always_in_unit_range() {
        let steps = [0.0, 15.0, 29.0, 50.0, 61.8, 80.5, 86.0, 95.0, 100.0];
        for &color in &steps {
            for &length in &steps {
                for &width in &steps {
                    for &layers in &steps {
                        for face in Face::ALL {
                            let s = score(&p(color, length, width, layers, face)).score;
                            assert!((0.0..=1.0).contains(&s));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_is_idempotent() {
        let params = p(91.0, 86.0, 86.0, 86.0, Face::Happy);
        assert_eq!(score(&params), score(&params));
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let wild = ParameterSet {
            color: 400.0,
            length: 400.0,
            width: 400.0,
            layers: 400.0,
            face: Face::Calm,
        };
        assert_eq!(score(&wild), score(&wild.clamped()));
    }

    #[test]
    fn test_discoverable_skips_earned() {
        let scorer = PerfectionScorer::default();
        let params = p(85.0, 50.0, 62.0, 75.0, Face::Calm);
        let mut earned = DecorationSet::new();

        let found = scorer.discoverable(&params, 0.9, &earned).unwrap();
        assert_eq!(found.decoration, Decoration::CROWN);

        earned.insert(Decoration::CROWN);
        assert!(scorer.discoverable(&params, 0.9, &earned).is_none());
    }

    #[test]
    fn test_discoverable_requires_threshold() {
        let scorer = PerfectionScorer::with_rules(&OVERLAPPING);
        let params = p(55.0, 50.0, 0.0, 0.0, Face::Calm);
        assert!(scorer.discoverable(&params, 0.5, &DecorationSet::new()).is_none());
        assert!(scorer.discoverable(&params, 0.8, &DecorationSet::new()).is_none());
    }
}
