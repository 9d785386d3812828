//! Pure soul transitions
//!
//! `reduce` maps the current state and one action to the next state plus a
//! list of effects. It never touches the clock, the timers or the audio
//! output; [`CharacterSoul`](super::CharacterSoul) applies the effects in
//! order.

use serde::Serialize;
use std::time::Duration;
use swirlsoul_shared::{DecorationSet, EmotionState, ParameterAxis, ParameterSet};

use super::timers::TimerKey;
use crate::audio::AudioCue;
use crate::config::TimingConfig;
use crate::scoring::{PerfectionScorer, RareFormMatch};

/// A change larger than this reads as excitement or strain
pub const REACTION_DELTA: f32 = 10.0;

/// The whole soul record, replaced atomically on every action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoulState {
    pub params: ParameterSet,
    pub score: f32,
    /// Rare form that shaped `score`, if any
    pub rare_form: Option<RareFormMatch>,
    pub emotion: EmotionState,
    pub decorations: DecorationSet,
    pub breathing: bool,
}

impl SoulState {
    /// Fresh state for `params`, scored but with nothing discovered yet
    pub fn new(params: ParameterSet, scorer: &PerfectionScorer) -> Self {
        let params = params.clamped();
        let result = scorer.score(&params);
        Self {
            params,
            score: result.score,
            rare_form: result.rare_form,
            emotion: EmotionState::Idle,
            decorations: DecorationSet::new(),
            breathing: true,
        }
    }
}

impl Default for SoulState {
    fn default() -> Self {
        Self::new(ParameterSet::session_default(), &PerfectionScorer::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A single widget moved
    UpdateParameter { axis: ParameterAxis, value: f32 },
    /// Prompt-driven or random replacement of the whole set
    SetParameters(ParameterSet),
    TimerFired(TimerKey),
    SetBreathing(bool),
}

/// Everything `reduce` needs besides the state
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub scorer: &'a PerfectionScorer,
    pub timing: &'a TimingConfig,
}

/// Observable outcome of a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SoulEvent {
    EmotionChanged {
        from: EmotionState,
        to: EmotionState,
    },
    ScoreChanged {
        from: f32,
        to: f32,
    },
    Discovered(RareFormMatch),
    BreathingChanged {
        breathing: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Schedule `key` to fire `after` from now, replacing any pending one
    Schedule { key: TimerKey, after: Duration },
    /// Schedule the next breath after a freshly drawn interval
    ScheduleBreath,
    Cancel(TimerKey),
    Play(AudioCue),
    Emit(SoulEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SoulState,
    pub effects: Vec<Effect>,
}

/// Emotion for a change from `old` to `new`
pub fn reaction(old: f32, new: f32) -> EmotionState {
    if new > old + REACTION_DELTA {
        EmotionState::Excited
    } else if new < old - REACTION_DELTA {
        EmotionState::Strained
    } else {
        EmotionState::Happy
    }
}

pub fn reduce(state: &SoulState, action: &Action, ctx: &ScoringContext<'_>) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match *action {
        Action::UpdateParameter { axis, value } => {
            let old = state.params.get(axis);
            next.params.set(axis, value);
            let new = next.params.get(axis);

            next.emotion = reaction(old, new);
            effects.push(Effect::Schedule {
                key: TimerKey::EmotionReversion,
                after: ctx.timing.update_hold(),
            });
            effects.push(Effect::Play(AudioCue::ParameterTone { axis, value: new }));
            rescore(&mut next, ctx, &mut effects);
        }
        Action::SetParameters(params) => {
            next.params = params.clamped();
            next.emotion = EmotionState::Excited;
            effects.push(Effect::Schedule {
                key: TimerKey::EmotionReversion,
                after: ctx.timing.bulk_hold(),
            });
            rescore(&mut next, ctx, &mut effects);
        }
        Action::TimerFired(TimerKey::EmotionReversion) => {
            next.emotion = EmotionState::Idle;
        }
        Action::TimerFired(TimerKey::DiscoveryAnnouncement) => {
            next.emotion = EmotionState::Happy;
        }
        Action::TimerFired(TimerKey::Breathing) => {
            // A breath that raced a stop is dropped
            if state.breathing {
                next.emotion = state.emotion.breathe();
                effects.push(Effect::ScheduleBreath);
            }
        }
        Action::SetBreathing(on) => {
            if on != state.breathing {
                next.breathing = on;
                effects.push(if on {
                    Effect::ScheduleBreath
                } else {
                    Effect::Cancel(TimerKey::Breathing)
                });
                effects.push(Effect::Emit(SoulEvent::BreathingChanged { breathing: on }));
            }
        }
    }

    if next.emotion != state.emotion {
        effects.push(Effect::Emit(SoulEvent::EmotionChanged {
            from: state.emotion,
            to: next.emotion,
        }));
    }

    Transition {
        state: next,
        effects,
    }
}

/// Re-score after a parameter change and run discovery
fn rescore(next: &mut SoulState, ctx: &ScoringContext<'_>, effects: &mut Vec<Effect>) {
    let previous = next.score;
    let result = ctx.scorer.score(&next.params);
    next.score = result.score;
    next.rare_form = result.rare_form;

    if next.score != previous {
        effects.push(Effect::Emit(SoulEvent::ScoreChanged {
            from: previous,
            to: next.score,
        }));
    }

    let Some(found) = ctx
        .scorer
        .discoverable(&next.params, next.score, &next.decorations)
    else {
        return;
    };

    next.decorations.insert(found.decoration.clone());
    next.emotion = EmotionState::Proud;
    // Proud holds for the full announcement instead of reverting mid-way
    effects.push(Effect::Cancel(TimerKey::EmotionReversion));
    effects.push(Effect::Schedule {
        key: TimerKey::DiscoveryAnnouncement,
        after: ctx.timing.discovery_hold(),
    });
    effects.push(Effect::Play(AudioCue::Fanfare));
    effects.push(Effect::Emit(SoulEvent::Discovered(found)));
}
