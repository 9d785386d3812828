//! The character soul: parameters, score, emotion and earned decorations
//!
//! Mutations are modeled as a pure reducer ([`reduce`]) over [`SoulState`].
//! [`CharacterSoul`] is the runtime around it. It owns the keyed timers, the
//! random source for breathing intervals and the audio channel, and it runs
//! on a virtual clock: every mutator takes `now`, the time since the session
//! started, and first fires any timer due at or before `now`.
//!
//! ```
//! use std::time::Duration;
//! use swirlsoul_core::{CharacterSoul, SoulConfig};
//! use swirlsoul_shared::{EmotionState, ParameterAxis};
//!
//! let mut soul = CharacterSoul::new(&SoulConfig::default());
//! soul.set_breathing(false, Duration::ZERO);
//!
//! soul.update_parameter(ParameterAxis::Length, 90.0, Duration::ZERO);
//! assert_eq!(soul.emotion(), EmotionState::Excited);
//!
//! soul.advance(Duration::from_secs(1));
//! assert_eq!(soul.emotion(), EmotionState::Idle);
//! ```

mod reducer;
mod timers;


pub use reducer::{
    Action, Effect, REACTION_DELTA, ScoringContext, SoulEvent, SoulState, Transition, reaction,
    reduce,
};
pub use timers::{TimerKey, TimerQueue};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Serialize, Serializer};
use std::time::Duration;
use swirlsoul_shared::{DecorationSet, EmotionState, ParameterAxis, ParameterSet};
use tracing::{debug, info, warn};

use crate::audio::AudioChannel;
use crate::config::{SoulConfig, TimingConfig};
use crate::material::{Material, derive_material};
use crate::presentation::{Language, Reading, SceneDressing, dress_scene, reading};
use crate::prompt::{parse_prompt, random_parameters};
use crate::scoring::PerfectionScorer;

fn serialize_millis<S: Serializer>(at: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(at.as_millis() as u64)
}

/// An event stamped with the virtual time it happened at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEvent {
    #[serde(rename = "at_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub event: SoulEvent,
}

/// Stateful soul runtime
#[derive(Debug)]
pub struct CharacterSoul {
    state: SoulState,
    scorer: PerfectionScorer,
    timing: TimingConfig,
    timers: TimerQueue,
    rng: Pcg32,
    audio: AudioChannel,
    events: Vec<TimedEvent>,
    now: Duration,
}

impl CharacterSoul {
    /// New session at time zero with the default parameters, breathing
    pub fn new(config: &SoulConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let scorer = PerfectionScorer::default();

        let mut soul = Self {
            state: SoulState::new(ParameterSet::session_default(), &scorer),
            scorer,
            timing: config.timing.clone(),
            timers: TimerQueue::new(),
            rng,
            audio: AudioChannel::disabled(),
            events: Vec::new(),
            now: Duration::ZERO,
        };
        soul.schedule_breath();
        soul
    }

    /// Replace the audio channel; the previous one is closed
    pub fn with_audio(mut self, audio: AudioChannel) -> Self {
        self.audio = audio;
        self
    }

    /// Use a different rare-form table; the current parameters are re-scored
    pub fn with_scorer(mut self, scorer: PerfectionScorer) -> Self {
        let result = scorer.score(&self.state.params);
        self.state.score = result.score;
        self.state.rare_form = result.rare_form;
        self.scorer = scorer;
        self
    }

    pub fn state(&self) -> &SoulState {
        &self.state
    }

    pub fn params(&self) -> &ParameterSet {
        &self.state.params
    }

    pub fn score(&self) -> f32 {
        self.state.score
    }

    pub fn emotion(&self) -> EmotionState {
        self.state.emotion
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.state.decorations
    }

    pub fn is_breathing(&self) -> bool {
        self.state.breathing
    }

    /// Virtual time of the last processed action or timer
    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the timer for `key` will fire, if one is pending
    pub fn pending(&self, key: TimerKey) -> Option<Duration> {
        self.timers.deadline(key)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn audio(&self) -> &AudioChannel {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioChannel {
        &mut self.audio
    }

    /// Move one axis (slider, face picker)
    pub fn update_parameter(&mut self, axis: ParameterAxis, value: f32, now: Duration) {
        self.advance(now);
        self.dispatch(Action::UpdateParameter { axis, value });
    }

    /// Replace every parameter at once
    pub fn set_parameters(&mut self, params: ParameterSet, now: Duration) {
        self.advance(now);
        self.dispatch(Action::SetParameters(params));
    }

    /// Parse `prompt` with the soul's random source and apply the result
    pub fn apply_prompt(&mut self, prompt: &str, now: Duration) -> ParameterSet {
        let params = parse_prompt(prompt, &mut self.rng);
        self.set_parameters(params, now);
        params
    }

    /// Apply a random example prompt
    pub fn randomize(&mut self, now: Duration) -> ParameterSet {
        let params = random_parameters(&mut self.rng);
        self.set_parameters(params, now);
        params
    }

    pub fn set_breathing(&mut self, breathing: bool, now: Duration) {
        self.advance(now);
        self.dispatch(Action::SetBreathing(breathing));
    }

    /// Fire every timer due at or before `now`, in deadline order
    ///
    /// Each timer runs at its own deadline, so follow-up timers it schedules
    /// are relative to that deadline rather than to `now`.
    pub fn advance(&mut self, now: Duration) {
        if now < self.now {
            warn!(
                "Clock went backwards ({:?} < {:?}); keeping {:?}",
                now, self.now, self.now
            );
            return;
        }
        while let Some((key, deadline)) = self.timers.pop_due(now) {
            self.now = deadline;
            debug!("Timer {:?} fired at {:?}", key, deadline);
            self.dispatch(Action::TimerFired(key));
        }
        self.now = now;
    }

    pub fn reading(&self, language: Language) -> Reading {
        reading(self.state.score, language)
    }

    pub fn material(&self) -> Material {
        derive_material(&self.state.params, self.state.score)
    }

    pub fn dressing(&self) -> SceneDressing {
        dress_scene(
            self.state.params.face,
            &self.state.decorations,
            self.state.score,
        )
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the session: stop timers and release the audio output
    pub fn close(&mut self) {
        for key in [
            TimerKey::EmotionReversion,
            TimerKey::DiscoveryAnnouncement,
            TimerKey::Breathing,
        ] {
            self.timers.cancel(key);
        }
        self.audio.close();
    }

    fn dispatch(&mut self, action: Action) {
        let ctx = ScoringContext {
            scorer: &self.scorer,
            timing: &self.timing,
        };
        let Transition { state, effects } = reduce(&self.state, &action, &ctx);
        debug!(
            "{:?}: emotion {} -> {}, score {:.2}",
            action, self.state.emotion, state.emotion, state.score
        );
        self.state = state;

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule { key, after } => {
                let deadline = self.now + after;
                if self.timers.schedule(key, deadline) {
                    debug!("Rescheduled {:?} to {:?}", key, deadline);
                }
            }
            Effect::ScheduleBreath => self.schedule_breath(),
            Effect::Cancel(key) => {
                self.timers.cancel(key);
            }
            Effect::Play(cue) => self.audio.play(&cue),
            Effect::Emit(event) => {
                if let SoulEvent::Discovered(found) = &event {
                    info!(
                        "Discovered {} ({}), earned {}",
                        found.name, found.name_zh, found.decoration
                    );
                }
                self.events.push(TimedEvent {
                    at: self.now,
                    event,
                });
            }
        }
    }

    fn schedule_breath(&mut self) {
        if !self.state.breathing {
            return;
        }
        let (lo, hi) = self.timing.breathing_range();
        let interval = self.rng.random_range(lo..=hi);
        self.timers.schedule(TimerKey::Breathing, self.now + interval);
    }
}
