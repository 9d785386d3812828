//! Simulate command - replay timed actions on a soul
//!
//! A script is one action per line, prefixed with the time it happens at:
//!
//! ```text
//! # comments and blank lines are ignored
//! 0      breathing off
//! 0      update color 75
//! 200ms  update color 78
//! 1.5s   set 85 50 62 75 2
//! 4s     prompt 至尊杰作
//! 7s     random
//! 9s     advance
//! ```
//!
//! Times are milliseconds unless suffixed with `ms` or `s`, and must not
//! decrease. After the last step the clock runs on for `--tail`.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use swirlsoul_core::{
    AudioChannel, CaptureSink, CharacterSoul, Face, ParameterAxis, ParameterSet, SoulConfig,
    SoulEvent, SoulState, TimedEvent,
};

use crate::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioMode {
    /// No audio
    Off,
    /// Render cues in memory and report how many played
    Capture,
    /// Write each cue to a WAV file (requires the wav-export feature)
    Wav,
    /// Play through the default output device (requires the playback feature)
    Device,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Script file, or `-` for stdin
    pub script: PathBuf,

    /// How long to keep the clock running after the last step
    #[arg(long, default_value = "6s", value_parser = parse_time)]
    pub tail: Duration,

    /// Audio output for cues
    #[arg(long, value_enum, default_value_t = AudioMode::Off)]
    pub audio: AudioMode,

    /// Directory for `--audio wav`
    #[arg(long, default_value = "cues")]
    pub wav_dir: PathBuf,

    /// Sleep between steps so the session plays out in real time
    #[arg(long)]
    pub realtime: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Update(ParameterAxis, f32),
    Set(ParameterSet),
    Prompt(String),
    Random,
    Breathing(bool),
    Advance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub at: Duration,
    pub command: Command,
}

/// Parse `200`, `200ms` or `1.5s`
pub fn parse_time(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let parsed = if let Some(ms) = s.strip_suffix("ms") {
        ms.trim().parse::<f64>().map(|v| v / 1000.0)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.trim().parse::<f64>()
    } else {
        s.parse::<f64>().map(|v| v / 1000.0)
    };
    parsed
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("invalid time '{s}'"))
}

fn parse_value(s: Option<&str>, what: &str) -> Result<f32> {
    let s = s.ok_or_else(|| anyhow!("missing {what}"))?;
    s.parse::<f32>()
        .map_err(|_| anyhow!("invalid {what} '{s}'"))
}

fn parse_command(text: &str) -> Result<Command> {
    let mut words = text.split_whitespace();
    let verb = words.next().ok_or_else(|| anyhow!("missing action"))?;
    let command = match verb {
        "update" => {
            let axis = words
                .next()
                .ok_or_else(|| anyhow!("missing axis"))?
                .parse::<ParameterAxis>()?;
            Command::Update(axis, parse_value(words.next(), "value")?)
        }
        "set" => {
            let color = parse_value(words.next(), "color")?;
            let length = parse_value(words.next(), "length")?;
            let width = parse_value(words.next(), "width")?;
            let layers = parse_value(words.next(), "layers")?;
            let face = Face::from_value(parse_value(words.next(), "face")?);
            Command::Set(ParameterSet::new(color, length, width, layers, face))
        }
        "prompt" => {
            let rest = text.trim_start()["prompt".len()..].trim();
            return Ok(Command::Prompt(rest.to_string()));
        }
        "random" => Command::Random,
        "breathing" => match words.next() {
            Some("on") => Command::Breathing(true),
            Some("off") => Command::Breathing(false),
            other => bail!("breathing expects on or off, got {:?}", other),
        },
        "advance" => Command::Advance,
        other => bail!("unknown action '{other}'"),
    };
    if let Some(extra) = words.next() {
        bail!("unexpected '{extra}' after {verb}");
    }
    Ok(command)
}

pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    let mut steps: Vec<Step> = Vec::new();
    for (n, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (time, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| anyhow!("line {}: expected '<time> <action>'", n + 1))?;
        let at = parse_time(time).map_err(|e| anyhow!("line {}: {e}", n + 1))?;
        if steps.last().is_some_and(|prev| at < prev.at) {
            bail!("line {}: time goes backwards", n + 1);
        }
        let command = parse_command(rest).with_context(|| format!("line {}", n + 1))?;
        steps.push(Step { at, command });
    }
    Ok(steps)
}

fn open_audio(args: &SimulateArgs, config: &SoulConfig) -> Result<(AudioChannel, Option<CaptureSink>)> {
    match args.audio {
        AudioMode::Off => Ok((AudioChannel::disabled(), None)),
        AudioMode::Capture => {
            let capture = CaptureSink::new();
            let channel = AudioChannel::open(Box::new(capture.clone()), &config.audio);
            Ok((channel, Some(capture)))
        }
        #[cfg(feature = "wav-export")]
        AudioMode::Wav => {
            let sink = swirlsoul_core::WavSink::new(&args.wav_dir)?;
            Ok((AudioChannel::open(Box::new(sink), &config.audio), None))
        }
        #[cfg(not(feature = "wav-export"))]
        AudioMode::Wav => bail!("WAV output needs a build with --features wav-export"),
        #[cfg(feature = "playback")]
        AudioMode::Device => match swirlsoul_core::DeviceSink::open() {
            Ok(sink) => Ok((AudioChannel::open(Box::new(sink), &config.audio), None)),
            Err(e) => {
                tracing::warn!("No audio output, continuing silently: {}", e);
                Ok((AudioChannel::disabled(), None))
            }
        },
        #[cfg(not(feature = "playback"))]
        AudioMode::Device => bail!("Device output needs a build with --features playback"),
    }
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    events: &'a [TimedEvent],
    state: &'a SoulState,
    cues_played: usize,
}

pub fn execute(args: SimulateArgs, session: &mut Session) -> Result<()> {
    let source = if args.script.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read script from stdin")?
    } else {
        std::fs::read_to_string(&args.script)
            .with_context(|| format!("Failed to read {}", args.script.display()))?
    };
    let steps = parse_script(&source)?;

    let (audio, capture) = open_audio(&args, &session.config)?;
    let mut soul = CharacterSoul::new(&session.config).with_audio(audio);
    let mut events = Vec::new();
    let mut clock = Duration::ZERO;

    for step in &steps {
        if args.realtime {
            std::thread::sleep(step.at.saturating_sub(clock));
        }
        clock = step.at;

        match &step.command {
            Command::Update(axis, value) => soul.update_parameter(*axis, *value, step.at),
            Command::Set(params) => soul.set_parameters(*params, step.at),
            Command::Prompt(text) => {
                soul.apply_prompt(text, step.at);
            }
            Command::Random => {
                soul.randomize(step.at);
            }
            Command::Breathing(on) => soul.set_breathing(*on, step.at),
            Command::Advance => soul.advance(step.at),
        }
        events.extend(soul.drain_events());
    }

    let end = clock + args.tail;
    if args.realtime {
        std::thread::sleep(args.tail);
    }
    soul.advance(end);
    events.extend(soul.drain_events());

    let cues_played = soul.audio().played();
    soul.close();

    if session.json {
        return session.print_json(&SimulationReport {
            events: &events,
            state: soul.state(),
            cues_played,
        });
    }

    println!("=== Timeline ===");
    for e in &events {
        println!("  [{:>7}ms] {}", e.at.as_millis(), describe_event(&e.event));
    }
    let state = soul.state();
    println!("=== Final ({}ms) ===", end.as_millis());
    println!("  emotion: {}", state.emotion);
    println!("  score: {:.2}", state.score);
    let tags: Vec<&str> = state.decorations.iter().map(|d| d.as_str()).collect();
    println!(
        "  decorations: {}",
        if tags.is_empty() {
            "none".to_string()
        } else {
            tags.join(", ")
        }
    );
    if let Some(capture) = capture {
        println!("  cues: {} ({} captured)", cues_played, capture.len());
    }
    Ok(())
}

fn describe_event(event: &SoulEvent) -> String {
    match event {
        SoulEvent::EmotionChanged { from, to } => format!("emotion {from} -> {to}"),
        SoulEvent::ScoreChanged { from, to } => format!("score {from:.2} -> {to:.2}"),
        SoulEvent::Discovered(rare) => format!(
            "discovered {} ({}), earned {}",
            rare.name, rare.name_zh, rare.decoration
        ),
        SoulEvent::BreathingChanged { breathing } => {
            format!("breathing {}", if *breathing { "on" } else { "off" })
        }
    }
}
