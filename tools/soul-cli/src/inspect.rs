//! Read-only commands: prompts, parse, score, reading

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use swirlsoul_core::material::Material;
use swirlsoul_core::prompt::MatchKind;
use swirlsoul_core::{
    Language, ParameterSet, PerfectionScorer, Reading, RareFormMatch, analyze_prompt,
    derive_material, example_prompts, reading as reading_for,
};

use crate::Session;
use crate::params::{ParamArgs, describe};

#[derive(Args)]
pub struct ParseArgs {
    /// Prompt text (Chinese or English keywords)
    pub text: String,
}

#[derive(Args)]
pub struct ReadingArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Reading language, `zh` or `en` (defaults to config)
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    match s.to_ascii_lowercase().as_str() {
        "zh" | "cn" | "chinese" => Ok(Language::Zh),
        "en" | "english" => Ok(Language::En),
        other => Err(format!("unknown language '{other}', expected zh or en")),
    }
}

pub fn prompts(session: &Session) -> Result<()> {
    if session.json {
        return session.print_json(&example_prompts());
    }
    for (i, prompt) in example_prompts().iter().enumerate() {
        println!("{:>2}. {}", i + 1, prompt);
    }
    Ok(())
}

pub fn parse(args: ParseArgs, session: &mut Session) -> Result<()> {
    let analysis = analyze_prompt(&args.text, &mut session.rng);
    if session.json {
        return session.print_json(&analysis);
    }

    println!("=== Prompt ===");
    println!("  {}", args.text);
    println!("  {}", describe(&analysis.params));
    if analysis.matches.is_empty() {
        println!("  No keywords matched; baseline parameters");
    }
    for m in &analysis.matches {
        let kind = match m.kind {
            MatchKind::Axis(axis) => axis.name(),
            MatchKind::QualityFloor => "floor",
            MatchKind::Special => "special",
        };
        println!("  [{kind:>7}] {}", m.group);
    }
    Ok(())
}

#[derive(Serialize)]
struct ScoreReport {
    params: ParameterSet,
    score: f32,
    rare_form: Option<RareFormMatch>,
    material: Material,
    reading: Reading,
}

pub fn score(args: ParamArgs, session: &mut Session) -> Result<()> {
    let params = args.resolve(&mut session.rng);
    let result = PerfectionScorer::default().score(&params);
    let report = ScoreReport {
        params,
        score: result.score,
        rare_form: result.rare_form,
        material: derive_material(&params, result.score),
        reading: reading_for(result.score, session.config.language),
    };
    if session.json {
        return session.print_json(&report);
    }

    println!("=== Score ===");
    println!("  {}", describe(&report.params));
    println!(
        "  Perfection: {:.2}  {}",
        report.score,
        stars(report.reading.stars)
    );
    match &report.rare_form {
        Some(rare) => println!(
            "  Rare form: {} / {} (+{})",
            rare.name, rare.name_zh, rare.decoration
        ),
        None => println!("  Rare form: none"),
    }
    println!(
        "  Material: {:?} #{:06x}, shininess {:.0}",
        report.material.tier,
        report.material.color_hex(),
        report.material.shininess
    );
    Ok(())
}

pub fn reading(args: ReadingArgs, session: &mut Session) -> Result<()> {
    let params = args.params.resolve(&mut session.rng);
    let score = PerfectionScorer::default().score(&params).score;
    let language = args.lang.unwrap_or(session.config.language);
    let reading = reading_for(score, language);
    if session.json {
        return session.print_json(&reading);
    }
    println!("{}  ({:.2})", stars(reading.stars), score);
    println!("{}", reading.text);
    Ok(())
}

fn stars(filled: u8) -> String {
    let filled = filled.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("EN"), Ok(Language::En));
        assert_eq!(parse_language("zh"), Ok(Language::Zh));
        assert!(parse_language("fr").is_err());
    }
}
