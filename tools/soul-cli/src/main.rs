//! Swirlsoul CLI - drive the character engine from the terminal
//!
//! # Commands
//!
//! - `swirlsoul prompts` - List the example prompts
//! - `swirlsoul parse <TEXT>` - Parse a prompt and show which keywords fired
//! - `swirlsoul score` - Perfection score, rare form and material
//! - `swirlsoul reading` - Flavor text and stars for a parameter set
//! - `swirlsoul mesh` - Generate the layered mesh, optionally as OBJ
//! - `swirlsoul simulate <SCRIPT>` - Replay timed actions on the soul
//!
//! # Usage
//!
//! ```bash
//! # Reproducible prompt parsing
//! swirlsoul --seed 7 parse "金色旋转杰作，完美层次"
//!
//! # Score explicit parameters as JSON
//! swirlsoul --json score --color 85 --width 62 --layers 75
//!
//! # Export the character with its decorations
//! swirlsoul mesh --prompt "supreme" --obj soul.obj --dress
//!
//! # Replay a session script
//! swirlsoul simulate session.txt
//! ```

mod inspect;
mod mesh;
mod params;
mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use std::path::PathBuf;
use swirlsoul_core::SoulConfig;

/// Swirlsoul - procedural character customizer engine
#[derive(Parser)]
#[command(name = "swirlsoul")]
#[command(about = "Procedural character customizer engine")]
#[command(version)]
struct Cli {
    /// Seed for prompt draws and breathing intervals (overrides config)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print structured output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the example prompts
    Prompts,

    /// Parse a prompt into parameters
    Parse(inspect::ParseArgs),

    /// Score a parameter set
    Score(params::ParamArgs),

    /// Show the reading for a parameter set
    Reading(inspect::ReadingArgs),

    /// Generate the character mesh
    Mesh(mesh::MeshArgs),

    /// Replay a script of timed actions
    Simulate(simulate::SimulateArgs),
}

/// Settings shared by every command
pub struct Session {
    pub config: SoulConfig,
    pub rng: Pcg32,
    pub json: bool,
}

impl Session {
    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SoulConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SoulConfig::load(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let rng = match config.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut session = Session {
        config,
        rng,
        json: cli.json,
    };

    match cli.command {
        Commands::Prompts => inspect::prompts(&session),
        Commands::Parse(args) => inspect::parse(args, &mut session),
        Commands::Score(args) => inspect::score(args, &mut session),
        Commands::Reading(args) => inspect::reading(args, &mut session),
        Commands::Mesh(args) => mesh::execute(args, &mut session),
        Commands::Simulate(args) => simulate::execute(args, &mut session),
    }
}
