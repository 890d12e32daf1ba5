//! Command-line front end: load or assemble a match, play it, print the log.
//!
//! ```text
//! command-battle --player-character fire --player-plan AABICAAIBIAI --seed 7
//! command-battle --config match.yaml --format json
//! ```

mod config;
mod error;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use battle_engine::characters::CHARACTERS;
use battle_engine::codec::encode_plan;
use battle_engine::{run_battle, CommandLimits};

use crate::config::{FighterConfig, MatchConfig, MatchSetup};

#[derive(Parser)]
#[command(name = "command-battle")]
#[command(author, version, about = "Play a 12-turn pre-planned command battle", long_about = None)]
struct Cli {
    /// YAML match file; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    player_name: Option<String>,

    #[arg(long)]
    opponent_name: Option<String>,

    /// Player character, by name or colour (e.g. `fire`, `orange`)
    #[arg(short = 'p', long)]
    player_character: Option<String>,

    /// Opponent character; picked by the planner when omitted
    #[arg(short = 'o', long)]
    opponent_character: Option<String>,

    /// 12 command codes: A(ttack) B(lock) C(ounter) I(dle)
    #[arg(long)]
    player_plan: Option<String>,

    /// Opponent plan; built by the planner when omitted
    #[arg(long)]
    opponent_plan: Option<String>,

    /// Seed for the planner and sudden death
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Allow player plans that exceed the character's command quotas
    #[arg(long)]
    no_quota_check: bool,

    /// Print the character roster and exit
    #[arg(long)]
    list_characters: bool,

    /// Log turn resolution to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// File settings first, flags on top.
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => MatchConfig::default(),
        };
        config.player.merge(FighterConfig {
            name: self.player_name.clone(),
            character: self.player_character.clone(),
            plan: self.player_plan.clone(),
        });
        config.opponent.merge(FighterConfig {
            name: self.opponent_name.clone(),
            character: self.opponent_character.clone(),
            plan: self.opponent_plan.clone(),
        });
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_quota_check {
            config.enforce_quotas = false;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.list_characters {
        list_characters();
        return Ok(());
    }

    let config = cli.match_config()?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "match seed");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let setup = MatchSetup::resolve(&config, &mut rng)?;
    debug!(
        player = %setup.player.character,
        opponent = %setup.opponent.character,
        player_plan = %encode_plan(&setup.player_plan),
        opponent_plan = %encode_plan(&setup.opponent_plan),
        "match assembled"
    );

    let result = run_battle(
        setup.player,
        setup.opponent,
        setup.player_plan,
        setup.opponent_plan,
        &mut rng,
    );

    match cli.format {
        OutputFormat::Text => {
            for line in result.transcript() {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

fn list_characters() {
    println!("{:<3} {:<15} {:<6} {}", "ID", "CHARACTER", "QUOTAS", "ABILITY");
    for info in &CHARACTERS {
        let limits = CommandLimits::for_character(info.character);
        println!(
            "{:<3} {:<15} {}/{}/{}  {}",
            info.character.id(),
            info.label(),
            limits.attack,
            limits.block,
            limits.counter,
            info.ability
        );
    }
}
