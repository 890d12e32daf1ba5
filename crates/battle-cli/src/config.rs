//! Match description: a YAML file, overridden by command-line flags, resolved
//! into two fighters and two plans.
//!
//! ```yaml
//! seed: 42
//! enforce_quotas: true
//! player:
//!   name: Player
//!   character: orange-fire
//!   plan: AABICAAIBIAI
//! opponent:
//!   name: CPU
//!   character: mirror   # omitted -> picked by the planner
//!   # plan omitted -> built by the planner against the player's plan
//! ```

use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::info;

use battle_engine::codec::decode_plan;
use battle_engine::planner::{build_opponent_plan, choose_opponent_character};
use battle_engine::{Character, CommandLimits, Fighter, Plan};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub player: FighterConfig,
    pub opponent: FighterConfig,
    /// Seed for the planner and sudden death. Random when absent.
    pub seed: Option<u64>,
    /// Reject a player plan that breaks its character's quotas.
    pub enforce_quotas: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            player: FighterConfig::default(),
            opponent: FighterConfig::default(),
            seed: None,
            enforce_quotas: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    pub name: Option<String>,
    pub character: Option<String>,
    pub plan: Option<String>,
}

impl FighterConfig {
    /// Fields set in `other` win.
    pub fn merge(&mut self, other: FighterConfig) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.character.is_some() {
            self.character = other.character;
        }
        if other.plan.is_some() {
            self.plan = other.plan;
        }
    }
}

impl MatchConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Everything a match needs, with the gaps filled in.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub player: Fighter,
    pub opponent: Fighter,
    pub player_plan: Plan,
    pub opponent_plan: Plan,
}

impl MatchSetup {
    /// Missing opponent character and plan are drawn from `rng`, so the same
    /// seed reproduces the same match.
    pub fn resolve<R: Rng + ?Sized>(config: &MatchConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let player_char = parse_character(config.player.character.as_deref(), "player character")?
            .unwrap_or(Character::Normal);
        let plan_text = config
            .player
            .plan
            .as_deref()
            .ok_or(ConfigError::MissingPlayerPlan)?;
        let player_plan = decode_plan(plan_text).map_err(|source| ConfigError::Parse {
            field: "player plan",
            source,
        })?;
        if config.enforce_quotas {
            player_plan
                .check_limits(&CommandLimits::for_character(player_char))
                .map_err(|source| ConfigError::Quota {
                    character: player_char.to_string(),
                    source,
                })?;
        }

        let opponent_char =
            match parse_character(config.opponent.character.as_deref(), "opponent character")? {
                Some(character) => character,
                None => {
                    let character = choose_opponent_character(player_char, rng);
                    info!(%character, "opponent character chosen");
                    character
                }
            };
        let opponent_plan = match config.opponent.plan.as_deref() {
            Some(text) => decode_plan(text).map_err(|source| ConfigError::Parse {
                field: "opponent plan",
                source,
            })?,
            None => build_opponent_plan(&player_plan, opponent_char, rng),
        };

        let name = |fighter: &FighterConfig, fallback: &str| {
            fighter.name.clone().unwrap_or_else(|| fallback.to_string())
        };

        Ok(MatchSetup {
            player: Fighter::new(name(&config.player, "Player"), player_char),
            opponent: Fighter::new(name(&config.opponent, "CPU"), opponent_char),
            player_plan,
            opponent_plan,
        })
    }
}

fn parse_character(
    text: Option<&str>,
    field: &'static str,
) -> Result<Option<Character>, ConfigError> {
    text.map(|t| t.parse::<Character>())
        .transpose()
        .map_err(|source| ConfigError::Parse { field, source })
}
