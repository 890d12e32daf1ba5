//! Errors raised while assembling a match from configuration.

use battle_engine::{ParseError, PlanError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the match file from disk.
    #[error("failed to read match file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse match YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yml::Error,
    },

    #[error("no plan given for the player (use --player-plan or player.plan)")]
    MissingPlayerPlan,

    /// A character name or plan string did not decode.
    #[error("invalid {field}: {source}")]
    Parse {
        field: &'static str,
        source: ParseError,
    },

    /// The player's plan breaks the character's command quotas.
    #[error("player plan is not legal for {character}: {source}")]
    Quota {
        character: String,
        source: PlanError,
    },
}
