//! Error types for the battle engine.
//!
//! Only the boundary can fail: turning raw input into a [`Plan`](crate::plan::Plan)
//! or decoding text. Once a match starts every turn resolves.

use crate::types::Command;

/// A submitted plan breaks the controller's precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The plan does not hold exactly one command per turn.
    #[error("plan must have exactly {expected} commands, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Submitted length.
        actual: usize,
    },

    /// A planner emitted a forced skip, which only the resolver may produce.
    #[error("turn {turn} plans a forced skip, which cannot be chosen")]
    ForcedSkipPlanned {
        /// 1-based turn index.
        turn: usize,
    },

    /// A command is used more often than the character allows.
    #[error("{command:?} used {used} times, limit is {limit}")]
    QuotaExceeded {
        /// The over-used command.
        command: Command,
        /// How many times the plan uses it.
        used: usize,
        /// The character's limit.
        limit: usize,
    },
}

/// Text could not be decoded into engine vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command code {0:?}")]
    UnknownCommand(char),

    #[error("unknown character {0:?}")]
    UnknownCharacter(String),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
