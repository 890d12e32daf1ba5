//! Deterministic resolution engine for a 12-turn, two-fighter command battle.
//!
//! Both fighters commit a full [`Plan`] up front. [`Battle`] feeds the plans
//! turn by turn through [`resolve_turn`], stops on a KO or a pressure
//! knockoff, and settles a stalemate with a sudden-death flip drawn from a
//! caller-supplied RNG.

pub mod battle;
pub mod characters;
pub mod codec;
pub mod combat;
pub mod damage;
pub mod error;
pub mod narration;
pub mod plan;
#[cfg(feature = "planner")]
pub mod planner;
pub mod types;

pub use battle::{run_battle, run_battle_from_commands, Battle, Verdict};
pub use combat::resolve_turn;
pub use error::{ParseError, PlanError};
pub use plan::{CommandLimits, Plan};
pub use types::{
    BattleResult, Character, Command, Fighter, FighterSnapshot, Reason, Side, SkipReason,
    TurnEvent, TurnOutcome, TurnRecord, KNOCKOFF_PRESSURE, MAX_HALF_HEARTS, TURNS,
};
