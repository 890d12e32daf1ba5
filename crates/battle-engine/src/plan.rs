//! Committed 12-turn plans and per-character command quotas.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::types::{Character, Command, TURNS};

/// A fighter's full sequence of committed commands, one per turn.
///
/// Construction is the precondition gate: exactly [`TURNS`] commands and no
/// [`Command::ForcedSkip`]. Quotas are not checked here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan([Command; TURNS]);

impl Plan {
    pub fn new(commands: &[Command]) -> Result<Plan, PlanError> {
        let commands: [Command; TURNS] =
            commands.try_into().map_err(|_| PlanError::WrongLength {
                expected: TURNS,
                actual: commands.len(),
            })?;
        if let Some(i) = commands.iter().position(|c| *c == Command::ForcedSkip) {
            return Err(PlanError::ForcedSkipPlanned { turn: i + 1 });
        }
        Ok(Plan(commands))
    }

    /// Idle on every turn.
    pub const fn idle() -> Plan {
        Plan([Command::Idle; TURNS])
    }

    /// Command for a 1-based turn index.
    pub fn command(&self, turn: usize) -> Option<Command> {
        turn.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    pub fn commands(&self) -> &[Command; TURNS] {
        &self.0
    }

    pub fn count(&self, command: Command) -> usize {
        self.0.iter().filter(|c| **c == command).count()
    }

    /// 0-based indices of the turns that use `command`.
    pub fn turns_with(&self, command: Command) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == command)
            .map(|(i, _)| i)
            .collect()
    }

    /// Checks the plan against a character's quotas, reporting the first
    /// command (in Attack, Block, Counter order) that goes over.
    pub fn check_limits(&self, limits: &CommandLimits) -> Result<(), PlanError> {
        for (command, limit) in [
            (Command::Attack, limits.attack),
            (Command::Block, limits.block),
            (Command::Counter, limits.counter),
        ] {
            let used = self.count(command);
            if used > limit {
                return Err(PlanError::QuotaExceeded {
                    command,
                    used,
                    limit,
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Command>> for Plan {
    type Error = PlanError;

    fn try_from(commands: Vec<Command>) -> Result<Self, Self::Error> {
        Plan::new(&commands)
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::idle()
    }
}

/// How many times a character may plan each limited command. Idle is unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandLimits {
    pub attack: usize,
    pub block: usize,
    pub counter: usize,
}

impl CommandLimits {
    pub const BASE: CommandLimits = CommandLimits {
        attack: 5,
        block: 2,
        counter: 1,
    };

    pub fn for_character(character: Character) -> CommandLimits {
        match character {
            Character::Fighter => CommandLimits {
                attack: 6,
                ..Self::BASE
            },
            _ => Self::BASE,
        }
    }

    /// Quota for `command`; `None` means unlimited.
    pub fn limit(&self, command: Command) -> Option<usize> {
        match command {
            Command::Attack => Some(self.attack),
            Command::Block => Some(self.block),
            Command::Counter => Some(self.counter),
            Command::Idle => None,
            Command::ForcedSkip => Some(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Command::*;

    #[test]
    fn rejects_short_plan() {
        let err = Plan::new(&[Attack; 11]).unwrap_err();
        assert_eq!(
            err,
            PlanError::WrongLength {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn rejects_long_plan() {
        assert!(matches!(
            Plan::new(&[Idle; 13]),
            Err(PlanError::WrongLength { actual: 13, .. })
        ));
    }

    #[test]
    fn rejects_planned_forced_skip() {
        let mut commands = [Idle; TURNS];
        commands[4] = ForcedSkip;
        assert_eq!(
            Plan::new(&commands),
            Err(PlanError::ForcedSkipPlanned { turn: 5 })
        );
    }

    #[test]
    fn command_is_one_based() {
        let mut commands = [Idle; TURNS];
        commands[0] = Attack;
        commands[11] = Block;
        let plan = Plan::new(&commands).unwrap();
        assert_eq!(plan.command(1), Some(Attack));
        assert_eq!(plan.command(12), Some(Block));
        assert_eq!(plan.command(0), None);
        assert_eq!(plan.command(13), None);
    }

    #[test]
    fn engine_accepts_over_quota_plans() {
        let plan = Plan::new(&[Attack; TURNS]).unwrap();
        assert_eq!(plan.count(Attack), 12);
        assert_eq!(
            plan.check_limits(&CommandLimits::BASE),
            Err(PlanError::QuotaExceeded {
                command: Attack,
                used: 12,
                limit: 5
            })
        );
    }

    #[test]
    fn fighter_gets_six_attacks() {
        let mut commands = [Idle; TURNS];
        for c in commands.iter_mut().take(6) {
            *c = Attack;
        }
        let plan = Plan::new(&commands).unwrap();
        assert!(plan
            .check_limits(&CommandLimits::for_character(Character::Fighter))
            .is_ok());
        assert!(plan
            .check_limits(&CommandLimits::for_character(Character::Normal))
            .is_err());
    }

    #[test]
    fn counter_quota_is_one() {
        let mut commands = [Idle; TURNS];
        commands[2] = Counter;
        commands[7] = Counter;
        let plan = Plan::new(&commands).unwrap();
        assert_eq!(plan.turns_with(Counter), vec![2, 7]);
        assert!(matches!(
            plan.check_limits(&CommandLimits::BASE),
            Err(PlanError::QuotaExceeded {
                command: Counter,
                ..
            })
        ));
    }

    #[test]
    fn idle_is_unlimited() {
        assert_eq!(CommandLimits::BASE.limit(Idle), None);
        assert!(Plan::idle().check_limits(&CommandLimits::BASE).is_ok());
    }
}
