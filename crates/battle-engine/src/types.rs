#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of planned turns in a match.
pub const TURNS: usize = 12;

/// Starting (and maximum) hearts, in half-heart units. 6 = 3 hearts.
pub const MAX_HALF_HEARTS: u8 = 6;

/// Pressure at which a fighter is knocked off the stage.
pub const KNOCKOFF_PRESSURE: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Command {
    Attack = 0,
    Block = 1,
    Counter = 2,
    /// Voluntary no-op.
    Idle = 3,
    /// Recovery turn imposed by a failed counter. Never planned.
    ForcedSkip = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Character {
    Normal = 0,
    /// Red.
    Fighter = 1,
    /// Blue.
    HiJump = 2,
    /// Brown.
    Stone = 3,
    /// Green.
    Plasma = 4,
    /// White.
    Mirror = 5,
    /// Orange.
    Fire = 6,
    /// Yellow.
    Beam = 7,
    /// Purple.
    Ninja = 8,
}

impl Character {
    pub const ALL: [Character; 9] = [
        Character::Normal,
        Character::Fighter,
        Character::HiJump,
        Character::Stone,
        Character::Plasma,
        Character::Mirror,
        Character::Fire,
        Character::Beam,
        Character::Ninja,
    ];

    pub fn from_id(id: u8) -> Option<Character> {
        Self::ALL.get(id as usize).copied()
    }

    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Why a fighter's next turn is forced to [`Command::ForcedSkip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipReason {
    FailedCounter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Persistent per-match state of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fighter {
    pub name: String,
    pub character: Character,
    /// Remaining hearts in half-heart units, `0..=MAX_HALF_HEARTS`.
    pub half_hearts: u8,
    pub pressure: u32,
    /// Set when the next resolved turn must be a forced skip.
    pub pending_skip: Option<SkipReason>,
}

impl Fighter {
    pub fn new(name: impl Into<String>, character: Character) -> Self {
        Fighter {
            name: name.into(),
            character,
            half_hearts: MAX_HALF_HEARTS,
            pressure: 0,
            pending_skip: None,
        }
    }

    pub fn hearts(&self) -> f32 {
        f32::from(self.half_hearts) / 2.0
    }

    pub fn skip_next(&self) -> bool {
        self.pending_skip.is_some()
    }

    pub fn is_down(&self) -> bool {
        self.half_hearts == 0
    }

    pub fn is_knocked_off(&self) -> bool {
        self.pressure >= KNOCKOFF_PRESSURE
    }

    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            half_hearts: self.half_hearts,
            pressure: self.pressure,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FighterSnapshot {
    pub half_hearts: u8,
    pub pressure: u32,
}

/// One rule branch that fired while resolving a turn. Damage is in half-hearts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurnEvent {
    Recovering {
        side: Side,
    },
    Airborne {
        side: Side,
    },
    BothIdled,
    BeamFired {
        side: Side,
        damage: u8,
    },
    Clash {
        harmless: bool,
    },
    NinjaSlip {
        side: Side,
        damage: u8,
    },
    Countered {
        side: Side,
        damage: u8,
    },
    PlasmaSurge {
        side: Side,
        damage: u8,
    },
    CounterWhiffed {
        side: Side,
    },
    BurnedThrough {
        side: Side,
    },
    Blocked {
        attacker: Side,
        damage: u8,
    },
    PlasmaZap {
        side: Side,
        damage: u8,
    },
    Landed {
        side: Side,
        damage: u8,
    },
    Untouched {
        side: Side,
        negated: u8,
    },
    NoDamage,
}

/// Result of resolving a single turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnOutcome {
    /// 1-based turn index.
    pub turn: u8,
    /// Effective commands, after forced-skip substitution.
    pub player_command: Command,
    pub opponent_command: Command,
    /// Half-hearts taken this turn.
    pub damage_to_player: u8,
    pub damage_to_opponent: u8,
    pub events: Vec<TurnEvent>,
    pub narration: String,
}

impl TurnOutcome {
    pub fn command(&self, side: Side) -> Command {
        match side {
            Side::Player => self.player_command,
            Side::Opponent => self.opponent_command,
        }
    }

    pub fn damage_to(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.damage_to_player,
            Side::Opponent => self.damage_to_opponent,
        }
    }
}

/// A turn outcome plus both fighters' state after it was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnRecord {
    pub outcome: TurnOutcome,
    pub player: FighterSnapshot,
    pub opponent: FighterSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Reason {
    DoubleKo,
    HeartsDepleted,
    KnockedOff,
    SuddenDeath,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BattleResult {
    /// `None` only for a double KO.
    pub winner: Option<Side>,
    pub reason: Reason,
    pub log: Vec<TurnRecord>,
    pub sudden_death: bool,
    pub player: Fighter,
    pub opponent: Fighter,
}

impl BattleResult {
    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|side| self.fighter(side).name.as_str())
    }

    pub fn turns_played(&self) -> usize {
        self.log.len()
    }
}
