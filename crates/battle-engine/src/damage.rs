//! Character modifiers for each damage branch of the turn resolver.
//!
//! All amounts are half-hearts: 2 = one heart.

use crate::types::{Character, SkipReason};

/// A clean hit, or a successful plain counter.
pub const HIT: u8 = 2;

/// A glancing hit: attack into a block, Ninja chip, Plasma extras.
pub const CHIP: u8 = 1;

/// Damage a side deals when both fighters idle.
pub fn double_idle_damage(character: Character) -> u8 {
    match character {
        Character::Beam => HIT,
        _ => 0,
    }
}

/// Damage an attacker still deals when both fighters attack.
pub fn clash_damage(attacker: Character) -> u8 {
    match attacker {
        Character::Ninja => CHIP,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterDamage {
    /// Reflected damage.
    pub base: u8,
    /// Plasma bonus on top of `base`.
    pub surge: u8,
}

impl CounterDamage {
    pub fn total(&self) -> u8 {
        self.base + self.surge
    }
}

/// Damage a successful counter returns to the attacker.
pub fn counter_damage(counterer: Character, attacker: Character) -> CounterDamage {
    let base = match counterer {
        Character::Mirror => 2 * HIT,
        Character::Normal
        | Character::Fighter
        | Character::HiJump
        | Character::Stone
        | Character::Plasma
        | Character::Fire
        | Character::Beam
        | Character::Ninja => HIT,
    };
    // Fire is never fully shielded, so Plasma's retaliation never triggers on it.
    let surge = match (counterer, attacker) {
        (Character::Plasma, Character::Fire) => 0,
        (Character::Plasma, _) => CHIP,
        _ => 0,
    };
    CounterDamage { base, surge }
}

/// Whether a successful counter stops this attacker's attack outright.
pub fn counter_negates(attacker: Character) -> bool {
    !matches!(attacker, Character::Fire)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockDamage {
    /// Damage that gets through to the defender.
    pub through: u8,
    /// Damage the defender sends back to the attacker.
    pub zap: u8,
}

/// Outcome of an attack landing on a block.
pub fn block_damage(defender: Character) -> BlockDamage {
    match defender {
        Character::Stone => BlockDamage { through: 0, zap: 0 },
        Character::Plasma => BlockDamage { through: CHIP, zap: CHIP },
        Character::Normal
        | Character::Fighter
        | Character::HiJump
        | Character::Mirror
        | Character::Fire
        | Character::Beam
        | Character::Ninja => BlockDamage { through: CHIP, zap: 0 },
    }
}

/// Whether a forced skip with this cause makes the fighter untouchable.
pub fn recovery_invincible(character: Character, reason: SkipReason) -> bool {
    matches!(
        (character, reason),
        (Character::HiJump, SkipReason::FailedCounter)
    )
}
