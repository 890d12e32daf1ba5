//! Rule-based opponent: picks a character and builds a legal plan that reacts
//! to the player's already-committed plan.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::plan::{CommandLimits, Plan};
use crate::types::{Character, Command, TURNS};

/// Chance of picking from the matchup list rather than the full roster.
const SUGGESTED_WEIGHT: f64 = 0.70;

/// Chance a Fire opponent still spends its counter.
const FIRE_COUNTER_CHANCE: f64 = 0.25;

/// Preferred block turns (0-based), mid-game.
const MID_GAME: std::ops::RangeInclusive<usize> = 4..=8;

/// Characters that play well into `player`.
pub fn suggested_opponents(player: Character) -> &'static [Character] {
    use Character::*;
    match player {
        // counters are unsafe against Fire
        Fire => &[Stone, Plasma, Mirror, Fighter],
        Mirror => &[Fire, HiJump, Stone],
        Beam => &[Fighter, Fire, Plasma],
        HiJump => &[Fire, Mirror, Plasma],
        Stone => &[Fire, Mirror, Beam],
        Plasma => &[Mirror, Stone, Fighter],
        Ninja => &[Fighter, Mirror, HiJump],
        Fighter => &[Mirror, Stone, HiJump],
        Normal => &[Fighter, HiJump, Stone, Plasma, Mirror, Fire, Beam, Ninja],
    }
}

pub fn choose_opponent_character<R: Rng + ?Sized>(player: Character, rng: &mut R) -> Character {
    let pool: &[Character] = if rng.gen_bool(SUGGESTED_WEIGHT) {
        suggested_opponents(player)
    } else {
        &Character::ALL
    };
    pool.choose(rng).copied().unwrap_or(Character::Normal)
}

/// Build a plan for `character` against the player's committed plan.
///
/// The result always respects [`CommandLimits::for_character`] and never
/// contains a forced skip. Leftover turns are Idle.
pub fn build_opponent_plan<R: Rng + ?Sized>(
    player_plan: &Plan,
    character: Character,
    rng: &mut R,
) -> Plan {
    let limits = CommandLimits::for_character(character);
    let mut plan = [Command::Idle; TURNS];
    let mut attacks = limits.attack;
    let mut blocks = limits.block;
    let mut counters = limits.counter;

    let attack_turns = player_plan.turns_with(Command::Attack);

    // 1. Counter one turn the player attacks
    let mut use_counter = counters > 0 && !attack_turns.is_empty();
    if character == Character::Fire {
        use_counter = use_counter && rng.gen_bool(FIRE_COUNTER_CHANCE);
    }
    if use_counter {
        if let Some(&i) = attack_turns.choose(rng) {
            plan[i] = Command::Counter;
            counters -= 1;
        }
    }

    // 2. Blocks: Stone soaks attacks first, then mid-game, then attack turns
    let mut place_block = |i: usize, plan: &mut [Command; TURNS]| {
        if blocks > 0 && plan[i] == Command::Idle {
            plan[i] = Command::Block;
            blocks -= 1;
        }
    };
    if character == Character::Stone {
        for &i in &attack_turns {
            place_block(i, &mut plan);
        }
    }
    let mut mid_game: Vec<usize> = MID_GAME.collect();
    mid_game.shuffle(rng);
    for i in mid_game {
        place_block(i, &mut plan);
    }
    for &i in &attack_turns {
        place_block(i, &mut plan);
    }

    // 3. Attacks on what's left; Ninja front-loads them
    let mut empty: Vec<usize> = (0..TURNS).filter(|&i| plan[i] == Command::Idle).collect();
    empty.shuffle(rng);
    if character == Character::Ninja {
        empty.sort_unstable();
    }
    for i in empty {
        if attacks == 0 {
            break;
        }
        plan[i] = Command::Attack;
        attacks -= 1;
    }

    debug!(?character, used_counter = counters == 0, "opponent plan built");

    Plan::new(&plan).unwrap_or_default()
}
