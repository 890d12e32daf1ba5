use tracing::{debug, trace};

use crate::damage::{
    block_damage, clash_damage, counter_damage, counter_negates, double_idle_damage,
    recovery_invincible, HIT,
};
use crate::narration::{narrate, Names};
use crate::types::{Character, Command, Fighter, Side, SkipReason, TurnEvent, TurnOutcome};

/// Damage one side's action sends each way, in half-hearts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Strike {
    to_target: u8,
    to_self: u8,
}

/// Resolve one turn between two fighters.
///
/// Consumes any pending forced skip, applies the rule table in priority order,
/// mutates hearts, pressure and pending skips in place, and returns the
/// effective commands, damage taken and narration. Deterministic.
pub fn resolve_turn(
    turn: u8,
    player: &mut Fighter,
    opponent: &mut Fighter,
    planned_player: Command,
    planned_opponent: Command,
) -> TurnOutcome {
    let mut events = Vec::new();

    // 1. Forced-skip substitution
    let (player_cmd, player_invincible) = take_pending_skip(player, planned_player);
    let (opponent_cmd, opponent_invincible) = take_pending_skip(opponent, planned_opponent);

    for (side, cmd, invincible) in [
        (Side::Player, player_cmd, player_invincible),
        (Side::Opponent, opponent_cmd, opponent_invincible),
    ] {
        if cmd == Command::ForcedSkip {
            events.push(TurnEvent::Recovering { side });
        }
        if invincible {
            events.push(TurnEvent::Airborne { side });
        }
    }

    let player_char = player.character;
    let opponent_char = opponent.character;
    let mut to_player: u8 = 0;
    let mut to_opponent: u8 = 0;

    match (player_cmd, opponent_cmd) {
        // 2. Double idle
        (Command::Idle, Command::Idle) => {
            events.push(TurnEvent::BothIdled);
            for (side, character) in [(Side::Player, player_char), (Side::Opponent, opponent_char)] {
                let damage = double_idle_damage(character);
                if damage > 0 {
                    events.push(TurnEvent::BeamFired { side, damage });
                    match side {
                        Side::Player => to_opponent += damage,
                        Side::Opponent => to_player += damage,
                    }
                }
            }
        }
        // 3. Clash: nothing else resolves this turn
        (Command::Attack, Command::Attack) => {
            to_opponent = clash_damage(player_char);
            to_player = clash_damage(opponent_char);
            events.push(TurnEvent::Clash {
                harmless: to_player == 0 && to_opponent == 0,
            });
            if to_opponent > 0 {
                events.push(TurnEvent::NinjaSlip {
                    side: Side::Player,
                    damage: to_opponent,
                });
            }
            if to_player > 0 {
                events.push(TurnEvent::NinjaSlip {
                    side: Side::Opponent,
                    damage: to_player,
                });
            }
        }
        _ => {
            // 4. Counters, before attacks
            to_opponent += resolve_counter(
                Side::Player,
                player,
                player_cmd,
                opponent_char,
                opponent_cmd,
                &mut events,
            );
            to_player += resolve_counter(
                Side::Opponent,
                opponent,
                opponent_cmd,
                player_char,
                player_cmd,
                &mut events,
            );

            // 5. Attacks that survived negation
            let player_strike = resolve_attack(
                Side::Player,
                player_char,
                player_cmd,
                opponent_char,
                opponent_cmd,
                &mut events,
            );
            let opponent_strike = resolve_attack(
                Side::Opponent,
                opponent_char,
                opponent_cmd,
                player_char,
                player_cmd,
                &mut events,
            );
            to_opponent += player_strike.to_target + opponent_strike.to_self;
            to_player += opponent_strike.to_target + player_strike.to_self;
        }
    }

    // 6. Invincibility
    if player_invincible && to_player > 0 {
        events.push(TurnEvent::Untouched {
            side: Side::Player,
            negated: to_player,
        });
        to_player = 0;
    }
    if opponent_invincible && to_opponent > 0 {
        events.push(TurnEvent::Untouched {
            side: Side::Opponent,
            negated: to_opponent,
        });
        to_opponent = 0;
    }

    // 7. Hearts and pressure
    apply_damage(player, to_player, to_opponent > 0);
    apply_damage(opponent, to_opponent, to_player > 0);

    // 8. Narration
    if events.is_empty() {
        events.push(TurnEvent::NoDamage);
    }
    let narration = narrate(
        &events,
        Names {
            player: &player.name,
            opponent: &opponent.name,
        },
    );

    debug!(
        turn,
        player_cmd = ?player_cmd,
        opponent_cmd = ?opponent_cmd,
        to_player,
        to_opponent,
        player_hearts = player.half_hearts,
        opponent_hearts = opponent.half_hearts,
        player_pressure = player.pressure,
        opponent_pressure = opponent.pressure,
        "turn resolved"
    );

    TurnOutcome {
        turn,
        player_command: player_cmd,
        opponent_command: opponent_cmd,
        damage_to_player: to_player,
        damage_to_opponent: to_opponent,
        events,
        narration,
    }
}

/// Returns the effective command and whether the fighter is untouchable this
/// turn. Always clears the pending skip.
fn take_pending_skip(fighter: &mut Fighter, planned: Command) -> (Command, bool) {
    match fighter.pending_skip.take() {
        Some(reason) => {
            trace!(fighter = %fighter.name, ?reason, ?planned, "forced skip consumed");
            (
                Command::ForcedSkip,
                recovery_invincible(fighter.character, reason),
            )
        }
        None => (planned, false),
    }
}

/// Damage a counter sends back. A counter into anything but an attack whiffs
/// and schedules a recovery turn for the counterer.
fn resolve_counter(
    side: Side,
    counterer: &mut Fighter,
    own: Command,
    attacker_char: Character,
    other: Command,
    events: &mut Vec<TurnEvent>,
) -> u8 {
    if own != Command::Counter {
        return 0;
    }
    match other {
        Command::Attack => {
            let damage = counter_damage(counterer.character, attacker_char);
            events.push(TurnEvent::Countered {
                side,
                damage: damage.base,
            });
            if damage.surge > 0 {
                events.push(TurnEvent::PlasmaSurge {
                    side,
                    damage: damage.surge,
                });
            }
            damage.total()
        }
        Command::Block | Command::Counter | Command::Idle | Command::ForcedSkip => {
            counterer.pending_skip = Some(SkipReason::FailedCounter);
            events.push(TurnEvent::CounterWhiffed { side });
            0
        }
    }
}

fn resolve_attack(
    side: Side,
    attacker_char: Character,
    own: Command,
    defender_char: Character,
    other: Command,
    events: &mut Vec<TurnEvent>,
) -> Strike {
    if own != Command::Attack {
        return Strike::default();
    }
    if other == Command::Counter {
        if counter_negates(attacker_char) {
            return Strike::default();
        }
        events.push(TurnEvent::BurnedThrough { side });
    }
    match other {
        Command::Block => {
            let block = block_damage(defender_char);
            events.push(TurnEvent::Blocked {
                attacker: side,
                damage: block.through,
            });
            if block.zap > 0 {
                events.push(TurnEvent::PlasmaZap {
                    side: side.other(),
                    damage: block.zap,
                });
            }
            Strike {
                to_target: block.through,
                to_self: block.zap,
            }
        }
        Command::Attack | Command::Counter | Command::Idle | Command::ForcedSkip => {
            events.push(TurnEvent::Landed { side, damage: HIT });
            Strike {
                to_target: HIT,
                to_self: 0,
            }
        }
    }
}

/// Hearts floor at 0. Pressure rises only when hit without answering back,
/// and otherwise drains by one, floored at 0.
fn apply_damage(fighter: &mut Fighter, taken: u8, dealt: bool) {
    fighter.half_hearts = fighter.half_hearts.saturating_sub(taken);
    if taken > 0 && !dealt {
        fighter.pressure += 1;
    } else {
        fighter.pressure = fighter.pressure.saturating_sub(1);
    }
}
