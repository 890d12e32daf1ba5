//! Property-based tests for the match controller and turn resolver.
//!
//! Plans are arbitrary (quotas are not the engine's concern), characters are
//! drawn from the full roster, and the sudden-death RNG is seeded.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use battle_engine::{
    run_battle, BattleResult, Character, Command, Fighter, Plan, Side, KNOCKOFF_PRESSURE,
    MAX_HALF_HEARTS, TURNS,
};

fn planned_command() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![
        Command::Attack,
        Command::Block,
        Command::Counter,
        Command::Idle,
    ])
}

fn plan() -> impl Strategy<Value = Plan> {
    prop::collection::vec(planned_command(), TURNS)
        .prop_map(|commands| Plan::new(&commands).unwrap())
}

fn character() -> impl Strategy<Value = Character> {
    prop::sample::select(Character::ALL.to_vec())
}

fn play(
    player_char: Character,
    opponent_char: Character,
    player_plan: Plan,
    opponent_plan: Plan,
    seed: u64,
) -> BattleResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    run_battle(
        Fighter::new("Player", player_char),
        Fighter::new("CPU", opponent_char),
        player_plan,
        opponent_plan,
        &mut rng,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Hearts never rise and never leave 0..=3.
    #[test]
    fn prop_hearts_bounded_and_non_increasing(
        pc in character(), oc in character(), pp in plan(), op in plan(), seed in any::<u64>()
    ) {
        let result = play(pc, oc, pp, op, seed);
        let mut prev = (MAX_HALF_HEARTS, MAX_HALF_HEARTS);
        for record in &result.log {
            prop_assert!(record.player.half_hearts <= prev.0);
            prop_assert!(record.opponent.half_hearts <= prev.1);
            prev = (record.player.half_hearts, record.opponent.half_hearts);
        }
    }

    /// Reaching knockoff pressure ends the match on that very turn.
    #[test]
    fn prop_knockoff_is_immediate(
        pc in character(), oc in character(), pp in plan(), op in plan(), seed in any::<u64>()
    ) {
        let result = play(pc, oc, pp, op, seed);
        let last = result.log.len() - 1;
        for (i, record) in result.log.iter().enumerate() {
            let knocked = record.player.pressure >= KNOCKOFF_PRESSURE
                || record.opponent.pressure >= KNOCKOFF_PRESSURE;
            if knocked {
                prop_assert_eq!(i, last);
                prop_assert!(result.winner.is_some());
                prop_assert!(!result.sudden_death);
            }
        }
    }

    /// A failed counter costs exactly one turn: never two forced skips in a row.
    #[test]
    fn prop_forced_skip_consumed_once(
        pc in character(), oc in character(), pp in plan(), op in plan(), seed in any::<u64>()
    ) {
        let result = play(pc, oc, pp, op, seed);
        for side in [Side::Player, Side::Opponent] {
            for pair in result.log.windows(2) {
                let first = pair[0].outcome.command(side);
                let second = pair[1].outcome.command(side);
                prop_assert!(!(first == Command::ForcedSkip && second == Command::ForcedSkip));

                let whiffed = first == Command::Counter
                    && pair[0].outcome.command(side.other()) != Command::Attack;
                prop_assert_eq!(whiffed, second == Command::ForcedSkip);
            }
        }
    }

    /// Same plans and seed give an identical result, transcript included.
    #[test]
    fn prop_replay_is_deterministic(
        pc in character(), oc in character(), pp in plan(), op in plan(), seed in any::<u64>()
    ) {
        let first = play(pc, oc, pp, op, seed);
        let second = play(pc, oc, pp, op, seed);
        prop_assert_eq!(first.transcript(), second.transcript());
        prop_assert_eq!(first, second);
    }

    /// Sudden death happens exactly when 12 turns pass with both standing.
    #[test]
    fn prop_sudden_death_only_on_stalemate(
        pc in character(), oc in character(), pp in plan(), op in plan(), seed in any::<u64>()
    ) {
        let result = play(pc, oc, pp, op, seed);
        let stalemate = result.log.len() == TURNS
            && !result.player.is_down()
            && !result.opponent.is_down()
            && !result.player.is_knocked_off()
            && !result.opponent.is_knocked_off();
        prop_assert_eq!(result.sudden_death, stalemate);
        if result.winner.is_none() {
            prop_assert!(result.player.is_down() && result.opponent.is_down());
        }
    }
}
