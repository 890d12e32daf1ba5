//! Match controller: runs two committed plans through the turn resolver,
//! checks for a decision after every turn, and breaks a 12-turn stalemate
//! with a sudden-death coin flip.

use rand::Rng;
use tracing::info;

use crate::codec::encode_command;
use crate::combat::resolve_turn;
use crate::error::PlanError;
use crate::narration::{describe_reason, format_hearts};
use crate::plan::Plan;
use crate::types::{BattleResult, Command, Fighter, Reason, Side, TurnRecord, TURNS};

/// How a match was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// `None` for a double KO.
    pub winner: Option<Side>,
    pub reason: Reason,
}

/// A match in progress. Owns both fighters for its whole lifetime.
///
/// [`Battle::step`] resolves one turn at a time for playback drivers;
/// [`Battle::finish`] runs whatever is left and produces the result.
#[derive(Clone, Debug)]
pub struct Battle {
    player: Fighter,
    opponent: Fighter,
    player_plan: Plan,
    opponent_plan: Plan,
    log: Vec<TurnRecord>,
    verdict: Option<Verdict>,
}

impl Battle {
    pub fn new(player: Fighter, opponent: Fighter, player_plan: Plan, opponent_plan: Plan) -> Battle {
        Battle {
            player,
            opponent,
            player_plan,
            opponent_plan,
            log: Vec::with_capacity(TURNS),
            verdict: None,
        }
    }

    pub fn player(&self) -> &Fighter {
        &self.player
    }

    pub fn opponent(&self) -> &Fighter {
        &self.opponent
    }

    pub fn log(&self) -> &[TurnRecord] {
        &self.log
    }

    /// Number of turns resolved so far.
    pub fn turns_played(&self) -> usize {
        self.log.len()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn is_decided(&self) -> bool {
        self.verdict.is_some()
    }

    /// Decided, or every planned turn has been resolved.
    pub fn is_finished(&self) -> bool {
        self.is_decided() || self.log.len() >= TURNS
    }

    /// Resolve the next turn. Returns `None` once the match is finished.
    pub fn step(&mut self) -> Option<&TurnRecord> {
        if self.is_finished() {
            return None;
        }
        let index = self.log.len();
        let turn = index + 1;
        let outcome = resolve_turn(
            turn as u8,
            &mut self.player,
            &mut self.opponent,
            self.player_plan.commands()[index],
            self.opponent_plan.commands()[index],
        );
        self.log.push(TurnRecord {
            outcome,
            player: self.player.snapshot(),
            opponent: self.opponent.snapshot(),
        });

        self.verdict = check_decision(&self.player, &self.opponent);
        if let Some(verdict) = self.verdict {
            info!(
                turn,
                winner = ?verdict.winner,
                reason = ?verdict.reason,
                "battle decided"
            );
        }
        self.log.last()
    }

    /// Resolve the remaining turns, then flip for sudden death if nobody won.
    pub fn finish<R: Rng + ?Sized>(mut self, rng: &mut R) -> BattleResult {
        while self.step().is_some() {}

        let (verdict, went_to_sudden_death) = match self.verdict {
            Some(verdict) => (verdict, false),
            None => {
                let verdict = sudden_death(rng);
                info!(winner = ?verdict.winner, "sudden death");
                (verdict, true)
            }
        };

        BattleResult {
            winner: verdict.winner,
            reason: verdict.reason,
            log: self.log,
            sudden_death: went_to_sudden_death,
            player: self.player,
            opponent: self.opponent,
        }
    }
}

/// Termination checks, in priority order: double KO, hearts, pressure.
pub fn check_decision(player: &Fighter, opponent: &Fighter) -> Option<Verdict> {
    let decided = |winner, reason| Some(Verdict { winner, reason });

    if player.is_down() && opponent.is_down() {
        return decided(None, Reason::DoubleKo);
    }
    if opponent.is_down() {
        return decided(Some(Side::Player), Reason::HeartsDepleted);
    }
    if player.is_down() {
        return decided(Some(Side::Opponent), Reason::HeartsDepleted);
    }
    if opponent.is_knocked_off() {
        return decided(Some(Side::Player), Reason::KnockedOff);
    }
    if player.is_knocked_off() {
        return decided(Some(Side::Opponent), Reason::KnockedOff);
    }
    None
}

/// One uniform random bit: `true` means the player lands the KO strike.
pub fn sudden_death<R: Rng + ?Sized>(rng: &mut R) -> Verdict {
    let winner = if rng.gen::<bool>() {
        Side::Player
    } else {
        Side::Opponent
    };
    Verdict {
        winner: Some(winner),
        reason: Reason::SuddenDeath,
    }
}

/// Run a whole match from validated plans.
pub fn run_battle<R: Rng + ?Sized>(
    player: Fighter,
    opponent: Fighter,
    player_plan: Plan,
    opponent_plan: Plan,
    rng: &mut R,
) -> BattleResult {
    Battle::new(player, opponent, player_plan, opponent_plan).finish(rng)
}

/// Run a whole match from raw command sequences. Both are validated before
/// any turn is resolved.
pub fn run_battle_from_commands<R: Rng + ?Sized>(
    player: Fighter,
    opponent: Fighter,
    player_plan: &[Command],
    opponent_plan: &[Command],
    rng: &mut R,
) -> Result<BattleResult, PlanError> {
    let player_plan = Plan::new(player_plan)?;
    let opponent_plan = Plan::new(opponent_plan)?;
    Ok(run_battle(player, opponent, player_plan, opponent_plan, rng))
}

impl BattleResult {
    /// Deterministic text log: three lines per turn, then the result.
    pub fn transcript(&self) -> Vec<String> {
        let p = &self.player.name;
        let o = &self.opponent.name;
        let mut lines = Vec::with_capacity(self.log.len() * 3 + 2);

        for record in &self.log {
            let outcome = &record.outcome;
            lines.push(format!(
                "Turn {}: {p}[{}] vs {o}[{}] -> {}",
                outcome.turn,
                encode_command(outcome.player_command),
                encode_command(outcome.opponent_command),
                outcome.narration
            ));
            lines.push(format!(
                "    Hearts: {p}={} | {o}={}",
                format_hearts(record.player.half_hearts),
                format_hearts(record.opponent.half_hearts)
            ));
            lines.push(format!(
                "    Pressure: {p}={} | {o}={}",
                record.player.pressure, record.opponent.pressure
            ));
        }

        if self.sudden_death {
            lines.push("Sudden Death! Each fighter has a 50% chance to land a KO strike.".to_string());
        }

        let loser = self.winner.map(|side| self.fighter(side.other()).name.as_str());
        let reason = describe_reason(self.reason, loser);
        match self.winner_name() {
            Some(name) => lines.push(format!("Winner: {name}. {reason}")),
            None => lines.push(format!("No winner. {reason}")),
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Character, KNOCKOFF_PRESSURE};
    use rand::rngs::mock::StepRng;
    use Command::*;

    fn fighters(p: Character, o: Character) -> (Fighter, Fighter) {
        (Fighter::new("Player", p), Fighter::new("CPU", o))
    }

    fn plan(commands: [Command; TURNS]) -> Plan {
        Plan::new(&commands).unwrap()
    }

    // StepRng(0, 0) always yields 0 -> false; u64::MAX -> true
    fn heads() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn tails() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn quiet_match_goes_to_sudden_death() {
        let (p, o) = fighters(Character::Normal, Character::Normal);
        let result = run_battle(p.clone(), o.clone(), Plan::idle(), Plan::idle(), &mut heads());
        assert!(result.sudden_death);
        assert_eq!(result.reason, Reason::SuddenDeath);
        assert_eq!(result.winner, Some(Side::Player));
        assert_eq!(result.turns_played(), TURNS);

        let result = run_battle(p, o, Plan::idle(), Plan::idle(), &mut tails());
        assert_eq!(result.winner, Some(Side::Opponent));
        assert_eq!(result.winner_name(), Some("CPU"));
    }

    #[test]
    fn hearts_ko_stops_the_loop() {
        let (p, o) = fighters(Character::Mirror, Character::Normal);
        // Mirror counters for 4 half-hearts: 6 -> 2, a quiet turn, then 2 -> 0.
        let mut player = [Idle; TURNS];
        let mut opponent = [Idle; TURNS];
        player[0] = Counter;
        opponent[0] = Attack;
        player[2] = Counter;
        opponent[2] = Attack;
        let result = run_battle(p, o, plan(player), plan(opponent), &mut tails());
        assert_eq!(result.winner, Some(Side::Player));
        assert_eq!(result.reason, Reason::HeartsDepleted);
        assert_eq!(result.turns_played(), 3);
        assert!(!result.sudden_death);
        assert_eq!(result.opponent.half_hearts, 0);
    }

    #[test]
    fn pressure_knockoff_ends_match() {
        let (p, o) = fighters(Character::Normal, Character::Normal);
        // Opponent blocks four attacks: 0.5 each, never answering.
        let mut player = [Idle; TURNS];
        let mut opponent = [Idle; TURNS];
        for i in 0..4 {
            player[i] = Attack;
            opponent[i] = Block;
        }
        let result = run_battle(p, o, plan(player), plan(opponent), &mut tails());
        // only 2 blocks would be legal for a planner; the engine doesn't care
        assert_eq!(result.turns_played(), 4);
        assert_eq!(result.reason, Reason::KnockedOff);
        assert_eq!(result.winner, Some(Side::Player));
        assert_eq!(result.opponent.pressure, KNOCKOFF_PRESSURE);
        assert_eq!(result.opponent.half_hearts, 2);
    }

    #[test]
    fn double_ko_has_no_winner() {
        let mut p = Fighter::new("Player", Character::Beam);
        let mut o = Fighter::new("CPU", Character::Beam);
        p.half_hearts = 2;
        o.half_hearts = 2;
        let result = run_battle(p, o, Plan::idle(), Plan::idle(), &mut heads());
        assert_eq!(result.winner, None);
        assert_eq!(result.reason, Reason::DoubleKo);
        assert!(!result.sudden_death);
        assert_eq!(result.turns_played(), 1);
    }

    #[test]
    fn step_playback_matches_finish() {
        let (p, o) = fighters(Character::Ninja, Character::Normal);
        let attacks = plan([Attack; TURNS]);

        let mut battle = Battle::new(p.clone(), o.clone(), attacks, attacks);
        let mut steps = 0;
        while let Some(record) = battle.step() {
            steps += 1;
            assert_eq!(record.outcome.turn as usize, steps);
        }
        assert!(battle.is_decided());
        assert!(battle.step().is_none());

        let result = run_battle(p, o, attacks, attacks, &mut tails());
        assert_eq!(result.log, battle.log());
    }

    #[test]
    fn raw_commands_validated_before_any_turn() {
        let (p, o) = fighters(Character::Normal, Character::Normal);
        let err = run_battle_from_commands(p, o, &[Attack; 12], &[Attack; 11], &mut tails())
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::WrongLength {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn decision_priority() {
        let (mut p, mut o) = fighters(Character::Normal, Character::Normal);
        assert_eq!(check_decision(&p, &o), None);

        p.pressure = KNOCKOFF_PRESSURE;
        o.half_hearts = 0;
        // hearts are checked before pressure
        assert_eq!(
            check_decision(&p, &o),
            Some(Verdict {
                winner: Some(Side::Player),
                reason: Reason::HeartsDepleted
            })
        );

        o.half_hearts = 1;
        o.pressure = KNOCKOFF_PRESSURE;
        assert_eq!(
            check_decision(&p, &o),
            Some(Verdict {
                winner: Some(Side::Player),
                reason: Reason::KnockedOff
            })
        );
    }

    #[test]
    fn transcript_layout() {
        let (p, o) = fighters(Character::Normal, Character::Normal);
        let mut player = [Idle; TURNS];
        player[0] = Attack;
        let result = run_battle(p, o, plan(player), Plan::idle(), &mut tails());
        let lines = result.transcript();
        assert_eq!(lines[0], "Turn 1: Player[A] vs CPU[I] -> Player ATTACK lands: CPU takes 1.");
        assert_eq!(lines[1], "    Hearts: Player=3 | CPU=2");
        assert_eq!(lines[2], "    Pressure: Player=0 | CPU=1");
        assert_eq!(lines.len(), TURNS * 3 + 2);
        assert_eq!(
            lines[lines.len() - 2],
            "Sudden Death! Each fighter has a 50% chance to land a KO strike."
        );
        assert_eq!(lines[lines.len() - 1], "Winner: CPU. Sudden Death KO strike.");
    }
}
