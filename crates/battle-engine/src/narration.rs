//! Human-readable text for resolved turns and matches.

use crate::types::{Reason, Side, TurnEvent};

/// Formats a half-heart amount as hearts: `1` -> `0.5`, `2` -> `1`, `3` -> `1.5`.
pub fn format_hearts(half_hearts: u8) -> String {
    let whole = half_hearts / 2;
    if half_hearts % 2 == 0 {
        whole.to_string()
    } else {
        format!("{whole}.5")
    }
}

/// Names of both fighters, for rendering events.
#[derive(Clone, Copy, Debug)]
pub struct Names<'a> {
    pub player: &'a str,
    pub opponent: &'a str,
}

impl<'a> Names<'a> {
    pub fn of(&self, side: Side) -> &'a str {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

pub fn describe(event: &TurnEvent, names: Names<'_>) -> String {
    match *event {
        TurnEvent::Recovering { side } => format!("{} is recovering (SKIP).", names.of(side)),
        TurnEvent::Airborne { side } => {
            format!("{} leaps clear while recovering (HI-JUMP).", names.of(side))
        }
        TurnEvent::BothIdled => "Both idled.".to_string(),
        TurnEvent::BeamFired { side, damage } => format!(
            "{} fires a BEAM! {} takes {}.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::Clash { harmless: true } => "Both attacked: clash! No damage.".to_string(),
        TurnEvent::Clash { harmless: false } => "Both attacked: clash!".to_string(),
        TurnEvent::NinjaSlip { side, damage } => format!(
            "{} slips a NINJA strike through the clash: {} takes {}.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::Countered { side, damage } => format!(
            "{} COUNTERED! {} takes {}.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::PlasmaSurge { side, damage } => format!(
            "{}'s PLASMA shield surges: {} takes {} more.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::CounterWhiffed { side } => {
            format!("{} countered too early: recovery next turn.", names.of(side))
        }
        TurnEvent::BurnedThrough { side } => {
            format!("{}'s FIRE attack burns through the counter!", names.of(side))
        }
        TurnEvent::Blocked { attacker, damage: 0 } => format!(
            "{} ATTACK hits a STONE block: {} takes nothing.",
            names.of(attacker),
            names.of(attacker.other())
        ),
        TurnEvent::Blocked { attacker, damage } => format!(
            "{} ATTACK hits a BLOCK: {} takes {}.",
            names.of(attacker),
            names.of(attacker.other()),
            format_hearts(damage)
        ),
        TurnEvent::PlasmaZap { side, damage } => format!(
            "{}'s PLASMA block zaps back: {} takes {}.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::Landed { side, damage } => format!(
            "{} ATTACK lands: {} takes {}.",
            names.of(side),
            names.of(side.other()),
            format_hearts(damage)
        ),
        TurnEvent::Untouched { side, negated } => format!(
            "{} is out of reach: {} damage negated.",
            names.of(side),
            format_hearts(negated)
        ),
        TurnEvent::NoDamage => "No damage this turn.".to_string(),
    }
}

/// Joins the descriptions of all events of one turn.
pub fn narrate(events: &[TurnEvent], names: Names<'_>) -> String {
    events
        .iter()
        .map(|event| describe(event, names))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn describe_reason(reason: Reason, loser: Option<&str>) -> String {
    match (reason, loser) {
        (Reason::DoubleKo, _) => "Double KO!".to_string(),
        (Reason::HeartsDepleted, Some(name)) => format!("{name}'s hearts reached 0."),
        (Reason::KnockedOff, Some(name)) => {
            format!("{name} was knocked off the stage (pressure).")
        }
        (Reason::SuddenDeath, _) => "Sudden Death KO strike.".to_string(),
        (Reason::HeartsDepleted, None) => "Hearts reached 0.".to_string(),
        (Reason::KnockedOff, None) => "Knocked off the stage (pressure).".to_string(),
    }
}
