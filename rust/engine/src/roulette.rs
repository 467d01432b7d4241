//! Escalating-risk game: one player keeps pulling the trigger for a growing
//! multiplier and may cash out after any survived pull.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ActionError;
use crate::game::{GameRng, GameVariant, VariantKind};
use crate::player::{Outcome, Player, PlayerId};
use crate::pot::multiplier_payout;
use crate::rules::Action;

/// Slots in the chamber.
pub const CHAMBERS: usize = 6;

/// Payout multipliers in basis points, indexed by turns survived (capped at 5).
pub const FIXED_MULTIPLIERS: [u32; CHAMBERS] = [10_000, 11_500, 12_800, 13_900, 14_800, 15_500];
pub const ESCALATING_MULTIPLIERS: [u32; CHAMBERS] =
    [10_000, 11_500, 17_000, 32_000, 95_000, 550_000];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSystem {
    /// Every pull fails with probability 1/6
    Fixed,
    /// Pull k fails with probability k/6
    Escalating,
}

impl RiskSystem {
    pub fn table(self) -> &'static [u32; CHAMBERS] {
        match self {
            RiskSystem::Fixed => &FIXED_MULTIPLIERS,
            RiskSystem::Escalating => &ESCALATING_MULTIPLIERS,
        }
    }

    /// Multiplier after `turns` survived pulls.
    pub fn multiplier_bp(self, turns: usize) -> u32 {
        self.table()[turns.min(CHAMBERS - 1)]
    }

    /// Failure slots loaded for the `pull`-th pull (1-based).
    pub fn failure_slots(self, pull: usize) -> usize {
        match self {
            RiskSystem::Fixed => 1,
            RiskSystem::Escalating => pull.clamp(1, CHAMBERS),
        }
    }
}

impl fmt::Display for RiskSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskSystem::Fixed => f.write_str("fixed risk"),
            RiskSystem::Escalating => f.write_str("escalating risk"),
        }
    }
}

impl FromStr for RiskSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fixed" => Ok(RiskSystem::Fixed),
            "e" | "escalating" => Ok(RiskSystem::Escalating),
            other => Err(format!("unknown risk system: {}", other)),
        }
    }
}

/// Loads `failures` slots of a fresh chamber, spins it and fires the first
/// slot. Returns `true` when the pull survives.
pub fn pull_trigger<R: Rng>(system: RiskSystem, pull: usize, rng: &mut R) -> bool {
    let failures = system.failure_slots(pull);
    match system {
        RiskSystem::Fixed => rng.random_range(0..CHAMBERS) >= failures,
        RiskSystem::Escalating => {
            let mut chamber = [false; CHAMBERS];
            chamber[..failures].fill(true);
            chamber.shuffle(rng);
            !chamber[0]
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouletteStatus {
    ChoosingSystem,
    Playing,
    Failed,
    CashedOut,
}

#[derive(Debug)]
pub struct Roulette {
    status: RouletteStatus,
    system: Option<RiskSystem>,
    turns: usize,
}

impl Default for Roulette {
    fn default() -> Self {
        Self::new()
    }
}

impl Roulette {
    pub fn new() -> Self {
        Self {
            status: RouletteStatus::ChoosingSystem,
            system: None,
            turns: 0,
        }
    }

    pub fn status(&self) -> RouletteStatus {
        self.status
    }

    pub fn system(&self) -> Option<RiskSystem> {
        self.system
    }

    pub fn turns_survived(&self) -> usize {
        self.turns
    }

    fn finished(&self) -> bool {
        matches!(
            self.status,
            RouletteStatus::Failed | RouletteStatus::CashedOut
        )
    }

    fn playing_system(&self) -> Result<RiskSystem, ActionError> {
        match (self.status, self.system) {
            (RouletteStatus::Playing, Some(system)) => Ok(system),
            (RouletteStatus::ChoosingSystem, _) => {
                Err(ActionError::illegal("choose a risk system first"))
            }
            _ => Err(ActionError::illegal("the game is over")),
        }
    }
}

impl GameVariant for Roulette {
    fn kind(&self) -> VariantKind {
        VariantKind::Roulette
    }

    fn deal(&mut self, _seats: &[Player], _rng: &mut GameRng) {
        *self = Self::new();
    }

    fn current_player(&self, seats: &[Player]) -> Option<PlayerId> {
        if self.finished() {
            return None;
        }
        seats.first().map(Player::id)
    }

    fn apply(
        &mut self,
        _seats: &mut [Player],
        player: PlayerId,
        action: Action,
        rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        match action {
            Action::ChooseSystem(system) => {
                if self.status != RouletteStatus::ChoosingSystem {
                    return Err(ActionError::illegal("risk system already chosen"));
                }
                self.system = Some(system);
                self.status = RouletteStatus::Playing;
            }
            Action::Pull => {
                let system = self.playing_system()?;
                let pull = self.turns + 1;
                if pull_trigger(system, pull, rng) {
                    self.turns = pull;
                    if self.turns >= CHAMBERS {
                        self.status = RouletteStatus::CashedOut;
                    }
                } else {
                    self.status = RouletteStatus::Failed;
                }
                tracing::debug!(player = %player, pull, status = ?self.status, "trigger pulled");
            }
            Action::CashOut => {
                self.playing_system()?;
                if self.turns == 0 {
                    return Err(ActionError::illegal(
                        "cannot cash out before surviving a turn",
                    ));
                }
                self.status = RouletteStatus::CashedOut;
            }
            other => return Err(ActionError::illegal(format!("cannot {} here", other))),
        }
        Ok(())
    }

    fn should_finish(&self, _seats: &[Player]) -> bool {
        self.finished()
    }

    fn bot_action(&self, _seats: &[Player], _player: PlayerId, _rng: &mut GameRng) -> Option<Action> {
        match self.status {
            RouletteStatus::ChoosingSystem => Some(Action::ChooseSystem(RiskSystem::Fixed)),
            RouletteStatus::Playing if self.turns < 2 => Some(Action::Pull),
            RouletteStatus::Playing => Some(Action::CashOut),
            _ => None,
        }
    }

    fn settle(&self, seats: &[Player]) -> Vec<Outcome> {
        let outcome = match self.status {
            RouletteStatus::CashedOut => Outcome::Won,
            RouletteStatus::Failed => Outcome::Lost,
            _ => Outcome::NoResult,
        };
        vec![outcome; seats.len()]
    }

    fn payout(&self, _seats: &[Player], player: &Player, _total_pot: i64) -> i64 {
        match (player.outcome(), self.system) {
            (Outcome::Won, Some(system)) => {
                multiplier_payout(player.wager(), system.multiplier_bp(self.turns))
            }
            (Outcome::Lost, _) => -player.wager(),
            _ => 0,
        }
    }

    fn describe(&self, _seats: &[Player], _viewer: PlayerId, _complete: bool) -> String {
        match self.system {
            None => "Choose fixed or escalating risk.\n".to_string(),
            Some(system) => {
                let bp = system.multiplier_bp(self.turns);
                format!(
                    "System: {}\nTurns survived: {}\nMultiplier: {}.{:04}x\nStatus: {:?}\n",
                    system,
                    self.turns,
                    bp / 10_000,
                    bp % 10_000,
                    self.status
                )
            }
        }
    }
}
