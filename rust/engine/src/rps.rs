use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::ActionError;
use crate::game::{GameRng, GameVariant, VariantKind};
use crate::player::{Outcome, Player, PlayerId};
use crate::pot::even_money;
use crate::rules::Action;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    /// Rock beats Scissors, Paper beats Rock, Scissors beats Paper.
    pub fn beats(self, other: Throw) -> bool {
        matches!(
            (self, other),
            (Throw::Rock, Throw::Scissors)
                | (Throw::Paper, Throw::Rock)
                | (Throw::Scissors, Throw::Paper)
        )
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Throw::Rock => "rock",
            Throw::Paper => "paper",
            Throw::Scissors => "scissors",
        };
        f.write_str(s)
    }
}

impl FromStr for Throw {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Throw::Rock),
            "p" | "paper" => Ok(Throw::Paper),
            "s" | "scissors" => Ok(Throw::Scissors),
            other => Err(format!("unknown throw: {}", other)),
        }
    }
}

/// Two players throw simultaneously; either may go first.
#[derive(Debug, Default)]
pub struct RockPaperScissors {
    throws: HashMap<PlayerId, Throw>,
}

impl RockPaperScissors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn throw_of(&self, player: PlayerId) -> Option<Throw> {
        self.throws.get(&player).copied()
    }
}

impl GameVariant for RockPaperScissors {
    fn kind(&self) -> VariantKind {
        VariantKind::RockPaperScissors
    }

    fn deal(&mut self, _seats: &[Player], _rng: &mut GameRng) {
        self.throws.clear();
    }

    fn current_player(&self, seats: &[Player]) -> Option<PlayerId> {
        seats
            .iter()
            .map(Player::id)
            .find(|id| !self.throws.contains_key(id))
    }

    fn can_act(&self, seats: &[Player], player: PlayerId) -> bool {
        seats.iter().any(|p| p.id() == player) && !self.throws.contains_key(&player)
    }

    fn apply(
        &mut self,
        _seats: &mut [Player],
        player: PlayerId,
        action: Action,
        _rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        match action {
            Action::Throw(t) => {
                self.throws.insert(player, t);
                Ok(())
            }
            other => Err(ActionError::illegal(format!("cannot {} here", other))),
        }
    }

    fn should_finish(&self, seats: &[Player]) -> bool {
        seats.iter().all(|p| self.throws.contains_key(&p.id()))
    }

    fn bot_action(&self, _seats: &[Player], _player: PlayerId, rng: &mut GameRng) -> Option<Action> {
        Throw::ALL.choose(rng).copied().map(Action::Throw)
    }

    fn settle(&self, seats: &[Player]) -> Vec<Outcome> {
        seats
            .iter()
            .map(|p| {
                let mine = self.throw_of(p.id());
                let theirs = seats
                    .iter()
                    .find(|o| o.id() != p.id())
                    .and_then(|o| self.throw_of(o.id()));
                match (mine, theirs) {
                    (Some(a), Some(b)) if a == b => Outcome::Tie,
                    (Some(a), Some(b)) if a.beats(b) => Outcome::Won,
                    (Some(_), Some(_)) => Outcome::Lost,
                    _ => Outcome::NoResult,
                }
            })
            .collect()
    }

    fn payout(&self, _seats: &[Player], player: &Player, _total_pot: i64) -> i64 {
        even_money(player.outcome(), player.wager())
    }

    fn describe(&self, seats: &[Player], viewer: PlayerId, complete: bool) -> String {
        let mut out = String::new();
        for p in seats {
            let shown = match self.throw_of(p.id()) {
                Some(t) if complete || p.id() == viewer => t.to_string(),
                Some(_) => "(thrown)".to_string(),
                None => "(waiting)".to_string(),
            };
            out.push_str(&format!("Seat {}: {}\n", p.id(), shown));
        }
        out
    }
}
