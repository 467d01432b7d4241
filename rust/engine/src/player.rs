use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rules::Action;

/// Opaque player identity supplied by the collaborator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(v: u64) -> Self {
        PlayerId(v)
    }
}

/// Per-game outcome of a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    NoResult,
    Won,
    Lost,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::NoResult => "no result",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::Tie => "tie",
        };
        f.write_str(s)
    }
}

/// Who decides a seat's actions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    /// Actions arrive through `apply_action`
    Human,
    /// Actions come from the engine via `next_ai_action`
    Bot,
}

/// A seat at the table: identity, wager, outcome and the actions taken so far.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    wager: i64,
    outcome: Outcome,
    controller: Controller,
    actions: Vec<Action>,
}

impl Player {
    pub fn new(id: PlayerId, wager: i64) -> Self {
        Self {
            id,
            wager,
            outcome: Outcome::NoResult,
            controller: Controller::Human,
            actions: Vec::new(),
        }
    }

    pub fn bot(id: PlayerId, wager: i64) -> Self {
        Self {
            controller: Controller::Bot,
            ..Self::new(id, wager)
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn wager(&self) -> i64 {
        self.wager
    }
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
    pub fn controller(&self) -> Controller {
        self.controller
    }
    pub fn is_bot(&self) -> bool {
        self.controller == Controller::Bot
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn double_wager(&mut self) {
        self.wager = self.wager.saturating_mul(2);
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    pub(crate) fn record_action(&mut self, action: Action) {
        self.actions.push(action);
    }
}

/// Seat lookup shared by the variants.
pub(crate) fn find_mut(seats: &mut [Player], id: PlayerId) -> Option<&mut Player> {
    seats.iter_mut().find(|p| p.id == id)
}
