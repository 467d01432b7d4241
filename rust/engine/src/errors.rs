use thiserror::Error;

use crate::player::PlayerId;

/// Failures while seating players.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Game already started; no late joins")]
    AlreadyStarted,
    #[error("Roster full (max {max} players)")]
    RosterFull { max: usize },
    #[error("Player {0} is already seated")]
    DuplicatePlayer(PlayerId),
    #[error("Invalid wager: {0}")]
    InvalidWager(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("Invalid player count: {count}, expected {min}..={max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("Game already started")]
    AlreadyStarted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Game is not in progress")]
    GameNotInProgress,
    #[error("It's not player {0}'s turn")]
    NotPlayersTurn(PlayerId),
    #[error("Illegal action: {0}")]
    IllegalAction(String),
    #[error("Dealer has no move to make")]
    DealerIdle,
}

impl ActionError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        ActionError::IllegalAction(reason.into())
    }
}

/// Failures of result/payout queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Game is not complete")]
    GameNotComplete,
    #[error("Player {0} is not seated in this game")]
    UnknownPlayer(PlayerId),
}

/// Evaluator misuse. Never reachable through the game flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Poker hands have exactly 5 cards, got {0}")]
    InvalidHandSize(usize),
}

/// Everything the locked [`crate::engine::Engine`] facade can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Start(#[from] StartError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Game lock poisoned")]
    Poisoned,
}
