use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::EngineError;
use crate::game::{DeferredAction, Game, GameState, Variant};
use crate::logger::GameRecord;
use crate::player::{Outcome, PlayerId};
use crate::pot::GamePayout;
use crate::rules::Action;

/// Thread-safe handle to a single game.
///
/// Mutations take the write lock and queries the read lock, so a query never
/// observes a half-applied action. Deferred dealer/bot steps take the write
/// lock only when they run.
///
/// # Examples
///
/// ```
/// use croupier_engine::engine::Engine;
/// use croupier_engine::game::Variant;
/// use croupier_engine::player::PlayerId;
///
/// let engine = Engine::with_seed(Variant::Roulette, 1, 1, 42);
/// engine.add_bot(PlayerId(1), 100).unwrap();
/// engine.start().unwrap();
/// engine.run_bots().unwrap();
/// assert!(engine.is_complete().unwrap());
/// ```
#[derive(Debug)]
pub struct Engine {
    game: RwLock<Game>,
}

impl Engine {
    pub fn new(variant: Variant, min_players: usize, max_players: usize) -> Self {
        Self::from_game(Game::new(variant, min_players, max_players))
    }

    pub fn with_seed(variant: Variant, min_players: usize, max_players: usize, seed: u64) -> Self {
        Self::from_game(Game::with_seed(variant, min_players, max_players, seed))
    }

    pub fn from_game(game: Game) -> Self {
        Self {
            game: RwLock::new(game),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Game>, EngineError> {
        self.game.read().map_err(|_| EngineError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Game>, EngineError> {
        self.game.write().map_err(|_| EngineError::Poisoned)
    }

    pub fn add_player(&self, id: PlayerId, wager: i64) -> Result<(), EngineError> {
        Ok(self.write()?.add_player(id, wager)?)
    }

    pub fn add_bot(&self, id: PlayerId, wager: i64) -> Result<(), EngineError> {
        Ok(self.write()?.add_bot(id, wager)?)
    }

    pub fn start(&self) -> Result<(), EngineError> {
        Ok(self.write()?.start()?)
    }

    pub fn apply_action(&self, player: PlayerId, action: Action) -> Result<(), EngineError> {
        Ok(self.write()?.apply_action(player, action)?)
    }

    pub fn next_dealer_action(&self) -> Result<Option<DeferredAction>, EngineError> {
        Ok(self.read()?.next_dealer_action())
    }

    pub fn next_ai_action(&self) -> Result<Option<DeferredAction>, EngineError> {
        Ok(self.read()?.next_ai_action())
    }

    /// Runs a deferred step under the write lock.
    pub fn run_deferred(&self, step: DeferredAction) -> Result<(), EngineError> {
        let mut game = self.write()?;
        Ok(step.run(&mut game)?)
    }

    /// Runs bot and dealer steps until neither has a move left.
    pub fn run_bots(&self) -> Result<(), EngineError> {
        loop {
            let mut game = self.write()?;
            let step = game.next_ai_action().or_else(|| game.next_dealer_action());
            match step {
                Some(step) => step.run(&mut game)?,
                None => return Ok(()),
            }
        }
    }

    pub fn state(&self) -> Result<GameState, EngineError> {
        Ok(self.read()?.state())
    }

    pub fn is_complete(&self) -> Result<bool, EngineError> {
        Ok(self.read()?.is_complete())
    }

    pub fn current_player(&self) -> Result<Option<PlayerId>, EngineError> {
        Ok(self.read()?.current_player())
    }

    pub fn can_act(&self, player: PlayerId) -> Result<bool, EngineError> {
        Ok(self.read()?.can_act(player))
    }

    pub fn public_view(&self, viewer: PlayerId) -> Result<String, EngineError> {
        Ok(self.read()?.public_view(viewer))
    }

    pub fn total_pot(&self) -> Result<i64, EngineError> {
        Ok(self.read()?.total_pot())
    }

    pub fn result(&self, player: PlayerId) -> Result<Outcome, EngineError> {
        Ok(self.read()?.result(player)?)
    }

    pub fn payout(&self, player: PlayerId, total_pot: i64) -> Result<i64, EngineError> {
        Ok(self.read()?.payout(player, total_pot)?)
    }

    pub fn payouts(&self) -> Result<Vec<GamePayout>, EngineError> {
        Ok(self.read()?.payouts()?)
    }

    pub fn record(&self, game_id: &str) -> Result<GameRecord, EngineError> {
        Ok(self.read()?.record(game_id)?)
    }

    /// Runs `f` against a consistent snapshot of the game.
    pub fn with_game<T>(&self, f: impl FnOnce(&Game) -> T) -> Result<T, EngineError> {
        let game = self.read()?;
        Ok(f(&game))
    }
}
