use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::blackjack::Blackjack;
use crate::errors::{ActionError, QueryError, RosterError, StartError};
use crate::logger::{ActionRecord, Actor, GameRecord, SeatResult};
use crate::player::{find_mut, Outcome, Player, PlayerId};
use crate::poker::Poker;
use crate::pot::{total_pot, GamePayout};
use crate::roulette::Roulette;
use crate::rps::RockPaperScissors;
use crate::rules::{validate_action, Action};

/// One generator per game; decks derive their own seeds from it.
pub type GameRng = ChaCha20Rng;

/// Which game is being played, without its parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Blackjack,
    Poker,
    RockPaperScissors,
    Roulette,
}

impl VariantKind {
    /// Hard seat limits `(min, max)` of the variant.
    pub fn player_limits(self) -> (usize, usize) {
        match self {
            VariantKind::Blackjack => (1, 7),
            // 10 * 5 cards still leaves the deck non-empty for discards
            VariantKind::Poker => (2, 10),
            VariantKind::RockPaperScissors => (2, 2),
            VariantKind::Roulette => (1, 1),
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VariantKind::Blackjack => "blackjack",
            VariantKind::Poker => "poker",
            VariantKind::RockPaperScissors => "rock-paper-scissors",
            VariantKind::Roulette => "roulette",
        };
        f.write_str(s)
    }
}

/// A game to construct, with its parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Variant {
    /// Blackjack against the house dealer with a shoe of `decks` 52-card sets
    Blackjack { decks: u8 },
    /// Five-card draw, winner takes the pot
    Poker,
    RockPaperScissors,
    /// Escalating-risk game against the house
    Roulette,
}

impl Variant {
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Blackjack { .. } => VariantKind::Blackjack,
            Variant::Poker => VariantKind::Poker,
            Variant::RockPaperScissors => VariantKind::RockPaperScissors,
            Variant::Roulette => VariantKind::Roulette,
        }
    }

    fn build(&self) -> Box<dyn GameVariant> {
        match *self {
            Variant::Blackjack { decks } => Box::new(Blackjack::new(decks)),
            Variant::Poker => Box::new(Poker::new()),
            Variant::RockPaperScissors => Box::new(RockPaperScissors::new()),
            Variant::Roulette => Box::new(Roulette::new()),
        }
    }
}

/// Lifecycle of a game. Transitions only move forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    NotStarted,
    InProgress,
    Complete,
}

/// Rules of one game variant.
///
/// The base [`Game`] owns the roster, lifecycle and generator; a variant
/// owns its cards and per-player records and answers the rule questions.
/// `seats` is always the roster in seating order.
pub trait GameVariant: fmt::Debug + Send + Sync {
    fn kind(&self) -> VariantKind;

    /// Builds the deck (if any) and deals opening cards.
    fn deal(&mut self, seats: &[Player], rng: &mut GameRng);

    /// The seat whose turn it is, if any player can act.
    fn current_player(&self, seats: &[Player]) -> Option<PlayerId>;

    /// Whether `player` may act now. Defaults to strict turn order.
    fn can_act(&self, seats: &[Player], player: PlayerId) -> bool {
        self.current_player(seats) == Some(player)
    }

    /// Applies a structurally valid action from an eligible player.
    fn apply(
        &mut self,
        seats: &mut [Player],
        player: PlayerId,
        action: Action,
        rng: &mut GameRng,
    ) -> Result<(), ActionError>;

    /// Completion predicate, evaluated after every mutation.
    fn should_finish(&self, seats: &[Player]) -> bool;

    fn can_dealer_act(&self, _seats: &[Player]) -> bool {
        false
    }

    /// One dealer move; only called when `can_dealer_act` holds.
    fn dealer_step(&mut self, _rng: &mut GameRng) -> Result<Action, ActionError> {
        Err(ActionError::DealerIdle)
    }

    /// The move a bot seat would make now.
    fn bot_action(&self, seats: &[Player], player: PlayerId, rng: &mut GameRng) -> Option<Action>;

    /// Outcomes in seating order, computed once at completion.
    fn settle(&self, seats: &[Player]) -> Vec<Outcome>;

    /// Net change for a settled seat.
    fn payout(&self, seats: &[Player], player: &Player, total_pot: i64) -> i64;

    /// Text view of the table as `viewer` may see it.
    fn describe(&self, seats: &[Player], viewer: PlayerId, complete: bool) -> String;
}

/// A deferred dealer or bot move.
///
/// Created by [`Game::next_dealer_action`] / [`Game::next_ai_action`] and run
/// whenever the collaborator decides (e.g. after an animation delay). The
/// move re-checks eligibility when it runs, so a stale thunk fails cleanly
/// instead of acting out of turn.
pub struct DeferredAction {
    actor: Actor,
    step: Box<dyn FnOnce(&mut Game) -> Result<(), ActionError> + Send>,
}

impl DeferredAction {
    fn new<F>(actor: Actor, step: F) -> Self
    where
        F: FnOnce(&mut Game) -> Result<(), ActionError> + Send + 'static,
    {
        Self {
            actor,
            step: Box::new(step),
        }
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    pub fn run(self, game: &mut Game) -> Result<(), ActionError> {
        (self.step)(game)
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("actor", &self.actor)
            .finish()
    }
}

/// A single game instance: roster, lifecycle and the variant's rules.
///
/// # Examples
///
/// ```
/// use croupier_engine::game::{Game, GameState, Variant};
/// use croupier_engine::player::PlayerId;
/// use croupier_engine::rps::Throw;
/// use croupier_engine::rules::Action;
///
/// let mut game = Game::with_seed(Variant::RockPaperScissors, 2, 2, 7);
/// game.add_player(PlayerId(1), 100).unwrap();
/// game.add_player(PlayerId(2), 100).unwrap();
/// game.start().unwrap();
///
/// game.apply_action(PlayerId(2), Action::Throw(Throw::Paper)).unwrap();
/// game.apply_action(PlayerId(1), Action::Throw(Throw::Rock)).unwrap();
///
/// assert_eq!(game.state(), GameState::Complete);
/// assert_eq!(game.payout(PlayerId(1), game.total_pot()), Ok(-100));
/// assert_eq!(game.payout(PlayerId(2), game.total_pot()), Ok(100));
/// ```
#[derive(Debug)]
pub struct Game {
    variant: Box<dyn GameVariant>,
    config: Variant,
    state: GameState,
    players: Vec<Player>,
    min_players: usize,
    max_players: usize,
    seed: u64,
    rng: GameRng,
    history: Vec<ActionRecord>,
}

impl Game {
    /// New game seeded from the thread-local generator.
    pub fn new(variant: Variant, min_players: usize, max_players: usize) -> Self {
        Self::with_seed(variant, min_players, max_players, rand::rng().random())
    }

    /// New game with a fixed seed; the same seed and actions replay the
    /// same game. Seat limits are clamped to the variant's hard limits.
    pub fn with_seed(variant: Variant, min_players: usize, max_players: usize, seed: u64) -> Self {
        let (lo, hi) = variant.kind().player_limits();
        Self {
            variant: variant.build(),
            config: variant,
            state: GameState::NotStarted,
            players: Vec::new(),
            min_players: min_players.max(lo),
            max_players: max_players.min(hi),
            seed,
            rng: GameRng::seed_from_u64(seed),
            history: Vec::new(),
        }
    }

    pub fn add_player(&mut self, id: PlayerId, wager: i64) -> Result<(), RosterError> {
        self.seat(Player::new(id, wager))
    }

    /// Seats a player driven by the engine through [`Game::next_ai_action`].
    pub fn add_bot(&mut self, id: PlayerId, wager: i64) -> Result<(), RosterError> {
        self.seat(Player::bot(id, wager))
    }

    fn seat(&mut self, player: Player) -> Result<(), RosterError> {
        if self.state != GameState::NotStarted {
            return Err(RosterError::AlreadyStarted);
        }
        if player.wager() < 0 {
            return Err(RosterError::InvalidWager(player.wager()));
        }
        if self.player(player.id()).is_some() {
            return Err(RosterError::DuplicatePlayer(player.id()));
        }
        if self.players.len() >= self.max_players {
            return Err(RosterError::RosterFull {
                max: self.max_players,
            });
        }
        debug!(variant = %self.kind(), player = %player.id(), wager = player.wager(), "player seated");
        self.players.push(player);
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), StartError> {
        if self.state != GameState::NotStarted {
            return Err(StartError::AlreadyStarted);
        }
        let count = self.players.len();
        if count < self.min_players || count > self.max_players {
            return Err(StartError::InvalidPlayerCount {
                count,
                min: self.min_players,
                max: self.max_players,
            });
        }
        self.variant.deal(&self.players, &mut self.rng);
        self.state = GameState::InProgress;
        info!(variant = %self.kind(), players = count, seed = self.seed, "game started");
        self.check_finish();
        Ok(())
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        if self.state != GameState::InProgress {
            return None;
        }
        self.variant.current_player(&self.players)
    }

    /// Whether `player` may submit an action right now.
    pub fn can_act(&self, player: PlayerId) -> bool {
        self.state == GameState::InProgress && self.variant.can_act(&self.players, player)
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<(), ActionError> {
        if self.state != GameState::InProgress {
            return Err(ActionError::GameNotInProgress);
        }
        if !self.variant.can_act(&self.players, player) {
            return Err(ActionError::NotPlayersTurn(player));
        }
        validate_action(self.kind(), &action)?;
        self.variant
            .apply(&mut self.players, player, action, &mut self.rng)?;
        if let Some(seat) = find_mut(&mut self.players, player) {
            seat.record_action(action);
        }
        self.history.push(ActionRecord {
            actor: Actor::Player(player),
            action,
        });
        debug!(variant = %self.kind(), player = %player, %action, "action applied");
        self.check_finish();
        Ok(())
    }

    pub fn can_dealer_act(&self) -> bool {
        self.state == GameState::InProgress && self.variant.can_dealer_act(&self.players)
    }

    /// Plays one dealer move if the dealer is eligible right now.
    pub fn dealer_step(&mut self) -> Result<(), ActionError> {
        if self.state != GameState::InProgress {
            return Err(ActionError::GameNotInProgress);
        }
        if !self.variant.can_dealer_act(&self.players) {
            return Err(ActionError::DealerIdle);
        }
        let action = self.variant.dealer_step(&mut self.rng)?;
        self.history.push(ActionRecord {
            actor: Actor::Dealer,
            action,
        });
        debug!(variant = %self.kind(), %action, "dealer acted");
        self.check_finish();
        Ok(())
    }

    /// Plays one move for `bot` if it is a bot seat and may act now.
    pub fn bot_step(&mut self, bot: PlayerId) -> Result<(), ActionError> {
        if self.state != GameState::InProgress {
            return Err(ActionError::GameNotInProgress);
        }
        let is_bot = self.player(bot).is_some_and(Player::is_bot);
        if !is_bot || !self.variant.can_act(&self.players, bot) {
            return Err(ActionError::NotPlayersTurn(bot));
        }
        let action = self
            .variant
            .bot_action(&self.players, bot, &mut self.rng)
            .ok_or(ActionError::NotPlayersTurn(bot))?;
        debug!(variant = %self.kind(), player = %bot, %action, "bot chose action");
        self.apply_action(bot, action)
    }

    pub fn next_dealer_action(&self) -> Option<DeferredAction> {
        self.can_dealer_act()
            .then(|| DeferredAction::new(Actor::Dealer, |game| game.dealer_step()))
    }

    /// Deferred move for the first bot seat (in seating order) that may act.
    pub fn next_ai_action(&self) -> Option<DeferredAction> {
        if self.state != GameState::InProgress {
            return None;
        }
        let bot = self
            .players
            .iter()
            .find(|p| p.is_bot() && self.variant.can_act(&self.players, p.id()))?
            .id();
        Some(DeferredAction::new(Actor::Player(bot), move |game| {
            game.bot_step(bot)
        }))
    }

    fn check_finish(&mut self) {
        if self.state != GameState::InProgress || !self.variant.should_finish(&self.players) {
            return;
        }
        let outcomes = self.variant.settle(&self.players);
        for (seat, outcome) in self.players.iter_mut().zip(outcomes) {
            seat.set_outcome(outcome);
        }
        self.state = GameState::Complete;
        info!(
            variant = %self.kind(),
            actions = self.history.len(),
            "game complete"
        );
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == GameState::Complete
    }

    pub fn kind(&self) -> VariantKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> Variant {
        self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn player_limits(&self) -> (usize, usize) {
        (self.min_players, self.max_players)
    }

    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Sum of all current wagers (doubled wagers included).
    pub fn total_pot(&self) -> i64 {
        total_pot(&self.players)
    }

    fn settled_player(&self, id: PlayerId) -> Result<&Player, QueryError> {
        if self.state != GameState::Complete {
            return Err(QueryError::GameNotComplete);
        }
        self.player(id).ok_or(QueryError::UnknownPlayer(id))
    }

    pub fn result(&self, player: PlayerId) -> Result<Outcome, QueryError> {
        self.settled_player(player).map(Player::outcome)
    }

    pub fn payout(&self, player: PlayerId, total_pot: i64) -> Result<i64, QueryError> {
        let seat = self.settled_player(player)?;
        Ok(self.variant.payout(&self.players, seat, total_pot))
    }

    /// Payouts for every seat against the pot of all wagers.
    pub fn payouts(&self) -> Result<Vec<GamePayout>, QueryError> {
        let pot = self.total_pot();
        self.players
            .iter()
            .map(|p| {
                Ok(GamePayout {
                    player: p.id(),
                    amount: self.payout(p.id(), pot)?,
                })
            })
            .collect()
    }

    /// Text summary of the table for `viewer`. Private hands of other
    /// players stay hidden until the game is complete.
    pub fn public_view(&self, viewer: PlayerId) -> String {
        let mut view = format!("== {} ({:?}) ==\n", self.kind(), self.state);
        if self.state == GameState::NotStarted {
            for p in &self.players {
                view.push_str(&format!("Seat {}: wager {}\n", p.id(), p.wager()));
            }
            return view;
        }
        view.push_str(&self.variant.describe(
            &self.players,
            viewer,
            self.is_complete(),
        ));
        if let (Ok(outcome), Ok(amount)) = (
            self.result(viewer),
            self.payout(viewer, self.total_pot()),
        ) {
            view.push_str(&format!("Result: {} ({:+})\n", outcome, amount));
        }
        view
    }

    /// Audit record of a completed game.
    pub fn record(&self, game_id: &str) -> Result<GameRecord, QueryError> {
        let pot = self.total_pot();
        let results = self
            .players
            .iter()
            .map(|p| {
                Ok(SeatResult {
                    player: p.id(),
                    wager: p.wager(),
                    outcome: self.result(p.id())?,
                    payout: self.payout(p.id(), pot)?,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;
        Ok(GameRecord {
            game_id: game_id.to_string(),
            variant: self.config,
            seed: self.seed,
            actions: self.history.clone(),
            results,
            ts: None,
            meta: None,
        })
    }
}
