//! # croupier-engine: Turn-Based Casino Game Engine Core
//!
//! A deterministic engine for turn-based casino games: Blackjack against a
//! house dealer, five-card draw Poker, Rock-Paper-Scissors and an
//! escalating-risk game. Provides the game lifecycle, card model, hand
//! evaluators and payout settlement. Collaborators feed actions in, run
//! deferred dealer/bot steps, and read back signed payouts to apply to their
//! own balance ledger.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded decks with reset and bottom-of-deck returns
//! - [`game`] - Game lifecycle, the `GameVariant` trait and deferred steps
//! - [`player`] - Seats, wagers and outcomes
//! - [`rules`] - Actions and structural validation
//! - [`hand`] - Five-card poker evaluation and tie-breaks
//! - [`blackjack`] - Blackjack hand values and the dealer policy
//! - [`poker`] - Five-card draw
//! - [`rps`] - Rock-Paper-Scissors
//! - [`roulette`] - Escalating-risk game and its multiplier tables
//! - [`pot`] - Payout arithmetic
//! - [`engine`] - Lock-protected handle for concurrent collaborators
//! - [`logger`] - GameRecord serialization and JSONL logging
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_engine::game::{Game, Variant};
//! use croupier_engine::player::PlayerId;
//! use croupier_engine::rules::Action;
//!
//! let mut game = Game::with_seed(Variant::Blackjack { decks: 1 }, 1, 7, 42);
//! game.add_player(PlayerId(1), 50).unwrap();
//! game.start().unwrap();
//!
//! if game.can_act(PlayerId(1)) {
//!     game.apply_action(PlayerId(1), Action::Stand).unwrap();
//! }
//! while let Some(step) = game.next_dealer_action() {
//!     step.run(&mut game).unwrap();
//! }
//! assert!(game.is_complete());
//! let net = game.payout(PlayerId(1), game.total_pot()).unwrap();
//! assert!([-50, 0, 50].contains(&net));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every shuffle and random draw derives from the game seed:
//!
//! ```rust
//! use croupier_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw_many(5), b.draw_many(5));
//! ```

pub mod blackjack;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod poker;
pub mod pot;
pub mod roulette;
pub mod rps;
pub mod rules;
