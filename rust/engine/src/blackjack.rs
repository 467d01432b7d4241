//! Blackjack against the house dealer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::cards::{Card, Rank};
use crate::deck::Deck;
use crate::errors::ActionError;
use crate::game::{GameRng, GameVariant, VariantKind};
use crate::player::{find_mut, Outcome, Player, PlayerId};
use crate::pot::even_money;
use crate::rules::Action;

/// The dealer draws to this total and stands on anything above it (or a hard 17).
pub const DEALER_STAND: u32 = 17;
pub const BLACKJACK: u32 = 21;

/// A blackjack hand. Aces count 11 and drop to 1 one at a time while the
/// total is over 21.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlackjackHand {
    cards: Vec<Card>,
}

impl BlackjackHand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    // (total, aces still counted as 11)
    fn totals(&self) -> (u32, usize) {
        let mut total: u32 = self
            .cards
            .iter()
            .map(|c| c.rank.blackjack_value() as u32)
            .sum();
        let mut soft_aces = self.cards.iter().filter(|c| c.rank == Rank::Ace).count();
        while total > BLACKJACK && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        (total, soft_aces)
    }

    pub fn value(&self) -> u32 {
        self.totals().0
    }

    /// An ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.totals().1 > 0
    }

    pub fn is_soft_17(&self) -> bool {
        let (total, soft_aces) = self.totals();
        total == DEALER_STAND && soft_aces > 0
    }

    /// 21 with the first two cards.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }

    pub fn is_busted(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Dealer policy: hit below 17 and on soft 17.
    pub fn dealer_should_hit(&self) -> bool {
        self.value() < DEALER_STAND || self.is_soft_17()
    }
}

impl fmt::Display for BlackjackHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "{} ({})", cards.join(" "), self.value())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandStatus {
    Playing,
    Stood,
    DoubledDown,
    Busted,
    Blackjack,
}

impl HandStatus {
    pub fn is_terminal(self) -> bool {
        self != HandStatus::Playing
    }
}

/// Outcome of a finished hand against the dealer. A natural blackjack wins
/// outright, then a bust loses, then a dealer bust wins, then totals compare.
pub fn settle_hand(hand: &BlackjackHand, status: HandStatus, dealer: &BlackjackHand) -> Outcome {
    if status == HandStatus::Blackjack {
        return Outcome::Won;
    }
    if hand.is_busted() {
        return Outcome::Lost;
    }
    if dealer.is_busted() {
        return Outcome::Won;
    }
    match hand.value().cmp(&dealer.value()) {
        Ordering::Greater => Outcome::Won,
        Ordering::Less => Outcome::Lost,
        Ordering::Equal => Outcome::Tie,
    }
}

#[derive(Debug, Clone)]
struct Seat {
    hand: BlackjackHand,
    status: HandStatus,
}

#[derive(Debug)]
pub struct Blackjack {
    decks: u8,
    shoe: Deck,
    seats: HashMap<PlayerId, Seat>,
    dealer: BlackjackHand,
}

impl Blackjack {
    pub fn new(decks: u8) -> Self {
        let decks = decks.max(1);
        Self {
            decks,
            shoe: Deck::with_composition(decks as usize, 0, 0),
            seats: HashMap::new(),
            dealer: BlackjackHand::new(),
        }
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn hand(&self, player: PlayerId) -> Option<&BlackjackHand> {
        self.seats.get(&player).map(|s| &s.hand)
    }

    pub fn status(&self, player: PlayerId) -> Option<HandStatus> {
        self.seats.get(&player).map(|s| s.status)
    }

    pub fn dealer_hand(&self) -> &BlackjackHand {
        &self.dealer
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    fn is_pending(&self, player: PlayerId) -> bool {
        self.seats
            .get(&player)
            .is_some_and(|s| s.status == HandStatus::Playing)
    }

    fn any_pending(&self, seats: &[Player]) -> bool {
        seats.iter().any(|p| self.is_pending(p.id()))
    }

    fn seat_mut(&mut self, player: PlayerId) -> Result<&mut Seat, ActionError> {
        self.seats
            .get_mut(&player)
            .ok_or(ActionError::NotPlayersTurn(player))
    }
}

impl GameVariant for Blackjack {
    fn kind(&self) -> VariantKind {
        VariantKind::Blackjack
    }

    fn deal(&mut self, seats: &[Player], rng: &mut GameRng) {
        self.shoe = Deck::with_composition(self.decks as usize, 0, rng.random());
        self.shoe.shuffle();
        self.seats = seats
            .iter()
            .map(|p| {
                let seat = Seat {
                    hand: BlackjackHand::new(),
                    status: HandStatus::Playing,
                };
                (p.id(), seat)
            })
            .collect();
        self.dealer = BlackjackHand::new();

        // two rounds: one card to every seat, then the dealer
        for _ in 0..2 {
            for p in seats {
                if let (Some(card), Some(seat)) = (self.shoe.draw(), self.seats.get_mut(&p.id())) {
                    seat.hand.push(card);
                }
            }
            if let Some(card) = self.shoe.draw() {
                self.dealer.push(card);
            }
        }
        for seat in self.seats.values_mut() {
            if seat.hand.is_blackjack() {
                seat.status = HandStatus::Blackjack;
            }
        }
    }

    fn current_player(&self, seats: &[Player]) -> Option<PlayerId> {
        seats
            .iter()
            .filter(|p| self.is_pending(p.id()))
            .min_by_key(|p| p.action_count())
            .map(Player::id)
    }

    fn apply(
        &mut self,
        seats: &mut [Player],
        player: PlayerId,
        action: Action,
        _rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        match action {
            Action::Hit => {
                let card = self.shoe.draw();
                let seat = self.seat_mut(player)?;
                match card {
                    Some(card) => {
                        seat.hand.push(card);
                        if seat.hand.is_busted() {
                            seat.status = HandStatus::Busted;
                        } else if seat.hand.value() == BLACKJACK {
                            seat.status = HandStatus::Stood;
                        }
                    }
                    // empty shoe: the player keeps the hand
                    None => seat.status = HandStatus::Stood,
                }
            }
            Action::Stand => {
                self.seat_mut(player)?.status = HandStatus::Stood;
            }
            Action::DoubleDown => {
                if self.seat_mut(player)?.hand.cards().len() != 2 {
                    return Err(ActionError::illegal(
                        "double down is only allowed on the first two cards",
                    ));
                }
                let card = self.shoe.draw();
                let seat = self.seat_mut(player)?;
                if let Some(card) = card {
                    seat.hand.push(card);
                }
                seat.status = if seat.hand.is_busted() {
                    HandStatus::Busted
                } else {
                    HandStatus::DoubledDown
                };
                if let Some(p) = find_mut(seats, player) {
                    p.double_wager();
                }
            }
            other => return Err(ActionError::illegal(format!("cannot {} here", other))),
        }
        Ok(())
    }

    fn should_finish(&self, seats: &[Player]) -> bool {
        !self.any_pending(seats) && !self.can_dealer_act(seats)
    }

    fn can_dealer_act(&self, seats: &[Player]) -> bool {
        !self.any_pending(seats) && !self.shoe.is_empty() && self.dealer.dealer_should_hit()
    }

    fn dealer_step(&mut self, _rng: &mut GameRng) -> Result<Action, ActionError> {
        let card = self.shoe.draw().ok_or(ActionError::DealerIdle)?;
        self.dealer.push(card);
        Ok(Action::Hit)
    }

    fn bot_action(&self, _seats: &[Player], player: PlayerId, _rng: &mut GameRng) -> Option<Action> {
        let hand = self.hand(player)?;
        if hand.value() < DEALER_STAND {
            Some(Action::Hit)
        } else {
            Some(Action::Stand)
        }
    }

    fn settle(&self, seats: &[Player]) -> Vec<Outcome> {
        seats
            .iter()
            .map(|p| match self.seats.get(&p.id()) {
                Some(seat) => settle_hand(&seat.hand, seat.status, &self.dealer),
                None => Outcome::NoResult,
            })
            .collect()
    }

    fn payout(&self, _seats: &[Player], player: &Player, _total_pot: i64) -> i64 {
        even_money(player.outcome(), player.wager())
    }

    fn describe(&self, seats: &[Player], viewer: PlayerId, complete: bool) -> String {
        let mut out = String::new();
        let hole_hidden = !complete && self.any_pending(seats);
        match self.dealer.cards().first() {
            Some(up) if hole_hidden => out.push_str(&format!("Dealer: {} ??\n", up)),
            _ => out.push_str(&format!("Dealer: {}\n", self.dealer)),
        }
        for p in seats {
            let Some(seat) = self.seats.get(&p.id()) else {
                continue;
            };
            let marker = if p.id() == viewer { " (you)" } else { "" };
            out.push_str(&format!(
                "Seat {}{}: {} [{:?}] wager {}\n",
                p.id(),
                marker,
                seat.hand,
                seat.status,
                p.wager()
            ));
        }
        out
    }
}
