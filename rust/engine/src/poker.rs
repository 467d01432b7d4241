//! Five-card draw: one discard round, best hand takes the pot.

use rand::Rng;
use std::collections::HashMap;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::ActionError;
use crate::game::{GameRng, GameVariant, VariantKind};
use crate::hand::{evaluate_hand, winning_indices, HandRank, PokerHand};
use crate::player::{Outcome, Player, PlayerId};
use crate::pot::pot_share_payout;
use crate::rules::Action;

pub const HAND_SIZE: usize = 5;

/// A player's cards plus the slots marked for discard.
#[derive(Debug, Clone, Default)]
pub struct DrawHand {
    cards: Vec<Card>,
    discard: [bool; HAND_SIZE],
    confirmed: bool,
}

impl DrawHand {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_selected(&self, slot: usize) -> bool {
        self.discard.get(slot).copied().unwrap_or(false)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn evaluate(&self) -> Option<PokerHand> {
        evaluate_hand(&self.cards).ok()
    }

    /// Replaces every selected slot with a fresh card. A slot whose draw
    /// comes back empty keeps its card. Discards go under the deck after
    /// all replacements are drawn.
    fn draw_replacements(&mut self, deck: &mut Deck) {
        let mut discarded = Vec::new();
        for (slot, card) in self.cards.iter_mut().enumerate() {
            if !self.discard[slot] {
                continue;
            }
            if let Some(fresh) = deck.draw() {
                discarded.push(std::mem::replace(card, fresh));
            }
        }
        deck.add_cards(discarded);
        self.discard = [false; HAND_SIZE];
        self.confirmed = true;
    }
}

/// Which slots a bot throws away: anything outside a rank group, keeping
/// the top card of a high-card hand. Straights and better stand pat.
fn bot_discards(hand: &DrawHand) -> [bool; HAND_SIZE] {
    let mut discard = [false; HAND_SIZE];
    let Some(eval) = hand.evaluate() else {
        return discard;
    };
    if eval.rank() >= HandRank::Straight {
        return discard;
    }
    let keep_high = eval.rank() == HandRank::HighCard;
    let top = eval.kickers().first().copied();
    for (slot, card) in hand.cards.iter().enumerate().take(HAND_SIZE) {
        let value = card.rank.poker_value();
        let grouped = hand
            .cards
            .iter()
            .filter(|c| c.rank.poker_value() == value)
            .count()
            > 1;
        let kept = grouped || (keep_high && Some(value) == top);
        discard[slot] = !kept;
    }
    discard
}

#[derive(Debug)]
pub struct Poker {
    deck: Deck,
    hands: HashMap<PlayerId, DrawHand>,
}

impl Default for Poker {
    fn default() -> Self {
        Self::new()
    }
}

impl Poker {
    pub fn new() -> Self {
        Self {
            deck: Deck::new_with_seed(0),
            hands: HashMap::new(),
        }
    }

    pub fn hand(&self, player: PlayerId) -> Option<&DrawHand> {
        self.hands.get(&player)
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    fn hand_mut(&mut self, player: PlayerId) -> Result<&mut DrawHand, ActionError> {
        self.hands
            .get_mut(&player)
            .ok_or(ActionError::NotPlayersTurn(player))
    }
}

impl GameVariant for Poker {
    fn kind(&self) -> VariantKind {
        VariantKind::Poker
    }

    fn deal(&mut self, seats: &[Player], rng: &mut GameRng) {
        self.deck = Deck::new_with_seed(rng.random());
        self.deck.shuffle();
        self.hands = seats
            .iter()
            .map(|p| {
                let hand = DrawHand {
                    cards: self.deck.draw_many(HAND_SIZE),
                    ..DrawHand::default()
                };
                (p.id(), hand)
            })
            .collect();
    }

    fn current_player(&self, seats: &[Player]) -> Option<PlayerId> {
        seats
            .iter()
            .map(Player::id)
            .find(|id| self.hands.get(id).is_some_and(|h| !h.confirmed))
    }

    fn apply(
        &mut self,
        _seats: &mut [Player],
        player: PlayerId,
        action: Action,
        _rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        match action {
            Action::ToggleDiscard(slot) => {
                let hand = self.hand_mut(player)?;
                if slot >= hand.cards.len() {
                    return Err(ActionError::illegal(format!("no card in slot {}", slot + 1)));
                }
                hand.discard[slot] = !hand.discard[slot];
            }
            Action::ConfirmDiscard => {
                let mut hand = self.hands.remove(&player).ok_or(ActionError::NotPlayersTurn(player))?;
                hand.draw_replacements(&mut self.deck);
                self.hands.insert(player, hand);
            }
            other => return Err(ActionError::illegal(format!("cannot {} here", other))),
        }
        Ok(())
    }

    fn should_finish(&self, seats: &[Player]) -> bool {
        seats
            .iter()
            .all(|p| self.hands.get(&p.id()).is_some_and(DrawHand::is_confirmed))
    }

    fn bot_action(&self, _seats: &[Player], player: PlayerId, _rng: &mut GameRng) -> Option<Action> {
        let hand = self.hands.get(&player)?;
        let wanted = bot_discards(hand);
        let slot = (0..hand.cards.len()).find(|&s| hand.discard[s] != wanted[s]);
        Some(slot.map_or(Action::ConfirmDiscard, Action::ToggleDiscard))
    }

    fn settle(&self, seats: &[Player]) -> Vec<Outcome> {
        let evaluated: Vec<Option<PokerHand>> = seats
            .iter()
            .map(|p| self.hands.get(&p.id()).and_then(DrawHand::evaluate))
            .collect();
        let winners = winning_indices(&evaluated);
        evaluated
            .iter()
            .enumerate()
            .map(|(i, hand)| match hand {
                None => Outcome::NoResult,
                Some(_) if winners.contains(&i) && winners.len() == 1 => Outcome::Won,
                Some(_) if winners.contains(&i) => Outcome::Tie,
                Some(_) => Outcome::Lost,
            })
            .collect()
    }

    fn payout(&self, seats: &[Player], player: &Player, total_pot: i64) -> i64 {
        let winners = seats
            .iter()
            .filter(|p| matches!(p.outcome(), Outcome::Won | Outcome::Tie))
            .count();
        // Unranked seats are refunded, so their stakes leave the pot
        let refunded = seats
            .iter()
            .filter(|p| p.outcome() == Outcome::NoResult)
            .map(Player::wager)
            .fold(0, i64::saturating_add);
        match player.outcome() {
            Outcome::NoResult => 0,
            outcome => pot_share_payout(
                total_pot.saturating_sub(refunded),
                winners,
                matches!(outcome, Outcome::Won | Outcome::Tie),
                player.wager(),
            ),
        }
    }

    fn describe(&self, seats: &[Player], viewer: PlayerId, complete: bool) -> String {
        let mut out = String::new();
        for p in seats {
            let Some(hand) = self.hands.get(&p.id()) else {
                continue;
            };
            let state = if hand.confirmed { "done" } else { "drawing" };
            if p.id() == viewer || complete {
                let cards: Vec<String> = hand
                    .cards
                    .iter()
                    .enumerate()
                    .map(|(slot, c)| {
                        if hand.is_selected(slot) {
                            format!("{}:{}*", slot + 1, c)
                        } else {
                            format!("{}:{}", slot + 1, c)
                        }
                    })
                    .collect();
                let rank = hand
                    .evaluate()
                    .map(|h| h.rank().to_string())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "Seat {}: {} {} ({})\n",
                    p.id(),
                    cards.join(" "),
                    rank,
                    state
                ));
            } else {
                out.push_str(&format!("Seat {}: [{} cards] ({})\n", p.id(), hand.cards.len(), state));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pot::total_pot;

    fn draw_hand(s: &str) -> DrawHand {
        DrawHand {
            cards: s.split_whitespace().map(|c| c.parse().unwrap()).collect(),
            ..DrawHand::default()
        }
    }

    #[test]
    fn unranked_seat_stake_is_not_shared() {
        let outcomes = [Outcome::Won, Outcome::Lost, Outcome::NoResult];
        let seats: Vec<Player> = outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                let mut p = Player::new(PlayerId(i as u64 + 1), 100);
                p.set_outcome(*outcome);
                p
            })
            .collect();
        let pot = total_pot(&seats);
        let poker = Poker::new();
        let nets: Vec<i64> = seats.iter().map(|p| poker.payout(&seats, p, pot)).collect();
        assert_eq!(nets, [100, -100, 0]);
        assert_eq!(nets.iter().sum::<i64>(), 0);
    }

    #[test]
    fn bot_keeps_pairs_and_discards_the_rest() {
        let discard = bot_discards(&draw_hand("9H 9D 2C 5S KD"));
        assert_eq!(discard, [false, false, true, true, true]);
    }

    #[test]
    fn bot_keeps_top_card_of_high_card_hand() {
        let discard = bot_discards(&draw_hand("9H 3D 2C 5S KD"));
        assert_eq!(discard, [true, true, true, true, false]);
    }

    #[test]
    fn bot_stands_pat_on_a_flush() {
        let discard = bot_discards(&draw_hand("9H 3H 2H 5H KH"));
        assert_eq!(discard, [false; HAND_SIZE]);
    }

    #[test]
    fn empty_deck_keeps_original_card() {
        let mut hand = draw_hand("9H 3D 2C 5S KD");
        hand.discard[0] = true;
        hand.discard[1] = true;
        let mut deck = Deck::from_cards(vec!["AS".parse().unwrap()], 1);
        hand.draw_replacements(&mut deck);
        assert_eq!(hand.cards[0].to_string(), "A♠");
        assert_eq!(hand.cards[1].to_string(), "3♦");
        // 9H went to the bottom
        assert_eq!(deck.remaining(), 1);
        assert!(hand.is_confirmed());
    }
}
