use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// An ordered pile of cards drawn from the front.
///
/// The deck remembers the composition it was built with so it can be reset,
/// and owns its own seeded generator so every shuffle is reproducible from
/// the seed. Drawing from an empty deck returns `None`; nothing here panics.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
    initial: Vec<Card>,
    drawn: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// A single standard 52-card set in suit/rank order.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_cards(full_deck(), seed)
    }

    /// `decks` concatenated 52-card sets followed by `jokers` jokers.
    pub fn with_composition(decks: usize, jokers: usize, seed: u64) -> Self {
        let mut cards = Vec::with_capacity(decks * 52 + jokers);
        for _ in 0..decks {
            cards.extend(full_deck());
        }
        cards.extend(std::iter::repeat(Card::joker()).take(jokers));
        Self::from_cards(cards, seed)
    }

    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: cards.iter().copied().collect(),
            initial: cards,
            drawn: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Fisher–Yates shuffle of the cards still in the deck.
    pub fn shuffle(&mut self) {
        self.cards.make_contiguous().shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.pop_front()?;
        self.drawn += 1;
        Some(card)
    }

    /// Draws up to `n` cards; fewer come back when the deck runs out.
    pub fn draw_many(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }

    pub fn peek_top(&self, n: usize) -> Vec<Card> {
        self.cards.iter().take(n).copied().collect()
    }

    /// Restores the original composition, optionally reshuffling it.
    pub fn reset(&mut self, shuffle: bool) {
        self.cards = self.initial.iter().copied().collect();
        self.drawn = 0;
        if shuffle {
            self.shuffle();
        }
    }

    /// Returns a previously drawn card to the bottom of the deck.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push_back(card);
        self.drawn = self.drawn.saturating_sub(1);
    }

    pub fn add_cards<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.add_card(card);
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn initial_count(&self) -> usize {
        self.initial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards currently in the deck, front first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_many_is_clamped() {
        let mut deck = Deck::from_cards(full_deck().into_iter().take(3).collect(), 1);
        let cards = deck.draw_many(10);
        assert_eq!(cards.len(), 3);
        assert!(deck.draw().is_none());
        assert_eq!(deck.drawn(), 3);
    }

    #[test]
    fn peek_does_not_draw() {
        let deck = Deck::new_with_seed(5);
        let top = deck.peek_top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn composition_counts() {
        let deck = Deck::with_composition(2, 2, 9);
        assert_eq!(deck.initial_count(), 106);
        assert_eq!(deck.cards().filter(|c| c.is_joker()).count(), 2);
    }
}
