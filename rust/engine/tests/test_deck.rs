use std::collections::HashSet;

use croupier_engine::cards::{full_deck, Card, Suit};
use croupier_engine::deck::Deck;
use proptest::prelude::*;

#[test]
fn fresh_deck_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.shuffle();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.draw().is_none(), "after 52 cards, deck should be empty");
    assert!(deck.is_empty());
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(d1.draw_many(10), d2.draw_many(10), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(
        d1.draw_many(10),
        d2.draw_many(10),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn composition_concatenates_sets_and_jokers() {
    let deck = Deck::with_composition(2, 3, 7);
    assert_eq!(deck.initial_count(), 107);
    assert_eq!(deck.cards().filter(|c| c.suit == Suit::Joker).count(), 3);
    let aces_of_spades = deck
        .cards()
        .filter(|c| c.to_string() == "A♠")
        .count();
    assert_eq!(aces_of_spades, 2);
}

#[test]
fn discards_return_to_the_bottom() {
    let mut deck = Deck::new_with_seed(3);
    deck.shuffle();
    let top = deck.draw().unwrap();
    assert_eq!(deck.drawn(), 1);
    deck.add_card(top);
    assert_eq!(deck.drawn(), 0);
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deck.cards().last(), Some(&top));
}

#[test]
fn reset_restores_original_order() {
    let mut deck = Deck::from_cards(full_deck(), 8);
    let before = deck.peek_top(52);
    deck.draw_many(20);
    deck.reset(false);
    assert_eq!(deck.peek_top(52), before);
    assert_eq!(deck.drawn(), 0);
}

proptest! {
    #[test]
    fn drawn_plus_remaining_is_initial(seed in any::<u64>(), decks in 1usize..4, jokers in 0usize..4, n in 0usize..300) {
        let mut deck = Deck::with_composition(decks, jokers, seed);
        deck.shuffle();
        let got = deck.draw_many(n);
        prop_assert_eq!(got.len(), n.min(deck.initial_count()));
        prop_assert_eq!(deck.drawn() + deck.remaining(), deck.initial_count());
    }

    #[test]
    fn shuffle_preserves_the_multiset(seed in any::<u64>(), decks in 1usize..3) {
        let mut deck = Deck::with_composition(decks, 2, seed);
        let mut before: Vec<Card> = deck.cards().copied().collect();
        deck.shuffle();
        let mut after: Vec<Card> = deck.cards().copied().collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn reset_restores_the_full_composition(seed in any::<u64>(), n in 0usize..60) {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        deck.draw_many(n);
        deck.reset(true);
        prop_assert_eq!(deck.remaining(), 52);
        let unique: HashSet<Card> = deck.cards().copied().collect();
        prop_assert_eq!(unique.len(), 52);
    }
}
