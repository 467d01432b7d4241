//! Output formatting utilities for CLI display.
//!
//! Cards print with suit symbols (`A♠`, `10♥`, `JK`); money amounts
//! are signed so a ledger line reads as a change.

use croupier_engine::cards::Card;
use croupier_engine::logger::Actor;
use croupier_engine::pot::BASIS_POINTS;

/// Format a list of cards separated by spaces.
///
/// ```rust
/// use croupier_engine::cards::{Card, Rank, Suit};
/// # use croupier_cli::formatters::format_cards;
///
/// let cards = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ten, Suit::Hearts)];
/// assert_eq!(format_cards(&cards), "A♠ 10♥");
/// ```
pub fn format_cards(cards: &[Card]) -> String {
    let parts: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    parts.join(" ")
}

/// Format a basis-point multiplier as `1.5500x`.
pub fn format_multiplier(basis_points: u32) -> String {
    let bp = i64::from(basis_points);
    format!("{}.{:04}x", bp / BASIS_POINTS, bp % BASIS_POINTS)
}

/// Format a signed amount with an explicit sign, `0` stays unsigned.
pub fn format_signed(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

pub fn format_actor(actor: Actor) -> String {
    match actor {
        Actor::Dealer => "Dealer".to_string(),
        Actor::Player(id) => format!("Seat {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::cards::{Rank, Suit};

    #[test]
    fn test_format_cards() {
        assert_eq!(format_cards(&[]), "");
        let hand = [
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Two, Suit::Clubs),
            Card::joker(),
        ];
        assert_eq!(format_cards(&hand), "K♥ 2♣ JK");
    }

    #[test]
    fn test_format_multiplier() {
        assert_eq!(format_multiplier(10_000), "1.0000x");
        assert_eq!(format_multiplier(15_500), "1.5500x");
        assert_eq!(format_multiplier(550_000), "55.0000x");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(25), "+25");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-10), "-10");
    }

    #[test]
    fn test_format_actor() {
        use croupier_engine::player::PlayerId;
        assert_eq!(format_actor(Actor::Dealer), "Dealer");
        assert_eq!(format_actor(Actor::Player(PlayerId(3))), "Seat 3");
    }
}
