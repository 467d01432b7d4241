use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents one of the four standard suits, plus the joker marker used by
/// decks that carry jokers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
    /// Joker pseudo-suit
    Joker,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
            Suit::Joker => "★",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
            Suit::Joker => "Joker",
        }
    }
}

/// Represents the rank of a card from Ace (1) through King (13).
/// The raw numeric value is the card identity; games derive their own
/// scoring values from it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    /// Raw rank value, 1 for Ace through 13 for King.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Poker value: Ace plays high (14).
    pub fn poker_value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            r => r as u8,
        }
    }

    /// Blackjack value with aces counted as 11; callers demote aces.
    pub fn blackjack_value(self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u8,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

/// Represents a single playing card.
/// Cards are plain values: equality and hashing use (rank, suit) only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Ace through King)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Jokers carry no meaningful rank; all jokers compare equal.
    pub const fn joker() -> Self {
        Self {
            rank: Rank::Ace,
            suit: Suit::Joker,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }

    /// Human readable name, e.g. "Queen of Hearts".
    pub fn name(&self) -> String {
        if self.is_joker() {
            return "Joker".to_string();
        }
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            return write!(f, "JK");
        }
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("empty card")]
    Empty,
    #[error("unknown rank in {0:?}")]
    UnknownRank(String),
    #[error("unknown suit in {0:?}")]
    UnknownSuit(String),
}

/// Parses short card notation: `AH`, `10h`, `Ts`, `qd`, `JK` (joker).
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_uppercase();
        if text.is_empty() {
            return Err(ParseCardError::Empty);
        }
        if text == "JK" || text == "JOKER" {
            return Ok(Card::joker());
        }
        let mut chars = text.chars();
        let suit_char = chars.next_back().ok_or(ParseCardError::Empty)?;
        let rank_text = chars.as_str();
        let suit = match suit_char {
            'H' | '♥' => Suit::Hearts,
            'D' | '♦' => Suit::Diamonds,
            'C' | '♣' => Suit::Clubs,
            'S' | '♠' => Suit::Spades,
            _ => return Err(ParseCardError::UnknownSuit(s.to_string())),
        };
        let rank = match rank_text {
            "A" | "1" => Rank::Ace,
            "K" | "13" => Rank::King,
            "Q" | "12" => Rank::Queen,
            "J" | "11" => Rank::Jack,
            "T" | "10" => Rank::Ten,
            digits => digits
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_u8)
                .ok_or_else(|| ParseCardError::UnknownRank(s.to_string()))?,
        };
        Ok(Card::new(rank, suit))
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// One standard 52-card set, suit by suit, Ace through King.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_notation() {
        assert_eq!("AH".parse(), Ok(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!("10h".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("Ts".parse(), Ok(Card::new(Rank::Ten, Suit::Spades)));
        assert_eq!("qd".parse(), Ok(Card::new(Rank::Queen, Suit::Diamonds)));
        assert_eq!("jk".parse(), Ok(Card::joker()));
        assert!(matches!(
            "1X".parse::<Card>(),
            Err(ParseCardError::UnknownSuit(_))
        ));
        assert!(matches!(
            "ZC".parse::<Card>(),
            Err(ParseCardError::UnknownRank(_))
        ));
    }

    #[test]
    fn derived_names_and_values() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(card.name(), "Queen of Hearts");
        assert_eq!(card.to_string(), "Q♥");
        assert_eq!(Rank::Ace.poker_value(), 14);
        assert_eq!(Rank::Ace.blackjack_value(), 11);
        assert_eq!(Rank::King.blackjack_value(), 10);
        assert_eq!(Rank::Seven.value(), 7);
    }

    #[test]
    fn full_deck_is_unique() {
        let deck = full_deck();
        let set: std::collections::HashSet<_> = deck.iter().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(set.len(), 52);
    }
}
