use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::{Card, Rank};
use crate::errors::EvalError;

/// Five-card poker hand categories, lowest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };
        f.write_str(s)
    }
}

/// An evaluated five-card hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PokerHand {
    rank: HandRank,
    // kickers: ordered for tiebreaks, meaning depends on rank
    kickers: Vec<u8>,
    cards: [Card; 5],
}

impl PokerHand {
    pub fn rank(&self) -> HandRank {
        self.rank
    }
    pub fn kickers(&self) -> &[u8] {
        &self.kickers
    }
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }
}

impl fmt::Display for PokerHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.rank, self.kickers)
    }
}

/// Evaluates exactly five cards.
///
/// Aces play high (14) except in the wheel A-2-3-4-5, which is the lowest
/// straight. Kickers per rank:
///
/// - Royal/Straight Flush, Straight: `[high]` (wheel high is 5)
/// - Four of a Kind: `[quad, kicker]`
/// - Full House: `[trip, pair]`
/// - Flush, High Card: all five values descending
/// - Three of a Kind: `[trip, k1, k2]`
/// - Two Pair: `[high pair, low pair, kicker]`
/// - One Pair: `[pair, k1, k2, k3]`
///
/// # Examples
///
/// ```
/// use croupier_engine::cards::Card;
/// use croupier_engine::hand::{evaluate_hand, HandRank};
///
/// let cards: Vec<Card> = ["2C", "2D", "2H", "5S", "5D"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let hand = evaluate_hand(&cards).unwrap();
/// assert_eq!(hand.rank(), HandRank::FullHouse);
/// assert_eq!(hand.kickers(), &[2, 5]);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<PokerHand, EvalError> {
    let cards: [Card; 5] = cards
        .try_into()
        .map_err(|_| EvalError::InvalidHandSize(cards.len()))?;

    let is_flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let straight_high = straight_high(&cards);
    let groups = group_ranks(&cards);

    let (rank, kickers) = match (is_flush, straight_high) {
        (true, Some(high)) if high >= 10 => (HandRank::RoyalFlush, vec![high]),
        (true, Some(high)) => (HandRank::StraightFlush, vec![high]),
        _ => {
            let group_values: Vec<u8> = groups.iter().map(|&(v, _)| v).collect();
            match groups.iter().map(|&(_, n)| n).collect::<Vec<_>>().as_slice() {
                [4, 1] => (HandRank::FourOfAKind, group_values),
                [3, 2] => (HandRank::FullHouse, group_values),
                _ if is_flush => (HandRank::Flush, group_values),
                _ if straight_high.is_some() => {
                    (HandRank::Straight, straight_high.into_iter().collect())
                }
                [3, 1, 1] => (HandRank::ThreeOfAKind, group_values),
                [2, 2, 1] => (HandRank::TwoPair, group_values),
                [2, 1, 1, 1] => (HandRank::OnePair, group_values),
                _ => (HandRank::HighCard, group_values),
            }
        }
    };

    Ok(PokerHand {
        rank,
        kickers,
        cards,
    })
}

/// Orders by rank, then kickers lexicographically.
pub fn compare_hands(a: &PokerHand, b: &PokerHand) -> Ordering {
    match a.rank.cmp(&b.rank) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Indices of every hand tied for best. Unevaluated (`None`) entries never
/// win; the result is empty only if every entry is `None`.
pub fn winning_indices(hands: &[Option<PokerHand>]) -> Vec<usize> {
    let best = hands
        .iter()
        .flatten()
        .max_by(|a, b| compare_hands(a, b));
    let Some(best) = best else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter_map(|(i, h)| match h {
            Some(h) if compare_hands(h, best) == Ordering::Equal => Some(i),
            _ => None,
        })
        .collect()
}

/// Rank values grouped and sorted by (count desc, value desc).
fn group_ranks(cards: &[Card; 5]) -> Vec<(u8, usize)> {
    let mut counts = [0usize; 15]; // 2..14 used
    for c in cards {
        counts[c.rank.poker_value() as usize] += 1;
    }
    let mut groups: Vec<(u8, usize)> = (2..=14u8)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (v, counts[v as usize]))
        .collect();
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

fn straight_high(cards: &[Card; 5]) -> Option<u8> {
    let mut raw: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    raw.sort_unstable();
    if raw == [1, 2, 3, 4, 5] {
        return Some(Rank::Five.poker_value());
    }
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.poker_value()).collect();
    values.sort_unstable();
    let consecutive = values.windows(2).all(|w| w[1] == w[0] + 1);
    consecutive.then(|| values[4])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn wrong_size_is_rejected() {
        assert_eq!(
            evaluate_hand(&hand("AH KH QH JH")),
            Err(EvalError::InvalidHandSize(4))
        );
    }

    #[test]
    fn groups_sort_by_count_then_value() {
        let cards: [Card; 5] = hand("3C KD 3H KS 9D").try_into().unwrap();
        assert_eq!(group_ranks(&cards), vec![(13, 2), (3, 2), (9, 1)]);
    }

    #[test]
    fn straight_flush_to_ten_or_better_is_royal() {
        let ten_high = evaluate_hand(&hand("6S 7S 8S 9S 10S")).unwrap();
        assert_eq!(ten_high.rank(), HandRank::RoyalFlush);
        assert_eq!(ten_high.kickers(), &[10]);
        let king_high = evaluate_hand(&hand("9H 10H JH QH KH")).unwrap();
        assert_eq!(king_high.rank(), HandRank::RoyalFlush);
        assert_eq!(compare_hands(&king_high, &ten_high), Ordering::Greater);
    }

    #[test]
    fn nine_high_straight_flush_is_not_royal() {
        let h = evaluate_hand(&hand("5D 6D 7D 8D 9D")).unwrap();
        assert_eq!(h.rank(), HandRank::StraightFlush);
        assert_eq!(h.kickers(), &[9]);
    }
}
