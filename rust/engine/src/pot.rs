//! Net payout arithmetic shared by the variants.
//!
//! Every amount is a signed change to a player's balance: positive for a
//! win, negative for a loss, zero for a push. All arithmetic is integer so
//! the same game always settles to the same numbers.

use serde::{Deserialize, Serialize};

use crate::player::{Outcome, Player, PlayerId};

/// Multiplier tables are expressed in basis points of the wager.
pub const BASIS_POINTS: i64 = 10_000;

/// A single player's settled net change.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GamePayout {
    pub player: PlayerId,
    pub amount: i64, // Positive for win, negative for loss, zero for push/tie.
}

/// Even-money settlement: Won +wager, Lost −wager, anything else 0.
pub fn even_money(outcome: Outcome, wager: i64) -> i64 {
    match outcome {
        Outcome::Won => wager,
        Outcome::Lost => -wager,
        Outcome::Tie | Outcome::NoResult => 0,
    }
}

/// Sum of every seat's wager, saturating at `i64::MAX`.
pub fn total_pot(players: &[Player]) -> i64 {
    players.iter().map(Player::wager).fold(0, i64::saturating_add)
}

/// Equal share of the pot for each winner, rounded down. The remainder
/// stays with the house.
pub fn split_pot(total_pot: i64, winners: usize) -> i64 {
    if winners == 0 {
        return 0;
    }
    total_pot / winners as i64
}

/// Net for a pot game: winners get their share minus their own stake.
pub fn pot_share_payout(total_pot: i64, winners: usize, is_winner: bool, wager: i64) -> i64 {
    if is_winner {
        split_pot(total_pot, winners) - wager
    } else {
        -wager
    }
}

/// Net for a multiplier win: `wager * bp / 10000 − wager`, floored.
///
/// # Examples
///
/// ```
/// use croupier_engine::pot::multiplier_payout;
///
/// assert_eq!(multiplier_payout(100, 15_500), 55);
/// assert_eq!(multiplier_payout(100, 10_000), 0);
/// assert_eq!(multiplier_payout(3, 11_500), 0);
/// ```
pub fn multiplier_payout(wager: i64, basis_points: u32) -> i64 {
    let gross = wager.saturating_mul(basis_points as i64) / BASIS_POINTS;
    gross - wager
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_money_settlement() {
        assert_eq!(even_money(Outcome::Won, 50), 50);
        assert_eq!(even_money(Outcome::Lost, 50), -50);
        assert_eq!(even_money(Outcome::Tie, 50), 0);
        assert_eq!(even_money(Outcome::NoResult, 50), 0);
    }

    #[test]
    fn split_pot_rounds_down() {
        assert_eq!(split_pot(100, 3), 33);
        assert_eq!(split_pot(100, 0), 0);
        assert_eq!(pot_share_payout(300, 1, true, 100), 200);
        assert_eq!(pot_share_payout(300, 2, true, 100), 50);
        assert_eq!(pot_share_payout(300, 2, false, 100), -100);
    }

    #[test]
    fn total_pot_saturates() {
        let seats = [
            Player::new(PlayerId(1), i64::MAX),
            Player::new(PlayerId(2), 5),
        ];
        assert_eq!(total_pot(&seats), i64::MAX);
        assert_eq!(total_pot(&seats[1..]), 5);
    }

    #[test]
    fn multiplier_payout_is_floored() {
        assert_eq!(multiplier_payout(7, 17_000), 4); // 11.9 -> 11
        assert_eq!(multiplier_payout(1_000, 550_000), 54_000);
    }
}
