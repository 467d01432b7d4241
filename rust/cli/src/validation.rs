//! Input parsing and validation for interactive commands.
//!
//! Each variant has its own short command vocabulary; `q`/`quit` works
//! everywhere. Parsing is purely textual: whether an action is legal right
//! now is the engine's call.

use croupier_engine::cards::Card;
use croupier_engine::game::VariantKind;
use croupier_engine::roulette::RiskSystem;
use croupier_engine::rps::Throw;
use croupier_engine::rules::Action;

/// Result type for parsing user input into engine actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    /// User entered quit command (q or quit)
    Quit,
    Invalid(String),
}

/// Parse a line of input for a game of `kind`.
///
/// ```rust
/// # use croupier_cli::validation::{parse_action, ParseResult};
/// use croupier_engine::game::VariantKind;
/// use croupier_engine::rules::Action;
///
/// assert_eq!(parse_action(VariantKind::Blackjack, "h"), ParseResult::Action(Action::Hit));
/// assert_eq!(parse_action(VariantKind::Poker, "3"), ParseResult::Action(Action::ToggleDiscard(2)));
/// assert_eq!(parse_action(VariantKind::Roulette, "quit"), ParseResult::Quit);
/// ```
pub fn parse_action(kind: VariantKind, input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    if input == "q" || input == "quit" {
        return ParseResult::Quit;
    }

    match kind {
        VariantKind::Blackjack => match input.as_str() {
            "h" | "hit" => ParseResult::Action(Action::Hit),
            "s" | "stand" => ParseResult::Action(Action::Stand),
            "d" | "double" | "double down" => ParseResult::Action(Action::DoubleDown),
            other => unrecognized(other, "hit, stand, double, q"),
        },
        VariantKind::Poker => match input.as_str() {
            "d" | "draw" | "confirm" => ParseResult::Action(Action::ConfirmDiscard),
            other => match other.parse::<usize>() {
                Ok(slot @ 1..=5) => ParseResult::Action(Action::ToggleDiscard(slot - 1)),
                Ok(_) => ParseResult::Invalid("Card slot must be between 1 and 5".to_string()),
                Err(_) => unrecognized(other, "1-5 to toggle a discard, draw, q"),
            },
        },
        VariantKind::RockPaperScissors => match input.parse::<Throw>() {
            Ok(throw) => ParseResult::Action(Action::Throw(throw)),
            Err(_) => unrecognized(&input, "rock, paper, scissors, q"),
        },
        VariantKind::Roulette => match input.as_str() {
            "p" | "pull" => ParseResult::Action(Action::Pull),
            "c" | "cash" | "cashout" | "cash out" => ParseResult::Action(Action::CashOut),
            other => match other.parse::<RiskSystem>() {
                Ok(system) => ParseResult::Action(Action::ChooseSystem(system)),
                Err(_) => unrecognized(other, "fixed, escalating, pull, cash, q"),
            },
        },
    }
}

fn unrecognized(input: &str, valid: &str) -> ParseResult {
    ParseResult::Invalid(format!(
        "Unrecognized action '{}'. Valid actions: {}",
        input, valid
    ))
}

/// Prompt text listing the commands for `kind`.
pub fn prompt_for(kind: VariantKind) -> &'static str {
    match kind {
        VariantKind::Blackjack => "Enter action (hit/stand/double/q): ",
        VariantKind::Poker => "Toggle a discard (1-5), draw, or q: ",
        VariantKind::RockPaperScissors => "Throw (rock/paper/scissors/q): ",
        VariantKind::Roulette => "Enter action (fixed/escalating/pull/cash/q): ",
    }
}

/// Parse a five-card hand written as space or comma separated cards.
pub fn parse_hand(text: &str) -> Result<Vec<Card>, String> {
    let cards = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<Card>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    if cards.iter().any(|c| c.is_joker()) {
        return Err("jokers are not valid in a poker hand".to_string());
    }
    if cards.len() != 5 {
        return Err(format!(
            "a hand needs exactly 5 cards, got {} in {:?}",
            cards.len(),
            text
        ));
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::cards::{Rank, Suit};

    #[test]
    fn blackjack_vocabulary() {
        assert_eq!(
            parse_action(VariantKind::Blackjack, " STAND "),
            ParseResult::Action(Action::Stand)
        );
        assert_eq!(
            parse_action(VariantKind::Blackjack, "d"),
            ParseResult::Action(Action::DoubleDown)
        );
        match parse_action(VariantKind::Blackjack, "pull") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn poker_slots_are_one_based() {
        assert_eq!(
            parse_action(VariantKind::Poker, "1"),
            ParseResult::Action(Action::ToggleDiscard(0))
        );
        assert_eq!(
            parse_action(VariantKind::Poker, "draw"),
            ParseResult::Action(Action::ConfirmDiscard)
        );
        assert!(matches!(
            parse_action(VariantKind::Poker, "6"),
            ParseResult::Invalid(_)
        ));
        assert!(matches!(
            parse_action(VariantKind::Poker, "0"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn rps_and_roulette_vocabulary() {
        assert_eq!(
            parse_action(VariantKind::RockPaperScissors, "s"),
            ParseResult::Action(Action::Throw(Throw::Scissors))
        );
        assert_eq!(
            parse_action(VariantKind::Roulette, "e"),
            ParseResult::Action(Action::ChooseSystem(RiskSystem::Escalating))
        );
        assert_eq!(
            parse_action(VariantKind::Roulette, "cash"),
            ParseResult::Action(Action::CashOut)
        );
        assert_eq!(parse_action(VariantKind::Roulette, "Q"), ParseResult::Quit);
        assert!(matches!(
            parse_action(VariantKind::Roulette, ""),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn parse_hand_accepts_commas_and_spaces() {
        let cards = parse_hand("AH, KH QH,JH 10h").unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4], Card::new(Rank::Ten, Suit::Hearts));
    }

    #[test]
    fn parse_hand_rejects_bad_input() {
        assert!(parse_hand("AH KH QH JH").unwrap_err().contains("exactly 5"));
        assert!(parse_hand("AH KH QH JH 1X").is_err());
        assert!(parse_hand("AH KH QH JH JK").unwrap_err().contains("jokers"));
    }
}
