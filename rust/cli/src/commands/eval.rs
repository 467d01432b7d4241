//! `eval`: rank five-card hands and name the winner.

use crate::error::CliError;
use crate::formatters::format_cards;
use crate::validation::parse_hand;
use croupier_engine::hand::{evaluate_hand, winning_indices};
use std::io::Write;

pub fn handle_eval_command(hands: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    if hands.is_empty() {
        return Err(CliError::InvalidInput("at least one hand is required".into()));
    }

    let mut evaluated = Vec::with_capacity(hands.len());
    for (i, text) in hands.iter().enumerate() {
        let cards = parse_hand(text)
            .map_err(|e| CliError::InvalidInput(format!("hand {}: {}", i + 1, e)))?;
        let hand = evaluate_hand(&cards)
            .map_err(|e| CliError::InvalidInput(format!("hand {}: {}", i + 1, e)))?;
        writeln!(
            out,
            "Hand {}: {} => {}",
            i + 1,
            format_cards(&cards),
            hand.rank()
        )?;
        evaluated.push(Some(hand));
    }

    if evaluated.len() > 1 {
        let winners = winning_indices(&evaluated);
        let names: Vec<String> = winners.iter().map(|i| format!("Hand {}", i + 1)).collect();
        if winners.len() == 1 {
            writeln!(out, "Winner: {}", names.join(", "))?;
        } else {
            writeln!(out, "Tie: {}", names.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(hands: &[&str]) -> Result<String, CliError> {
        let hands: Vec<String> = hands.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        handle_eval_command(&hands, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn single_hand_has_no_winner_line() {
        let text = eval(&["AH KH QH JH 10H"]).unwrap();
        assert!(text.contains("Royal Flush"));
        assert!(!text.contains("Winner"));
    }

    #[test]
    fn higher_flush_wins() {
        let text = eval(&["2C 5D 9H JS KC", "2H 4H 6H 8H 10H", "3S 5S 7S 9S QS"]).unwrap();
        assert!(text.contains("Hand 1: "));
        assert!(text.contains("High Card"));
        assert!(text.contains("Winner: Hand 3"), "{}", text);
    }

    #[test]
    fn identical_ranks_tie() {
        let text = eval(&["AH KD 9C 7S 2H", "AS KC 9D 7H 2C"]).unwrap();
        assert!(text.contains("Tie: Hand 1, Hand 2"), "{}", text);
    }

    #[test]
    fn bad_hand_names_its_position() {
        match eval(&["AH KD 9C 7S 2H", "AS KC"]) {
            Err(CliError::InvalidInput(msg)) => assert!(msg.starts_with("hand 2:"), "{}", msg),
            other => panic!("expected InvalidInput, got {:?}", other.map(|_| ())),
        }
    }
}
