use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ActionError;
use crate::game::VariantKind;
use crate::poker::HAND_SIZE;
use crate::roulette::RiskSystem;
use crate::rps::Throw;

/// Every move a seat can submit, across all variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Blackjack: take one more card
    Hit,
    /// Blackjack: end the turn with the current hand
    Stand,
    /// Blackjack: double the wager, take exactly one card, end the turn
    DoubleDown,
    /// Poker: flip the discard selection of a slot (0..5)
    ToggleDiscard(usize),
    /// Poker: replace the selected slots and finish
    ConfirmDiscard,
    /// Rock-Paper-Scissors: commit a throw
    Throw(Throw),
    /// Escalating-risk: pick the risk system (first action, irrevocable)
    ChooseSystem(RiskSystem),
    /// Escalating-risk: risk another turn
    Pull,
    /// Escalating-risk: lock in the current multiplier
    CashOut,
}

impl Action {
    /// The variant this action belongs to.
    pub fn variant(&self) -> VariantKind {
        match self {
            Action::Hit | Action::Stand | Action::DoubleDown => VariantKind::Blackjack,
            Action::ToggleDiscard(_) | Action::ConfirmDiscard => VariantKind::Poker,
            Action::Throw(_) => VariantKind::RockPaperScissors,
            Action::ChooseSystem(_) | Action::Pull | Action::CashOut => VariantKind::Roulette,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
            Action::DoubleDown => write!(f, "double down"),
            Action::ToggleDiscard(slot) => write!(f, "toggle slot {}", slot + 1),
            Action::ConfirmDiscard => write!(f, "confirm discard"),
            Action::Throw(t) => write!(f, "throw {}", t),
            Action::ChooseSystem(s) => write!(f, "choose {}", s),
            Action::Pull => write!(f, "pull"),
            Action::CashOut => write!(f, "cash out"),
        }
    }
}

/// Structural validation of an action before any game state is consulted.
///
/// Rejects actions that belong to a different variant and discard slots
/// outside `0..5`. Turn order and state-dependent legality are checked by
/// the variant itself.
///
/// # Examples
///
/// ```
/// use croupier_engine::game::VariantKind;
/// use croupier_engine::rules::{validate_action, Action};
/// use croupier_engine::errors::ActionError;
///
/// assert!(validate_action(VariantKind::Poker, &Action::ToggleDiscard(4)).is_ok());
/// assert!(matches!(
///     validate_action(VariantKind::Poker, &Action::ToggleDiscard(5)),
///     Err(ActionError::IllegalAction(_))
/// ));
/// assert!(validate_action(VariantKind::Blackjack, &Action::Pull).is_err());
/// ```
pub fn validate_action(kind: VariantKind, action: &Action) -> Result<(), ActionError> {
    if action.variant() != kind {
        return Err(ActionError::illegal(format!(
            "{} is not a {} action",
            action, kind
        )));
    }
    match action {
        Action::ToggleDiscard(slot) if *slot >= HAND_SIZE => Err(ActionError::illegal(format!(
            "discard slot {} out of range 0..{}",
            slot, HAND_SIZE
        ))),
        _ => Ok(()),
    }
}
