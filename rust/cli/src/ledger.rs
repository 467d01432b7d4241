//! In-memory balance ledger.
//!
//! The engine only hands back signed payouts; holding balances is the
//! collaborator's job.

use std::collections::HashMap;

use croupier_engine::player::PlayerId;
use croupier_engine::pot::GamePayout;

use crate::error::CliError;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<PlayerId, i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an account; an existing one keeps its balance.
    pub fn open(&mut self, player: PlayerId, balance: i64) {
        self.balances.entry(player).or_insert(balance);
    }

    pub fn balance(&self, player: PlayerId) -> Option<i64> {
        self.balances.get(&player).copied()
    }

    pub fn can_cover(&self, player: PlayerId, amount: i64) -> bool {
        self.balance(player).is_some_and(|b| b >= amount)
    }

    /// Apply every payout or none of them.
    pub fn apply(&mut self, payouts: &[GamePayout]) -> Result<(), CliError> {
        if let Some(missing) = payouts
            .iter()
            .find(|p| !self.balances.contains_key(&p.player))
        {
            return Err(CliError::InvalidInput(format!(
                "no ledger account for player {}",
                missing.player
            )));
        }
        for p in payouts {
            if let Some(balance) = self.balances.get_mut(&p.player) {
                *balance += p.amount;
            }
        }
        tracing::debug!(entries = payouts.len(), "ledger updated");
        Ok(())
    }

    /// Accounts sorted by player id.
    pub fn accounts(&self) -> Vec<(PlayerId, i64)> {
        let mut accounts: Vec<_> = self.balances.iter().map(|(p, b)| (*p, *b)).collect();
        accounts.sort();
        accounts
    }
}
