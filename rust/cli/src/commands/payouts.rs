//! `payouts`: the escalating-risk multiplier tables.

use crate::error::CliError;
use crate::formatters::format_multiplier;
use croupier_engine::roulette::{RiskSystem, CHAMBERS};
use std::io::Write;

/// One row per number of survived pulls: the multiplier a cash-out would pay
/// and the chance the next pull fails.
pub fn handle_payouts_command(out: &mut dyn Write) -> Result<(), CliError> {
    let systems = [RiskSystem::Fixed, RiskSystem::Escalating];
    for system in systems {
        writeln!(out, "{}", system)?;
        writeln!(out, "  {:<8}{:<12}{}", "turns", "multiplier", "next pull fails")?;
        for turns in 0..CHAMBERS {
            writeln!(
                out,
                "  {:<8}{:<12}{}/{}",
                turns,
                format_multiplier(system.multiplier_bp(turns)),
                system.failure_slots(turns + 1),
                CHAMBERS
            )?;
        }
    }
    Ok(())
}
