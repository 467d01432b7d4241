//! Simulation command handler.
//!
//! Plays `games` all-bot games back to back. Game `i` uses seed
//! `base_seed + i` (wrapping), so a run is reproducible from its base seed.
//! Payouts accumulate in one ledger across games; the summary reports each
//! seat's net and the house's side of it. With `--output`, every finished
//! game is appended to a JSONL file as a [`GameRecord`].
//!
//! [`GameRecord`]: croupier_engine::logger::GameRecord

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use croupier_engine::engine::Engine;
use croupier_engine::logger::GameLogger;
use croupier_engine::player::{Outcome, PlayerId};

use crate::cli::GameArg;
use crate::config;
use crate::error::CliError;
use crate::formatters::format_signed;
use crate::io_utils::ensure_parent_dir;
use crate::ledger::Ledger;
use crate::ui;

#[derive(Debug, Default, Clone, Copy)]
struct SeatTally {
    won: u32,
    lost: u32,
    tie: u32,
}

pub fn handle_sim_command(
    game: GameArg,
    games: u32,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let cfg = config::load_with_sources()?.config;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut logger = match output.as_ref() {
        Some(path) => {
            let path = PathBuf::from(path);
            ensure_parent_dir(&path).map_err(CliError::InvalidInput)?;
            Some(GameLogger::create(&path)?)
        }
        None => None,
    };

    let variant = game.variant(cfg.decks);
    let (min, max) = variant.kind().player_limits();
    let seats: Vec<PlayerId> = (1..=game.sim_seats() as u64).map(PlayerId).collect();

    let mut ledger = Ledger::new();
    for id in &seats {
        ledger.open(*id, cfg.starting_balance);
    }
    let mut tallies: HashMap<PlayerId, SeatTally> = HashMap::new();
    let mut house = 0i64;

    writeln!(
        out,
        "sim: game={} games={} seed={} wager={}",
        game.as_str(),
        games,
        base_seed,
        cfg.wager
    )?;

    for i in 0..games {
        let game_seed = base_seed.wrapping_add(u64::from(i));
        let engine = Engine::with_seed(variant, min, max, game_seed);
        for id in &seats {
            engine.add_bot(*id, cfg.wager)?;
        }
        engine.start()?;
        engine.run_bots()?;
        if !engine.is_complete()? {
            return Err(CliError::Engine(format!(
                "game {} (seed {}) stalled before completion",
                i + 1,
                game_seed
            )));
        }

        let payouts = engine.payouts()?;
        ledger.apply(&payouts)?;
        house -= payouts.iter().map(|p| p.amount).sum::<i64>();
        for id in &seats {
            let tally = tallies.entry(*id).or_default();
            match engine.result(*id)? {
                Outcome::Won => tally.won += 1,
                Outcome::Lost => tally.lost += 1,
                Outcome::Tie => tally.tie += 1,
                Outcome::NoResult => {}
            }
        }

        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            logger.write(&engine.record(&id)?)?;
        }
        tracing::debug!(game = i + 1, seed = game_seed, "simulated game complete");
    }

    for (id, balance) in ledger.accounts() {
        let tally = tallies.get(&id).copied().unwrap_or_default();
        writeln!(
            out,
            "Seat {}: net {} (won {}, lost {}, tie {}) balance {}",
            id,
            format_signed(balance - cfg.starting_balance),
            tally.won,
            tally.lost,
            tally.tie,
            balance
        )?;
    }
    writeln!(out, "House: net {}", format_signed(house))?;
    if let Some(path) = output {
        writeln!(out, "Wrote {} records to {}", games, path)?;
    }
    tracing::info!(games, base_seed, house, "simulation finished");
    Ok(())
}
