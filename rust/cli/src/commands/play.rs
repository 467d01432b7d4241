//! # Play Command
//!
//! One interactive game for the human seat against bots or the house dealer.
//!
//! The human always sits in seat 1; bots take seats 2 and up. Dealer and
//! bot moves come out of the engine as deferred steps and are run here,
//! after the configured dealer delay. When the game completes, the signed
//! payouts are applied to an in-memory ledger and the balances printed.
//!
//! Quitting (`q`) or closing stdin abandons the game before settlement; no
//! ledger entry is made.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use croupier_engine::engine::Engine;
use croupier_engine::player::PlayerId;
use croupier_engine::rules::Action;

use crate::cli::GameArg;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_actor, format_signed};
use crate::io_utils::read_stdin_line;
use crate::ledger::Ledger;
use crate::ui;
use crate::validation::{parse_action, prompt_for, ParseResult};

/// Seat taken by the person at the keyboard.
pub const HUMAN: PlayerId = PlayerId(1);

pub fn handle_play_command(
    game: GameArg,
    wager: Option<i64>,
    seed: Option<u64>,
    bots: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let wager = wager.unwrap_or(cfg.wager);
    if wager < 0 {
        ui::write_error(err, "wager must be >= 0")?;
        return Err(CliError::InvalidInput("wager must be >= 0".to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let bots = bots.unwrap_or_else(|| game.default_bots());

    let variant = game.variant(cfg.decks);
    let kind = variant.kind();
    let (min, max) = kind.player_limits();
    let seats = bots + 1;
    if seats < min || seats > max {
        let msg = format!(
            "{} seats {}..={} players, got {} (1 + {} bots)",
            kind, min, max, seats, bots
        );
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let mut ledger = Ledger::new();
    ledger.open(HUMAN, cfg.starting_balance);
    let bot_ids: Vec<PlayerId> = (0..bots).map(|i| PlayerId(i as u64 + 2)).collect();
    for id in &bot_ids {
        ledger.open(*id, cfg.starting_balance);
    }
    if !ledger.can_cover(HUMAN, wager) {
        return Err(CliError::InvalidInput(format!(
            "wager {} exceeds balance {}",
            wager, cfg.starting_balance
        )));
    }

    let engine = Engine::with_seed(variant, min, max, seed);
    engine.add_player(HUMAN, wager)?;
    for id in &bot_ids {
        engine.add_bot(*id, wager)?;
    }
    engine.start()?;

    writeln!(
        out,
        "play: game={} seed={} wager={} bots={}",
        game.as_str(),
        seed,
        wager,
        bots
    )?;
    tracing::info!(game = game.as_str(), seed, wager, bots, "interactive game started");

    let delay = Duration::from_millis(cfg.dealer_delay_ms);
    while !engine.is_complete()? {
        if engine.can_act(HUMAN)? {
            ui::write_view(out, &engine.public_view(HUMAN)?)?;
            write!(out, "{}", prompt_for(kind))?;
            out.flush()?;

            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return abandon(out);
            };
            match parse_action(kind, &line) {
                ParseResult::Action(Action::DoubleDown)
                    if !ledger.can_cover(HUMAN, wager.saturating_mul(2)) =>
                {
                    ui::write_error(err, "insufficient balance to double down")?;
                }
                ParseResult::Action(action) => match engine.apply_action(HUMAN, action) {
                    Ok(()) => writeln!(out, "Action: {}", action)?,
                    Err(e) => ui::write_error(err, &format!("Invalid action: {}", e))?,
                },
                ParseResult::Quit => return abandon(out),
                ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            }
            continue;
        }

        let step = match engine.next_ai_action()? {
            Some(step) => Some(step),
            None => engine.next_dealer_action()?,
        };
        let Some(step) = step else {
            return Err(CliError::Engine(
                "game stalled: no seat or dealer can act".to_string(),
            ));
        };
        let actor = step.actor();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        engine.run_deferred(step)?;
        writeln!(out, "{} acted", format_actor(actor))?;
    }

    ui::write_view(out, &engine.public_view(HUMAN)?)?;
    let payouts = engine.payouts()?;
    ledger.apply(&payouts)?;
    for p in &payouts {
        let balance = ledger.balance(p.player).unwrap_or_default();
        let who = if p.player == HUMAN { "You" } else { "Bot" };
        writeln!(
            out,
            "{} (seat {}): {} -> balance {}",
            who,
            p.player,
            format_signed(p.amount),
            balance
        )?;
    }
    Ok(())
}

fn abandon(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Game abandoned; no payouts applied.")?;
    tracing::info!("interactive game abandoned");
    Ok(())
}
