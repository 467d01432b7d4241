//! # croupier CLI Library
//!
//! Terminal front end for the croupier casino engine. The CLI owns the
//! things the engine deliberately does not: configuration, a balance ledger,
//! prompts and log output.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand handler, writing
//! to the given streams and returning the process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["croupier", "eval", "AH KH QH JH 10H"];
//! let code = croupier_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: one interactive game against bots or the dealer
//! - `sim`: all-bot games with a net summary and optional JSONL records
//! - `eval`: rank five-card hands and name the winner
//! - `payouts`: the escalating-risk multiplier tables
//! - `cfg`: resolved configuration and value sources

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ledger;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, CroupierCli};
use commands::{
    handle_cfg_command, handle_eval_command, handle_payouts_command, handle_play_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "eval", "payouts", "cfg"];

/// Main entry point for the CLI application.
///
/// Interactive input is read from the process stdin; use
/// [`run_with_input`] to supply it from elsewhere.
///
/// # Returns
///
/// Exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`], with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CroupierCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            game,
            wager,
            seed,
            bots,
        } => handle_play_command(game, wager, seed, bots, out, err, stdin),
        Commands::Sim {
            game,
            games,
            seed,
            output,
        } => handle_sim_command(game, games, seed, output, out, err),
        Commands::Eval { hands } => handle_eval_command(&hands, out),
        Commands::Payouts => handle_payouts_command(out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Croupier casino games CLI").is_err()
                || writeln!(err, "Usage: croupier <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            if writeln!(err, "\nFor full help, run: croupier --help").is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
