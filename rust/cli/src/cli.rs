//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use croupier_engine::game::Variant;

#[derive(Parser, Debug)]
#[command(
    name = "croupier",
    version,
    about = "Croupier casino games CLI",
    long_about = "Turn-based casino games on the croupier engine: blackjack, five-card draw, \
                  rock-paper-scissors and the escalating-risk game.",
    after_help = "Configuration: set CROUPIER_CONFIG to a TOML file; CROUPIER_* variables override it. \
                  Logging: RUST_LOG=croupier_engine=debug"
)]
pub struct CroupierCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one game interactively against bots or the dealer
    Play {
        #[arg(long, value_enum)]
        game: GameArg,
        /// Wager for your seat (defaults to the configured wager)
        #[arg(long)]
        wager: Option<i64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Bot opponents to seat next to you
        #[arg(long)]
        bots: Option<usize>,
    },
    /// Run all-bot games and report the net per seat
    Sim {
        #[arg(long, value_enum)]
        game: GameArg,
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL file for the game records
        #[arg(long)]
        output: Option<String>,
    },
    /// Evaluate five-card hands, e.g. "AH KH QH JH 10H"
    Eval {
        #[arg(required = true)]
        hands: Vec<String>,
    },
    /// Print the escalating-risk multiplier tables
    Payouts,
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Game selector for `play` and `sim`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GameArg {
    Blackjack,
    Poker,
    Rps,
    Roulette,
}

impl GameArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameArg::Blackjack => "blackjack",
            GameArg::Poker => "poker",
            GameArg::Rps => "rps",
            GameArg::Roulette => "roulette",
        }
    }

    pub fn variant(&self, decks: u8) -> Variant {
        match self {
            GameArg::Blackjack => Variant::Blackjack { decks },
            GameArg::Poker => Variant::Poker,
            GameArg::Rps => Variant::RockPaperScissors,
            GameArg::Roulette => Variant::Roulette,
        }
    }

    /// Opponents seated when `--bots` is not given.
    pub fn default_bots(&self) -> usize {
        match self {
            GameArg::Blackjack | GameArg::Roulette => 0,
            GameArg::Poker | GameArg::Rps => 1,
        }
    }

    /// Seats used by `sim`.
    pub fn sim_seats(&self) -> usize {
        match self {
            GameArg::Blackjack => 3,
            GameArg::Poker => 4,
            GameArg::Rps => 2,
            GameArg::Roulette => 1,
        }
    }
}
