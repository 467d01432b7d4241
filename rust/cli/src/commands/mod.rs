//! Command handler modules for the croupier CLI.
//!
//! Every subcommand lives in its own file and follows one pattern:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`) are
//!   passed in, so tests can drive handlers with in-memory buffers
//! - Errors propagate through [`CliError`](crate::error::CliError)

pub mod cfg;
pub mod eval;
pub mod payouts;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use payouts::handle_payouts_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
