//! Error types for the CLI application.
//!
//! Engine errors arrive as typed `thiserror` enums and are flattened into
//! [`CliError::Engine`] here, at the edge of the program.

use std::fmt;

use croupier_engine::errors::{ActionError, EngineError, QueryError, RosterError, StartError};

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

macro_rules! engine_error_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CliError {
                fn from(error: $ty) -> Self {
                    CliError::Engine(error.to_string())
                }
            }
        )*
    };
}

engine_error_from!(EngineError, RosterError, StartError, ActionError, QueryError);

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::player::PlayerId;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = ActionError::NotPlayersTurn(PlayerId(3)).into();
        assert_eq!(e.to_string(), "Engine error: It's not player 3's turn");
    }

    #[test]
    fn io_errors_expose_a_source() {
        use std::error::Error;
        let e: CliError = std::io::Error::other("disk").into();
        assert!(e.source().is_some());
    }
}
