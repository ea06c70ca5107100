//! # CLI Error Types
//!
//! Errors surfaced by the `receipt` binary and its interactive shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in receipt-cli                            │
//! │                                                                         │
//! │  one-shot mode                        interactive shell                 │
//! │  ─────────────                        ─────────────────                 │
//! │  generate()                           execute(command)                  │
//! │     │                                    │                              │
//! │     ├── file missing ─► ItemsNotFound    ├── CoreError ─► SessionError  │
//! │     ├── CoreError ────► CliError::Core   ├── bad row no ─► RowOutOfRange│
//! │     ▼                                    ▼                              │
//! │  main() prints "Error: …", exit 1     "error: …" printed, shell goes on │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a deterministic input error, so nothing is retried.

use std::io;
use std::path::PathBuf;

use receipt_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from a `receipt` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--items` nor another mode was requested.
    #[error("--items is required unless --interactive or --schema is given")]
    MissingItems,

    /// The `--items` path does not exist.
    #[error("Items file not found: {}", .0.display())]
    ItemsNotFound(PathBuf),

    /// A file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The receipt could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Parsing or computing the receipt failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The line editor failed.
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;

/// Errors from a single interactive shell command.
///
/// These are reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Parsing or computing the receipt failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An uploaded file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The receipt copy could not be saved.
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// `remove` was given a row number that does not exist.
    #[error("No row {index}; there are {count} rows")]
    RowOutOfRange { index: usize, count: usize },

    /// `save` before any receipt was generated.
    #[error("Nothing to save yet; run `show` first")]
    NothingToSave,

    /// A command was called with the wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// The input line has unbalanced quotes.
    #[error("Unbalanced quotes in input")]
    UnbalancedQuotes,

    /// The first word is not a known command.
    #[error("Unknown command '{0}'. Type `help` for a list of commands")]
    UnknownCommand(String),
}

/// Result type for shell commands.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::FormatError;

    #[test]
    fn test_items_not_found_message() {
        let err = CliError::ItemsNotFound(PathBuf::from("order.json"));
        assert_eq!(err.to_string(), "Items file not found: order.json");
    }

    #[test]
    fn test_core_errors_pass_through_unchanged() {
        let core: CoreError = FormatError::InvalidTaxRate("x".to_string()).into();
        assert_eq!(CliError::from(core.clone()).to_string(), "Invalid tax rate 'x'");
        assert_eq!(SessionError::from(core).to_string(), "Invalid tax rate 'x'");
    }

    #[test]
    fn test_session_error_messages() {
        let err = SessionError::RowOutOfRange { index: 4, count: 2 };
        assert_eq!(err.to_string(), "No row 4; there are 2 rows");
    }
}
