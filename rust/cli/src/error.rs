//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` carries one failed item plus its message. The
//! `tags` and `verify` commands use it to report every bad hand, keyed by hand
//! id, before deciding the exit code.

use std::fmt;

use homegame_engine::batch::HandFailure;
use homegame_engine::hand::HandId;

/// Custom error type for CLI operations.
///
/// Covers everything a command handler can fail with, so handlers can
/// propagate with `?`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Hand store could not be read or written
    Store(String),

    /// One or more hands failed normalization
    Hands(Vec<BatchValidationError<HandId>>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Store(msg) => write!(f, "Store error: {}", msg),
            CliError::Hands(failures) => write!(f, "{} hand(s) failed validation", failures.len()),
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

impl From<rusqlite::Error> for CliError {
    fn from(error: rusqlite::Error) -> Self {
        CliError::Store(error.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

/// Generic error type for batch validation operations.
///
/// # Type Parameters
///
/// * `T` - Context identifying the failed item (a hand id, a line number, a
///   file path). Must implement `Display` for error formatting.
///
/// # Examples
///
/// ```rust
/// use homegame_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "Malformed action log: flop must be a list".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: Malformed action log: flop must be a list");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

impl From<&HandFailure> for BatchValidationError<HandId> {
    fn from(failure: &HandFailure) -> Self {
        Self {
            item_context: failure.hand,
            message: failure.error.to_string(),
        }
    }
}
