//! Verify command handler.
//!
//! Normalizes every hand in the input without evaluating tags and reports each
//! action log that is malformed, names an unknown action, names a player
//! outside the roster, or is non-chronological. Repeated `(date, hand_number)`
//! pairs are reported as warnings.
//!
//! Errors are collected using the shared `BatchValidationError` pattern.

use super::report_failures;
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::load_records;
use crate::ui;
use homegame_engine::hand::HandId;
use std::collections::HashSet;
use std::io::Write;

type VerifyError = BatchValidationError<HandId>;

/// Handle the verify command.
///
/// Prints `Verify: OK (hands=N)` or `Verify: FAIL (hands=N, failed=M)` to `out`
/// and one `Error:` line per bad hand to `err`.
///
/// # Example
///
/// ```no_run
/// # use std::io;
/// let code = homegame_cli::run(
///     ["homegame", "verify", "--input", "hands.jsonl"],
///     &mut io::stdout(),
///     &mut io::stderr(),
/// );
/// ```
pub fn handle_verify_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let records = load_records(input)?;
    let mut seen = HashSet::new();
    let mut errors: Vec<VerifyError> = Vec::new();

    for record in &records {
        let id = record.id();
        if !seen.insert(id) {
            ui::display_warning(err, &format!("Duplicate hand {}", id))?;
            continue;
        }
        if let Err(e) = record.normalize() {
            tracing::warn!(hand = %id, class = e.class(), "invalid action log");
            errors.push(VerifyError {
                item_context: id,
                message: e.to_string(),
            });
        }
    }

    let hands = seen.len();
    if errors.is_empty() {
        writeln!(out, "Verify: OK (hands={})", hands)?;
        return Ok(());
    }
    writeln!(out, "Verify: FAIL (hands={}, failed={})", hands, errors.len())?;
    report_failures(err, &errors)?;
    Err(CliError::Hands(errors))
}
