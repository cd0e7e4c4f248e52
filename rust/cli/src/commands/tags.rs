//! Tags command handler.
//!
//! Prints the full tag table of every hand in the input as a JSON array:
//!
//! ```json
//! [
//!   { "hand": "2025-01-01#1", "tags": { "participated": { "ann": true, "bob": true }, ... } }
//! ]
//! ```
//!
//! Bomb pots are tagged like any other hand here; only `stats` and `export`
//! honour `skip_bomb_pots`.

use super::{evaluate_input, failure_errors, report_failures};
use crate::error::CliError;
use crate::ui;
use homegame_engine::batch::HandTags;
use homegame_engine::tags::TagTable;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TaggedHand<'a> {
    hand: String,
    tags: &'a TagTable,
}

impl<'a> From<&'a HandTags> for TaggedHand<'a> {
    fn from(t: &'a HandTags) -> Self {
        Self {
            hand: t.hand.to_string(),
            tags: &t.tags,
        }
    }
}

/// Handle the tags command.
///
/// # Arguments
///
/// * `input` - Hand input (`.jsonl`, `.jsonl.zst`, `.db`, `.sqlite`)
/// * `hand` - Only evaluate hands with this hand number
/// * `out` - Receives the JSON array of tag tables
/// * `err` - Receives one line per hand whose action log is invalid
///
/// # Returns
///
/// `Err(CliError::Hands)` when any hand failed, after the good hands were printed.
pub fn handle_tags_command(
    input: &str,
    hand: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (_, report) = evaluate_input(input, |opts| opts.skip_bomb_pots = false)?;
    let wanted = |n: u32| hand.map_or(true, |h| h == n);

    let tables: Vec<TaggedHand> = report
        .tables
        .iter()
        .filter(|t| wanted(t.hand.hand_number))
        .map(TaggedHand::from)
        .collect();
    let failures: Vec<_> = failure_errors(&report.failures)
        .into_iter()
        .filter(|f| wanted(f.item_context.hand_number))
        .collect();

    if let Some(n) = hand
        && tables.is_empty()
        && failures.is_empty()
    {
        return Err(CliError::InvalidInput(format!("Hand {} not found in {}", n, input)));
    }

    ui::write_json(out, &tables)?;
    if failures.is_empty() {
        return Ok(());
    }
    report_failures(err, &failures)?;
    Err(CliError::Hands(failures))
}
