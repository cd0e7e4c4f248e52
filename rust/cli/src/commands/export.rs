//! Tag export command.
//!
//! Flattens evaluated tag tables into rows of `(date, hand_number,
//! player_nickname, tag)`, one per tag present, and writes them as CSV, a JSON
//! array, or the `hand_tags` table of a SQLite database.

use super::evaluate_input;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::store::{self, TagRow};
use crate::ui;
use clap::ValueEnum;
use homegame_engine::batch::BatchReport;
use std::io::Write;
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Sqlite,
}

/// Rows for every present tag, hand by hand, players in roster order and tags
/// in vocabulary order.
pub(crate) fn tag_rows(report: &BatchReport) -> Vec<TagRow> {
    let mut rows = Vec::new();
    for hand in &report.tables {
        for player in hand.tags.players() {
            for tag in hand.tags.tags_for(player) {
                rows.push(TagRow {
                    date: hand.hand.date,
                    hand_number: hand.hand.hand_number,
                    player_nickname: player.clone(),
                    tag,
                });
            }
        }
    }
    rows
}

/// Handle the export command.
///
/// # Arguments
///
/// * `input` - Hand input (`.jsonl`, `.jsonl.zst`, `.db`, `.sqlite`)
/// * `output` - Destination file; parent directories are created
/// * `format` - Output format
/// * `out` - Receives a one-line summary
/// * `err` - Receives a warning per excluded hand
pub fn handle_export_command(
    input: &str,
    output: &str,
    format: ExportFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (_, report) = evaluate_input(input, |_| {})?;
    for f in &report.failures {
        ui::display_warning(err, &format!("Skipped hand {}: {}", f.hand, f.error))?;
    }
    let rows = tag_rows(&report);

    let path = Path::new(output);
    match format {
        ExportFormat::Csv => export_csv(&rows, path)?,
        ExportFormat::Json => export_json(&rows, path)?,
        ExportFormat::Sqlite => {
            store::write_tag_rows(path, &rows)?;
        }
    }
    writeln!(
        out,
        "Exported {} tag rows from {} hands to {}",
        rows.len(),
        report.evaluated(),
        output
    )?;
    Ok(())
}

fn export_csv(rows: &[TagRow], path: &Path) -> Result<(), CliError> {
    ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
    let mut w = std::fs::File::create(path).map(std::io::BufWriter::new)?;
    writeln!(w, "date,hand_number,player_nickname,tag")?;
    for row in rows {
        writeln!(
            w,
            "{},{},{},{}",
            row.date.format("%Y-%m-%d"),
            row.hand_number,
            csv_field(&row.player_nickname),
            row.tag
        )?;
    }
    w.flush()?;
    Ok(())
}

fn export_json(rows: &[TagRow], path: &Path) -> Result<(), CliError> {
    ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
    let s = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Quote a field when it holds a comma, quote or line break.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
