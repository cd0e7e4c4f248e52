//! Statistics command handler.
//!
//! Evaluates every hand in range and reduces the tag tables to per-player
//! counters and ratios (VPIP, PFR, 3-Bet, C-Bet, WTSD, W$SD, AF, ...).
//! Hands with invalid action logs are reported as warnings and left out; they
//! do not change the exit code.

use super::evaluate_input;
use crate::error::CliError;
use crate::ui;
use chrono::NaiveDate;
use homegame_engine::batch::{BatchReport, DateRange};
use homegame_engine::stats::{PlayerSummary, SummaryOptions, summarize};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct StatsReport {
    hands: usize,
    failed: usize,
    skipped_bomb_pots: usize,
    duplicates: usize,
    out_of_range: usize,
    players: Vec<PlayerSummary>,
}

impl StatsReport {
    fn new(report: &BatchReport, players: Vec<PlayerSummary>) -> Self {
        Self {
            hands: report.evaluated(),
            failed: report.failures.len(),
            skipped_bomb_pots: report.skipped_bomb_pots,
            duplicates: report.duplicates,
            out_of_range: report.out_of_range,
            players,
        }
    }
}

/// Handle the stats command.
///
/// # Arguments
///
/// * `input` - Hand input (`.jsonl`, `.jsonl.zst`, `.db`, `.sqlite`)
/// * `from`, `to` - Inclusive session date bounds
/// * `player` - Restrict the summary to one nickname
/// * `out` - Receives the JSON report
/// * `err` - Receives a warning per excluded hand
pub fn handle_stats_command(
    input: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    player: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let (Some(f), Some(t)) = (from, to)
        && f > t
    {
        return Err(CliError::InvalidInput(format!(
            "--from {} is after --to {}",
            f, t
        )));
    }

    let (config, report) = evaluate_input(input, |opts| opts.range = DateRange { from, to })?;
    for f in &report.failures {
        ui::display_warning(err, &format!("Skipped hand {}: {}", f.hand, f.error))?;
    }

    let options = SummaryOptions {
        min_hands: config.min_hands,
        player,
    };
    let players = summarize(&report, &options);
    tracing::info!(
        hands = report.evaluated(),
        players = players.len(),
        "statistics computed"
    );
    ui::write_json(out, &StatsReport::new(&report, players))?;
    Ok(())
}
