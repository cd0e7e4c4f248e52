//! Command handler modules for the homegame CLI.
//!
//! Each subcommand lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests capture them
//! - Errors propagated via the `CliError` enum; `run` maps them to exit codes
//!
//! Commands that read hands share [`evaluate_input`], which resolves the
//! configuration, loads the records and runs the batch on a sized rayon pool.

mod bench;
mod cfg;
mod export;
mod stats;
mod synth;
mod tags;
mod verify;

pub use bench::handle_bench_command;
pub use cfg::handle_cfg_command;
pub use export::{ExportFormat, handle_export_command};
pub use stats::handle_stats_command;
pub use synth::handle_synth_command;
pub use tags::handle_tags_command;
pub use verify::handle_verify_command;

use crate::config::{self, Config};
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::load_records;
use crate::ui;
use homegame_engine::batch::{BatchOptions, BatchReport, HandFailure, evaluate_batch};
use homegame_engine::hand::HandId;
use homegame_engine::record::HandRecord;
use std::io::Write;

/// Build the worker pool for batch evaluation. `threads == 0` keeps rayon's default size.
pub(crate) fn thread_pool(threads: usize) -> Result<rayon::ThreadPool, CliError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CliError::Config(format!("Failed to build thread pool: {}", e)))
}

pub(crate) fn run_batch(
    records: &[HandRecord],
    options: &BatchOptions,
    config: &Config,
) -> Result<BatchReport, CliError> {
    let pool = thread_pool(config.threads)?;
    Ok(pool.install(|| evaluate_batch(records, options)))
}

/// Load `input` and evaluate it. `adjust` tweaks the batch options derived from config.
pub(crate) fn evaluate_input(
    input: &str,
    adjust: impl FnOnce(&mut BatchOptions),
) -> Result<(Config, BatchReport), CliError> {
    let config = config::load_with_sources()?.config;
    let records = load_records(input)?;
    let mut options = BatchOptions {
        skip_bomb_pots: config.skip_bomb_pots,
        ..BatchOptions::default()
    };
    adjust(&mut options);
    let report = run_batch(&records, &options, &config)?;
    Ok((config, report))
}

pub(crate) fn failure_errors(failures: &[HandFailure]) -> Vec<BatchValidationError<HandId>> {
    failures.iter().map(BatchValidationError::from).collect()
}

/// Write one `Error:` line per failed hand.
pub(crate) fn report_failures(
    err: &mut dyn Write,
    failures: &[BatchValidationError<HandId>],
) -> Result<(), CliError> {
    for f in failures {
        ui::write_error(err, &f.to_string())?;
    }
    Ok(())
}
