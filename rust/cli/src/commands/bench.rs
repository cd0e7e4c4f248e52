//! Bench command handler.
//!
//! Synthesizes hands in memory and times batch evaluation on the configured
//! rayon pool.

use super::run_batch;
use crate::config;
use crate::error::CliError;
use homegame_engine::batch::BatchOptions;
use homegame_engine::synth::HandSynth;
use std::io::Write;

/// Handle the bench command.
///
/// Reports the hand count, wall time and throughput, e.g.
/// `Benchmark: 1000 hands in 12.3ms (81300 hands/s)`.
pub fn handle_bench_command(hands: usize, seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let config = config::load_with_sources()?.config;
    let records = HandSynth::new(seed).records(hands);
    let options = BatchOptions {
        skip_bomb_pots: false,
        ..BatchOptions::default()
    };

    let start = std::time::Instant::now();
    let report = run_batch(&records, &options, &config)?;
    let dur = start.elapsed();

    let per_sec = report.evaluated() as f64 / dur.as_secs_f64().max(f64::EPSILON);
    writeln!(
        out,
        "Benchmark: {} hands in {:?} ({:.0} hands/s)",
        report.evaluated(),
        dur,
        per_sec
    )?;
    if !report.failures.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} synthetic hands failed to normalize",
            report.failures.len()
        )));
    }
    Ok(())
}
