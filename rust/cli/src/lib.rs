//! # Homegame CLI Library
//!
//! Command-line collaborator for the `homegame-engine` tag-matching engine.
//! It loads recorded hands, runs the engine and prints tag tables, per-player
//! statistics and verification results.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["homegame", "stats", "--input", "hands.jsonl"];
//! let code = homegame_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `tags`: Print the tag table of every hand
//! - `stats`: Per-player statistics (VPIP, PFR, 3-Bet, C-Bet, WTSD, AF, ...)
//! - `verify`: Check that every action log normalizes
//! - `export`: Write present tags as CSV, JSON or a SQLite table
//! - `synth`: Generate seeded synthetic hands
//! - `bench`: Time batch evaluation
//! - `cfg`: Display current configuration settings
//!
//! ## Inputs
//!
//! `.jsonl` and `.jsonl.zst` files hold one hand record per line; `.db` and
//! `.sqlite` files are hand stores with `hands` and `hand_players` tables.

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod store;
pub mod ui;

use cli::{COMMANDS, Commands, HomegameCli};

use commands::{
    handle_bench_command, handle_cfg_command, handle_export_command, handle_stats_command,
    handle_synth_command, handle_tags_command, handle_verify_command,
};

pub use commands::ExportFormat;
pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["homegame", "bench", "--hands", "20", "--seed", "42"];
/// let code = homegame_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = HomegameCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Homegame hand tagger").is_err()
                        || writeln!(err, "Usage: homegame <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: homegame --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Tags { input, hand } => handle_tags_command(&input, hand, out, err),
                Commands::Stats {
                    input,
                    from,
                    to,
                    player,
                } => handle_stats_command(&input, from, to, player, out, err),
                Commands::Verify { input } => handle_verify_command(&input, out, err),
                Commands::Export {
                    input,
                    format,
                    output,
                } => handle_export_command(&input, &output, format, out, err),
                Commands::Synth {
                    hands,
                    seed,
                    date,
                    output,
                } => handle_synth_command(hands, seed, date, &output, out, err),
                Commands::Bench { hands, seed } => handle_bench_command(hands, seed, out),
                Commands::Cfg => handle_cfg_command(out, err),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if ui::write_error(err, &e.to_string()).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
    }
}
