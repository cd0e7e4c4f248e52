//! Command-line argument definitions.

use crate::commands::ExportFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Subcommand names, in the order `run` lists them on a usage error.
pub const COMMANDS: &[&str] = &["tags", "stats", "verify", "export", "synth", "bench", "cfg"];

#[derive(Parser, Debug)]
#[command(
    name = "homegame",
    version,
    about = "Tag and summarize recorded home-game hold'em hands"
)]
pub struct HomegameCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tag table of every hand
    Tags {
        /// Hand input (.jsonl, .jsonl.zst, .db, .sqlite)
        #[arg(long)]
        input: String,
        /// Only this hand number
        #[arg(long)]
        hand: Option<u32>,
    },
    /// Per-player statistics derived from tags
    Stats {
        #[arg(long)]
        input: String,
        /// First session date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last session date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        player: Option<String>,
    },
    /// Check that every action log normalizes
    Verify {
        #[arg(long)]
        input: String,
    },
    /// Write present tags as (date, hand_number, player_nickname, tag) rows
    Export {
        #[arg(long)]
        input: String,
        #[arg(long, value_enum)]
        format: ExportFormat,
        #[arg(long)]
        output: String,
    },
    /// Generate seeded synthetic hands
    Synth {
        #[arg(long)]
        hands: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Session date stamped on every hand (default 2025-01-01)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        output: String,
    },
    /// Time batch evaluation over synthetic hands
    Bench {
        #[arg(long, default_value_t = 1000)]
        hands: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
