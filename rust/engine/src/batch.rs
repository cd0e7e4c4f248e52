use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::engine::evaluate;
use crate::errors::LogError;
use crate::hand::HandId;
use crate::record::HandRecord;
use crate::tags::TagTable;

/// Inclusive range of session dates. Open ends accept everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |f| date >= f) && self.to.map_or(true, |t| date <= t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub range: DateRange,
    pub skip_bomb_pots: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            range: DateRange::all(),
            skip_bomb_pots: true,
        }
    }
}

/// Tag table for one successfully evaluated hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandTags {
    #[serde(serialize_with = "display")]
    pub hand: HandId,
    /// Seat label per roster player, in roster order
    pub positions: Vec<(String, String)>,
    pub tags: TagTable,
}

impl HandTags {
    pub fn position_of(&self, player: &str) -> Option<&str> {
        self.positions
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, pos)| pos.as_str())
    }
}

/// A hand excluded from the batch because its log did not normalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandFailure {
    #[serde(serialize_with = "display")]
    pub hand: HandId,
    #[serde(serialize_with = "display")]
    pub error: LogError,
}

fn display<T: std::fmt::Display, S: Serializer>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub tables: Vec<HandTags>,
    pub failures: Vec<HandFailure>,
    pub skipped_bomb_pots: usize,
    pub duplicates: usize,
    pub out_of_range: usize,
}

impl BatchReport {
    pub fn evaluated(&self) -> usize {
        self.tables.len()
    }
}

enum Outcome {
    Tagged(HandTags),
    Failed(HandFailure),
}

fn evaluate_one(record: &HandRecord) -> Outcome {
    let id = record.id();
    match record.normalize() {
        Ok(hand) => {
            debug!(hand = %id, actions = hand.action_count(), "evaluating hand");
            let positions = hand
                .players()
                .iter()
                .map(|p| (p.player_nickname.clone(), hand.position_of(p.nickname())))
                .collect();
            Outcome::Tagged(HandTags {
                hand: id,
                positions,
                tags: evaluate(&hand),
            })
        }
        Err(error) => {
            warn!(hand = %id, class = error.class(), %error, "hand excluded");
            Outcome::Failed(HandFailure { hand: id, error })
        }
    }
}

/// Evaluate every in-range record, in parallel over hands.
///
/// Records outside `options.range`, bomb pots (when skipped) and repeats of an
/// already seen `(date, hand_number)` are counted and dropped before evaluation.
/// A hand whose log fails normalization does not stop the batch; it is
/// reported in [`BatchReport::failures`]. Tables and failures keep input order.
pub fn evaluate_batch(records: &[HandRecord], options: &BatchOptions) -> BatchReport {
    let mut report = BatchReport::default();
    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(records.len());
    for record in records {
        if !options.range.contains(record.date) {
            report.out_of_range += 1;
            continue;
        }
        if !seen.insert(record.id()) {
            report.duplicates += 1;
            continue;
        }
        if options.skip_bomb_pots && record.is_bomb_pot {
            report.skipped_bomb_pots += 1;
            continue;
        }
        selected.push(record);
    }

    let outcomes: Vec<Outcome> = selected.par_iter().map(|r| evaluate_one(r)).collect();
    for outcome in outcomes {
        match outcome {
            Outcome::Tagged(t) => report.tables.push(t),
            Outcome::Failed(f) => report.failures.push(f),
        }
    }

    info!(
        evaluated = report.tables.len(),
        failed = report.failures.len(),
        duplicates = report.duplicates,
        bomb_pots = report.skipped_bomb_pots,
        out_of_range = report.out_of_range,
        "batch complete"
    );
    report
}
