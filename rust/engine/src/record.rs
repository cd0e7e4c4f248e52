use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::LogError;
use crate::hand::{Hand, HandId, HandInfo};
use crate::player::HandPlayer;
use crate::rules::normalize_hand;

/// A hand as persisted by the import step: table facts, the roster and the raw
/// `action_line` document. Serialized one per line in JSONL hand stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Session date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Hand number within the session log
    pub hand_number: u32,
    #[serde(default)]
    pub game_type: String,
    #[serde(default)]
    pub is_bomb_pot: bool,
    /// Nickname of the dealer (button)
    #[serde(default)]
    pub dealer: String,
    #[serde(default)]
    pub player_num: u32,
    #[serde(default)]
    pub total_pot: u32,
    /// Street name -> list of loosely typed action entries. Either the JSON
    /// object itself or a string holding it (as stored in a TEXT column).
    pub action_line: serde_json::Value,
    /// Roster in seat order
    #[serde(default)]
    pub players: Vec<HandPlayer>,
}

impl HandRecord {
    pub fn id(&self) -> HandId {
        HandId::new(self.date, self.hand_number)
    }

    pub fn info(&self) -> HandInfo {
        HandInfo {
            game_type: self.game_type.clone(),
            is_bomb_pot: self.is_bomb_pot,
            dealer: self.dealer.clone(),
            player_num: self.player_num,
            total_pot: self.total_pot,
        }
    }

    /// Validate the action log against the roster and build the immutable [`Hand`].
    pub fn normalize(&self) -> Result<Hand, LogError> {
        normalize_hand(self.id(), self.info(), &self.players, &self.action_line)
    }
}

/// Writes [`HandRecord`]s as JSONL, one record per LF-terminated line.
pub struct RecordWriter {
    writer: BufWriter<File>,
    written: usize,
}

impl RecordWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            written: 0,
        })
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> std::io::Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
