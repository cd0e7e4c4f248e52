//! SQLite hand stores.
//!
//! A store holds the imported hands in two tables:
//!
//! - `hands`: one row per deal, `action_line` kept as TEXT
//! - `hand_players`: one row per seated player, ordered by `seat`
//!
//! Exported tag tables go to a third table, `hand_tags`, with one row per tag
//! that is present for a player in a hand.
//!
//! Writers run inside a single transaction and retry with linear backoff while
//! the database is busy or locked (`HOMEGAME_SQLITE_BACKOFF_MS`,
//! `HOMEGAME_SQLITE_MAX_ATTEMPTS`).

use chrono::NaiveDate;
use homegame_engine::player::HandPlayer;
use homegame_engine::record::HandRecord;
use homegame_engine::tags::Tag;
use rusqlite::{Connection, OpenFlags, params};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

const CREATE_HANDS: &str = "CREATE TABLE IF NOT EXISTS hands (
    date TEXT NOT NULL,
    hand_number INTEGER NOT NULL,
    game_type TEXT,
    is_bomb_pot INTEGER NOT NULL DEFAULT 0,
    dealer TEXT,
    player_num INTEGER,
    total_pot INTEGER,
    action_line TEXT NOT NULL,
    PRIMARY KEY (date, hand_number)
)";

const CREATE_HAND_PLAYERS: &str = "CREATE TABLE IF NOT EXISTS hand_players (
    date TEXT NOT NULL,
    hand_number INTEGER NOT NULL,
    seat INTEGER NOT NULL,
    player_nickname TEXT NOT NULL,
    starting_stack INTEGER,
    ending_stack INTEGER,
    profit INTEGER,
    position TEXT,
    is_winner INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (date, hand_number, seat)
)";

const CREATE_HAND_TAGS: &str = "CREATE TABLE hand_tags (
    date TEXT NOT NULL,
    hand_number INTEGER NOT NULL,
    player_nickname TEXT NOT NULL,
    tag TEXT NOT NULL,
    PRIMARY KEY (date, hand_number, player_nickname, tag)
)";

/// One present tag for one player in one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRow {
    pub date: NaiveDate,
    pub hand_number: u32,
    pub player_nickname: String,
    pub tag: Tag,
}

fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Read every hand in the store, ordered by date and hand number.
pub fn read_hands(path: &Path) -> Result<Vec<HandRecord>, CliError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut rosters: HashMap<(String, u32), Vec<HandPlayer>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT date, hand_number, player_nickname, starting_stack, ending_stack,
                    profit, position, is_winner
             FROM hand_players ORDER BY date, hand_number, seat",
        )?;
        let rows = stmt.query_map([], |row| {
            let key: (String, u32) = (row.get(0)?, row.get(1)?);
            let player = HandPlayer {
                player_nickname: row.get(2)?,
                starting_stack: row.get::<_, Option<u32>>(3)?.unwrap_or(0),
                ending_stack: row.get::<_, Option<u32>>(4)?.unwrap_or(0),
                profit: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
                position: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                is_winner: row.get(7)?,
            };
            Ok((key, player))
        })?;
        for row in rows {
            let (key, player) = row?;
            rosters.entry(key).or_default().push(player);
        }
    }

    let mut stmt = conn.prepare(
        "SELECT date, hand_number, game_type, is_bomb_pot, dealer, player_num, total_pot,
                action_line
         FROM hands ORDER BY date, hand_number",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(StoredHand {
            date: row.get(0)?,
            hand_number: row.get(1)?,
            game_type: row.get(2)?,
            is_bomb_pot: row.get(3)?,
            dealer: row.get(4)?,
            player_num: row.get(5)?,
            total_pot: row.get(6)?,
            action_line: row.get(7)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        let h = row?;
        let date = NaiveDate::parse_from_str(&h.date, "%Y-%m-%d").map_err(|e| {
            CliError::Store(format!(
                "hand {}: invalid date '{}': {}",
                h.hand_number, h.date, e
            ))
        })?;
        let players = rosters
            .remove(&(h.date, h.hand_number))
            .unwrap_or_default();
        if players.is_empty() {
            warn!(%date, hand_number = h.hand_number, "hand has no players in store");
        }
        records.push(HandRecord {
            date,
            hand_number: h.hand_number,
            game_type: h.game_type.unwrap_or_default(),
            is_bomb_pot: h.is_bomb_pot,
            dealer: h.dealer.unwrap_or_default(),
            player_num: h.player_num.unwrap_or(0),
            total_pot: h.total_pot.unwrap_or(0),
            action_line: serde_json::Value::String(h.action_line),
            players,
        });
    }
    debug!(path = %path.display(), hands = records.len(), "read hand store");
    Ok(records)
}

struct StoredHand {
    date: String,
    hand_number: u32,
    game_type: Option<String>,
    is_bomb_pot: bool,
    dealer: Option<String>,
    player_num: Option<u32>,
    total_pot: Option<u32>,
    action_line: String,
}

/// Insert (or replace) hands and their rosters, creating the tables if needed.
pub fn write_hands(path: &Path, records: &[HandRecord]) -> Result<usize, CliError> {
    with_busy_retry(|| write_hands_attempt(path, records))
}

fn write_hands_attempt(path: &Path, records: &[HandRecord]) -> Result<usize, Attempt> {
    let mut conn = open_for_write(path)?;
    let tx = conn.transaction().map_err(classify("start transaction"))?;
    tx.execute(CREATE_HANDS, []).map_err(classify("create schema"))?;
    tx.execute(CREATE_HAND_PLAYERS, [])
        .map_err(classify("create schema"))?;
    {
        let mut hand_stmt = tx
            .prepare(
                "INSERT OR REPLACE INTO hands (date, hand_number, game_type, is_bomb_pot, dealer,
                    player_num, total_pot, action_line)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(classify("prepare insert"))?;
        let mut clear_stmt = tx
            .prepare("DELETE FROM hand_players WHERE date = ?1 AND hand_number = ?2")
            .map_err(classify("prepare delete"))?;
        let mut player_stmt = tx
            .prepare(
                "INSERT INTO hand_players (date, hand_number, seat, player_nickname,
                    starting_stack, ending_stack, profit, position, is_winner)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(classify("prepare insert"))?;

        for r in records {
            let date = date_text(r.date);
            let action_line = match &r.action_line {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            hand_stmt
                .execute(params![
                    date,
                    r.hand_number,
                    r.game_type,
                    r.is_bomb_pot,
                    r.dealer,
                    r.player_num,
                    r.total_pot,
                    action_line
                ])
                .map_err(classify("insert hand"))?;
            clear_stmt
                .execute(params![date, r.hand_number])
                .map_err(classify("replace roster"))?;
            for (seat, p) in r.players.iter().enumerate() {
                player_stmt
                    .execute(params![
                        date,
                        r.hand_number,
                        seat as i64,
                        p.player_nickname,
                        p.starting_stack,
                        p.ending_stack,
                        p.profit,
                        p.position,
                        p.is_winner
                    ])
                    .map_err(classify("insert player"))?;
            }
        }
    }
    tx.commit().map_err(classify("commit"))?;
    Ok(records.len())
}

/// Replace the `hand_tags` table with `rows`.
pub fn write_tag_rows(path: &Path, rows: &[TagRow]) -> Result<usize, CliError> {
    with_busy_retry(|| write_tag_rows_attempt(path, rows))
}

fn write_tag_rows_attempt(path: &Path, rows: &[TagRow]) -> Result<usize, Attempt> {
    let mut conn = open_for_write(path)?;
    let tx = conn.transaction().map_err(classify("start transaction"))?;
    tx.execute("DROP TABLE IF EXISTS hand_tags", [])
        .map_err(classify("reset schema"))?;
    tx.execute(CREATE_HAND_TAGS, [])
        .map_err(classify("create schema"))?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO hand_tags (date, hand_number, player_nickname, tag)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(classify("prepare insert"))?;
        for row in rows {
            stmt.execute(params![
                date_text(row.date),
                row.hand_number,
                row.player_nickname,
                row.tag.name()
            ])
            .map_err(classify("insert tag"))?;
        }
    }
    tx.commit().map_err(classify("commit"))?;
    Ok(rows.len())
}

enum Attempt {
    Busy(String),
    Fatal(String),
}

fn sqlite_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(info, _)
            if matches!(
                info.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            )
    )
}

fn classify(context: &'static str) -> impl Fn(rusqlite::Error) -> Attempt {
    move |e| {
        if sqlite_busy(&e) {
            Attempt::Busy(format!("{}: {}", context, e))
        } else {
            Attempt::Fatal(format!("Failed to {}: {}", context, e))
        }
    }
}

fn open_for_write(path: &Path) -> Result<Connection, Attempt> {
    ensure_parent_dir(path).map_err(Attempt::Fatal)?;
    let conn = Connection::open(path).map_err(|e| {
        if sqlite_busy(&e) {
            Attempt::Busy(format!("open {}: {}", path.display(), e))
        } else {
            Attempt::Fatal(format!("Failed to open {}: {}", path.display(), e))
        }
    })?;
    // Waiting is done by with_busy_retry, not inside SQLite.
    conn.busy_timeout(std::time::Duration::ZERO)
        .map_err(classify("set busy timeout"))?;
    Ok(conn)
}

fn with_busy_retry<T>(mut attempt: impl FnMut() -> Result<T, Attempt>) -> Result<T, CliError> {
    let backoff_ms: u64 = std::env::var("HOMEGAME_SQLITE_BACKOFF_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let max_attempts: u32 = std::env::var("HOMEGAME_SQLITE_MAX_ATTEMPTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(50);

    if max_attempts == 0 {
        return Err(CliError::Config(
            "HOMEGAME_SQLITE_MAX_ATTEMPTS must be >= 1".to_string(),
        ));
    }

    let mut tries = 0;
    loop {
        tries += 1;
        match attempt() {
            Ok(v) => return Ok(v),
            Err(Attempt::Busy(msg)) if tries < max_attempts => {
                debug!(attempt = tries, %msg, "sqlite busy, retrying");
                std::thread::sleep(std::time::Duration::from_millis(
                    backoff_ms * u64::from(tries),
                ));
            }
            Err(Attempt::Busy(msg)) => {
                return Err(CliError::Store(format!(
                    "SQLite busy after {} attempt(s): {}",
                    tries, msg
                )));
            }
            Err(Attempt::Fatal(msg)) => return Err(CliError::Store(msg)),
        }
    }
}
