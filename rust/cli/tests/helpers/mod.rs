//! # Test helpers
//!
//! - [`CliRunner`] calls `homegame_cli::run` in-process and captures exit code,
//!   stdout, stderr and duration. `run_with_env` sets `HOMEGAME_*` variables for
//!   the duration of one call; tests using it must be `#[serial]`.
//! - Fixture builders write hand records as JSONL into a [`tempfile::TempDir`].
//!
//! ```rust,ignore
//! let tmp = tempfile::tempdir().unwrap();
//! let input = write_jsonl(tmp.path(), "hands.jsonl", &[cbet_hand(1)]);
//! let res = CliRunner::new().run(&["tags", "--input", input.to_str().unwrap()]);
//! assert_eq!(res.exit_code, 0);
//! ```

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const HOMEGAME_VARS: &[&str] = &[
    "HOMEGAME_CONFIG",
    "HOMEGAME_SKIP_BOMB_POTS",
    "HOMEGAME_MIN_HANDS",
    "HOMEGAME_THREADS",
    "HOMEGAME_SQLITE_BACKOFF_MS",
    "HOMEGAME_SQLITE_MAX_ATTEMPTS",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    #[allow(dead_code)]
    pub duration: Duration,
}

impl CliResult {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for (key, value) in pairs {
            let previous = std::env::var(key).ok();
            unsafe {
                std::env::set_var(key, value);
            }
            restores.push((key.to_string(), previous));
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Remove every `HOMEGAME_*` variable so a test starts from defaults.
pub fn clear_env() {
    for key in HOMEGAME_VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

#[derive(Debug, Default)]
pub struct CliRunner;

impl CliRunner {
    pub fn new() -> Self {
        clear_env();
        CliRunner
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        let _guard = EnvGuard::apply(env);
        let mut argv = vec!["homegame"];
        argv.extend_from_slice(args);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let start = Instant::now();
        let exit_code = homegame_cli::run(argv, &mut out, &mut err);
        CliResult {
            exit_code,
            stdout: String::from_utf8_lossy(&out).into_owned(),
            stderr: String::from_utf8_lossy(&err).into_owned(),
            duration: start.elapsed(),
        }
    }
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

pub fn write_jsonl(dir: &Path, name: &str, records: &[Value]) -> PathBuf {
    let path = dir.join(name);
    let text: String = records.iter().map(|r| format!("{}\n", r)).collect();
    std::fs::write(&path, text).expect("write fixture");
    path
}

pub fn blind(p: &str, role: &str, amount: u32) -> Value {
    json!({"player": p, "action": "blind", "blind_type": role, "amount": amount})
}

pub fn act(p: &str, kind: &str) -> Value {
    json!({"player": p, "action": kind})
}

pub fn put(p: &str, kind: &str, amount: u32) -> Value {
    json!({"player": p, "action": kind, "amount": amount})
}

pub fn hand(date: &str, number: u32, winners: &[&str], action_line: Value) -> Value {
    let players: Vec<Value> = ["P1", "P2", "P3"]
        .iter()
        .map(|n| json!({"player_nickname": n, "is_winner": winners.contains(n)}))
        .collect();
    json!({
        "date": date,
        "hand_number": number,
        "game_type": "NLH",
        "is_bomb_pot": false,
        "dealer": "P3",
        "player_num": 3,
        "action_line": action_line,
        "players": players
    })
}

/// P3 opens, P1 calls from the small blind, P2 folds; P3 c-bets the flop and P1 folds.
pub fn cbet_hand(number: u32) -> Value {
    hand(
        "2025-03-01",
        number,
        &["P3"],
        json!({
            "preflop": [
                blind("P1", "small", 1),
                blind("P2", "big", 2),
                put("P3", "raise", 6),
                put("P1", "call", 6),
                act("P2", "fold")
            ],
            "flop": [act("P1", "check"), put("P3", "bet", 8), act("P1", "fold")]
        }),
    )
}

/// Blinds, everyone calls, checked down to showdown; P2 wins.
pub fn limped_showdown(date: &str, number: u32) -> Value {
    let checks = || json!([act("P1", "check"), act("P2", "check"), act("P3", "check")]);
    hand(
        date,
        number,
        &["P2"],
        json!({
            "preflop": [
                blind("P1", "small", 1),
                blind("P2", "big", 2),
                put("P3", "call", 2),
                put("P1", "call", 2),
                act("P2", "check")
            ],
            "flop": checks(),
            "turn": checks(),
            "river": checks()
        }),
    )
}

/// A hand whose log uses an action kind outside the vocabulary.
pub fn shove_hand(number: u32) -> Value {
    hand(
        "2025-03-01",
        number,
        &["P1"],
        json!({"preflop": [blind("P1", "small", 1), act("P2", "shove")]}),
    )
}
