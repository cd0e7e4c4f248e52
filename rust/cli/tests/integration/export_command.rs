use crate::helpers::{CliRunner, cbet_hand, path_str, shove_hand, write_jsonl};
use rusqlite::Connection;
use serial_test::serial;

fn export(format: &str, input: &std::path::Path, output: &std::path::Path) -> crate::helpers::CliResult {
    CliRunner::new().run(&[
        "export",
        "--input",
        path_str(input),
        "--format",
        format,
        "--output",
        path_str(output),
    ])
}

#[test]
#[serial]
fn csv_rows_follow_roster_and_vocabulary_order() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1)]);
    let output = tmp.path().join("out").join("tags.csv");

    let res = export("csv", &input, &output);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("from 1 hands"));

    let csv = std::fs::read_to_string(&output).unwrap();
    let p2: Vec<&str> = csv.lines().filter(|l| l.contains(",P2,")).collect();
    assert_eq!(
        p2,
        [
            "2025-03-01,1,P2,participated",
            "2025-03-01,1,P2,preflop_bb",
            "2025-03-01,1,P2,preflop_fold",
            "2025-03-01,1,P2,preflop_3bet_opp",
        ]
    );
    assert!(csv.starts_with("date,hand_number,player_nickname,tag\n"));
}

#[test]
#[serial]
fn json_export_skips_failed_hands_with_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), shove_hand(2)]);
    let output = tmp.path().join("tags.json");

    let res = export("json", &input, &output);
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("WARNING: Skipped hand 2025-03-01#2"));

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert!(rows.iter().all(|r| r["hand_number"] == 1));
    assert!(
        rows.iter()
            .any(|r| r["player_nickname"] == "P3" && r["tag"] == "flop_cbet")
    );
}

#[test]
#[serial]
fn sqlite_export_writes_hand_tags_table() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), cbet_hand(2)]);
    let output = tmp.path().join("tags.sqlite");

    let res = export("sqlite", &input, &output);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);

    let conn = Connection::open(&output).unwrap();
    let cbets: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM hand_tags WHERE tag = 'flop_cbet' AND player_nickname = 'P3'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(cbets, 2);

    let count = |conn: &Connection| -> i64 {
        conn.query_row("SELECT COUNT(*) FROM hand_tags", [], |r| r.get(0))
            .unwrap()
    };
    let before = count(&conn);
    drop(conn);

    // Exporting again replaces the table instead of appending.
    let again = export("sqlite", &input, &output);
    assert_eq!(again.exit_code, 0);
    assert_eq!(count(&Connection::open(&output).unwrap()), before);
}

#[test]
#[serial]
fn sqlite_export_reports_lock_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1)]);
    let db_path = tmp.path().join("locked.sqlite");

    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch("BEGIN EXCLUSIVE").unwrap();

    let res = CliRunner::new().run_with_env(
        &[
            "export",
            "--input",
            path_str(&input),
            "--format",
            "sqlite",
            "--output",
            path_str(&db_path),
        ],
        &[
            ("HOMEGAME_SQLITE_MAX_ATTEMPTS", "2"),
            ("HOMEGAME_SQLITE_BACKOFF_MS", "1"),
        ],
    );

    assert_eq!(res.exit_code, 2);
    assert!(
        res.stderr.contains("SQLite busy after 2 attempt(s)"),
        "stderr={}",
        res.stderr
    );
    conn.execute_batch("ROLLBACK").unwrap();
}
