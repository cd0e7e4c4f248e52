use crate::helpers::{CliRunner, cbet_hand, limped_showdown, path_str, shove_hand, write_jsonl};
use serde_json::Value;
use serial_test::serial;
use std::path::PathBuf;

fn session(dir: &std::path::Path) -> PathBuf {
    write_jsonl(
        dir,
        "session.jsonl",
        &[
            cbet_hand(1),
            limped_showdown("2025-03-02", 1),
            limped_showdown("2025-03-03", 1),
        ],
    )
}

fn player<'a>(report: &'a Value, name: &str) -> &'a Value {
    report["players"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["player"] == name)
        .unwrap_or_else(|| panic!("no summary for {name}"))
}

#[test]
#[serial]
fn ratios_over_a_session() {
    let tmp = tempfile::tempdir().unwrap();
    let input = session(tmp.path());

    let res = CliRunner::new().run(&["stats", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let v = res.json();
    assert_eq!(v["hands"], 3);

    let names: Vec<&str> = v["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["player"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["P1", "P2", "P3"]);

    let p3 = player(&v, "P3");
    assert_eq!(p3["hands"], 3);
    assert_eq!(p3["ratios"]["vpip"], 100.0);
    assert_eq!(p3["ratios"]["pfr"], 33.3);
    assert_eq!(p3["ratios"]["cbet"], 100.0);
    assert_eq!(p3["ratios"]["af"], 1.0);

    let p1 = player(&v, "P1");
    assert_eq!(p1["ratios"]["fold_to_cbet"], 100.0);
    assert_eq!(p1["ratios"]["wtsd"], 66.7);

    let p2 = player(&v, "P2");
    assert_eq!(p2["ratios"]["vpip"], 0.0);
    assert_eq!(p2["ratios"]["wsd"], 100.0);
    assert_eq!(p2["ratios"]["three_bet"], 0.0);
}

#[test]
#[serial]
fn date_range_and_player_filters() {
    let tmp = tempfile::tempdir().unwrap();
    let input = session(tmp.path());

    let res = CliRunner::new().run(&[
        "stats",
        "--input",
        path_str(&input),
        "--from",
        "2025-03-02",
        "--player",
        "P2",
    ]);
    assert_eq!(res.exit_code, 0);
    let v = res.json();
    assert_eq!(v["hands"], 2);
    assert_eq!(v["out_of_range"], 1);
    let players = v["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["player"], "P2");
    assert_eq!(players[0]["hands"], 2);
}

#[test]
#[serial]
fn inverted_range_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let input = session(tmp.path());
    let res = CliRunner::new().run(&[
        "stats",
        "--input",
        path_str(&input),
        "--from",
        "2025-03-03",
        "--to",
        "2025-03-01",
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("is after"));
}

#[test]
#[serial]
fn min_hands_from_env() {
    let tmp = tempfile::tempdir().unwrap();
    let input = session(tmp.path());

    let res = CliRunner::new().run_with_env(
        &["stats", "--input", path_str(&input)],
        &[("HOMEGAME_MIN_HANDS", "4")],
    );
    assert_eq!(res.exit_code, 0);
    assert!(res.json()["players"].as_array().unwrap().is_empty());
}

#[test]
#[serial]
fn bomb_pots_skipped_unless_configured() {
    let tmp = tempfile::tempdir().unwrap();
    let mut bomb = limped_showdown("2025-03-04", 1);
    bomb["is_bomb_pot"] = true.into();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), bomb]);
    let runner = CliRunner::new();

    let skipped = runner.run(&["stats", "--input", path_str(&input)]).json();
    assert_eq!(skipped["hands"], 1);
    assert_eq!(skipped["skipped_bomb_pots"], 1);

    let kept = runner
        .run_with_env(
            &["stats", "--input", path_str(&input)],
            &[("HOMEGAME_SKIP_BOMB_POTS", "false")],
        )
        .json();
    assert_eq!(kept["hands"], 2);
    assert_eq!(kept["skipped_bomb_pots"], 0);
}

#[test]
#[serial]
fn duplicates_and_bad_hands_are_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(
        tmp.path(),
        "h.jsonl",
        &[cbet_hand(1), cbet_hand(1), shove_hand(2)],
    );

    let res = CliRunner::new().run(&["stats", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0);
    let v = res.json();
    assert_eq!(v["hands"], 1);
    assert_eq!(v["duplicates"], 1);
    assert_eq!(v["failed"], 1);
    assert!(res.stderr.contains("WARNING: Skipped hand 2025-03-01#2"));
}

#[test]
#[serial]
fn unreadable_input_fails() {
    let res = CliRunner::new().run(&["stats", "--input", "/no/such/hands.jsonl"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.starts_with("Error: "));
}
