use crate::helpers::{CliRunner, act, blind, cbet_hand, hand, path_str, shove_hand, write_jsonl};
use serde_json::json;
use serial_test::serial;

#[test]
#[serial]
fn clean_log_verifies() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), cbet_hand(2)]);
    let res = CliRunner::new().run(&["verify", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.stdout, "Verify: OK (hands=2)\n");
}

#[test]
#[serial]
fn every_error_class_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let unknown_player = hand(
        "2025-03-01",
        3,
        &[],
        json!({"preflop": [blind("P1", "small", 1), act("P9", "fold")]}),
    );
    let acts_after_fold = hand(
        "2025-03-01",
        4,
        &[],
        json!({"preflop": [act("P1", "fold")], "flop": [act("P1", "check")]}),
    );
    let missing_amount = hand(
        "2025-03-01",
        5,
        &[],
        json!({"preflop": [{"player": "P1", "action": "raise"}]}),
    );
    let input = write_jsonl(
        tmp.path(),
        "h.jsonl",
        &[
            cbet_hand(1),
            shove_hand(2),
            unknown_player,
            acts_after_fold,
            missing_amount,
        ],
    );

    let res = CliRunner::new().run(&["verify", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.contains("Verify: FAIL (hands=5, failed=4)"));
    assert!(res.stderr.contains("2025-03-01#2: Unknown action 'shove' on preflop"));
    assert!(res.stderr.contains("2025-03-01#3: Unknown player 'P9' on preflop"));
    assert!(res.stderr.contains("2025-03-01#4: Malformed action log"));
    assert!(res.stderr.contains("2025-03-01#5: Malformed action log"));
    assert!(res.stderr.contains("Error: 4 hand(s) failed validation"));
}

#[test]
#[serial]
fn action_line_stored_as_text_is_accepted() {
    let tmp = tempfile::tempdir().unwrap();
    let mut record = cbet_hand(1);
    let text = record["action_line"].to_string();
    record["action_line"] = text.into();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[record]);

    let res = CliRunner::new().run(&["verify", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
}

#[test]
#[serial]
fn undecodable_record_line_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("h.jsonl");
    std::fs::write(&path, "{\"hand_number\": 1}\n").unwrap();

    let res = CliRunner::new().run(&["verify", "--input", path_str(&path)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid record at line 1"));
}
