use crate::helpers::{CliRunner, cbet_hand, path_str, shove_hand, write_jsonl};
use homegame_cli::logging::init_test_logging;
use serial_test::serial;
use tracing::Level;

#[test]
#[serial]
fn excluded_hands_are_logged_with_their_class() {
    let logs = init_test_logging();
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), shove_hand(2)]);

    let res = CliRunner::new().run(&["stats", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0);

    let entries = logs.entries();
    let excluded = entries
        .iter()
        .find(|e| e.level == Level::WARN && e.message.contains("hand excluded"))
        .expect("warning for the failed hand");
    assert_eq!(excluded.field("hand"), Some("2025-03-01#2"));
    assert_eq!(excluded.field("class"), Some("unknown_action"));

    let summary = entries
        .iter()
        .find(|e| e.message.contains("batch complete"))
        .expect("batch summary");
    assert_eq!(summary.field("evaluated"), Some("1"));
    assert_eq!(summary.field("failed"), Some("1"));
}
