use crate::helpers::{CliRunner, cbet_hand, limped_showdown, path_str, shove_hand, write_jsonl};
use serial_test::serial;

#[test]
#[serial]
fn cbet_hand_tags() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1)]);

    let res = CliRunner::new().run(&["tags", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);

    let v = res.json();
    assert_eq!(v[0]["hand"], "2025-03-01#1");
    let t = &v[0]["tags"];
    assert_eq!(t["preflop_open_raise"]["P3"], true);
    assert_eq!(t["preflop_last_raiser"]["P3"], true);
    assert_eq!(t["flop_cbet"]["P3"], true);
    assert_eq!(t["flop_cbet_opp"]["P3"], true);
    assert_eq!(t["preflop_sb"]["P1"], true);
    assert_eq!(t["preflop_call"]["P1"], true);
    assert_eq!(t["faced_flop_cbet"]["P1"], true);
    assert_eq!(t["fold_to_flop_cbet"]["P1"], true);
    assert_eq!(t["preflop_bb"]["P2"], true);
    assert_eq!(t["saw_flop"]["P2"], false);
    assert_eq!(t["saw_turn"]["P3"], false);
    assert_eq!(t["won_hand"]["P3"], true);
    assert_eq!(t["flop_donk"]["P1"], false);
}

#[test]
#[serial]
fn showdown_hand_tags() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[limped_showdown("2025-03-02", 4)]);

    let res = CliRunner::new().run(&["tags", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0);
    let t = &res.json()[0]["tags"];
    for p in ["P1", "P2", "P3"] {
        assert_eq!(t["saw_showdown"][p], true, "{p}");
    }
    assert_eq!(t["won_at_showdown"]["P2"], true);
    assert_eq!(t["lost_at_showdown"]["P1"], true);
    assert_eq!(t["lost_at_showdown"]["P2"], false);
    assert_eq!(t["preflop_last_raiser"]["P1"], false);
    assert_eq!(t["voluntarily_put_in"]["P2"], false);
    assert_eq!(t["voluntarily_put_in"]["P3"], true);
}

#[test]
#[serial]
fn bad_hand_fails_but_good_hands_print() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[cbet_hand(1), shove_hand(2)]);

    let res = CliRunner::new().run(&["tags", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 2);
    assert_eq!(res.json().as_array().unwrap().len(), 1);
    assert!(
        res.stderr
            .contains("Error: 2025-03-01#2: Unknown action 'shove' on preflop"),
        "stderr={}",
        res.stderr
    );
    assert!(res.stderr.contains("Error: 1 hand(s) failed validation"));
}

#[test]
#[serial]
fn hand_filter_selects_one_hand() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_jsonl(
        tmp.path(),
        "h.jsonl",
        &[cbet_hand(1), limped_showdown("2025-03-01", 2), shove_hand(3)],
    );

    let res = CliRunner::new().run(&["tags", "--input", path_str(&input), "--hand", "2"]);
    assert_eq!(res.exit_code, 0, "only hand 2 is evaluated for output");
    let v = res.json();
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["hand"], "2025-03-01#2");
}

#[test]
#[serial]
fn bomb_pots_are_tagged() {
    let tmp = tempfile::tempdir().unwrap();
    let mut bomb = cbet_hand(9);
    bomb["is_bomb_pot"] = true.into();
    let input = write_jsonl(tmp.path(), "h.jsonl", &[bomb]);

    let res = CliRunner::new().run(&["tags", "--input", path_str(&input)]);
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.json().as_array().unwrap().len(), 1);
}
