use crate::helpers::{CliRunner, path_str};
use serde_json::Value;
use serial_test::serial;

fn cfg(runner: &CliRunner, env: &[(&str, &str)]) -> (i32, Value, String) {
    let res = runner.run_with_env(&["cfg"], env);
    let json = if res.exit_code == 0 {
        res.json()
    } else {
        Value::Null
    };
    (res.exit_code, json, res.stderr)
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    let (code, json, _) = cfg(&CliRunner::new(), &[]);
    assert_eq!(code, 0);
    assert_eq!(json["skip_bomb_pots"]["value"], true);
    assert_eq!(json["skip_bomb_pots"]["source"], "default");
    assert_eq!(json["min_hands"]["value"], 1);
    assert_eq!(json["threads"]["value"], 0);
    assert_eq!(json["threads"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("homegame.toml");
    std::fs::write(&file, "min_hands = 10\nthreads = 2\nskip_bomb_pots = false\n").unwrap();
    let runner = CliRunner::new();

    let (code, from_file, _) = cfg(&runner, &[("HOMEGAME_CONFIG", path_str(&file))]);
    assert_eq!(code, 0);
    assert_eq!(from_file["min_hands"]["value"], 10);
    assert_eq!(from_file["min_hands"]["source"], "file");
    assert_eq!(from_file["threads"]["value"], 2);
    assert_eq!(from_file["skip_bomb_pots"]["value"], false);
    assert_eq!(from_file["skip_bomb_pots"]["source"], "file");

    let (code, both, _) = cfg(
        &runner,
        &[
            ("HOMEGAME_CONFIG", path_str(&file)),
            ("HOMEGAME_MIN_HANDS", "25"),
            ("HOMEGAME_SKIP_BOMB_POTS", "yes"),
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(both["min_hands"]["value"], 25);
    assert_eq!(both["min_hands"]["source"], "env");
    assert_eq!(both["skip_bomb_pots"]["value"], true);
    assert_eq!(both["skip_bomb_pots"]["source"], "env");
    assert_eq!(both["threads"]["source"], "file");
}

#[test]
#[serial]
fn invalid_values_fail_with_exit_2() {
    let runner = CliRunner::new();

    let (code, _, stderr) = cfg(&runner, &[("HOMEGAME_THREADS", "1000")]);
    assert_eq!(code, 2);
    assert!(stderr.contains("threads must be <= 256"), "stderr={stderr}");

    let (code, _, stderr) = cfg(&runner, &[("HOMEGAME_SKIP_BOMB_POTS", "sometimes")]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid skip_bomb_pots"));

    let (code, _, stderr) = cfg(&runner, &[("HOMEGAME_MIN_HANDS", "-3")]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid min_hands"));
}

#[test]
#[serial]
fn broken_config_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let runner = CliRunner::new();

    let missing = tmp.path().join("absent.toml");
    let (code, _, stderr) = cfg(&runner, &[("HOMEGAME_CONFIG", path_str(&missing))]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot read config file"));

    let bad = tmp.path().join("bad.toml");
    std::fs::write(&bad, "min_hands = \"many\"\n").unwrap();
    let (code, _, stderr) = cfg(&runner, &[("HOMEGAME_CONFIG", path_str(&bad))]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot parse config file"));
}

#[test]
#[serial]
fn bad_config_stops_data_commands_too() {
    let res = CliRunner::new().run_with_env(
        &["stats", "--input", "whatever.jsonl"],
        &[("HOMEGAME_THREADS", "999")],
    );
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Configuration error"));
}
