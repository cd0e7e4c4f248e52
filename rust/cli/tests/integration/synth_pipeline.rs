use crate::helpers::{CliRunner, path_str};
use serial_test::serial;

#[test]
#[serial]
fn synth_then_verify_then_stats() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("synth").join("hands.jsonl");
    let runner = CliRunner::new();

    let res = runner.run(&[
        "synth",
        "--hands",
        "40",
        "--seed",
        "9",
        "--output",
        path_str(&output),
    ]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Wrote 40 hands"));

    let verify = runner.run(&["verify", "--input", path_str(&output)]);
    assert_eq!(verify.stdout, "Verify: OK (hands=40)\n");

    let stats = runner.run(&["stats", "--input", path_str(&output)]);
    assert_eq!(stats.exit_code, 0);
    assert_eq!(stats.json()["hands"], 40);
}

#[test]
#[serial]
fn all_output_formats_carry_the_same_tags() {
    let tmp = tempfile::tempdir().unwrap();
    let runner = CliRunner::new();
    let mut outputs = Vec::new();
    for name in ["h.jsonl", "h.jsonl.zst", "h.db"] {
        let path = tmp.path().join(name);
        let res = runner.run(&[
            "synth",
            "--hands",
            "12",
            "--seed",
            "5",
            "--date",
            "2025-07-04",
            "--output",
            path_str(&path),
        ]);
        assert_eq!(res.exit_code, 0, "{name}: {}", res.stderr);
        let tags = runner.run(&["tags", "--input", path_str(&path)]);
        assert_eq!(tags.exit_code, 0, "{name}: {}", tags.stderr);
        outputs.push(tags.json());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    assert_eq!(outputs[0][0]["hand"], "2025-07-04#1");
}

#[test]
#[serial]
fn unsupported_output_extension_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("hands.csv");
    let res = CliRunner::new().run(&["synth", "--hands", "1", "--output", path_str(&path)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Unsupported file type"));
}

#[test]
#[serial]
fn bench_runs_on_configured_pool() {
    let res = CliRunner::new().run_with_env(
        &["bench", "--hands", "200", "--seed", "3"],
        &[("HOMEGAME_THREADS", "2")],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.starts_with("Benchmark: 200 hands in "));
}
