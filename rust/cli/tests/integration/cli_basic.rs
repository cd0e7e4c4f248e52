use crate::helpers::CliRunner;
use serial_test::serial;

#[test]
#[serial]
fn no_arguments_prints_usage_and_fails() {
    let res = CliRunner::new().run(&[]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: homegame <command> [options]"));
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn version_goes_to_stdout() {
    let res = CliRunner::new().run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("homegame "));
}

#[test]
#[serial]
fn subcommand_help_lists_flags() {
    let res = CliRunner::new().run(&["stats", "--help"]);
    assert_eq!(res.exit_code, 0);
    for flag in ["--input", "--from", "--to", "--player"] {
        assert!(res.stdout.contains(flag), "missing {flag}");
    }
}

#[test]
#[serial]
fn missing_required_flag_is_a_usage_error() {
    let res = CliRunner::new().run(&["tags"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("--input"));
}

#[test]
#[serial]
fn unknown_export_format_is_rejected_by_parser() {
    let res = CliRunner::new().run(&[
        "export", "--input", "a.jsonl", "--format", "xml", "--output", "b.xml",
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("xml"));
}
