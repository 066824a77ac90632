use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn ebc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ebc"))
}

#[test]
fn help_mentions_run_and_test_flags() {
    Command::new(ebc_bin())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--run"))
        .stdout(predicate::str::contains("--test"));
}

#[test]
fn test_flag_runs_the_scenario_suite() {
    Command::new(ebc_bin())
        .arg("--test")
        .assert()
        .success()
        .stdout(predicate::str::contains("allocate-guard-print-free ... ok"));
}

#[test]
fn compile_only_writes_target_c_to_the_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.eb");
    let output = dir.path().join("prog.c");
    std::fs::write(&input, "var int x; { x = 1; print x; }").unwrap();

    Command::new(ebc_bin())
        .arg(&input)
        .arg("--compile-only")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let generated = std::fs::read_to_string(&output).unwrap();
    assert!(generated.contains("int main(void)"));
}

#[test]
fn parse_error_exits_with_code_one_and_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.eb");
    std::fs::write(&input, "var int x").unwrap();

    Command::new(ebc_bin())
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn unreadable_input_path_exits_with_code_two() {
    Command::new(ebc_bin())
        .arg("/nonexistent/does-not-exist.eb")
        .assert()
        .failure()
        .code(2);
}
