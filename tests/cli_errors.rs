use assert_cmd::Command;
use predicates::prelude::*;

// Nothing listens here; every case must fail before any request is made.
const DEAD_URL: &str = "http://127.0.0.1:9";

fn e2e() -> Command {
    let mut cmd = Command::cargo_bin("e2e_result").unwrap();
    cmd.env("E2E_RESULT_ES_URL", DEAD_URL).arg("--no-color");
    cmd
}

#[test]
fn both_environments_are_a_usage_error() {
    e2e()
        .args(["show", "results", "--vcs", "--ucs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn two_outcomes_are_a_usage_error() {
    e2e()
        .args(["show", "results", "--passed", "--skipped"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn non_numeric_max_is_a_usage_error() {
    e2e()
        .args(["show", "runs", "--max=many"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--max"));
}

#[test]
fn unknown_subcommand_prints_usage() {
    e2e()
        .args(["show", "builds"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn show_without_subcommand_prints_usage() {
    e2e()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("results"))
        .stderr(predicate::str::contains("usage"));
}

#[test]
fn invalid_url_is_rejected() {
    e2e()
        .args(["--es-url", "ftp://nowhere", "show", "runs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn help_lists_subcommands() {
    e2e()
        .args(["show", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("results"))
        .stdout(predicate::str::contains("reports"))
        .stdout(predicate::str::contains("usage"))
        .stdout(predicate::str::contains("runs"));
}
