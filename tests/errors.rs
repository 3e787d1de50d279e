use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfvm").unwrap()
}

#[test]
fn invalid_command_reports_with_a_caret() {
    cargo_bin()
        .arg("-e")
        .arg("+++~+")
        .assert()
        .failure()
        .code(1)
        .stdout("Error: found an invalid command, cause:\n+++~+\n   ^\n");
}

#[test]
fn ignore_unknowns_suppresses_the_error() {
    cargo_bin()
        .arg("-i")
        .arg("-e")
        .arg("+++~+.")
        .assert()
        .success()
        .stdout(predicate::eq(&b"\x04"[..]));
}

#[test]
fn unmatched_open_bracket_points_at_it() {
    cargo_bin()
        .arg("-e")
        .arg("[")
        .assert()
        .failure()
        .stdout("Error: can't find corresponding command, cause:\n[\n^\n");
}

#[test]
fn cell_underflow_at_start() {
    cargo_bin()
        .arg("-e")
        .arg("-")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: cell underflow, cause:"));
}

#[test]
fn pointer_underflow_at_start() {
    cargo_bin()
        .arg("-e")
        .arg("<")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: pointer underflow, cause:"));
}
