use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfvm").unwrap()
}

fn program_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn file_program_runs() {
    let file = program_file("+++.");
    cargo_bin()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq(&b"\x03"[..]))
        .stderr(predicate::str::is_empty());
}

#[test]
fn multi_line_file_is_concatenated() {
    // Newlines are stripped while reading, so a split run still batches.
    let file = program_file("++\n++\n.");
    cargo_bin()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq(&b"\x04"[..]));
}

#[test]
fn missing_file_reports_plainly_without_caret() {
    cargo_bin()
        .arg("./no-such-program.bf")
        .assert()
        .failure()
        .code(1)
        .stdout(
            predicate::str::contains("couldn't read file")
                .and(predicate::str::contains("^").not()),
        );
}
