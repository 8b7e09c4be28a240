use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cargo_bin() -> Command { Command::cargo_bin("letdraw").unwrap() }

#[test]
fn test_stack_underflow_keeps_what_was_drawn() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("partial.svg");
    cargo_bin()
        .arg("--out").arg(&out)
        .arg("3d]5d")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("empty state stack")
            .and(predicate::str::contains("at offset 2"))
            .and(predicate::str::contains("^")));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 L0 -3""#));
}

#[test]
fn test_missing_out_is_a_usage_error() {
    cargo_bin()
        .arg("d")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--out").and(predicate::str::contains("Usage")));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg("--out").arg(dir.path().join("x.pdf"))
        .arg("d")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--format"));
}

#[test]
fn test_invalid_width_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg("--out").arg(dir.path().join("x.svg"))
        .args(["--width", "0", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn test_invalid_line_cap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg("--out").arg(dir.path().join("x.svg"))
        .args(["--line-cap", "wavy", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wavy"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg("--out").arg(dir.path().join("x.svg"))
        .arg("--in").arg(dir.path().join("nope.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error opening file"));
}

#[test]
fn test_stack_limit_reports_allocation_failure() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin()
        .arg("--out").arg(dir.path().join("x.svg"))
        .args(["--max-stack", "4", "9["])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot grow to 9 entries"));
}
