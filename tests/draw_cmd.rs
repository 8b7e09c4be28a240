use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;

fn cargo_bin() -> Command { Command::cargo_bin("letdraw").unwrap() }

fn read_to_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn test_positional_program_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("line.svg");
    cargo_bin()
        .arg("--out").arg(&out)
        .arg("6d")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 L0 -6""#));
    assert!(svg.contains("translate(400 300)"));
}

#[test]
fn test_batched_draws_make_one_segment() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("batch.svg");
    cargo_bin()
        .arg("-o").arg(&out)
        .arg("3d2d")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 L0 -5""#));
}

#[test]
fn test_input_file_success() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("file.svg");
    let tf = read_to_tempfile("2d\n6>\n2d\n");
    cargo_bin()
        .arg("--out").arg(&out)
        .arg("--in").arg(tf.path())
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 L0 -2 L2 -2""#));
}

#[test]
fn test_stdin_is_read_when_no_program_given() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("stdin.svg");
    cargo_bin()
        .arg("--out").arg(&out)
        .write_stdin("4u4d")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 M0 -4 L0 -8""#));
}

#[test]
fn test_png_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tree.png");
    cargo_bin()
        .args(["-w", "64", "-H", "64", "-c", "round"])
        .arg("--out").arg(&out)
        .arg("9d[3<9d]3>9d")
        .assert()
        .success();

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_scale_and_origin_options() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scaled.svg");
    cargo_bin()
        .args(["--scale", "10", "-x", "5", "-y", "7.5", "-l", "0.5"])
        .arg("--out").arg(&out)
        .arg("2d")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"d="M0 0 L0 -20""#));
    assert!(svg.contains("translate(5 7.5)"));
    assert!(svg.contains(r#"stroke-width="0.5""#));
}

#[test]
fn test_format_flag_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("drawing.out");
    cargo_bin()
        .args(["--format", "svg"])
        .arg("--out").arg(&out)
        .arg("d")
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().starts_with("<?xml"));
}
