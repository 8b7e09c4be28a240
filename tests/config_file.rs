use assert_cmd::Command;
use std::fs;
use std::io::Write;

fn cargo_bin() -> Command { Command::cargo_bin("letdraw").unwrap() }

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn test_config_file_supplies_defaults() {
    let cfg = config_file("[canvas]\nwidth = 100\nheight = 40\nscale = 3\nline_cap = \"square\"\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cfg.svg");
    cargo_bin()
        .env("LETDRAW_CONFIG", cfg.path())
        .arg("--out").arg(&out)
        .arg("d")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="100" height="40""#));
    assert!(svg.contains("translate(50 20)"));
    assert!(svg.contains(r#"d="M0 0 L0 -3""#));
    assert!(svg.contains(r#"stroke-linecap="square""#));
}

#[test]
fn test_flags_override_config_file() {
    let cfg = config_file("[canvas]\nwidth = 100\nscale = 3\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("flags.svg");
    cargo_bin()
        .env("LETDRAW_CONFIG", cfg.path())
        .args(["-w", "10", "-s", "1"])
        .arg("--out").arg(&out)
        .arg("d")
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="10" height="600""#));
    assert!(svg.contains(r#"d="M0 0 L0 -1""#));
}
