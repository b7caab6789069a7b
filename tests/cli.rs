extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn domcol() -> Command {
    let mut cmd = Command::cargo_bin("domcol").unwrap();
    cmd.env_remove("RUST_LOG").args(&["--threads", "1"]);
    cmd
}

#[test]
fn writes_a_pixmap_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.ppm");
    domcol()
        .args(&["--size", "8x6", "--function", "z^2", "--output"])
        .arg(&path)
        .assert()
        .success();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6"));
    assert!(bytes.len() > 8 * 6 * 3);
}

#[test]
fn writes_a_png_when_asked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.out");
    domcol()
        .args(&["-s", "5x5", "-F", "png", "-o"])
        .arg(&path)
        .assert()
        .success();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn defaults_to_sixel_on_stdout_with_a_caption() {
    domcol()
        .args(&["--size", "6x6"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\t\x1bPq\"1;1;6;6"))
        .stdout(predicate::str::contains("\x1b\\f(z) := z\n"));
}

#[test]
fn several_functions_follow_each_other() {
    domcol()
        .args(&["-s", "4x4", "-f", "z", "-f", "z^2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("f(z) := z\n"))
        .stdout(predicate::str::contains("f(z) := z*z\n"));
}

#[test]
fn several_functions_cannot_share_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.png");
    domcol()
        .args(&["-s", "4x4", "-f", "z", "-f", "1/z", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("only one function"));
    assert!(!path.exists());
}

#[test]
fn empty_images_are_refused() {
    domcol()
        .args(&["--size", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image size must be positive"));
}

#[test]
fn oversized_images_are_refused() {
    domcol()
        .args(&["--size", "4294967296x4294967296"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image size"));
}

#[test]
fn unknown_functions_are_refused() {
    domcol()
        .args(&["--function", "tan(z)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown function"));
}

#[test]
fn backwards_ranges_are_refused() {
    domcol()
        .arg("--range=-4,4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("visible range"));
}
