extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn renders_a_png_for_the_classic_mandelbrot_view() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.png");

    Command::cargo_bin("fractalis")
        .unwrap()
        .args(&[
            "--family",
            "mandelbrot",
            "--size",
            "64x48",
            "--iterations",
            "50",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success();

    let bytes = std::fs::read(&out).unwrap();
    // PNG signature.
    assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn rejects_an_inverted_viewport() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bad.png");

    Command::cargo_bin("fractalis")
        .unwrap()
        .args(&[
            "--family",
            "julia",
            "--leftlower",
            "1.5,-1.5",
            "--rightupper",
            "-1.5,1.5",
            "--output",
        ])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid viewport"));
}

#[test]
fn rejects_an_unknown_family() {
    Command::cargo_bin("fractalis")
        .unwrap()
        .args(&["--family", "nova", "--output", "ignored.png"])
        .assert()
        .failure();
}
