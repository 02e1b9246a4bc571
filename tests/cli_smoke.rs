//! CLI binary smoke tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("dense-ols").unwrap()
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dense-ols"));
}

#[test]
fn fit_without_data_errors() {
    cmd().arg("fit").assert().failure();
}

#[test]
fn fit_nonexistent_file_errors() {
    cmd()
        .args(["fit", "/nonexistent/data.svm"])
        .assert()
        .failure();
}

#[test]
fn fit_libsvm_prints_r2() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line.svm");
    std::fs::write(&path, "3 1:1\n5 1:2\n7 1:3\n9 1:4\n").unwrap();

    let assert = cmd().arg("fit").arg(&path).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let r2: f64 = stdout.trim().parse().unwrap();
    assert!((r2 - 1.0).abs() < 1e-9);
}

#[test]
fn fit_csv_with_partial_pivoting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line.csv");
    std::fs::write(&path, "x,target\n1,3\n2,5\n3,7\n4,9\n").unwrap();

    let assert = cmd()
        .arg("fit")
        .arg(&path)
        .args(["--target", "target", "--pivoting", "partial"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let r2: f64 = stdout.trim().parse().unwrap();
    assert!((r2 - 1.0).abs() < 1e-9);
}

#[test]
fn fit_singular_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.svm");
    std::fs::write(&path, "1 1:2\n2 1:2\n3 1:2\n").unwrap();

    cmd().arg("fit").arg(&path).assert().failure();
}
