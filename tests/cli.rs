#![cfg(feature = "cli")]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn numbers_lines_of_a_file() {
    let path = std::env::temp_dir().join(format!("stagepipe_{}_cli.txt", std::process::id()));
    std::fs::write(&path, "alpha\nbeta\n\ngamma").unwrap();

    let mut cmd = cargo_bin_cmd!("stagepipe");
    cmd.arg(&path);
    cmd.assert()
        .success()
        .stdout("0: alpha\n1: beta\n2: \n3: gamma\n");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_origin_exits_non_zero() {
    let mut cmd = cargo_bin_cmd!("stagepipe");
    cmd.arg("/nonexistent/stagepipe/input.txt");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("stagepipe: /nonexistent/stagepipe/input.txt"));
}

#[test]
fn missing_origin_is_a_usage_error() {
    cargo_bin_cmd!("stagepipe").assert().failure();
}
