//! Tests for error handling, suggestions and exit codes.

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn entigen_in(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("entigen");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_unknown_behavior_is_a_user_error() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .args(["resolve", "-b", "timestamps", "-b", "versioning"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown behavior: 'versioning'"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_every_violation_is_reported() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .args(["resolve", "-b", "archival,versioning"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'archival'"))
        .stderr(predicate::str::contains("'versioning'"));
}

#[test]
fn test_invalid_entity_name() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .args(["plan", ".hidden"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot start with '.'"));
}

#[test]
fn test_bad_argument_exits_two() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .args(["plan", "lead", "--structure", "sideways"])
        .assert()
        .code(2);
}

#[test]
fn test_compare_without_baseline_is_not_found() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .arg("compare")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No baseline snapshot"))
        .stderr(predicate::str::contains("entigen baseline"));
}

#[test]
fn test_missing_explicit_config_file() {
    let tmp = TempDir::new().unwrap();
    entigen_in(&tmp)
        .args(["--config", "missing.toml", "behaviors"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_empty_generator_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("entigen.toml"), "[harness]\ngenerator = []\n").unwrap();
    entigen_in(&tmp)
        .arg("generate")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("harness.generator"));
}

#[test]
fn test_overlapping_directories_are_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("entigen.toml"),
        "[harness]\nscratch_dir = \"src/generated/tmp\"\n",
    )
    .unwrap();
    entigen_in(&tmp)
        .args(["baseline", "--yes"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("overlaps"));
}

#[test]
fn test_escaping_output_root_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("entigen.toml"),
        "[harness]\noutput_roots = [\"../elsewhere\"]\n",
    )
    .unwrap();
    entigen_in(&tmp)
        .args(["baseline", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("../elsewhere"));
}

#[cfg(unix)]
#[test]
fn test_generator_failure_names_the_fixture() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("fixtures")).unwrap();
    fs::write(tmp.path().join("fixtures/lead.yaml"), "name: lead\n").unwrap();
    fs::write(
        tmp.path().join("entigen.toml"),
        "[harness]\ngenerator = [\"sh\", \"-c\", \"echo template exploded >&2; exit 7\"]\nformatter = []\n",
    )
    .unwrap();

    entigen_in(&tmp)
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fixtures/lead.yaml"))
        .stderr(predicate::str::contains("template exploded"));
}
