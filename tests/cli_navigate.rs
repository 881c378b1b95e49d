#![allow(missing_docs)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

fn run_json(args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["--format", "json"])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json report")
}

#[test]
fn grid_report_in_json() {
    let report = run_json(&["grid", "--width", "4", "--height", "3"]);
    assert_eq!(report["nodes"], 12);
    assert_eq!(report["links"], 34);
    assert_eq!(report["from"], 1);
    assert_eq!(report["to"], 12);
    assert_eq!(report["found"], true);
    assert_eq!(report["path"].as_array().map(Vec::len), Some(6));
    let cost = report["cost"].as_f64().expect("cost");
    assert!((cost - 5.0).abs() < 1e-9);
}

#[test]
fn grid_text_output_lists_path() {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["grid", "--width", "2", "--height", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("found: yes"), "{text}");
    assert!(text.contains("path: 1 -> 2"), "{text}");
}

#[test]
fn unreachable_goal_exits_with_two() {
    cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["random", "--nodes", "3", "--links", "0"])
        .assert()
        .code(2);
}

#[test]
fn capacity_override_is_enforced() {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["--capacity", "10", "grid", "--width", "4", "--height", "4"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("capacity 10 exhausted"), "{stderr}");
}

#[test]
fn config_file_sets_expansion_budget() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "revisit = \"closed-set\"\nmax_expansions = 1\n").expect("write config");
    let output = cargo_bin_cmd!("pathgraph")
        .arg("--config")
        .arg(&path)
        .args(["grid", "--width", "4", "--height", "3"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("budget exhausted"), "{stderr}");
}

#[test]
fn flag_overrides_config_budget() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "max_expansions = 1\n").expect("write config");
    let path = path.to_string_lossy().into_owned();
    let report = run_json(&[
        "--config",
        &path,
        "--max-expansions",
        "1000",
        "grid",
        "--width",
        "4",
        "--height",
        "3",
    ]);
    assert_eq!(report["found"], true);
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "page_size = 4096\n").expect("write config");
    let output = cargo_bin_cmd!("pathgraph")
        .arg("--config")
        .arg(&path)
        .args(["grid"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("failed to parse CLI config"), "{stderr}");
}

#[test]
fn unknown_goal_is_an_error() {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["grid", "--width", "2", "--height", "2", "--to", "99"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("node 99 not registered"), "{stderr}");
}

#[test]
fn blocked_probability_is_validated() {
    cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["grid", "--blocked", "1.5"])
        .assert()
        .code(1);
}

#[test]
fn oversized_grid_is_reported_not_panicked() {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["grid", "--width", "4294967296", "--height", "4294967297"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("overflow the node id space"), "{stderr}");
}

#[test]
fn oversized_random_scene_is_reported_not_panicked() {
    let output = cargo_bin_cmd!("pathgraph")
        .env_remove("PATHGRAPH_CONFIG")
        .args(["random", "--nodes", "2305843009213693952"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("capacity 4096 exhausted"), "{stderr}");
}
