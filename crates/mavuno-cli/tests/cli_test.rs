//! End-to-end tests for the mavuno-fees binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary against an isolated config file
fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mavuno-fees"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mavuno-fees")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_quote_json_for_three_ton_bid() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(
        &config,
        &["quote", "-a", "180000", "-q", "3000", "-t", "3-ton", "-f", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let breakdown = &value["breakdown"];
    assert_eq!(breakdown["gross_amount"], "180000.00");
    assert_eq!(breakdown["platform_fee"], "9000.00");
    assert_eq!(breakdown["finance_markup"], "3600.00");
    assert_eq!(breakdown["transport_and_qc_fee"], "5400.00");
    assert_eq!(breakdown["net_amount"], "162000.00");
    assert_eq!(value["truck_size"], "3-ton");
    assert_eq!(value["meets_minimum"], true);
}

#[test]
fn test_quote_table_output() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(&config, &["quote", "-a", "180000", "-q", "3000", "-t", "medium"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Bid Fee Breakdown"));
    assert!(text.contains("162000.00"));
    assert!(!text.contains("cannot be submitted"));
}

#[test]
fn test_quote_rejects_zero_amount() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(&config, &["quote", "-a", "0", "-q", "3000", "-t", "3-ton"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid argument"));
}

#[test]
fn test_quote_out_of_range_reports_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(
        &config,
        &["quote", "-a", "100000000000000000000", "-q", "0.0000000001", "-t", "1-ton"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Invalid argument"));
    assert!(!stderr(&output).contains("panicked"));

    let output = run(
        &config,
        &["quote", "-a", "1000000000000000", "-q", "0.00000000000000000001", "-t", "1-ton"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Invalid argument"));
}

#[test]
fn test_check_exit_codes() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let at_minimum = run(&config, &["check", "--quantity", "1000"]);
    assert_eq!(at_minimum.status.code(), Some(0));
    assert!(stdout(&at_minimum).starts_with("OK"));

    let below = run(&config, &["check", "--quantity", "999"]);
    assert_eq!(below.status.code(), Some(2));
    assert!(stdout(&below).contains("add 1 kg"));
}

#[test]
fn test_minimum_json() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(&config, &["minimum", "-f", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["minimum_quantity_kg"], "1000");
}

#[test]
fn test_batch_settles_fixture() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let xlsx = dir.path().join("statement.xlsx");
    let csv = fixture("bids.csv");

    let output = run(
        &config,
        &[
            "batch",
            csv.to_str().unwrap(),
            "--xlsx",
            xlsx.to_str().unwrap(),
            "-f",
            "json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let results = value.as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["quote"]["breakdown"]["net_amount"], "162000.00");
    assert_eq!(results[2]["quote"]["meets_minimum"], false);
    assert!(results[3]["quote"].is_null());
    assert!(results[3]["error"].is_string());

    assert!(xlsx.exists());
    assert!(stderr(&output).contains("1 bid(s) rejected"));
}

#[test]
fn test_batch_filters_by_group_and_bid() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let csv = fixture("bids.csv");
    let csv = csv.to_str().unwrap();

    let output = run(&config, &["batch", csv, "--group", "nyeri coffee coop", "-f", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let results = value.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["record"]["bid_id"], "B-002");

    let output = run(&config, &["batch", csv, "--bid", "B-001", "-f", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);

    let output = run(&config, &["batch", csv, "--bid", "B-404"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("B-404"));
}

#[test]
fn test_batch_missing_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let missing = dir.path().join("nope.csv");

    let output = run(&config, &["batch", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not found"));
}

#[test]
fn test_config_overrides_policy() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let set = run(
        &config,
        &["config", "--set-platform-bps", "1000", "--set-transport-bps", "3-ton=0"],
    );
    assert!(set.status.success(), "stderr: {}", stderr(&set));
    assert!(config.exists());

    let output = run(
        &config,
        &["quote", "-a", "180000", "-q", "3000", "-t", "3-ton", "-f", "json"],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["breakdown"]["platform_fee"], "18000.00");
    assert_eq!(value["breakdown"]["transport_and_qc_fee"], "0.00");
    assert_eq!(value["breakdown"]["net_amount"], "158400.00");

    let show = run(&config, &["config", "--show"]);
    assert!(show.status.success());
    assert!(stdout(&show).contains(&format!("Config file:          {}", config.display())));

    let reset = run(&config, &["config", "--reset"]);
    assert!(reset.status.success());
    let policy = run(&config, &["policy", "-f", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&policy)).unwrap();
    assert_eq!(value["rates"][0]["bps"], 500);
}

#[test]
fn test_config_refuses_policy_over_gross() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    let output = run(&config, &["config", "--set-finance-bps", "9800"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!config.exists());
}
