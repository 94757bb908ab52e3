mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use support::config::{write_temp_config, MINIMAL_TOML};

fn pairpulse() -> Command {
    let mut cmd = Command::cargo_bin("pairpulse").expect("binary built");
    for var in [
        "TELEGRAM_BOT_TOKEN",
        "TELEGRAM_CHAT_ID",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn check_config_accepts_valid_file() {
    let config = write_temp_config(MINIMAL_TOML);

    pairpulse()
        .args(["check", "config", "--config"])
        .arg(&config.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));
}

#[test]
fn check_config_rejects_invalid_value() {
    let config = write_temp_config("alert_score = 8\npriority_score = 3\n");

    pairpulse()
        .args(["check", "config", "--config"])
        .arg(&config.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority_score"));
}

#[test]
fn check_config_rejects_watch_without_address() {
    let config = write_temp_config("[[watchlist]]\nnetwork = \"bsc\"\n");

    pairpulse()
        .args(["check", "config", "--config"])
        .arg(&config.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pair address or token address"));
}

#[test]
fn missing_config_falls_back_to_example() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.example.toml"), MINIMAL_TOML).unwrap();

    pairpulse()
        .args(["check", "config", "--config"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using"))
        .stdout(predicate::str::contains("Configuration file is valid"));
}

#[test]
fn missing_config_without_example_fails() {
    let dir = tempfile::tempdir().unwrap();

    pairpulse()
        .args(["check", "config", "--config"])
        .arg(dir.path().join("config.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn check_config_json_output_is_one_object() {
    let config = write_temp_config(MINIMAL_TOML);

    let output = pairpulse()
        .args(["--json", "check", "config", "--config"])
        .arg(&config.path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "check.config");
    assert_eq!(value["watchlist"], 1);
    assert_eq!(value["status"], "valid");
}

#[test]
fn check_store_warns_when_nothing_is_enabled() {
    let config = write_temp_config(MINIMAL_TOML);

    pairpulse()
        .args(["check", "store", "--config"])
        .arg(&config.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No record store is enabled"));
}

#[test]
fn check_store_inserts_into_sqlite() {
    let config = write_temp_config(MINIMAL_TOML);
    let db_path = config.dir.path().join("alerts.db");
    let toml = format!(
        "{MINIMAL_TOML}\n[sqlite]\nenabled = true\npath = \"{}\"\n",
        db_path.display()
    );
    fs::write(&config.path, toml).unwrap();

    pairpulse()
        .args(["check", "store", "--config"])
        .arg(&config.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite: test alert stored"));
    assert!(db_path.exists());
}

#[test]
fn check_telegram_requires_a_token() {
    let toml = MINIMAL_TOML.replace("enabled = false", "enabled = true");
    let config = write_temp_config(&toml);

    pairpulse()
        .args(["check", "telegram", "--config"])
        .arg(&config.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn check_telegram_stops_when_disabled() {
    let config = write_temp_config(MINIMAL_TOML);

    pairpulse()
        .env("TELEGRAM_BOT_TOKEN", "123456:abcdef")
        .env("TELEGRAM_CHAT_ID", "42")
        .args(["check", "telegram", "--config"])
        .arg(&config.path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("telegram.enabled = true"))
        .stderr(predicate::str::contains("telegram is disabled"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    pairpulse().arg("trade").assert().failure();
}
