mod support;

use std::path::Path;

use pairpulse::error::{ConfigError, Error};
use pairpulse::infrastructure::config::settings::{Config, FALLBACK_CONFIG_PATH};
use support::config::{write_temp_config, MINIMAL_TOML};

#[test]
fn shipped_example_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(FALLBACK_CONFIG_PATH);
    let config = Config::load(&path).unwrap();

    assert_eq!(config.watches().len(), 2);
    assert_eq!(config.watches()[1].pair_address(), None);
    assert!(config.watches()[1].token_address().is_some());
    assert!(!config.discovery.enabled);
    assert_eq!(config.http.retry_policy().max_attempts, 3);
}

#[test]
fn load_reads_file_from_disk() {
    let file = write_temp_config(MINIMAL_TOML);
    let config = Config::load(&file.path).unwrap();

    assert_eq!(config.poll_seconds, 5);
    assert_eq!(config.poll_interval().as_secs(), 5);
    assert_eq!(config.watches()[0].network(), "bsc");
}

#[test]
fn resolve_path_prefers_requested_file() {
    let file = write_temp_config(MINIMAL_TOML);
    std::fs::write(file.dir.path().join(FALLBACK_CONFIG_PATH), MINIMAL_TOML).unwrap();

    let (resolved, fallback) = Config::resolve_path(&file.path);
    assert_eq!(resolved, file.path);
    assert!(!fallback);
}

#[test]
fn resolve_path_uses_sibling_example() {
    let dir = tempfile::tempdir().unwrap();
    let example = dir.path().join(FALLBACK_CONFIG_PATH);
    std::fs::write(&example, MINIMAL_TOML).unwrap();

    let (resolved, fallback) = Config::resolve_path(&dir.path().join("config.toml"));
    assert_eq!(resolved, example);
    assert!(fallback);
}

#[test]
fn thresholds_override_defaults_per_field() {
    let config = Config::parse_toml(
        r#"
[thresholds]
min_liquidity_usd = 50000
dprice_5m_pct = 4.5
"#,
    )
    .unwrap();

    assert_eq!(config.thresholds.min_liquidity_usd, 50_000.0);
    assert_eq!(config.thresholds.dprice_5m_pct, 4.5);
    assert_eq!(config.thresholds.volume_spike_multiplier, 4.0);
}

#[test]
fn discovery_section_maps_to_criteria() {
    let config = Config::parse_toml(
        r#"
[discovery]
enabled = true
networks = ["bsc", "base"]
top_n = 10
exclude_symbols = ["USDT"]
refresh_seconds = 120
"#,
    )
    .unwrap();

    let criteria = config.discovery.criteria();
    assert_eq!(criteria.networks, vec!["bsc", "base"]);
    assert_eq!(criteria.top_n, 10);
    assert!(criteria.exclude_symbols.contains("USDT"));
    assert_eq!(config.discovery.refresh_interval().as_secs(), 120);
}

#[test]
fn zero_poll_interval_is_rejected() {
    let err = Config::parse_toml("poll_seconds = 0").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "poll_seconds",
            ..
        })
    ));
}

#[test]
fn buy_share_outside_unit_range_is_rejected() {
    let err = Config::parse_toml("[thresholds]\nbuy_share_m5 = 1.5").unwrap_err();
    assert!(err.to_string().contains("buy_share_m5"));
}

#[test]
fn nan_thresholds_cannot_disable_the_liquidity_gate() {
    let err = Config::parse_toml(
        "[thresholds]\nmin_liquidity_usd = nan\nvolume_spike_multiplier = nan",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "min_liquidity_usd",
            ..
        })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Config::parse_toml("poll_seconds = [").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}
