//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file with environment
//! variable overrides for credentials (`TELEGRAM_BOT_TOKEN`,
//! `TELEGRAM_CHAT_ID`, `SUPABASE_URL`, `SUPABASE_ANON_KEY`).
//!
//! # Example
//!
//! ```no_run
//! use pairpulse::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::discovery::DiscoveryConfig;
use super::logging::LoggingConfig;
use super::store::{SqliteAppConfig, SupabaseAppConfig};
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::dexscreener::HttpConfig;
use crate::application::evaluation::AlertPolicy;
use crate::domain::pair::PairWatch;
use crate::domain::score::{Thresholds, SCORE_WINDOW};
use crate::error::{ConfigError, Result};

/// Config file used when the requested one does not exist.
pub const FALLBACK_CONFIG_PATH: &str = "config.example.toml";

/// One static watchlist entry as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchEntry {
    pub network: String,
    #[serde(default, alias = "tokenAddress")]
    pub token_address: Option<String>,
    #[serde(default, alias = "pairAddress")]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl WatchEntry {
    fn to_watch(&self) -> std::result::Result<PairWatch, ConfigError> {
        PairWatch::try_new(
            self.network.clone(),
            self.pair_address.clone(),
            self.token_address.clone(),
            self.note.clone(),
        )
        .map_err(|e| ConfigError::InvalidValue {
            field: "watchlist",
            reason: e.to_string(),
        })
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Pairs watched on every tick.
    #[serde(default)]
    pub watchlist: Vec<WatchEntry>,

    /// Seconds between ticks.
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,

    /// Minutes a pair stays silent after an alert.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,

    /// Minimum score that triggers an alert.
    #[serde(default = "default_alert_score")]
    pub alert_score: u32,

    /// Minimum score labelled PRIO.
    #[serde(default = "default_priority_score")]
    pub priority_score: u32,

    /// Samples retained per pair.
    #[serde(default = "default_stats_history")]
    pub stats_history: usize,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Market-data provider HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub supabase: SupabaseAppConfig,

    #[serde(default)]
    pub sqlite: SqliteAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(skip)]
    watches: Vec<PairWatch>,
}

const fn default_poll_seconds() -> u64 {
    20
}

const fn default_cooldown_minutes() -> u64 {
    10
}

const fn default_alert_score() -> u32 {
    5
}

const fn default_priority_score() -> u32 {
    7
}

const fn default_stats_history() -> usize {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watchlist: Vec::new(),
            poll_seconds: default_poll_seconds(),
            cooldown_minutes: default_cooldown_minutes(),
            alert_score: default_alert_score(),
            priority_score: default_priority_score(),
            stats_history: default_stats_history(),
            thresholds: Thresholds::default(),
            discovery: DiscoveryConfig::default(),
            http: HttpConfig::default(),
            telegram: TelegramAppConfig::default(),
            supabase: SupabaseAppConfig::default(),
            sqlite: SqliteAppConfig::default(),
            logging: LoggingConfig::default(),
            watches: Vec::new(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn check_url(field: &'static str, value: &str) -> std::result::Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| invalid(field, &e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(field, "must be an http(s) URL"));
    }
    Ok(())
}

/// Rejects `nan` and `inf`, which TOML accepts for floats.
fn check_finite(values: &[(&'static str, f64)]) -> std::result::Result<(), ConfigError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, _)) => Err(invalid(field, "must be a finite number")),
        None => Ok(()),
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, validates every value, and builds
    /// the static watch set.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - A watch entry has neither a pair nor a token address
    /// - Any other value is out of range
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve which file to load: `path` if it exists, otherwise
    /// [`FALLBACK_CONFIG_PATH`] next to it when that exists.
    ///
    /// The second value is true when the fallback was chosen.
    #[must_use]
    pub fn resolve_path(path: &Path) -> (PathBuf, bool) {
        if path.exists() {
            return (path.to_path_buf(), false);
        }
        let fallback = path
            .parent()
            .map_or_else(|| PathBuf::from(FALLBACK_CONFIG_PATH), |dir| {
                dir.join(FALLBACK_CONFIG_PATH)
            });
        if fallback.exists() {
            (fallback, true)
        } else {
            (path.to_path_buf(), false)
        }
    }

    #[allow(clippy::result_large_err)]
    fn apply_env(&mut self) -> Result<()> {
        self.telegram
            .apply_env()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "telegram.chat_id",
                reason,
            })?;
        self.supabase.apply_env();
        Ok(())
    }

    /// Validate configuration values and build the watch set.
    #[allow(clippy::result_large_err)]
    fn validate(&mut self) -> Result<()> {
        self.watches = self
            .watchlist
            .iter()
            .map(WatchEntry::to_watch)
            .collect::<std::result::Result<_, _>>()?;

        if self.poll_seconds == 0 {
            return Err(invalid("poll_seconds", "must be greater than 0").into());
        }
        if self.priority_score < self.alert_score {
            return Err(invalid("priority_score", "must be >= alert_score").into());
        }
        if self.stats_history < SCORE_WINDOW {
            return Err(invalid("stats_history", "must be at least 30").into());
        }

        let t = &self.thresholds;
        check_finite(&[
            ("min_liquidity_usd", t.min_liquidity_usd),
            ("volume_spike_multiplier", t.volume_spike_multiplier),
            ("volume_zscore", t.volume_zscore),
            ("buy_sell_tx_ratio", t.buy_sell_tx_ratio),
            ("buy_share_m5", t.buy_share_m5),
            ("dprice_1m_pct", t.dprice_1m_pct),
            ("dprice_5m_pct", t.dprice_5m_pct),
            ("whale_trade_usd", t.whale_trade_usd),
            ("discovery.min_liquidity_usd", self.discovery.min_liquidity_usd),
            ("discovery.min_volume_m5_usd", self.discovery.min_volume_m5_usd),
            ("backoff_multiplier", self.http.backoff_multiplier),
        ])?;
        if t.min_liquidity_usd < 0.0 {
            return Err(invalid("min_liquidity_usd", "must be 0 or greater").into());
        }
        if t.volume_spike_multiplier <= 0.0 {
            return Err(invalid("volume_spike_multiplier", "must be greater than 0").into());
        }
        if t.buy_sell_tx_ratio < 0.0 {
            return Err(invalid("buy_sell_tx_ratio", "must be 0 or greater").into());
        }
        if !(0.0..=1.0).contains(&t.buy_share_m5) {
            return Err(invalid("buy_share_m5", "must be between 0 and 1").into());
        }

        if self.discovery.enabled && self.discovery.top_n == 0 {
            return Err(invalid("top_n", "must be greater than 0").into());
        }
        if self.discovery.refresh_seconds == 0 {
            return Err(invalid("refresh_seconds", "must be greater than 0").into());
        }

        if self.http.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        check_url("api_url", &self.http.api_url)?;
        check_url("link_url", &self.http.link_url)?;
        if let Some(url) = self.supabase.url.as_deref().filter(|_| self.supabase.enabled) {
            check_url("supabase.url", url)?;
        }
        if self.http.retry_max_attempts == 0 {
            return Err(invalid("retry_max_attempts", "must be greater than 0").into());
        }
        if self.http.backoff_multiplier < 1.0 {
            return Err(invalid("backoff_multiplier", "must be >= 1.0").into());
        }
        if self.http.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than 0").into());
        }

        if self.supabase.enabled && self.supabase.table.is_empty() {
            return Err(ConfigError::MissingField {
                field: "supabase.table",
            }
            .into());
        }
        if self.sqlite.enabled && self.sqlite.path.is_empty() {
            return Err(ConfigError::MissingField {
                field: "sqlite.path",
            }
            .into());
        }
        Ok(())
    }

    /// Validated static watch set, in file order.
    #[must_use]
    pub fn watches(&self) -> &[PairWatch] {
        &self.watches
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds)
    }

    #[must_use]
    pub fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy {
            alert_score: self.alert_score,
            priority_score: self.priority_score,
            link_url: self.http.link_url.clone(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
