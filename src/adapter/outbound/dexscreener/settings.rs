//! DexScreener HTTP client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::retry::RetryPolicy;

/// Market-data provider HTTP settings (`[http]`).
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base for pair links when a snapshot carries no URL.
    #[serde(default = "default_link_url")]
    pub link_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum attempts per request, first attempt included.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Growth factor applied to the delay per retry. 1.0 keeps it fixed.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.dexscreener.com".into()
}

fn default_link_url() -> String {
    "https://dexscreener.com".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    1_000
}

const fn default_backoff_multiplier() -> f64 {
    1.0
}

fn default_user_agent() -> String {
    concat!("pairpulse/", env!("CARGO_PKG_VERSION")).into()
}

impl HttpConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            delay: Duration::from_millis(self.retry_backoff_ms),
            backoff_multiplier: self.backoff_multiplier,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            link_url: default_link_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            user_agent: default_user_agent(),
        }
    }
}
