//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` wins over the configured level. Logs go to stderr so
    /// command output on stdout stays machine-readable.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        // a subscriber may already be installed (tests, repeated init)
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }

    /// Same settings with a different level.
    #[must_use]
    pub fn with_level(&self, level: &str) -> Self {
        Self {
            level: level.to_string(),
            format: self.format.clone(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
