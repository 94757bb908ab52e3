use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Market-data fetch errors.
///
/// `Transient` failures are retried by the retry policy; the rest are
/// returned to the caller on the first attempt.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("transient fetch failure: {0}")]
    Transient(String),

    #[error("provider returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether another attempt may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::Transient(err.to_string());
        }
        if let Some(status) = err.status() {
            if status.is_server_error() || status.as_u16() == 429 {
                return Self::Transient(format!("status {status}"));
            }
            return Self::Status {
                status: status.as_u16(),
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Transient(err.to_string())
    }
}

/// Alert delivery errors. Logged by the caller, never retried.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("telegram delivery failed: {0}")]
    Telegram(String),

    #[error("record store rejected alert: {0}")]
    Store(String),

    #[error("sink not configured: {0}")]
    NotConfigured(&'static str),

    #[error("{0} is disabled in the configuration")]
    Disabled(&'static str),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;
