//! Alert records and messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pair::{MarketSnapshot, PairWatch};
use super::score::ScoreResult;

/// Urgency band of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertPriority {
    /// Score at or above the priority floor.
    Prio,
    /// Score at or above the alert floor only.
    Act,
}

impl AlertPriority {
    #[must_use]
    pub const fn for_score(score: u32, priority_score: u32) -> Self {
        if score >= priority_score {
            Self::Prio
        } else {
            Self::Act
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prio => "PRIO",
            Self::Act => "ACT",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured alert handed to record sinks.
///
/// Field names are the stored column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub pair_address: Option<String>,
    pub network: String,
    /// Display pair, e.g. `CAKE/WBNB`.
    pub symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub score: u32,
    /// Reasons joined with `", "`.
    pub reasons: String,
    pub link: String,
    /// Alert time, epoch seconds.
    pub ts: i64,
}

impl AlertRecord {
    /// Build the record for a permitted alert.
    #[must_use]
    pub fn new(
        watch: &PairWatch,
        snapshot: &MarketSnapshot,
        result: &ScoreResult,
        link: String,
        ts: i64,
    ) -> Self {
        Self {
            pair_address: snapshot.pair_address.clone(),
            network: watch.network().to_string(),
            symbol: snapshot.symbol_pair(),
            price_usd: snapshot.price_usd,
            liquidity_usd: snapshot.liquidity_usd,
            score: result.score(),
            reasons: result.joined_reasons(),
            link,
            ts,
        }
    }

    /// Synthetic record used by `check store`.
    #[must_use]
    pub fn probe(ts: i64) -> Self {
        Self {
            pair_address: Some("test".into()),
            network: "testnet".into(),
            symbol: "TEST/USDT".into(),
            price_usd: 1.0,
            liquidity_usd: 0.0,
            score: 1,
            reasons: "cli-test".into(),
            link: "https://example.com".into(),
            ts,
        }
    }

    /// Plain-text message for chat delivery.
    #[must_use]
    pub fn message(&self, priority: AlertPriority) -> String {
        format!(
            "ALERT ({}) {}\nPrice: ${:.6} | Liquidity: ${:.0}\nScore: {} | Reasons: {}\nLink: {}",
            priority, self.symbol, self.price_usd, self.liquidity_usd, self.score, self.reasons, self.link
        )
    }
}
