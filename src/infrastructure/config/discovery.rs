//! Discovery configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::discovery::DiscoveryCriteria;

/// Trending-feed discovery settings (`[discovery]`).
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Allowed chain identifiers. Empty allows every chain.
    #[serde(default = "default_networks")]
    pub networks: Vec<String>,
    /// Maximum discovered pairs per refresh.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_min_liquidity_usd")]
    pub min_liquidity_usd: f64,
    #[serde(default = "default_min_volume_m5_usd")]
    pub min_volume_m5_usd: f64,
    #[serde(default = "default_min_txns_m5")]
    pub min_txns_m5: u64,
    /// Symbols that disqualify a pair on either side.
    #[serde(default = "default_exclude_symbols")]
    pub exclude_symbols: Vec<String>,
    /// Seconds between discovery runs.
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
}

fn default_networks() -> Vec<String> {
    vec!["bsc".into()]
}

const fn default_top_n() -> usize {
    50
}

fn default_min_liquidity_usd() -> f64 {
    100_000.0
}

fn default_min_volume_m5_usd() -> f64 {
    10_000.0
}

const fn default_min_txns_m5() -> u64 {
    20
}

fn default_exclude_symbols() -> Vec<String> {
    ["USDT", "USDC", "BUSD", "DAI", "FDUSD", "TUSD"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_refresh_seconds() -> u64 {
    120
}

impl DiscoveryConfig {
    #[must_use]
    pub fn criteria(&self) -> DiscoveryCriteria {
        DiscoveryCriteria {
            networks: self.networks.clone(),
            top_n: self.top_n,
            min_liquidity_usd: self.min_liquidity_usd,
            min_volume_m5_usd: self.min_volume_m5_usd,
            min_txns_m5: self.min_txns_m5,
            exclude_symbols: self.exclude_symbols.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_seconds)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            networks: default_networks(),
            top_n: default_top_n(),
            min_liquidity_usd: default_min_liquidity_usd(),
            min_volume_m5_usd: default_min_volume_m5_usd(),
            min_txns_m5: default_min_txns_m5(),
            exclude_symbols: default_exclude_symbols(),
            refresh_seconds: default_refresh_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_criteria() {
        assert_eq!(DiscoveryConfig::default().criteria(), DiscoveryCriteria::default());
    }
}
