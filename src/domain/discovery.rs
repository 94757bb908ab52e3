//! Dynamic watch-set discovery.
//!
//! Filters a provider's trending feed down to at most `top_n` pairs worth
//! watching. The result is a stable subsequence of the input: surviving
//! candidates keep the provider's order, nothing is re-ranked.

use std::collections::HashSet;

use super::pair::{MarketSnapshot, PairWatch};

/// Acceptance criteria for discovered pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryCriteria {
    /// Allowed chain identifiers. Empty allows every chain.
    pub networks: Vec<String>,
    /// Maximum number of pairs accepted per refresh.
    pub top_n: usize,
    pub min_liquidity_usd: f64,
    pub min_volume_m5_usd: f64,
    pub min_txns_m5: u64,
    /// Base or quote symbols that disqualify a pair.
    pub exclude_symbols: HashSet<String>,
}

impl Default for DiscoveryCriteria {
    fn default() -> Self {
        Self {
            networks: vec!["bsc".into()],
            top_n: 50,
            min_liquidity_usd: 100_000.0,
            min_volume_m5_usd: 10_000.0,
            min_txns_m5: 20,
            exclude_symbols: ["USDT", "USDC", "BUSD", "DAI", "FDUSD", "TUSD"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Network,
    ExcludedSymbol,
    Liquidity,
    Volume,
    Transactions,
    MissingPairAddress,
}

/// Stateless filter over candidate feeds.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilter {
    criteria: DiscoveryCriteria,
}

impl DiscoveryFilter {
    #[must_use]
    pub const fn new(criteria: DiscoveryCriteria) -> Self {
        Self { criteria }
    }

    #[must_use]
    pub const fn criteria(&self) -> &DiscoveryCriteria {
        &self.criteria
    }

    /// Check one candidate. Checks run in a fixed order and the first
    /// failing one is reported.
    pub fn check(&self, candidate: &MarketSnapshot) -> Result<(), Rejection> {
        let c = &self.criteria;
        if !c.networks.is_empty() && !c.networks.iter().any(|n| *n == candidate.network) {
            return Err(Rejection::Network);
        }
        if c.exclude_symbols.contains(&candidate.base_symbol)
            || c.exclude_symbols.contains(&candidate.quote_symbol)
        {
            return Err(Rejection::ExcludedSymbol);
        }
        if candidate.liquidity_usd < c.min_liquidity_usd {
            return Err(Rejection::Liquidity);
        }
        if candidate.volume_m5 < c.min_volume_m5_usd {
            return Err(Rejection::Volume);
        }
        if candidate.txns_m5() < c.min_txns_m5 {
            return Err(Rejection::Transactions);
        }
        if candidate.pair_address.as_deref().map_or(true, str::is_empty) {
            return Err(Rejection::MissingPairAddress);
        }
        Ok(())
    }

    /// Accept candidates in input order until `top_n` have passed.
    ///
    /// Each accepted pair is watched by its pair address and noted with
    /// its base symbol.
    #[must_use]
    pub fn filter(&self, candidates: &[MarketSnapshot]) -> Vec<PairWatch> {
        candidates
            .iter()
            .filter(|candidate| self.check(candidate).is_ok())
            .filter_map(|candidate| {
                let address = candidate.pair_address.as_deref()?;
                Some(
                    PairWatch::pair(candidate.network.as_str(), address)
                        .with_note(candidate.base_symbol.as_str()),
                )
            })
            .take(self.criteria.top_n)
            .collect()
    }
}
