//! Watch entries and market snapshots.

use std::fmt;

use super::error::DomainError;
use super::id::PairIdentity;

/// What a watch entry resolves against on the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchTarget<'a> {
    /// A specific pair on a specific network.
    Pair { network: &'a str, address: &'a str },
    /// Every pair trading a token; the deepest one is evaluated.
    Token { address: &'a str },
}

/// One entry of the effective watch set.
///
/// Always carries at least one of a pair address or a token address;
/// [`PairWatch::try_new`] enforces this at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairWatch {
    network: String,
    pair_address: Option<String>,
    token_address: Option<String>,
    note: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PairWatch {
    /// Build a validated watch entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyNetwork`] when `network` is blank and
    /// [`DomainError::MissingWatchTarget`] when neither address is present.
    pub fn try_new(
        network: impl Into<String>,
        pair_address: Option<String>,
        token_address: Option<String>,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        let network = network.into();
        if network.trim().is_empty() {
            return Err(DomainError::EmptyNetwork);
        }
        let pair_address = non_empty(pair_address);
        let token_address = non_empty(token_address);
        if pair_address.is_none() && token_address.is_none() {
            return Err(DomainError::MissingWatchTarget { network });
        }
        Ok(Self {
            network,
            pair_address,
            token_address,
            note: non_empty(note),
        })
    }

    /// Watch a pair address directly. Used by discovery, where the pair
    /// address is already known to be present.
    pub fn pair(network: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            pair_address: Some(address.into()),
            token_address: None,
            note: None,
        }
    }

    /// Attach a human-readable note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = non_empty(Some(note.into()));
        self
    }

    #[must_use]
    pub fn network(&self) -> &str {
        &self.network
    }

    #[must_use]
    pub fn pair_address(&self) -> Option<&str> {
        self.pair_address.as_deref()
    }

    #[must_use]
    pub fn token_address(&self) -> Option<&str> {
        self.token_address.as_deref()
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Resolve the provider lookup for this entry. Pair addresses win over
    /// token addresses.
    #[must_use]
    pub fn target(&self) -> WatchTarget<'_> {
        match (&self.pair_address, &self.token_address) {
            (Some(address), _) => WatchTarget::Pair {
                network: &self.network,
                address,
            },
            (None, Some(address)) => WatchTarget::Token { address },
            // try_new and pair() never build an entry without an address
            (None, None) => WatchTarget::Token {
                address: PairIdentity::UNKNOWN,
            },
        }
    }
}

impl fmt::Display for PairWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self
            .pair_address
            .as_deref()
            .or(self.token_address.as_deref())
            .unwrap_or(PairIdentity::UNKNOWN);
        match &self.note {
            Some(note) => write!(f, "{}:{} ({})", self.network, address, note),
            None => write!(f, "{}:{}", self.network, address),
        }
    }
}

/// Point-in-time read of one pair's market metrics.
///
/// Only the fields the scorer, the discovery filter, and the alert record
/// consume are kept. Missing provider values default to zero or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    /// Network / chain identifier as reported by the provider.
    pub network: String,
    pub pair_address: Option<String>,
    /// Canonical link to the pair page.
    pub url: Option<String>,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    /// 5-minute price change, in percent.
    pub price_change_m5: f64,
    pub buys_m5: u64,
    pub sells_m5: u64,
    /// 5-minute traded volume in USD.
    pub volume_m5: f64,
}

impl MarketSnapshot {
    /// Total 5-minute transaction count.
    #[must_use]
    pub const fn txns_m5(&self) -> u64 {
        self.buys_m5.saturating_add(self.sells_m5)
    }

    /// Display pair such as `CAKE/WBNB`.
    #[must_use]
    pub fn symbol_pair(&self) -> String {
        format!("{}/{}", self.base_symbol, self.quote_symbol)
    }

    /// Key this snapshot's rolling stats and cooldown under.
    ///
    /// Pair address, then pair URL, then the watched token address.
    #[must_use]
    pub fn identity(&self, watch: &PairWatch) -> PairIdentity {
        self.pair_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.url.as_deref().filter(|s| !s.is_empty()))
            .or(watch.token_address())
            .map_or_else(|| PairIdentity::new(PairIdentity::UNKNOWN), PairIdentity::from)
    }

    /// Canonical link, or one built from `link_base` when the provider
    /// did not send one.
    #[must_use]
    pub fn link(&self, link_base: &str, watch: &PairWatch) -> String {
        if let Some(url) = self.url.as_deref().filter(|s| !s.is_empty()) {
            return url.to_string();
        }
        format!(
            "{}/{}/{}",
            link_base.trim_end_matches('/'),
            watch.network(),
            self.pair_address.as_deref().unwrap_or_default()
        )
    }

    /// Pick the snapshot with the highest USD liquidity. Ties keep the
    /// earliest entry.
    #[must_use]
    pub fn deepest(snapshots: Vec<Self>) -> Option<Self> {
        snapshots.into_iter().reduce(|best, candidate| {
            if candidate.liquidity_usd > best.liquidity_usd {
                candidate
            } else {
                best
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pair: Option<&str>, url: Option<&str>, liquidity: f64) -> MarketSnapshot {
        MarketSnapshot {
            network: "bsc".into(),
            pair_address: pair.map(Into::into),
            url: url.map(Into::into),
            liquidity_usd: liquidity,
            ..Default::default()
        }
    }

    #[test]
    fn try_new_requires_an_address() {
        let err = PairWatch::try_new("bsc", None, Some("  ".into()), None).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingWatchTarget {
                network: "bsc".into()
            }
        );
    }

    #[test]
    fn try_new_rejects_blank_network() {
        let err = PairWatch::try_new(" ", Some("0xabc".into()), None, None).unwrap_err();
        assert_eq!(err, DomainError::EmptyNetwork);
    }

    #[test]
    fn target_prefers_pair_address() {
        let watch =
            PairWatch::try_new("bsc", Some("0xpair".into()), Some("0xtoken".into()), None).unwrap();
        assert_eq!(
            watch.target(),
            WatchTarget::Pair {
                network: "bsc",
                address: "0xpair"
            }
        );

        let watch = PairWatch::try_new("bsc", None, Some("0xtoken".into()), None).unwrap();
        assert_eq!(watch.target(), WatchTarget::Token { address: "0xtoken" });
    }

    #[test]
    fn identity_falls_back_through_url_and_token() {
        let watch = PairWatch::try_new("bsc", None, Some("0xtoken".into()), None).unwrap();

        assert_eq!(
            snapshot(Some("0xpair"), Some("https://x"), 1.0).identity(&watch),
            PairIdentity::from("0xpair")
        );
        assert_eq!(
            snapshot(None, Some("https://x"), 1.0).identity(&watch),
            PairIdentity::from("https://x")
        );
        assert_eq!(
            snapshot(None, None, 1.0).identity(&watch),
            PairIdentity::from("0xtoken")
        );
    }

    #[test]
    fn link_is_built_when_url_missing() {
        let watch = PairWatch::pair("bsc", "0xpair");
        let snap = snapshot(Some("0xpair"), None, 1.0);
        assert_eq!(
            snap.link("https://dexscreener.com/", &watch),
            "https://dexscreener.com/bsc/0xpair"
        );
    }

    #[test]
    fn deepest_keeps_first_on_ties() {
        let picked = MarketSnapshot::deepest(vec![
            snapshot(Some("a"), None, 10.0),
            snapshot(Some("b"), None, 50.0),
            snapshot(Some("c"), None, 50.0),
        ])
        .unwrap();
        assert_eq!(picked.pair_address.as_deref(), Some("b"));
        assert!(MarketSnapshot::deepest(Vec::new()).is_none());
    }
}
