//! DexScreener response types.
//!
//! Only the fields the scanner consumes are declared. Numeric fields are
//! parsed leniently: the API sends some of them as strings and omits
//! others, and anything unparseable reads as zero.
//!
//! ```json
//! {"pairs":[{"chainId":"bsc","pairAddress":"0x..","url":"https://..",
//!   "baseToken":{"symbol":"CAKE"},"quoteToken":{"symbol":"WBNB"},
//!   "priceUsd":"2.51","liquidity":{"usd":310000},
//!   "priceChange":{"m5":1.2},"txns":{"m5":{"buys":12,"sells":9}},
//!   "volume":{"m5":18000}}]}
//! ```

use serde::{Deserialize, Deserializer};

use crate::domain::pair::MarketSnapshot;

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    })
}

/// Body of the pair and token lookup endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// Body of the trending endpoint. Older deployments use `trendingPairs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
    #[serde(default)]
    pub trending_pairs: Option<Vec<DexPair>>,
}

impl TrendingResponse {
    #[must_use]
    pub fn into_pairs(self) -> Vec<DexPair> {
        self.pairs.or(self.trending_pairs).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub base_token: Option<DexToken>,
    #[serde(default)]
    pub quote_token: Option<DexToken>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    #[serde(default)]
    pub liquidity: Option<DexLiquidity>,
    #[serde(default)]
    pub price_change: Option<DexWindow>,
    #[serde(default)]
    pub txns: Option<DexTxns>,
    #[serde(default)]
    pub volume: Option<DexWindow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DexToken {
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DexLiquidity {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd: f64,
}

/// A `{ "m5": .. }` block. Other windows are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DexWindow {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub m5: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DexTxns {
    #[serde(default)]
    pub m5: Option<DexTxnCount>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DexTxnCount {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub buys: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub sells: u64,
}

impl DexPair {
    /// Convert to a domain snapshot. `fallback_network` is used when the
    /// payload names no chain.
    #[must_use]
    pub fn into_snapshot(self, fallback_network: &str) -> MarketSnapshot {
        let symbol = |token: Option<DexToken>| token.and_then(|t| t.symbol).unwrap_or_default();
        let (buys_m5, sells_m5) = self
            .txns
            .and_then(|t| t.m5)
            .map_or((0, 0), |c| (c.buys, c.sells));

        MarketSnapshot {
            network: self
                .chain_id
                .or(self.chain)
                .unwrap_or_else(|| fallback_network.to_string()),
            pair_address: self.pair_address.filter(|s| !s.is_empty()),
            url: self.url.filter(|s| !s.is_empty()),
            base_symbol: symbol(self.base_token),
            quote_symbol: symbol(self.quote_token),
            price_usd: self.price_usd,
            liquidity_usd: self.liquidity.map_or(0.0, |l| l.usd),
            price_change_m5: self.price_change.map_or(0.0, |p| p.m5),
            buys_m5,
            sells_m5,
            volume_m5: self.volume.map_or(0.0, |v| v.m5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_pair() {
        let body = r#"{"pairs":[{
            "chainId":"bsc","pairAddress":"0xabc","url":"https://dexscreener.com/bsc/0xabc",
            "baseToken":{"symbol":"CAKE"},"quoteToken":{"symbol":"WBNB"},
            "priceUsd":"2.51","liquidity":{"usd":310000.5},
            "priceChange":{"m5":1.25,"h1":-3},"txns":{"m5":{"buys":12,"sells":9}},
            "volume":{"m5":"18000","h24":1}
        }]}"#;
        let response: PairsResponse = serde_json::from_str(body).unwrap();
        let snapshot = response.pairs.unwrap().remove(0).into_snapshot("ignored");

        assert_eq!(snapshot.network, "bsc");
        assert_eq!(snapshot.pair_address.as_deref(), Some("0xabc"));
        assert_eq!(snapshot.symbol_pair(), "CAKE/WBNB");
        assert!((snapshot.price_usd - 2.51).abs() < 1e-12);
        assert!((snapshot.liquidity_usd - 310_000.5).abs() < 1e-9);
        assert!((snapshot.price_change_m5 - 1.25).abs() < 1e-12);
        assert_eq!((snapshot.buys_m5, snapshot.sells_m5), (12, 9));
        assert!((snapshot.volume_m5 - 18_000.0).abs() < 1e-9);
    }

    #[test]
    fn missing_and_malformed_fields_default_to_zero() {
        let body = r#"{"pairAddress":"0x1","priceUsd":null,"liquidity":{"usd":"n/a"}}"#;
        let pair: DexPair = serde_json::from_str(body).unwrap();
        let snapshot = pair.into_snapshot("bsc");

        assert_eq!(snapshot.network, "bsc");
        assert_eq!(snapshot.price_usd, 0.0);
        assert_eq!(snapshot.liquidity_usd, 0.0);
        assert_eq!(snapshot.txns_m5(), 0);
        assert_eq!(snapshot.symbol_pair(), "/");
    }

    #[test]
    fn null_pairs_list_is_accepted() {
        let response: PairsResponse = serde_json::from_str(r#"{"schemaVersion":"1.0.0","pairs":null}"#).unwrap();
        assert!(response.pairs.is_none());
    }

    #[test]
    fn trending_accepts_either_key_and_chain_field() {
        let modern: TrendingResponse =
            serde_json::from_str(r#"{"pairs":[{"chainId":"bsc","pairAddress":"0x1"}]}"#).unwrap();
        let legacy: TrendingResponse =
            serde_json::from_str(r#"{"trendingPairs":[{"chain":"base","pairAddress":"0x2"}]}"#).unwrap();

        let modern = modern.into_pairs();
        let legacy = legacy.into_pairs();
        assert_eq!(modern.len(), 1);
        assert_eq!(legacy[0].chain.as_deref(), Some("base"));
        assert_eq!(legacy.into_iter().next().unwrap().into_snapshot("").network, "base");
    }
}
