//! DexScreener REST client.
//!
//! Serves both market-data ports: per-watch snapshots from the pair and
//! token lookup endpoints, and the candidate feed from the trending
//! endpoint. Every request goes through the configured [`RetryPolicy`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{PairsResponse, TrendingResponse};
use super::settings::HttpConfig;
use crate::adapter::outbound::retry::RetryPolicy;
use crate::domain::pair::{MarketSnapshot, PairWatch, WatchTarget};
use crate::error::FetchError;
use crate::port::outbound::market::{CandidateFeed, SnapshotFetcher};

pub struct DexScreenerClient {
    http: HttpClient,
    base_url: String,
    retry: RetryPolicy,
}

impl DexScreenerClient {
    /// Client with default HTTP settings against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_url.clone(),
            retry: config.retry_policy(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        self.retry
            .run(url, || async {
                let response = self.http.get(url).send().await?.error_for_status()?;
                Ok(response.json::<T>().await?)
            })
            .await
    }

    /// All pairs the provider returns for one watch entry.
    ///
    /// # Errors
    ///
    /// Returns the last [`FetchError`] once retries are exhausted.
    pub async fn lookup(&self, watch: &PairWatch) -> Result<Vec<MarketSnapshot>, FetchError> {
        let url = match watch.target() {
            WatchTarget::Pair { network, address } => {
                self.url(&format!("/latest/dex/pairs/{network}/{address}"))
            }
            WatchTarget::Token { address } => self.url(&format!("/latest/dex/tokens/{address}")),
        };

        let response: PairsResponse = self.get_json(&url).await?;
        Ok(response
            .pairs
            .unwrap_or_default()
            .into_iter()
            .map(|pair| pair.into_snapshot(watch.network()))
            .collect())
    }
}

#[async_trait]
impl SnapshotFetcher for DexScreenerClient {
    async fn fetch(&self, watch: &PairWatch) -> Result<Option<MarketSnapshot>, FetchError> {
        let snapshots = self.lookup(watch).await?;
        if snapshots.len() > 1 {
            debug!(watch = %watch, count = snapshots.len(), "Multiple pairs returned, using deepest");
        }
        Ok(MarketSnapshot::deepest(snapshots))
    }

    fn provider_name(&self) -> &'static str {
        "dexscreener"
    }
}

#[async_trait]
impl CandidateFeed for DexScreenerClient {
    async fn fetch_trending(&self) -> Result<Vec<MarketSnapshot>, FetchError> {
        let url = self.url("/latest/dex/trending");
        let response: TrendingResponse = self.get_json(&url).await?;
        let candidates: Vec<MarketSnapshot> = response
            .into_pairs()
            .into_iter()
            .map(|pair| pair.into_snapshot(""))
            .collect();
        debug!(count = candidates.len(), "Fetched trending candidates");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_base_and_retry() {
        let config = HttpConfig {
            api_url: "http://localhost:9999/".into(),
            retry_max_attempts: 5,
            ..Default::default()
        };
        let client = DexScreenerClient::from_config(&config);

        assert_eq!(client.base_url(), "http://localhost:9999/");
        assert_eq!(client.retry.max_attempts, 5);
        assert_eq!(
            client.url("/latest/dex/trending"),
            "http://localhost:9999/latest/dex/trending"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transient() {
        // port 9 (discard) on localhost is normally closed
        let client = DexScreenerClient::new("http://127.0.0.1:9").with_retry(RetryPolicy::none());
        let watch = PairWatch::pair("bsc", "0xabc");

        let err = client.fetch(&watch).await.unwrap_err();
        assert!(err.is_transient(), "unexpected error: {err}");
    }
}
