//! Market-data ports.
//!
//! Implemented by provider adapters. Retries and timeouts belong to the
//! implementation; callers see one result per call.

use async_trait::async_trait;

use crate::domain::pair::{MarketSnapshot, PairWatch};
use crate::error::FetchError;

/// Fetches the current snapshot for one watch entry.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Resolve `watch` to a single snapshot.
    ///
    /// Returns `Ok(None)` when the provider knows no pair for the entry.
    /// When several pairs match (token lookups), the deepest one is
    /// returned.
    async fn fetch(&self, watch: &PairWatch) -> Result<Option<MarketSnapshot>, FetchError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}

/// Fetches the trending candidate feed used by discovery.
#[async_trait]
pub trait CandidateFeed: Send + Sync {
    /// Candidates in provider order.
    async fn fetch_trending(&self) -> Result<Vec<MarketSnapshot>, FetchError>;
}
