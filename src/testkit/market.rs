//! Scripted market-data ports.
//!
//! - [`ScriptedFetcher`] - per-watch response queues keyed by pair or
//!   token address. The last scripted response repeats once the queue
//!   is down to one entry; unknown keys return `Ok(None)`.
//! - [`ScriptedFeed`] - trending responses in order, last one repeating.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::pair::{MarketSnapshot, PairWatch};
use crate::error::FetchError;
use crate::port::outbound::market::{CandidateFeed, SnapshotFetcher};

type FetchResult = Result<Option<MarketSnapshot>, FetchError>;

fn watch_key(watch: &PairWatch) -> String {
    watch
        .pair_address()
        .or(watch.token_address())
        .unwrap_or_default()
        .to_string()
}

fn next_repeating<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<FetchResult>>>,
    panics: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    calls: AtomicU32,
}

impl ScriptedFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before every response.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a snapshot for `key`.
    #[must_use]
    pub fn respond(self, key: &str, snapshot: MarketSnapshot) -> Self {
        self.push(key, Ok(Some(snapshot)));
        self
    }

    /// Queue a failure for `key`.
    #[must_use]
    pub fn fail(self, key: &str, error: FetchError) -> Self {
        self.push(key, Err(error));
        self
    }

    /// Panic inside the fetch for `key`.
    #[must_use]
    pub fn panic_on(self, key: &str) -> Self {
        self.panics.lock().insert(key.to_string());
        self
    }

    pub fn push(&self, key: &str, result: FetchResult) {
        self.scripts
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(result);
    }

    /// Total fetch calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotFetcher for ScriptedFetcher {
    async fn fetch(&self, watch: &PairWatch) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let key = watch_key(watch);
        if self.panics.lock().contains(&key) {
            panic!("scripted panic for {key}");
        }
        let mut scripts = self.scripts.lock();
        scripts
            .get_mut(&key)
            .and_then(|queue| next_repeating(queue))
            .unwrap_or(Ok(None))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

#[derive(Default)]
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Result<Vec<MarketSnapshot>, FetchError>>>,
    calls: AtomicU32,
}

impl ScriptedFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, candidates: Vec<MarketSnapshot>) -> Self {
        self.responses.lock().push_back(Ok(candidates));
        self
    }

    #[must_use]
    pub fn fail(self, error: FetchError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateFeed for ScriptedFeed {
    async fn fetch_trending(&self) -> Result<Vec<MarketSnapshot>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock();
        next_repeating(&mut *responses).unwrap_or_else(|| Ok(Vec::new()))
    }
}
