//! Builders for watches, snapshots, and evaluators used across tests.

use std::sync::Arc;
use std::time::Duration;

use crate::application::evaluation::{AlertPolicy, Evaluator};
use crate::domain::cooldown::CooldownGate;
use crate::domain::pair::{MarketSnapshot, PairWatch};
use crate::domain::score::{ScoreEngine, Thresholds};
use crate::domain::stats::{RollingStatsStore, DEFAULT_CAPACITY};
use crate::port::outbound::market::SnapshotFetcher;
use crate::port::outbound::notifier::SinkRegistry;
use crate::port::outbound::recorder::RecorderRegistry;

/// A static watch on a BSC pair.
pub fn watch(pair_address: &str) -> PairWatch {
    PairWatch::pair("bsc", pair_address)
}

/// A liquid, calm snapshot that scores 0 against default thresholds.
pub fn calm_snapshot(pair_address: &str) -> MarketSnapshot {
    MarketSnapshot {
        network: "bsc".into(),
        pair_address: Some(pair_address.into()),
        url: Some(format!("https://dexscreener.com/bsc/{pair_address}")),
        base_symbol: "CAKE".into(),
        quote_symbol: "WBNB".into(),
        price_usd: 2.5,
        liquidity_usd: 300_000.0,
        price_change_m5: 0.5,
        buys_m5: 5,
        sells_m5: 5,
        volume_m5: 5_000.0,
    }
}

/// A snapshot with a volume burst, buy pressure, and a 5m price jump.
pub fn hot_snapshot(pair_address: &str) -> MarketSnapshot {
    MarketSnapshot {
        price_change_m5: 8.0,
        buys_m5: 40,
        sells_m5: 10,
        volume_m5: 500_000.0,
        ..calm_snapshot(pair_address)
    }
}

/// A trending candidate that passes default discovery criteria.
pub fn candidate(pair_address: &str, base: &str) -> MarketSnapshot {
    MarketSnapshot {
        base_symbol: base.into(),
        liquidity_usd: 250_000.0,
        volume_m5: 50_000.0,
        buys_m5: 30,
        sells_m5: 20,
        ..calm_snapshot(pair_address)
    }
}

/// Assembles an [`Evaluator`] with default thresholds and policy.
pub struct EvaluatorBuilder {
    fetcher: Arc<dyn SnapshotFetcher>,
    thresholds: Thresholds,
    cooldown: Duration,
    sinks: SinkRegistry,
    recorders: RecorderRegistry,
    policy: AlertPolicy,
}

impl EvaluatorBuilder {
    pub fn new(fetcher: Arc<dyn SnapshotFetcher>) -> Self {
        Self {
            fetcher,
            thresholds: Thresholds::default(),
            cooldown: Duration::from_secs(600),
            sinks: SinkRegistry::new(),
            recorders: RecorderRegistry::new(),
            policy: AlertPolicy::default(),
        }
    }

    #[must_use]
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn cooldown(mut self, window: Duration) -> Self {
        self.cooldown = window;
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn crate::port::MessageSink>) -> Self {
        self.sinks.register(sink);
        self
    }

    #[must_use]
    pub fn recorder(mut self, recorder: Arc<dyn crate::port::AlertRecorder>) -> Self {
        self.recorders.register(recorder);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: AlertPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator::new(
            self.fetcher,
            ScoreEngine::new(self.thresholds),
            Arc::new(RollingStatsStore::new(DEFAULT_CAPACITY)),
            Arc::new(CooldownGate::new(self.cooldown)),
            self.sinks,
            self.recorders,
            self.policy,
        )
    }
}
