//! One pair evaluation: fetch, record, score, gate, deliver.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::alert::{AlertPriority, AlertRecord};
use crate::domain::cooldown::CooldownGate;
use crate::domain::id::PairIdentity;
use crate::domain::pair::PairWatch;
use crate::domain::score::{ScoreEngine, ScoreResult};
use crate::domain::stats::RollingStatsStore;
use crate::error::FetchError;
use crate::port::outbound::market::SnapshotFetcher;
use crate::port::outbound::notifier::SinkRegistry;
use crate::port::outbound::recorder::RecorderRegistry;

/// When a score becomes an alert and how it is labelled.
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    /// Minimum score that is alert-worthy.
    pub alert_score: u32,
    /// Minimum score labelled [`AlertPriority::Prio`].
    pub priority_score: u32,
    /// Base for pair links when the snapshot carries none.
    pub link_url: String,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            alert_score: 5,
            priority_score: 7,
            link_url: "https://dexscreener.com".into(),
        }
    }
}

/// What happened to one watch entry in one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The provider returned no pair for the entry.
    NoData,
    /// Scored below the alert floor.
    Quiet { pair: PairIdentity, result: ScoreResult },
    /// Alert-worthy, but the pair is cooling down.
    Suppressed { pair: PairIdentity, result: ScoreResult },
    /// Alert permitted and handed to the sinks.
    Alerted {
        pair: PairIdentity,
        priority: AlertPriority,
        record: AlertRecord,
    },
}

impl Outcome {
    #[must_use]
    pub const fn is_alert(&self) -> bool {
        matches!(self, Self::Alerted { .. })
    }
}

/// Everything a single evaluation touches. Shared by all tasks of all
/// ticks; the stats store and cooldown gate are the only mutable parts.
pub struct Evaluator {
    fetcher: Arc<dyn SnapshotFetcher>,
    engine: ScoreEngine,
    stats: Arc<RollingStatsStore>,
    cooldown: Arc<CooldownGate>,
    sinks: SinkRegistry,
    recorders: RecorderRegistry,
    policy: AlertPolicy,
}

impl Evaluator {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn SnapshotFetcher>,
        engine: ScoreEngine,
        stats: Arc<RollingStatsStore>,
        cooldown: Arc<CooldownGate>,
        sinks: SinkRegistry,
        recorders: RecorderRegistry,
        policy: AlertPolicy,
    ) -> Self {
        Self {
            fetcher,
            engine,
            stats,
            cooldown,
            sinks,
            recorders,
            policy,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &RollingStatsStore {
        &self.stats
    }

    #[must_use]
    pub fn cooldown(&self) -> &CooldownGate {
        &self.cooldown
    }

    /// Evaluate one watch entry now.
    ///
    /// # Errors
    ///
    /// Returns the fetch error once the fetcher has given up. Delivery
    /// failures are logged and never returned.
    pub async fn evaluate(&self, watch: &PairWatch) -> Result<Outcome, FetchError> {
        let Some(snapshot) = self.fetcher.fetch(watch).await? else {
            debug!(watch = %watch, provider = self.fetcher.provider_name(), "No pair data");
            return Ok(Outcome::NoData);
        };

        let pair = snapshot.identity(watch);
        let result = self.engine.score(&pair, &snapshot, &self.stats);

        if result.score() < self.policy.alert_score {
            info!(
                pair = %pair,
                score = result.score(),
                reasons = ?result.leading_reasons(3),
                "No alert"
            );
            return Ok(Outcome::Quiet { pair, result });
        }

        // the permit is committed here, before and regardless of delivery
        if !self.cooldown.allow(&pair, Instant::now()) {
            debug!(pair = %pair, score = result.score(), "Alert suppressed by cooldown");
            return Ok(Outcome::Suppressed { pair, result });
        }

        let priority = AlertPriority::for_score(result.score(), self.policy.priority_score);
        let link = snapshot.link(&self.policy.link_url, watch);
        let record = AlertRecord::new(watch, &snapshot, &result, link, Utc::now().timestamp());

        self.deliver(&pair, priority, &record).await;
        Ok(Outcome::Alerted {
            pair,
            priority,
            record,
        })
    }

    async fn deliver(&self, pair: &PairIdentity, priority: AlertPriority, record: &AlertRecord) {
        let text = record.message(priority);
        let (delivered, recorded) =
            tokio::join!(self.sinks.deliver_all(&text), self.recorders.record_all(record));
        info!(
            pair = %pair,
            score = record.score,
            priority = %priority,
            delivered,
            recorded,
            "Alert emitted"
        );
    }
}
