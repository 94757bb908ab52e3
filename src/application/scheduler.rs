//! Poll scheduler.
//!
//! Drives the tick loop: refresh the discovered watch set when due, merge
//! it with the static watchlist, evaluate every entry concurrently, then
//! sleep. A tick always runs to completion before the next one starts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::evaluation::{Evaluator, Outcome};
use crate::domain::discovery::DiscoveryFilter;
use crate::domain::pair::PairWatch;
use crate::port::outbound::market::CandidateFeed;

/// Where the scheduler is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Between ticks.
    Idle,
    /// Evaluations of the current tick are in flight.
    Evaluating,
}

/// Per-tick summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub evaluated: usize,
    pub alerts: usize,
    pub suppressed: usize,
    pub no_data: usize,
    pub failures: usize,
}

struct Discovery {
    feed: Arc<dyn CandidateFeed>,
    filter: DiscoveryFilter,
    refresh: Duration,
    last_run: Option<Instant>,
}

impl Discovery {
    fn is_due(&self, now: Instant) -> bool {
        self.last_run
            .map_or(true, |last| now.saturating_duration_since(last) >= self.refresh)
    }
}

pub struct PollScheduler {
    evaluator: Arc<Evaluator>,
    static_watches: Vec<PairWatch>,
    dynamic_watches: Vec<PairWatch>,
    discovery: Option<Discovery>,
    poll_interval: Duration,
    state: SchedulerState,
}

impl PollScheduler {
    #[must_use]
    pub fn new(
        evaluator: Arc<Evaluator>,
        static_watches: Vec<PairWatch>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            evaluator,
            static_watches,
            dynamic_watches: Vec::new(),
            discovery: None,
            poll_interval,
            state: SchedulerState::Idle,
        }
    }

    /// Enable discovery from `feed`, re-run every `refresh`.
    #[must_use]
    pub fn with_discovery(
        mut self,
        feed: Arc<dyn CandidateFeed>,
        filter: DiscoveryFilter,
        refresh: Duration,
    ) -> Self {
        self.discovery = Some(Discovery {
            feed,
            filter,
            refresh,
            last_run: None,
        });
        self
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn static_watches(&self) -> &[PairWatch] {
        &self.static_watches
    }

    #[must_use]
    pub fn dynamic_watches(&self) -> &[PairWatch] {
        &self.dynamic_watches
    }

    /// Static watchlist followed by the discovered set. Duplicates are kept.
    #[must_use]
    pub fn watch_set(&self) -> Vec<PairWatch> {
        self.static_watches
            .iter()
            .chain(&self.dynamic_watches)
            .cloned()
            .collect()
    }

    /// Re-run discovery if enabled and due at `now`.
    ///
    /// A failed feed fetch keeps the previous dynamic set. Either way the
    /// attempt restarts the refresh interval. Returns whether the set was
    /// replaced.
    pub async fn refresh_discovery(&mut self, now: Instant) -> bool {
        let Some(discovery) = self.discovery.as_mut() else {
            return false;
        };
        if !discovery.is_due(now) {
            return false;
        }
        discovery.last_run = Some(now);

        match discovery.feed.fetch_trending().await {
            Ok(candidates) => {
                let watches = discovery.filter.filter(&candidates);
                info!(
                    candidates = candidates.len(),
                    accepted = watches.len(),
                    "Discovery refreshed"
                );
                self.dynamic_watches = watches;
                true
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kept = self.dynamic_watches.len(),
                    "Discovery failed, keeping previous watch set"
                );
                false
            }
        }
    }

    /// Run one tick and wait for every evaluation in it.
    pub async fn tick(&mut self) -> TickReport {
        self.refresh_discovery(Instant::now()).await;

        let watches = self.watch_set();
        self.state = SchedulerState::Evaluating;
        debug!(pairs = watches.len(), "Tick started");

        let handles = watches.into_iter().map(|watch| {
            let evaluator = Arc::clone(&self.evaluator);
            tokio::spawn(async move {
                let outcome = evaluator.evaluate(&watch).await;
                (watch, outcome)
            })
        });
        let results = join_all(handles).await;

        let mut report = TickReport::default();
        for joined in results {
            report.evaluated += 1;
            match joined {
                Ok((_, Ok(outcome))) => match outcome {
                    Outcome::Alerted { .. } => report.alerts += 1,
                    Outcome::Suppressed { .. } => report.suppressed += 1,
                    Outcome::NoData => report.no_data += 1,
                    Outcome::Quiet { .. } => {}
                },
                Ok((watch, Err(e))) => {
                    report.failures += 1;
                    warn!(watch = %watch, error = %e, "Evaluation skipped");
                }
                Err(e) => {
                    report.failures += 1;
                    error!(error = %e, "Evaluation task failed");
                }
            }
        }

        self.state = SchedulerState::Idle;
        debug!(
            evaluated = report.evaluated,
            alerts = report.alerts,
            failures = report.failures,
            "Tick finished"
        );
        report
    }

    /// Tick until shutdown, or exactly once when `single_shot` is set.
    ///
    /// A shutdown signal abandons the tick in flight.
    pub async fn run(&mut self, single_shot: bool, mut shutdown: watch::Receiver<bool>) {
        info!(
            watchlist = self.static_watches.len(),
            discovery = self.discovery.is_some(),
            poll_seconds = self.poll_interval.as_secs(),
            single_shot,
            "Scheduler started"
        );

        loop {
            tokio::select! {
                report = self.tick() => {
                    if single_shot {
                        info!(alerts = report.alerts, "Single tick complete");
                        return;
                    }
                }
                () = shutdown_requested(&mut shutdown) => break,
            }

            tokio::select! {
                () = tokio::time::sleep(self.poll_interval) => {}
                () = shutdown_requested(&mut shutdown) => break,
            }
        }

        self.state = SchedulerState::Idle;
        info!("Scheduler stopped");
    }
}

async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            info!("Shutdown signal received");
            return;
        }
        if shutdown.changed().await.is_err() {
            // sender dropped without signalling
            std::future::pending::<()>().await;
        }
    }
}
