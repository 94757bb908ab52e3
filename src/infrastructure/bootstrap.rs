//! Composition root: builds adapters from configuration and wires them
//! into the scheduler.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::outbound::dexscreener::DexScreenerClient;
use crate::adapter::outbound::notifier::LogSink;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramSink};
use crate::adapter::outbound::sqlite::SqliteAlertRecorder;
use crate::adapter::outbound::supabase::SupabaseRecorder;
use crate::application::evaluation::Evaluator;
use crate::application::scheduler::PollScheduler;
use crate::domain::cooldown::CooldownGate;
use crate::domain::discovery::DiscoveryFilter;
use crate::domain::score::ScoreEngine;
use crate::domain::stats::RollingStatsStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::market::{CandidateFeed, SnapshotFetcher};
use crate::port::outbound::notifier::SinkRegistry;
use crate::port::outbound::recorder::RecorderRegistry;

/// Build the message sink registry.
///
/// Telegram when enabled and fully configured, otherwise the log sink.
#[must_use]
pub fn build_sink_registry(config: &Config) -> SinkRegistry {
    let mut registry = SinkRegistry::new();

    #[cfg(feature = "telegram")]
    if let Some((bot_token, chat_id)) = config.telegram.credentials() {
        registry.register(Arc::new(TelegramSink::new(&TelegramConfig {
            bot_token: bot_token.to_string(),
            chat_id,
        })));
        return registry;
    }

    if config.telegram.enabled {
        warn!("Telegram enabled but bot token or chat id missing, logging alerts instead");
    }
    registry.register(Arc::new(LogSink));
    registry
}

/// Build the record sink registry from the enabled stores.
///
/// # Errors
///
/// Returns an error if the SQLite store cannot be opened or migrated.
pub fn build_recorder_registry(config: &Config) -> Result<RecorderRegistry> {
    let mut registry = RecorderRegistry::new();

    if let Some(supabase) = config.supabase.resolved() {
        let timeout = std::time::Duration::from_millis(config.http.timeout_ms);
        let recorder = SupabaseRecorder::new(&supabase, timeout);
        info!(endpoint = recorder.endpoint(), "Supabase recorder enabled");
        registry.register(Arc::new(recorder));
    } else if config.supabase.enabled {
        warn!("Supabase enabled but url or anon key missing, skipping");
    }

    if config.sqlite.enabled {
        let recorder = SqliteAlertRecorder::open(&config.sqlite.path)?;
        info!(path = %config.sqlite.path, "SQLite recorder enabled");
        registry.register(Arc::new(recorder));
    }

    Ok(registry)
}

/// Assemble a scheduler around the given collaborators.
#[must_use]
pub fn assemble_scheduler(
    config: &Config,
    fetcher: Arc<dyn SnapshotFetcher>,
    feed: Arc<dyn CandidateFeed>,
    sinks: SinkRegistry,
    recorders: RecorderRegistry,
) -> PollScheduler {
    let evaluator = Evaluator::new(
        fetcher,
        ScoreEngine::new(config.thresholds.clone()),
        Arc::new(RollingStatsStore::new(config.stats_history)),
        Arc::new(CooldownGate::from_minutes(config.cooldown_minutes)),
        sinks,
        recorders,
        config.alert_policy(),
    );

    let scheduler = PollScheduler::new(
        Arc::new(evaluator),
        config.watches().to_vec(),
        config.poll_interval(),
    );

    if config.discovery.enabled {
        scheduler.with_discovery(
            feed,
            DiscoveryFilter::new(config.discovery.criteria()),
            config.discovery.refresh_interval(),
        )
    } else {
        scheduler
    }
}

/// Build the production scheduler from configuration.
///
/// # Errors
///
/// Returns an error if a record store cannot be initialized.
pub fn build_scheduler(config: &Config) -> Result<PollScheduler> {
    let client = Arc::new(DexScreenerClient::from_config(&config.http));
    let sinks = build_sink_registry(config);
    let recorders = build_recorder_registry(config)?;
    info!(
        sinks = ?sinks.names(),
        recorders = ?recorders.names(),
        "Delivery configured"
    );

    Ok(assemble_scheduler(
        config,
        Arc::clone(&client) as Arc<dyn SnapshotFetcher>,
        client,
        sinks,
        recorders,
    ))
}

/// Run the scanner until Ctrl-C, or for one tick when `single_shot`.
///
/// # Errors
///
/// Returns an error if startup wiring fails.
pub async fn run(config: Config, single_shot: bool) -> Result<()> {
    info!(
        watchlist = config.watches().len(),
        discovery = config.discovery.enabled,
        "Starting pairpulse"
    );
    let mut scheduler = build_scheduler(&config)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(single_shot, shutdown_rx).await;
    Ok(())
}
