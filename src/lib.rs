//! Pairpulse - DEX pair anomaly scanner.
//!
//! Polls a market-data provider for a watchlist of DEX pairs (optionally
//! extended by a trending-feed discovery pass), keeps a rolling history of
//! price and volume per pair, scores every snapshot against configurable
//! anomaly rules, and emits rate-limited alerts to message and record
//! sinks.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure logic: rolling statistics, the score engine,
//!   the cooldown gate, and the discovery filter. No I/O.
//! - **`port`** - Traits the application depends on: snapshot fetchers,
//!   candidate feeds, message sinks, and alert recorders.
//! - **`adapter`** - Implementations: the DexScreener client, Telegram and
//!   log sinks, Supabase and SQLite recorders, and the CLI.
//! - **`application`** - The per-pair evaluation and the poll scheduler.
//! - **`infrastructure`** - Configuration loading and runtime wiring.
//!
//! # Features
//!
//! - `telegram` (default) - Telegram message sink via `teloxide`.
//! - `testkit` - Scripted ports and builders for integration tests.
//!
//! # Example
//!
//! ```
//! use pairpulse::domain::{RollingStatsStore, ScoreEngine, Thresholds};
//! use pairpulse::domain::{MarketSnapshot, PairIdentity};
//!
//! let engine = ScoreEngine::new(Thresholds::default());
//! let store = RollingStatsStore::new(300);
//! let snapshot = MarketSnapshot {
//!     liquidity_usd: 50_000.0,
//!     ..MarketSnapshot::default()
//! };
//!
//! let result = engine.score(&PairIdentity::new("0xpair"), &snapshot, &store);
//! assert_eq!(result.score(), 0);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
