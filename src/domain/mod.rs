//! Provider-agnostic domain logic: rolling statistics, scoring, cooldown
//! and discovery. Nothing in here performs I/O.

pub mod alert;
pub mod cooldown;
pub mod discovery;
pub mod error;
pub mod id;
pub mod pair;
pub mod score;
pub mod stats;

pub use alert::{AlertPriority, AlertRecord};
pub use cooldown::CooldownGate;
pub use discovery::{DiscoveryCriteria, DiscoveryFilter, Rejection};
pub use id::PairIdentity;
pub use pair::{MarketSnapshot, PairWatch, WatchTarget};
pub use score::{Reason, ScoreEngine, ScoreResult, ScoreRule, Thresholds};
pub use stats::{RollingStatsStore, RollingStatsView};
