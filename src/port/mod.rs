//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  (scheduler, evaluation)├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │ Market   │           │  Message    │              │  Alert    │
//! │ data     │           │  sinks      │              │  recorders│
//! └──────────┘           └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::market::{CandidateFeed, SnapshotFetcher};
pub use outbound::notifier::{MessageSink, SinkRegistry};
pub use outbound::recorder::{AlertRecorder, RecorderRegistry};
