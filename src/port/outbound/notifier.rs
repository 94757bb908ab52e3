//! Message delivery port.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::warn;

use crate::error::DeliveryError;

/// Best-effort text delivery (chat bots, logs).
///
/// Failures are reported to the caller, which logs them; nothing retries.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;

    /// Sink name for logging.
    fn name(&self) -> &'static str;
}

/// Registry of message sinks.
#[derive(Clone, Default)]
pub struct SinkRegistry {
    sinks: Vec<Arc<dyn MessageSink>>,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sink: Arc<dyn MessageSink>) {
        self.sinks.push(sink);
    }

    /// Deliver `text` to every sink concurrently.
    ///
    /// A failing sink is logged and does not affect the others. Returns
    /// the number of sinks that accepted the message.
    pub async fn deliver_all(&self, text: &str) -> usize {
        let results = join_all(self.sinks.iter().map(|sink| async move {
            (sink.name(), sink.deliver(text).await)
        }))
        .await;

        results
            .into_iter()
            .filter(|(name, outcome)| match outcome {
                Ok(()) => true,
                Err(e) => {
                    warn!(sink = name, error = %e, "Message delivery failed");
                    false
                }
            })
            .count()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}
