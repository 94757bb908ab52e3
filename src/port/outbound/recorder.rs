//! Alert record port.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::warn;

use crate::domain::alert::AlertRecord;
use crate::error::DeliveryError;

/// Best-effort structured alert storage.
#[async_trait]
pub trait AlertRecorder: Send + Sync {
    async fn record(&self, alert: &AlertRecord) -> Result<(), DeliveryError>;

    /// Recorder name for logging.
    fn name(&self) -> &'static str;
}

/// Registry of record sinks. Each one is invoked independently.
#[derive(Clone, Default)]
pub struct RecorderRegistry {
    recorders: Vec<Arc<dyn AlertRecorder>>,
}

impl RecorderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, recorder: Arc<dyn AlertRecorder>) {
        self.recorders.push(recorder);
    }

    /// Store `alert` in every recorder concurrently. Returns the name and
    /// outcome per recorder, in registration order.
    pub async fn record_each(
        &self,
        alert: &AlertRecord,
    ) -> Vec<(&'static str, Result<(), DeliveryError>)> {
        join_all(
            self.recorders
                .iter()
                .map(|recorder| async move { (recorder.name(), recorder.record(alert).await) }),
        )
        .await
    }

    /// Store `alert` everywhere, logging failures. Returns the number of
    /// recorders that accepted it.
    pub async fn record_all(&self, alert: &AlertRecord) -> usize {
        self.record_each(alert)
            .await
            .into_iter()
            .filter(|(name, outcome)| match outcome {
                Ok(()) => true,
                Err(e) => {
                    warn!(recorder = name, error = %e, "Alert record failed");
                    false
                }
            })
            .count()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.recorders.iter().map(|r| r.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recorders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorders.is_empty()
    }
}
