//! Recording sinks for asserting on delivered alerts.
//!
//! Both types are cheap to clone; clones share the captured output, so a
//! test can register one clone and inspect another.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::alert::AlertRecord;
use crate::error::DeliveryError;
use crate::port::outbound::notifier::MessageSink;
use crate::port::outbound::recorder::AlertRecorder;

#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that captures every message and then reports failure.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.messages.lock().push(text.to_string());
        if self.failing {
            return Err(DeliveryError::Telegram("scripted failure".into()));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Clone, Default)]
pub struct RecordingRecorder {
    records: Arc<Mutex<Vec<AlertRecord>>>,
    failing: bool,
}

impl RecordingRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<AlertRecord> {
        self.records.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl AlertRecorder for RecordingRecorder {
    async fn record(&self, alert: &AlertRecord) -> Result<(), DeliveryError> {
        if self.failing {
            return Err(DeliveryError::Store("scripted failure".into()));
        }
        self.records.lock().push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
