//! Message sink adapters.
//!
//! Implements the `port::MessageSink` trait for chat delivery backends.

#[cfg(feature = "telegram")]
pub mod telegram;

use async_trait::async_trait;
use tracing::info;

use crate::error::DeliveryError;
use crate::port::outbound::notifier::MessageSink;

/// Writes alert messages to the log. Used when no chat sink is configured.
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        info!(message = %text, "Alert");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
