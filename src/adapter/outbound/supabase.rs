//! Supabase REST record sink.
//!
//! Inserts alert rows through the PostgREST endpoint
//! `POST {url}/rest/v1/{table}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::domain::alert::AlertRecord;
use crate::error::DeliveryError;
use crate::port::outbound::recorder::AlertRecorder;

/// Resolved Supabase credentials.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

pub struct SupabaseRecorder {
    http: HttpClient,
    endpoint: String,
    anon_key: String,
}

impl SupabaseRecorder {
    #[must_use]
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            anon_key: config.anon_key.clone(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AlertRecorder for SupabaseRecorder {
    async fn record(&self, alert: &AlertRecord) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(alert)
            .send()
            .await
            .map_err(|e| DeliveryError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Store(format!("status {status}: {body}")));
        }

        debug!(status = status.as_u16(), "Alert stored in supabase");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
