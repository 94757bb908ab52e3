//! SQLite alert persistence.
//!
//! Keeps a local copy of every delivered alert. Implements the
//! [`AlertRecorder`](crate::port::outbound::recorder::AlertRecorder) port.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::debug;

use super::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations, DbPool,
};
use super::database::model::{AlertRow, NewAlertRow};
use super::database::schema::alerts;
use crate::domain::alert::AlertRecord;
use crate::error::{DeliveryError, Error, Result};
use crate::port::outbound::recorder::AlertRecorder;

/// SQLite-backed alert recorder.
#[derive(Clone)]
pub struct SqliteAlertRecorder {
    pool: DbPool,
}

impl SqliteAlertRecorder {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(path: &str) -> Result<Self> {
        let pool = create_pool(path)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    fn insert(&self, record: &AlertRecord) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;

        let row = NewAlertRow::from_record(record, Utc::now().to_rfc3339());
        diesel::insert_into(alerts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Most recent alerts, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: i64) -> Result<Vec<AlertRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        let rows = alerts::table
            .order((alerts::ts.desc(), alerts::id.desc()))
            .limit(limit)
            .select(AlertRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(AlertRecord::from).collect())
    }
}

#[async_trait]
impl AlertRecorder for SqliteAlertRecorder {
    async fn record(&self, alert: &AlertRecord) -> std::result::Result<(), DeliveryError> {
        let recorder = self.clone();
        let alert = alert.clone();
        tokio::task::spawn_blocking(move || recorder.insert(&alert))
            .await
            .map_err(|e| DeliveryError::Store(e.to_string()))?
            .map_err(|e| DeliveryError::Store(e.to_string()))?;
        debug!("Alert stored in sqlite");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pair: &str, ts: i64) -> AlertRecord {
        AlertRecord {
            pair_address: Some(pair.into()),
            network: "bsc".into(),
            symbol: "CAKE/WBNB".into(),
            price_usd: 2.5,
            liquidity_usd: 300_000.0,
            score: 7,
            reasons: "Tx ratio 4.00 > 1.80".into(),
            link: format!("https://dexscreener.com/bsc/{pair}"),
            ts,
        }
    }

    #[tokio::test]
    async fn record_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.db");
        let recorder = SqliteAlertRecorder::open(path.to_str().unwrap()).unwrap();

        recorder.record(&record("0x1", 100)).await.unwrap();
        recorder.record(&record("0x2", 200)).await.unwrap();

        let stored = recorder.recent(10).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], record("0x2", 200));
        assert_eq!(stored[1].pair_address.as_deref(), Some("0x1"));
    }

    #[tokio::test]
    async fn probe_record_without_liquidity_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.db");
        let recorder = SqliteAlertRecorder::open(path.to_str().unwrap()).unwrap();

        recorder.record(&AlertRecord::probe(1)).await.unwrap();
        assert_eq!(recorder.recent(1).unwrap()[0].reasons, "cli-test");
    }
}
