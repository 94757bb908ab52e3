//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::alerts;
use crate::domain::alert::AlertRecord;

/// Stored alert row.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertRow {
    pub id: Option<i32>,
    pub pair_address: Option<String>,
    pub network: String,
    pub symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub score: i32,
    pub reasons: String,
    pub link: String,
    pub ts: i64,
    pub created_at: String,
}

/// Database row for an alert (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = alerts)]
pub struct NewAlertRow {
    pub pair_address: Option<String>,
    pub network: String,
    pub symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub score: i32,
    pub reasons: String,
    pub link: String,
    pub ts: i64,
    pub created_at: String,
}

impl NewAlertRow {
    #[must_use]
    pub fn from_record(record: &AlertRecord, created_at: String) -> Self {
        Self {
            pair_address: record.pair_address.clone(),
            network: record.network.clone(),
            symbol: record.symbol.clone(),
            price_usd: record.price_usd,
            liquidity_usd: record.liquidity_usd,
            score: i32::try_from(record.score).unwrap_or(i32::MAX),
            reasons: record.reasons.clone(),
            link: record.link.clone(),
            ts: record.ts,
            created_at,
        }
    }
}

impl From<AlertRow> for AlertRecord {
    fn from(row: AlertRow) -> Self {
        Self {
            pair_address: row.pair_address,
            network: row.network,
            symbol: row.symbol,
            price_usd: row.price_usd,
            liquidity_usd: row.liquidity_usd,
            score: u32::try_from(row.score).unwrap_or(0),
            reasons: row.reasons,
            link: row.link,
            ts: row.ts,
        }
    }
}
