//! Outbound adapters (driven side).

pub mod dexscreener;
pub mod notifier;
pub mod retry;
pub mod sqlite;
pub mod supabase;
