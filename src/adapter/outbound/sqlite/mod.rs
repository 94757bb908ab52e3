//! SQLite persistence adapter.
//!
//! Local alert store using Diesel ORM with embedded migrations.

pub mod database;
mod recorder;

pub use recorder::SqliteAlertRecorder;
