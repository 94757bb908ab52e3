//! SQLite database modules.
//!
//! Connection management, schema definitions, and Diesel model types for
//! the local alert store.

pub mod connection;
pub mod model;
pub mod schema;
