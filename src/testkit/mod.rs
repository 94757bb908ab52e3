//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`market`] - Scripted [`SnapshotFetcher`](crate::port::SnapshotFetcher)
//!   and [`CandidateFeed`](crate::port::CandidateFeed) implementations.
//! - [`sink`] - Recording message and record sinks.
//! - [`domain`] - Builders for watches, snapshots, and evaluators.

pub mod domain;
pub mod market;
pub mod sink;
