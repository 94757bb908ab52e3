//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators of the signal
//! pipeline: the market-data provider and the alert delivery sinks.

pub mod market;
pub mod notifier;
pub mod recorder;
