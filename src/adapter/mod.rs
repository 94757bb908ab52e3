//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - driving side: the command-line interface
//! - [`outbound`] - driven side: market data, message and record sinks

pub mod inbound;
pub mod outbound;
