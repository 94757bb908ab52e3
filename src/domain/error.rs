//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate inputs, so an
//! invalid watch entry is rejected before the polling loop starts.
//!
//! # Examples
//!
//! ```
//! use pairpulse::domain::error::DomainError;
//! use pairpulse::domain::pair::PairWatch;
//!
//! let result = PairWatch::try_new("bsc", None, None, None);
//! assert!(matches!(result, Err(DomainError::MissingWatchTarget { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A watch entry must name a pair address or a token address.
    #[error("watch entry on network '{network}' must have a pair address or token address")]
    MissingWatchTarget {
        /// Network the entry was declared on.
        network: String,
    },

    /// A watch entry must name its network.
    #[error("watch entry network cannot be empty")]
    EmptyNetwork,
}
