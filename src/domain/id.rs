//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key for one tradable pair instance.
///
/// Usually the on-chain pair address; falls back to the pair URL or the
/// watched token address when the provider omits it. Lives for the process
/// lifetime and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairIdentity(String);

impl PairIdentity {
    /// Placeholder key used when nothing better is available.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PairIdentity {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PairIdentity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for PairIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
