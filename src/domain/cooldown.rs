//! Per-pair alert cooldown.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::id::PairIdentity;

/// Sliding per-key rate limiter.
///
/// A key is permitted on first sight, and again once `window` has elapsed
/// since its last *permitted* instant. Denied calls leave the state alone,
/// so the window never realigns to fixed buckets.
#[derive(Debug)]
pub struct CooldownGate {
    window: Duration,
    last_alert: DashMap<PairIdentity, Instant>,
}

impl CooldownGate {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_alert: DashMap::new(),
        }
    }

    /// Cooldown expressed in whole minutes, as configured.
    #[must_use]
    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes.saturating_mul(60)))
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Check and, when permitted, record an alert for `key` at `now`.
    ///
    /// The check and the update happen under the key's shard lock, so two
    /// concurrent callers for the same key cannot both be permitted inside
    /// one window.
    pub fn allow(&self, key: &PairIdentity, now: Instant) -> bool {
        match self.last_alert.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            }
            Entry::Occupied(mut slot) => {
                if now.saturating_duration_since(*slot.get()) >= self.window {
                    slot.insert(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Time left before `key` may alert again at `now`.
    #[must_use]
    pub fn remaining(&self, key: &PairIdentity, now: Instant) -> Option<Duration> {
        let last = *self.last_alert.get(key)?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < self.window).then(|| self.window - elapsed)
    }

    /// Number of keys that have alerted at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_alert.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_alert.is_empty()
    }
}
