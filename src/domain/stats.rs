//! Per-pair rolling sample history.
//!
//! [`RollingStatsStore`] owns one [`RollingStats`] per [`PairIdentity`],
//! created lazily on first observation. Each evaluation appends one price
//! sample and one derived 1-minute volume sample, then reads back a
//! [`RollingStatsView`] taken under the same per-key lock, so the
//! read-append-read sequence for a pair is linearizable while different
//! pairs proceed independently.
//!
//! Only suffix windows are ever read, so each sequence is capped at
//! `capacity` samples. The cap is a memory bound, not a behavior change,
//! as long as it is at least as large as the widest window read.

use std::collections::VecDeque;

use dashmap::DashMap;

use super::id::PairIdentity;

/// Minimum number of volume samples before a z-score is reported.
pub const MIN_ZSCORE_SAMPLES: u64 = 10;

/// Floor applied to the standard deviation before dividing.
pub const STD_EPSILON: f64 = 1e-9;

/// Default number of samples retained per sequence.
pub const DEFAULT_CAPACITY: usize = 300;

/// Chronological price and volume samples for one pair.
#[derive(Debug, Clone, Default)]
pub struct RollingStats {
    prices: VecDeque<f64>,
    volumes_1m: VecDeque<f64>,
    observed: u64,
}

impl RollingStats {
    fn push(&mut self, price: f64, volume_1m: f64, capacity: usize) {
        self.prices.push_back(price);
        self.volumes_1m.push_back(volume_1m);
        self.observed += 1;
        while self.prices.len() > capacity {
            self.prices.pop_front();
        }
        while self.volumes_1m.len() > capacity {
            self.volumes_1m.pop_front();
        }
    }

    fn view(&self) -> RollingStatsView {
        RollingStatsView {
            prices: self.prices.iter().copied().collect(),
            volumes_1m: self.volumes_1m.iter().copied().collect(),
            observed: self.observed,
        }
    }
}

/// Read-only copy of a pair's history, taken right after an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingStatsView {
    prices: Vec<f64>,
    volumes_1m: Vec<f64>,
    observed: u64,
}

impl RollingStatsView {
    /// Build a view from a volume history, oldest first. Prices are left
    /// empty. Mostly useful for scoring without a store.
    #[must_use]
    pub fn from_volumes(volumes: impl IntoIterator<Item = f64>) -> Self {
        let volumes_1m: Vec<f64> = volumes.into_iter().collect();
        Self {
            prices: Vec::new(),
            observed: volumes_1m.len() as u64,
            volumes_1m,
        }
    }

    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    #[must_use]
    pub fn volumes(&self) -> &[f64] {
        &self.volumes_1m
    }

    /// Number of samples ever appended for this pair, including evicted ones.
    #[must_use]
    pub const fn observed(&self) -> u64 {
        self.observed
    }

    /// Most recent volume sample.
    #[must_use]
    pub fn last_volume(&self) -> Option<f64> {
        self.volumes_1m.last().copied()
    }

    fn window(&self, n: usize) -> &[f64] {
        let start = self.volumes_1m.len().saturating_sub(n);
        &self.volumes_1m[start..]
    }

    /// Median of the last `n` volume samples (all of them if fewer exist).
    ///
    /// Even-length windows average the two middle values. Returns 0 when
    /// there are no samples.
    #[must_use]
    pub fn median_window_volume(&self, n: usize) -> f64 {
        median(self.window(n))
    }

    /// Z-score of the latest volume sample against the last `n` samples.
    ///
    /// Returns 0 until [`MIN_ZSCORE_SAMPLES`] samples have been observed.
    /// Uses the population mean and standard deviation; a standard
    /// deviation below [`STD_EPSILON`] is clamped to it.
    #[must_use]
    pub fn z_score_last_volume(&self, n: usize) -> f64 {
        if self.observed < MIN_ZSCORE_SAMPLES {
            return 0.0;
        }
        let window = self.window(n);
        let Some(last) = self.last_volume() else {
            return 0.0;
        };
        if window.is_empty() {
            return 0.0;
        }
        let mean = mean(window);
        let sd = population_std_dev(window, mean).max(STD_EPSILON);
        (last - mean) / sd
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Concurrent map of rolling histories keyed by pair identity.
#[derive(Debug)]
pub struct RollingStatsStore {
    entries: DashMap<PairIdentity, RollingStats>,
    capacity: usize,
}

impl RollingStatsStore {
    /// Create a store retaining at most `capacity` samples per sequence.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append one price sample and one derived volume sample for `pair`,
    /// creating its history on first use, and return the updated history.
    pub fn update(&self, pair: &PairIdentity, price: f64, volume_1m: f64) -> RollingStatsView {
        let mut entry = self.entries.entry(pair.clone()).or_default();
        entry.push(price, volume_1m, self.capacity);
        entry.view()
    }

    /// Current history for `pair`, if it has been observed.
    #[must_use]
    pub fn view(&self, pair: &PairIdentity) -> Option<RollingStatsView> {
        self.entries.get(pair).map(|stats| stats.view())
    }

    /// Number of pairs with history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RollingStatsStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
