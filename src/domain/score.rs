//! Anomaly scoring.
//!
//! [`ScoreEngine`] turns a [`MarketSnapshot`] plus the pair's rolling
//! history into a [`ScoreResult`]: an integer score and the reasons that
//! produced it. Rules run in a fixed order and each contributes a fixed
//! weight:
//!
//! | Rule              | Weight | Condition                                   |
//! |-------------------|--------|---------------------------------------------|
//! | liquidity gate    | n/a    | below floor short-circuits to score 0       |
//! | volume spike      | 3      | 1m volume > multiplier × median of last 30  |
//! | volume z-score    | 2      | z of latest 1m volume > floor               |
//! | tx ratio          | 2      | buys / max(sells, 1) > floor (txn-gated)    |
//! | buy share         | 1      | buys / max(buys + sells, 1) > floor (gated) |
//! | 1m price delta    | 1      | 5m change / 5 > floor                       |
//! | 5m price delta    | 2      | 5m change > floor                           |
//!
//! The snapshot carries no true 1-minute figures, so both the 1-minute
//! volume and 1-minute price change are the 5-minute values divided by 5.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::PairIdentity;
use super::pair::MarketSnapshot;
use super::stats::{RollingStatsStore, RollingStatsView};

/// Trailing window, in samples, for the median and z-score rules.
pub const SCORE_WINDOW: usize = 30;

/// Number of 1-minute buckets in the 5-minute provider window.
const MINUTES_PER_WINDOW: f64 = 5.0;

/// Scoring thresholds. Loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Pairs below this USD liquidity score 0.
    pub min_liquidity_usd: f64,
    /// Minimum 5m transactions before the imbalance rules apply.
    pub min_txns_m5: u64,
    /// Volume spike multiplier over the trailing median.
    pub volume_spike_multiplier: f64,
    /// Volume z-score floor.
    pub volume_zscore: f64,
    /// Buy/sell transaction ratio floor.
    pub buy_sell_tx_ratio: f64,
    /// Buy share of 5m transactions floor (0.0 to 1.0).
    pub buy_share_m5: f64,
    /// Derived 1m price change floor, in percent.
    pub dprice_1m_pct: f64,
    /// 5m price change floor, in percent.
    pub dprice_5m_pct: f64,
    /// Whale trade floor in USD. Carried for configuration compatibility;
    /// the snapshot has no per-trade sizes to test it against.
    pub whale_trade_usd: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_liquidity_usd: 200_000.0,
            min_txns_m5: 20,
            volume_spike_multiplier: 4.0,
            volume_zscore: 3.0,
            buy_sell_tx_ratio: 1.8,
            buy_share_m5: 0.65,
            dprice_1m_pct: 2.5,
            dprice_5m_pct: 6.0,
            whale_trade_usd: 20_000.0,
        }
    }
}

/// The rule that produced a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    Liquidity,
    VolumeSpike,
    VolumeZScore,
    TxRatio,
    BuyShare,
    PriceDelta1m,
    PriceDelta5m,
}

impl ScoreRule {
    /// Points this rule adds when it fires.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Liquidity => 0,
            Self::VolumeSpike => 3,
            Self::VolumeZScore => 2,
            Self::TxRatio => 2,
            Self::BuyShare => 1,
            Self::PriceDelta1m => 1,
            Self::PriceDelta5m => 2,
        }
    }

    /// Stable rule name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liquidity => "liquidity",
            Self::VolumeSpike => "volume_spike",
            Self::VolumeZScore => "volume_zscore",
            Self::TxRatio => "tx_ratio",
            Self::BuyShare => "buy_share",
            Self::PriceDelta1m => "dprice_1m",
            Self::PriceDelta5m => "dprice_5m",
        }
    }
}

/// A human-readable reason tagged with its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub rule: ScoreRule,
    pub text: String,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Score and reasons for one evaluation, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreResult {
    score: u32,
    reasons: Vec<Reason>,
}

impl ScoreResult {
    fn push(&mut self, rule: ScoreRule, text: String) {
        self.score += rule.weight();
        self.reasons.push(Reason { rule, text });
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    /// Whether `rule` contributed to this result.
    #[must_use]
    pub fn fired(&self, rule: ScoreRule) -> bool {
        self.reasons.iter().any(|r| r.rule == rule)
    }

    /// Reasons joined with `", "`, as stored in alert records.
    #[must_use]
    pub fn joined_reasons(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Text of the first `n` reasons.
    #[must_use]
    pub fn leading_reasons(&self, n: usize) -> Vec<&str> {
        self.reasons.iter().take(n).map(|r| r.text.as_str()).collect()
    }
}

/// 1-minute-equivalent figures derived from a 5-minute snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedSample {
    pub price_usd: f64,
    pub volume_1m: f64,
    pub price_change_1m: f64,
}

impl DerivedSample {
    #[must_use]
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        Self {
            price_usd: snapshot.price_usd,
            volume_1m: snapshot.volume_m5 / MINUTES_PER_WINDOW,
            price_change_1m: snapshot.price_change_m5 / MINUTES_PER_WINDOW,
        }
    }
}

/// Stateless scorer over a shared threshold bundle.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    thresholds: Thresholds,
}

impl ScoreEngine {
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Score a snapshot, recording its samples in `store` first.
    ///
    /// Pairs that fail the liquidity gate return before any sample is
    /// appended. Otherwise the new sample is part of the window it is
    /// compared against.
    pub fn score(
        &self,
        pair: &PairIdentity,
        snapshot: &MarketSnapshot,
        store: &RollingStatsStore,
    ) -> ScoreResult {
        if let Some(gated) = self.liquidity_gate(snapshot) {
            return gated;
        }
        let sample = DerivedSample::from_snapshot(snapshot);
        let stats = store.update(pair, sample.price_usd, sample.volume_1m);
        self.evaluate(snapshot, &stats)
    }

    /// Score a snapshot against a history that already contains its sample.
    #[must_use]
    pub fn evaluate(&self, snapshot: &MarketSnapshot, stats: &RollingStatsView) -> ScoreResult {
        if let Some(gated) = self.liquidity_gate(snapshot) {
            return gated;
        }

        let t = &self.thresholds;
        let sample = DerivedSample::from_snapshot(snapshot);
        let mut result = ScoreResult::default();

        let median = stats.median_window_volume(SCORE_WINDOW);
        if median > 0.0 && sample.volume_1m > t.volume_spike_multiplier * median {
            result.push(
                ScoreRule::VolumeSpike,
                format!(
                    "V1m {:.0} > {:.1}×med30 {:.0}",
                    sample.volume_1m, t.volume_spike_multiplier, median
                ),
            );
        }

        let z = stats.z_score_last_volume(SCORE_WINDOW);
        if z > t.volume_zscore {
            result.push(
                ScoreRule::VolumeZScore,
                format!("Vol z-score {:.1} > {:.1}", z, t.volume_zscore),
            );
        }

        let buys = snapshot.buys_m5;
        let sells = snapshot.sells_m5;
        if snapshot.txns_m5() >= t.min_txns_m5 {
            let ratio = buys as f64 / sells.max(1) as f64;
            let buy_share = buys as f64 / snapshot.txns_m5().max(1) as f64;
            if ratio > t.buy_sell_tx_ratio {
                result.push(
                    ScoreRule::TxRatio,
                    format!("Tx ratio {:.2} > {:.2}", ratio, t.buy_sell_tx_ratio),
                );
            }
            if buy_share > t.buy_share_m5 {
                result.push(
                    ScoreRule::BuyShare,
                    format!("Buy share {:.2} > {:.2}", buy_share, t.buy_share_m5),
                );
            }
        }

        if sample.price_change_1m > t.dprice_1m_pct {
            result.push(
                ScoreRule::PriceDelta1m,
                format!("dP1m {:.1}% > {:.1}%", sample.price_change_1m, t.dprice_1m_pct),
            );
        }
        if snapshot.price_change_m5 > t.dprice_5m_pct {
            result.push(
                ScoreRule::PriceDelta5m,
                format!("dP5m {:.1}% > {:.1}%", snapshot.price_change_m5, t.dprice_5m_pct),
            );
        }

        result
    }

    fn liquidity_gate(&self, snapshot: &MarketSnapshot) -> Option<ScoreResult> {
        let floor = self.thresholds.min_liquidity_usd;
        (snapshot.liquidity_usd < floor).then(|| {
            let mut result = ScoreResult::default();
            result.push(
                ScoreRule::Liquidity,
                format!("Liquidity {:.0} < min {:.0}", snapshot.liquidity_usd, floor),
            );
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            network: "bsc".into(),
            pair_address: Some("0xpair".into()),
            base_symbol: "CAKE".into(),
            quote_symbol: "WBNB".into(),
            price_usd: 2.0,
            liquidity_usd: 300_000.0,
            ..Default::default()
        }
    }

    fn engine() -> ScoreEngine {
        ScoreEngine::new(Thresholds::default())
    }

    fn quiet_history() -> RollingStatsView {
        RollingStatsView::from_volumes(std::iter::repeat(100.0).take(20))
    }

    #[test]
    fn liquidity_gate_short_circuits() {
        let snap = MarketSnapshot {
            liquidity_usd: 1_000.0,
            volume_m5: 10_000_000.0,
            buys_m5: 500,
            sells_m5: 1,
            price_change_m5: 80.0,
            ..snapshot()
        };
        let result = engine().evaluate(&snap, &quiet_history());

        assert_eq!(result.score(), 0);
        assert_eq!(result.reasons().len(), 1);
        assert_eq!(result.reasons()[0].rule, ScoreRule::Liquidity);
        assert_eq!(result.reasons()[0].text, "Liquidity 1000 < min 200000");
    }

    #[test]
    fn gated_pairs_do_not_touch_history() {
        let store = RollingStatsStore::default();
        let pair = PairIdentity::from("0xpair");
        let snap = MarketSnapshot {
            liquidity_usd: 10.0,
            ..snapshot()
        };
        engine().score(&pair, &snap, &store);
        assert!(store.view(&pair).is_none());
    }

    #[test]
    fn quiet_snapshot_scores_zero() {
        let snap = MarketSnapshot {
            volume_m5: 500.0,
            ..snapshot()
        };
        let mut history: Vec<f64> = vec![100.0; 20];
        history.push(100.0);
        let result = engine().evaluate(&snap, &RollingStatsView::from_volumes(history));
        assert_eq!(result.score(), 0);
        assert!(result.reasons().is_empty());
    }

    #[test]
    fn tx_ratio_adds_its_weight_when_crossed() {
        // 1.80 and 1.85, both with a buy share under 0.65
        let below = MarketSnapshot {
            buys_m5: 36,
            sells_m5: 20,
            ..snapshot()
        };
        let above = MarketSnapshot {
            buys_m5: 37,
            sells_m5: 20,
            ..snapshot()
        };
        let history = quiet_history();
        let low = engine().evaluate(&below, &history);
        let high = engine().evaluate(&above, &history);

        assert!(!low.fired(ScoreRule::TxRatio));
        assert!(high.fired(ScoreRule::TxRatio));
        assert_eq!(high.score(), low.score() + ScoreRule::TxRatio.weight());
    }

    #[test]
    fn imbalance_rules_need_enough_transactions() {
        let snap = MarketSnapshot {
            buys_m5: 15,
            sells_m5: 0,
            ..snapshot()
        };
        let result = engine().evaluate(&snap, &quiet_history());
        assert!(!result.fired(ScoreRule::TxRatio));
        assert!(!result.fired(ScoreRule::BuyShare));
    }

    #[test]
    fn price_rules_use_derived_one_minute_delta() {
        let snap = MarketSnapshot {
            price_change_m5: 13.0,
            ..snapshot()
        };
        let result = engine().evaluate(&snap, &quiet_history());
        assert!(result.fired(ScoreRule::PriceDelta1m));
        assert!(result.fired(ScoreRule::PriceDelta5m));
        assert_eq!(result.score(), 3);
        assert_eq!(result.leading_reasons(2), vec!["dP1m 2.6% > 2.5%", "dP5m 13.0% > 6.0%"]);
    }

    #[test]
    fn imbalance_reasons_print_floors_at_measured_precision() {
        let snap = MarketSnapshot {
            buys_m5: 40,
            sells_m5: 10,
            ..snapshot()
        };
        let result = engine().evaluate(&snap, &quiet_history());
        assert_eq!(
            result.leading_reasons(2),
            vec!["Tx ratio 4.00 > 1.80", "Buy share 0.80 > 0.65"]
        );
    }

    #[test]
    fn volume_spike_compares_against_median() {
        // 1m volume 1000 against a median of 100
        let snap = MarketSnapshot {
            volume_m5: 5_000.0,
            ..snapshot()
        };
        let mut history: Vec<f64> = vec![100.0; 20];
        history.push(1_000.0);
        let result = engine().evaluate(&snap, &RollingStatsView::from_volumes(history));
        assert!(result.fired(ScoreRule::VolumeSpike));
        assert!(result.fired(ScoreRule::VolumeZScore));
        assert_eq!(result.reasons()[0].rule, ScoreRule::VolumeSpike);
        assert_eq!(result.reasons()[1].rule, ScoreRule::VolumeZScore);
    }

    #[test]
    fn reasons_follow_rule_order() {
        let snap = MarketSnapshot {
            volume_m5: 500_000.0,
            buys_m5: 40,
            sells_m5: 10,
            price_change_m5: 8.0,
            ..snapshot()
        };
        let store = RollingStatsStore::default();
        let pair = PairIdentity::from("0xpair");
        for _ in 0..12 {
            store.update(&pair, 2.0, 1_000.0);
        }
        let result = engine().score(&pair, &snap, &store);

        let rules: Vec<ScoreRule> = result.reasons().iter().map(|r| r.rule).collect();
        assert_eq!(
            rules,
            vec![
                ScoreRule::VolumeSpike,
                ScoreRule::VolumeZScore,
                ScoreRule::TxRatio,
                ScoreRule::BuyShare,
                ScoreRule::PriceDelta5m,
            ]
        );
        assert_eq!(result.score(), 10);
        assert_eq!(store.view(&pair).unwrap().observed(), 13);
    }
}
