//! Daily risk severity buckets over a trailing window

use super::{dated, trailing_days};
use crate::types::{Bucketed, DailyRiskBucket, RiskTier, TierThresholds, Transaction};
use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// What to show for a day with no transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDayPolicy {
    /// Report the real zero counts
    #[default]
    TrueZeros,
    /// Substitute small random placeholder counts, flagged as synthetic
    SyntheticFill,
}

/// Groups transactions by calendar day and risk tier.
#[derive(Debug, Clone)]
pub struct DailyRiskBucketer {
    thresholds: TierThresholds,
    window_days: u32,
    zero_day_policy: ZeroDayPolicy,
}

impl DailyRiskBucketer {
    pub fn new(thresholds: TierThresholds, window_days: u32) -> Self {
        Self {
            thresholds,
            window_days,
            zero_day_policy: ZeroDayPolicy::TrueZeros,
        }
    }

    pub fn with_zero_day_policy(mut self, policy: ZeroDayPolicy) -> Self {
        self.zero_day_policy = policy;
        self
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn zero_day_policy(&self) -> ZeroDayPolicy {
        self.zero_day_policy
    }

    /// One bucket per day of the window ending at `today`, oldest first.
    ///
    /// Empty days keep zero counts regardless of the configured policy.
    /// Transactions dated outside the window are ignored.
    pub fn bucket(&self, transactions: &[Transaction], today: NaiveDate) -> Bucketed<DailyRiskBucket> {
        let days = trailing_days(today, self.window_days);
        let mut by_day: HashMap<NaiveDate, DailyRiskBucket> = days
            .iter()
            .map(|&day| (day, DailyRiskBucket::empty(day)))
            .collect();

        let (dated, skipped) = dated(transactions);
        for (day, tx) in dated {
            let Some(bucket) = by_day.get_mut(&day) else {
                continue;
            };
            match RiskTier::from_score(tx.risk_score, &self.thresholds) {
                RiskTier::Low => bucket.low += 1,
                RiskTier::Medium => bucket.medium += 1,
                RiskTier::High => bucket.high += 1,
            }
        }

        let items = days
            .iter()
            .filter_map(|day| by_day.remove(day))
            .collect();

        Bucketed::new(items, skipped)
    }

    /// Like [`bucket`](Self::bucket), then applies the zero-day policy using `rng`.
    ///
    /// Under [`ZeroDayPolicy::SyntheticFill`] each empty day gets low in
    /// `[3, 8)`, medium in `[1, 4)` and high in `[1, 4)`.
    pub fn bucket_with_fill<R: Rng + ?Sized>(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        rng: &mut R,
    ) -> Bucketed<DailyRiskBucket> {
        let mut result = self.bucket(transactions, today);

        if self.zero_day_policy == ZeroDayPolicy::SyntheticFill {
            for bucket in result.items.iter_mut().filter(|b| b.total() == 0) {
                bucket.low = rng.gen_range(3..8);
                bucket.medium = rng.gen_range(1..4);
                bucket.high = rng.gen_range(1..4);
                bucket.synthetic = true;
                debug!(date = %bucket.date, "Filled empty day with synthetic counts");
            }
        }

        result
    }
}

impl Default for DailyRiskBucketer {
    fn default() -> Self {
        Self::new(TierThresholds::default(), 7)
    }
}
