//! System accuracy estimate from blocked low-risk transactions

use super::round2;
use crate::types::{AccuracyMetric, Transaction};

/// Treats blocked transactions with a risk score under the ceiling as false positives.
#[derive(Debug, Clone, Copy)]
pub struct AccuracyEstimator {
    false_positive_ceiling: u8,
}

impl AccuracyEstimator {
    pub fn new(false_positive_ceiling: u8) -> Self {
        Self {
            false_positive_ceiling,
        }
    }

    /// accuracy = 100 - 100 * false_positives / total, both rounded to 2 decimals.
    ///
    /// An empty list has no false positives and is 100% accurate.
    pub fn estimate(&self, transactions: &[Transaction]) -> AccuracyMetric {
        let total = transactions.len() as u32;
        let false_positives = transactions
            .iter()
            .filter(|tx| tx.is_blocked() && tx.risk_score < self.false_positive_ceiling)
            .count() as u32;

        let rate = if total > 0 {
            f64::from(false_positives) / f64::from(total) * 100.0
        } else {
            0.0
        };

        AccuracyMetric {
            accuracy_pct: round2(100.0 - rate),
            false_positive_rate: round2(rate),
            false_positives,
            total,
        }
    }
}

impl Default for AccuracyEstimator {
    fn default() -> Self {
        Self::new(50)
    }
}
