//! Heuristic fraud-source classification

use crate::rules::RuleSet;
use crate::types::{FraudCategory, FraudSourceBucket, Transaction};

/// Risk score above which a transaction is attributed to location spoofing
pub const LOCATION_SPOOFING_CUTOFF: u8 = 80;

/// Assigns every transaction to exactly one fraud category.
///
/// Rules, highest priority first:
/// 1. risk score above 80: Location Spoofing
/// 2. product name mentions "cam" (covers "camera"): Image Tampering
/// 3. otherwise: OTP Bombing
#[derive(Debug)]
pub struct FraudSourceClassifier {
    rules: RuleSet<Transaction, FraudCategory>,
}

impl FraudSourceClassifier {
    pub fn new() -> Self {
        let rules = RuleSet::new("default", FraudCategory::OtpBombing)
            .rule(
                "high_risk",
                |tx: &Transaction| tx.risk_score > LOCATION_SPOOFING_CUTOFF,
                FraudCategory::LocationSpoofing,
            )
            .rule(
                "camera_product",
                |tx: &Transaction| tx.product_mentions("cam"),
                FraudCategory::ImageTampering,
            );

        Self { rules }
    }

    pub fn classify(&self, tx: &Transaction) -> FraudCategory {
        *self.rules.evaluate(tx)
    }

    /// Name of the rule that decided the category of `tx`
    pub fn explain(&self, tx: &Transaction) -> &'static str {
        self.rules.matching_rule(tx)
    }

    /// Count per category, always listing all three in chart order
    pub fn distribution(&self, transactions: &[Transaction]) -> Vec<FraudSourceBucket> {
        let mut counts = [0u32; 3];
        for tx in transactions {
            let category = self.classify(tx);
            if let Some(slot) = FraudCategory::ALL.iter().position(|c| *c == category) {
                counts[slot] += 1;
            }
        }

        FraudCategory::ALL
            .iter()
            .zip(counts)
            .map(|(&category, count)| FraudSourceBucket { category, count })
            .collect()
    }
}

impl Default for FraudSourceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
