//! Risk tier classification

use serde::{Deserialize, Serialize};

/// Severity tier derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Determine the tier from a score and thresholds.
    ///
    /// Each threshold is the inclusive lower bound of its tier.
    pub fn from_score(score: u8, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.high {
            RiskTier::High
        } else if score >= thresholds.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Configurable tier boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: u8,
    pub high: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium: 40,
            high: 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_score() {
        let thresholds = TierThresholds::default();

        assert_eq!(RiskTier::from_score(0, &thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(39, &thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(40, &thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(69, &thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(70, &thresholds), RiskTier::High);
        assert_eq!(RiskTier::from_score(100, &thresholds), RiskTier::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = TierThresholds { medium: 50, high: 90 };

        assert_eq!(RiskTier::from_score(45, &thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(89, &thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(90, &thresholds), RiskTier::High);
    }
}
