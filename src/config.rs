//! Configuration management for the risk analytics report

use crate::analytics::ZeroDayPolicy;
use crate::types::TierThresholds;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub tiers: TierThresholds,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the transaction list comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON file holding the transactions
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "data/transactions.json".to_string(),
        }
    }
}

/// Aggregation parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Days in the risk-bucket chart
    pub risk_window_days: u32,
    /// Days in the revenue/orders chart
    pub revenue_window_days: u32,
    /// Handling of days without transactions in the risk-bucket chart
    pub zero_day_policy: ZeroDayPolicy,
    /// Seed for the display randomness; unset draws from entropy
    pub seed: Option<u64>,
    /// Day the trailing windows end on; unset means today (UTC)
    pub anchor_date: Option<NaiveDate>,
    /// Blocked transactions scoring below this count as false positives
    pub false_positive_ceiling: u8,
    /// Scores above this count as high risk on the overview
    pub high_risk_cutoff: u8,
    /// Number of recent transactions listed on the overview
    pub latest_count: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_window_days: 7,
            revenue_window_days: 30,
            zero_day_policy: ZeroDayPolicy::TrueZeros,
            seed: None,
            anchor_date: None,
            false_positive_ceiling: 50,
            high_risk_cutoff: 80,
            latest_count: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analytics.risk_window_days, 7);
        assert_eq!(config.analytics.revenue_window_days, 30);
        assert_eq!(config.analytics.zero_day_policy, ZeroDayPolicy::TrueZeros);
        assert_eq!(config.tiers, TierThresholds { medium: 40, high: 70 });
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[dataset]
path = "fixtures/tx.json"

[analytics]
zero_day_policy = "synthetic_fill"
seed = 42
anchor_date = "2024-01-10"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();

        assert_eq!(config.dataset.path, "fixtures/tx.json");
        assert_eq!(config.analytics.zero_day_policy, ZeroDayPolicy::SyntheticFill);
        assert_eq!(config.analytics.seed, Some(42));
        assert_eq!(config.analytics.anchor_date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(config.analytics.risk_window_days, 7);
        assert_eq!(config.tiers.high, 70);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[dataset]

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();

        assert_eq!(config.dataset.path, "data/transactions.json");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }
}
