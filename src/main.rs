//! Fraud Risk Metrics - Report Entry Point
//!
//! Loads a transaction dataset, runs every dashboard aggregation and logs the
//! resulting report.

use anyhow::{Context, Result};
use chrono::Utc;
use fraud_risk_metrics::{config::AppConfig, dataset, report::DashboardReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/config.toml".to_string());

    // Load configuration
    let config_found = Path::new(&config_path).exists();
    let config = if config_found {
        AppConfig::load_from_path(&config_path)?
    } else {
        AppConfig::default()
    };

    // Initialize logging
    init_logging(&config)?;

    if config_found {
        info!(path = %config_path, "Configuration loaded");
    } else {
        warn!(path = %config_path, "Configuration file not found, using defaults");
    }

    let transactions = dataset::load_transactions(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.path))?;

    let today = config
        .analytics
        .anchor_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let mut rng = match config.analytics.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        transactions = transactions.len(),
        today = %today,
        seeded = config.analytics.seed.is_some(),
        zero_day_policy = ?config.analytics.zero_day_policy,
        "Building dashboard report"
    );

    let report = DashboardReport::build(&transactions, &config, today, &mut rng);
    report.log_summary();

    debug!(
        report = %serde_json::to_string(&report).context("Failed to serialize report")?,
        "Report payload"
    );

    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let level = &config.logging.level;
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("fraud_risk_metrics={level}").parse()?)
        .add_directive(format!("fraud_metrics={level}").parse()?);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }

    Ok(())
}
