//! Fraud Risk Metrics Library
//!
//! Aggregations that turn a list of monitored transactions into the views of
//! a fraud-monitoring dashboard: daily risk buckets, fraud-source
//! distribution, accuracy estimate, revenue/orders series and audit log.

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod rules;
pub mod types;

pub use analytics::{
    AccuracyEstimator, AuditLogDeriver, DailyRiskBucketer, DashboardSummary, FraudSourceClassifier,
    RevenueAggregator, ZeroDayPolicy,
};
pub use config::AppConfig;
pub use error::{DatasetError, SkipReason, SkippedRecord};
pub use report::DashboardReport;
pub use types::{transaction::Transaction, Bucketed};
