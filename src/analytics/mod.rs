//! Aggregations from transaction lists to dashboard views.
//!
//! Every aggregation takes the transaction slice as an argument and returns
//! newly built values. Nothing here holds a dataset or mutates its input.

pub mod accuracy;
pub mod audit_log;
pub mod fraud_source;
pub mod revenue;
pub mod risk_buckets;
pub mod summary;

pub use accuracy::AccuracyEstimator;
pub use audit_log::AuditLogDeriver;
pub use fraud_source::FraudSourceClassifier;
pub use revenue::RevenueAggregator;
pub use risk_buckets::{DailyRiskBucketer, ZeroDayPolicy};
pub use summary::{daily_risk_trend, daily_volume, DashboardSummary};

use crate::error::SkippedRecord;
use crate::types::Transaction;
use chrono::{Duration, NaiveDate};
use tracing::warn;

/// Pair each transaction with its UTC calendar day.
///
/// Records whose timestamp does not parse are returned separately.
pub(crate) fn dated(transactions: &[Transaction]) -> (Vec<(NaiveDate, &Transaction)>, Vec<SkippedRecord>) {
    let mut dated = Vec::with_capacity(transactions.len());
    let mut skipped = Vec::new();

    for tx in transactions {
        match tx.calendar_day() {
            Ok(day) => dated.push((day, tx)),
            Err(reason) => {
                warn!(transaction_id = %tx.id, reason = %reason, "Skipping transaction");
                skipped.push(SkippedRecord {
                    transaction_id: tx.id.clone(),
                    reason,
                });
            }
        }
    }

    (dated, skipped)
}

/// The `days` calendar days ending at `today`, oldest first
pub(crate) fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| today - Duration::days(i64::from(offset)))
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
