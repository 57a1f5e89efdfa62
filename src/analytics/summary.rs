//! Headline figures for the overview page, plus per-day volume and risk trend

use super::dated;
use crate::types::{Bucketed, DailyRiskTrend, DailyVolume, Transaction};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Overview KPIs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_transactions: u32,
    pub verified_count: u32,
    pub blocked_count: u32,
    /// Sum of blocked transaction amounts
    pub revenue_protected: f64,
    pub high_risk_count: u32,
    pub avg_risk_score: f64,
    pub avg_amount: f64,
    /// Ids of the most recent transactions, newest first
    pub latest_ids: Vec<String>,
}

impl DashboardSummary {
    /// Compute the overview.
    ///
    /// `high_risk_cutoff` is exclusive: a score must exceed it to count as high risk.
    pub fn compute(transactions: &[Transaction], high_risk_cutoff: u8, latest_count: usize) -> Self {
        let total = transactions.len();

        let mut verified_count = 0;
        let mut blocked_count = 0;
        let mut high_risk_count = 0;
        let mut revenue_protected = 0.0;
        let mut amount_sum = 0.0;
        let mut risk_sum = 0u64;

        for tx in transactions {
            if tx.is_verified() {
                verified_count += 1;
            }
            if tx.is_blocked() {
                blocked_count += 1;
                revenue_protected += tx.safe_amount();
            }
            if tx.risk_score > high_risk_cutoff {
                high_risk_count += 1;
            }
            amount_sum += tx.safe_amount();
            risk_sum += u64::from(tx.risk_score);
        }

        let (avg_risk_score, avg_amount) = if total > 0 {
            (risk_sum as f64 / total as f64, amount_sum / total as f64)
        } else {
            (0.0, 0.0)
        };

        Self {
            total_transactions: total as u32,
            verified_count,
            blocked_count,
            revenue_protected,
            high_risk_count,
            avg_risk_score,
            avg_amount,
            latest_ids: latest(transactions, latest_count),
        }
    }
}

/// Newest transactions first; unparsable timestamps sort after every dated one
fn latest(transactions: &[Transaction], count: usize) -> Vec<String> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| Reverse(tx.parsed_timestamp().ok()));
    ordered
        .into_iter()
        .take(count)
        .map(|tx| tx.id.clone())
        .collect()
}

/// Transaction count for every day with data, by date
pub fn daily_volume(transactions: &[Transaction]) -> Bucketed<DailyVolume> {
    let (dated, skipped) = dated(transactions);

    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for (day, _) in dated {
        *counts.entry(day).or_insert(0) += 1;
    }

    let items = counts
        .into_iter()
        .map(|(date, count)| DailyVolume { date, count })
        .collect();

    Bucketed::new(items, skipped)
}

/// Mean risk score for every day with data, rounded to an integer, by date
pub fn daily_risk_trend(transactions: &[Transaction]) -> Bucketed<DailyRiskTrend> {
    let (dated, skipped) = dated(transactions);

    let mut sums: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for (day, tx) in dated {
        let entry = sums.entry(day).or_insert((0, 0));
        entry.0 += u64::from(tx.risk_score);
        entry.1 += 1;
    }

    let items = sums
        .into_iter()
        .map(|(date, (sum, count))| DailyRiskTrend {
            date,
            avg_risk: (sum as f64 / count as f64).round() as u8,
        })
        .collect();

    Bucketed::new(items, skipped)
}
