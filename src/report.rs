//! Full dashboard report: every aggregation over one transaction list.

use crate::analytics::{
    daily_risk_trend, daily_volume, AccuracyEstimator, AuditLogDeriver, DailyRiskBucketer,
    DashboardSummary, FraudSourceClassifier, RevenueAggregator,
};
use crate::config::AppConfig;
use crate::types::{
    AccuracyMetric, AuditAction, AuditLogEntry, Bucketed, DailyRevenuePoint, DailyRiskBucket,
    DailyRiskTrend, DailyTotals, DailyVolume, FraudSourceBucket, Transaction,
};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// Render-ready views for every dashboard page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_for: NaiveDate,
    pub summary: DashboardSummary,
    pub risk_buckets: Bucketed<DailyRiskBucket>,
    pub fraud_sources: Vec<FraudSourceBucket>,
    pub accuracy: AccuracyMetric,
    pub revenue: Bucketed<DailyRevenuePoint>,
    /// Observed per-day totals with the display wave applied
    pub revenue_observed: Vec<DailyTotals>,
    pub volume: Bucketed<DailyVolume>,
    pub risk_trend: Bucketed<DailyRiskTrend>,
    pub audit_log: Vec<AuditLogEntry>,
}

impl DashboardReport {
    /// Run every aggregation with the configured parameters
    pub fn build<R: Rng + ?Sized>(
        transactions: &[Transaction],
        config: &AppConfig,
        today: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let analytics = &config.analytics;

        let bucketer = DailyRiskBucketer::new(config.tiers, analytics.risk_window_days)
            .with_zero_day_policy(analytics.zero_day_policy);
        let revenue = RevenueAggregator::new(analytics.revenue_window_days);

        Self {
            generated_for: today,
            summary: DashboardSummary::compute(
                transactions,
                analytics.high_risk_cutoff,
                analytics.latest_count,
            ),
            risk_buckets: bucketer.bucket_with_fill(transactions, today, rng),
            fraud_sources: FraudSourceClassifier::new().distribution(transactions),
            accuracy: AccuracyEstimator::new(analytics.false_positive_ceiling).estimate(transactions),
            revenue: revenue.synthesize(transactions, today, rng),
            revenue_observed: RevenueAggregator::apply_wave(&revenue.daily_totals(transactions).items),
            volume: daily_volume(transactions),
            risk_trend: daily_risk_trend(transactions),
            audit_log: AuditLogDeriver::new().derive(transactions),
        }
    }

    /// Audit entries per action, in Blocked/Flagged/Approved order
    pub fn actions_breakdown(&self) -> [(AuditAction, usize); 3] {
        [AuditAction::Blocked, AuditAction::Flagged, AuditAction::Approved].map(|action| {
            let count = self
                .audit_log
                .iter()
                .filter(|entry| entry.action_taken == action)
                .count();
            (action, count)
        })
    }

    /// Log a boxed summary of the report
    pub fn log_summary(&self) {
        let summary = &self.summary;

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║            FRAUD MONITORING DASHBOARD - RISK REPORT          ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Transactions: {:>8}  │  Verified: {:>6}  │  Blocked: {:>6} ║",
            summary.total_transactions, summary.verified_count, summary.blocked_count
        );
        info!(
            "║ Revenue Protected: {:>12.2}  │  Avg Amount: {:>12.2}  ║",
            summary.revenue_protected, summary.avg_amount
        );
        info!(
            "║ High Risk: {:>6}  │  Avg Risk: {:>5.1}  │  Accuracy: {:>6.2}%  ║",
            summary.high_risk_count, summary.avg_risk_score, self.accuracy.accuracy_pct
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Risk Scores (last {} days):                                   ║", self.risk_buckets.len());
        for bucket in &self.risk_buckets.items {
            let marker = if bucket.synthetic { "*" } else { " " };
            info!(
                "║   {}{} low={:>4} medium={:>4} high={:>4} {}",
                bucket.label,
                marker,
                bucket.low,
                bucket.medium,
                bucket.high,
                bar(bucket.high, 20)
            );
        }
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Fraud Sources:                                               ║");
        let fraud_total: u32 = self.fraud_sources.iter().map(|b| b.count).sum();
        for bucket in &self.fraud_sources {
            let pct = if fraud_total > 0 {
                f64::from(bucket.count) / f64::from(fraud_total) * 100.0
            } else {
                0.0
            };
            info!(
                "║   {:18}: {:>6} ({:>5.1}%) {}",
                bucket.category.as_str(),
                bucket.count,
                pct,
                bar((pct / 5.0) as u32, 20)
            );
        }
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Audit Actions:                                               ║");
        for (action, count) in self.actions_breakdown() {
            info!("║   {:10}: {:>6}", action.to_string(), count);
        }
        info!("╚══════════════════════════════════════════════════════════════╝");

        let skipped = self.risk_buckets.skipped.len();
        if skipped > 0 {
            info!(skipped, "Transactions excluded from date-based views");
        }
        if let (Some(first), Some(last)) = (self.revenue.items.first(), self.revenue.items.last()) {
            let revenue_total: f64 = self.revenue.items.iter().map(|p| p.revenue).sum();
            let orders_total: u32 = self.revenue.items.iter().map(|p| p.orders).sum();
            info!(
                from = %first.label,
                to = %last.label,
                revenue = format!("{:.2}", revenue_total),
                orders = orders_total,
                "Revenue series"
            );
        }
        if let (Some(first), Some(last)) = (self.revenue_observed.first(), self.revenue_observed.last()) {
            let revenue_total: f64 = self.revenue_observed.iter().map(|d| d.revenue).sum();
            let orders_total: u32 = self.revenue_observed.iter().map(|d| d.orders).sum();
            info!(
                from = %first.label,
                to = %last.label,
                days = self.revenue_observed.len(),
                revenue = format!("{:.2}", revenue_total),
                orders = orders_total,
                "Observed revenue"
            );
        }
    }
}

fn bar(len: u32, max: u32) -> String {
    "█".repeat(len.min(max) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ZeroDayPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::new("t1", "2024-01-10T08:00:00Z", 1_200.0, 92, "Blocked").with_product("Phone"),
            Transaction::new("t2", "2024-01-09T08:00:00Z", 300.0, 45, "Approved").with_product("Camera"),
            Transaction::new("t3", "2024-01-08T08:00:00Z", 80.0, 25, "Verified").with_customer("Leela"),
            Transaction::new("t4", "bogus", 10.0, 30, "Blocked"),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_build_uses_config() {
        let mut config = AppConfig::default();
        config.analytics.risk_window_days = 3;
        config.analytics.revenue_window_days = 5;

        let mut rng = StdRng::seed_from_u64(11);
        let report = DashboardReport::build(&transactions(), &config, today(), &mut rng);

        assert_eq!(report.risk_buckets.len(), 3);
        assert_eq!(report.revenue.len(), 5);
        assert_eq!(report.audit_log.len(), 4);
        assert_eq!(report.summary.total_transactions, 4);
        assert_eq!(report.risk_buckets.skipped.len(), 1);
        // t4 is blocked with a score under 50
        assert_eq!(report.accuracy.accuracy_pct, 75.0);

        // Jan 8, 9 and 10 have data; the wave leaves the first day untouched
        assert_eq!(report.revenue_observed.len(), 3);
        assert_eq!(report.revenue_observed[0].label, "Jan 8");
        assert_eq!(report.revenue_observed[0].revenue, 80.0);
        assert_eq!(report.revenue_observed[0].orders, 1);
        assert!(report.revenue_observed.iter().all(|d| d.revenue >= 0.0));
        report.log_summary();
    }

    #[test]
    fn test_actions_breakdown() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = DashboardReport::build(&transactions(), &AppConfig::default(), today(), &mut rng);

        let breakdown = report.actions_breakdown();
        assert_eq!(breakdown[0], (AuditAction::Blocked, 2));
        assert_eq!(breakdown[1], (AuditAction::Flagged, 0));
        assert_eq!(breakdown[2], (AuditAction::Approved, 2));
    }

    #[test]
    fn test_synthetic_fill_is_marked() {
        let mut config = AppConfig::default();
        config.analytics.zero_day_policy = ZeroDayPolicy::SyntheticFill;

        let mut rng = StdRng::seed_from_u64(5);
        let report = DashboardReport::build(&transactions(), &config, today(), &mut rng);

        // Jan 4 to Jan 7 have no data
        let synthetic = report.risk_buckets.items.iter().filter(|b| b.synthetic).count();
        assert_eq!(synthetic, 4);
        report.log_summary();
    }

    #[test]
    fn test_report_serializes() {
        let mut rng = StdRng::seed_from_u64(2);
        let report = DashboardReport::build(&transactions(), &AppConfig::default(), today(), &mut rng);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["generatedFor"], "2024-01-10");
        assert_eq!(json["fraudSources"][1]["category"], "Location Spoofing");
        assert_eq!(json["auditLog"][0]["actionTaken"], "Blocked");
        // 1 + round(1.2 * sin(1.8)) = 2
        assert_eq!(json["revenueObserved"][2]["orders"], 2);
    }
}
