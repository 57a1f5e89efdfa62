//! Type definitions for the risk analytics pipeline

pub mod audit;
pub mod risk;
pub mod series;
pub mod transaction;

pub use audit::{AuditAction, AuditEventType, AuditLogEntry, AuditModule};
pub use risk::{RiskTier, TierThresholds};
pub use series::{
    AccuracyMetric, Bucketed, DailyRevenuePoint, DailyRiskBucket, DailyRiskTrend, DailyTotals,
    DailyVolume, FraudCategory, FraudSourceBucket,
};
pub use transaction::{Coordinates, Transaction, TransactionStatus};
