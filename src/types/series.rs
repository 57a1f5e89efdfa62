//! Render-ready structures produced by the analytics

use crate::error::SkippedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of a date-bucketed aggregation together with the records it left out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucketed<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Bucketed<T> {
    pub fn new(items: Vec<T>, skipped: Vec<SkippedRecord>) -> Self {
        Self { items, skipped }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Tier counts for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRiskBucket {
    pub date: NaiveDate,
    /// `MM-DD`
    pub label: String,
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    /// True when the counts are placeholders for a day without data
    pub synthetic: bool,
}

impl DailyRiskBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format("%m-%d").to_string(),
            low: 0,
            medium: 0,
            high: 0,
            synthetic: false,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }
}

/// Suspected fraud vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FraudCategory {
    #[serde(rename = "OTP Bombing")]
    OtpBombing,
    #[serde(rename = "Location Spoofing")]
    LocationSpoofing,
    #[serde(rename = "Image Tampering")]
    ImageTampering,
}

impl FraudCategory {
    /// Display order of the fraud-source chart
    pub const ALL: [FraudCategory; 3] = [
        FraudCategory::OtpBombing,
        FraudCategory::LocationSpoofing,
        FraudCategory::ImageTampering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FraudCategory::OtpBombing => "OTP Bombing",
            FraudCategory::LocationSpoofing => "Location Spoofing",
            FraudCategory::ImageTampering => "Image Tampering",
        }
    }
}

impl fmt::Display for FraudCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudSourceBucket {
    pub category: FraudCategory,
    pub count: u32,
}

/// Accuracy derived from the false-positive rate, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyMetric {
    pub accuracy_pct: f64,
    pub false_positive_rate: f64,
    pub false_positives: u32,
    pub total: u32,
}

/// One day of the synthesized revenue/orders chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenuePoint {
    pub date: NaiveDate,
    /// Short month and day, e.g. `Jan 5`
    pub label: String,
    pub revenue: f64,
    pub orders: u32,
}

/// Observed revenue and order count for a day with data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub label: String,
    pub revenue: f64,
    pub orders: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRiskTrend {
    pub date: NaiveDate,
    pub avg_risk: u8,
}
