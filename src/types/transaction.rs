//! Transaction records consumed by the analytics pipeline

use crate::error::SkipReason;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

/// Verification status attached to a transaction.
///
/// The status set is open: anything other than the three known values is kept
/// verbatim in `Other` so it survives a serialize/deserialize cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Verified,
    Blocked,
    Approved,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Verified => "Verified",
            TransactionStatus::Blocked => "Blocked",
            TransactionStatus::Approved => "Approved",
            TransactionStatus::Other(s) => s,
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Other(String::new())
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Verified" => TransactionStatus::Verified,
            "Blocked" => TransactionStatus::Blocked,
            "Approved" => TransactionStatus::Approved,
            _ => TransactionStatus::Other(s),
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        TransactionStatus::from(s.to_string())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geolocation of a transaction. Only the map view reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single monitored transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,

    /// ISO-8601 timestamp, kept as received. Missing or null reads as empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,

    /// Transaction value. May be NaN or negative in dirty data; see [`Transaction::safe_amount`].
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,

    /// Fraud likelihood, 0-100
    #[serde(default, deserialize_with = "lenient_risk_score")]
    pub risk_score: u8,

    #[serde(default, deserialize_with = "lenient_status")]
    pub status: TransactionStatus,

    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Transaction {
    /// Create a transaction with empty display fields
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        amount: f64,
        risk_score: u8,
        status: impl Into<TransactionStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            amount,
            risk_score: risk_score.min(100),
            status: status.into(),
            product_name: String::new(),
            customer_name: String::new(),
            customer_email: None,
            coordinates: None,
        }
    }

    pub fn with_product(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = product_name.into();
        self
    }

    pub fn with_customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = customer_name.into();
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lng });
        self
    }

    /// Amount used for aggregation: non-finite or negative values count as zero.
    pub fn safe_amount(&self) -> f64 {
        if self.amount.is_finite() && self.amount >= 0.0 {
            self.amount
        } else {
            debug!(transaction_id = %self.id, amount = self.amount, "Clamping invalid amount to zero");
            0.0
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == TransactionStatus::Blocked
    }

    pub fn is_verified(&self) -> bool {
        self.status == TransactionStatus::Verified
    }

    /// Case-insensitive substring match on the product name
    pub fn product_mentions(&self, needle: &str) -> bool {
        self.product_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Parse the raw timestamp into UTC
    pub fn parsed_timestamp(&self) -> Result<DateTime<Utc>, SkipReason> {
        parse_timestamp(&self.timestamp)
    }

    /// UTC calendar day of the transaction
    pub fn calendar_day(&self) -> Result<NaiveDate, SkipReason> {
        self.parsed_timestamp().map(|ts| ts.date_naive())
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (any offset), naive date-times with a `T` or space
/// separator (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SkipReason> {
    let trimmed = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(SkipReason::UnparsableTimestamp(raw.to_string()))
}

/// Numeric field as found in loosely typed datasets
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn to_f64(&self) -> f64 {
        match self {
            NumberLike::Number(n) => *n,
            NumberLike::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(value.map(|v| v.to_f64()).unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<TransactionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.into())
}

fn lenient_risk_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_f64(deserializer)?;
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.round().min(100.0) as u8)
}
