//! Mock Dataset Generator
//!
//! Writes a JSON transaction dataset for exercising the dashboard report.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fraud_risk_metrics::types::{Transaction, TransactionStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tracing::info;

const PRODUCTS: &[&str] = &[
    "Smartphone",
    "Laptop",
    "Wireless Earbuds",
    "DSLR Camera",
    "Smart Watch",
    "Tablet",
    "Action Cam",
    "Bluetooth Speaker",
];

const CUSTOMERS: &[&str] = &[
    "Aarav Shah",
    "Priya Nair",
    "Rohan Mehta",
    "Ananya Iyer",
    "Vikram Joshi",
    "Sneha Kulkarni",
    "Kabir Singh",
    "",
];

/// Pune, with some jitter
const HOME_LAT: f64 = 18.5204;
const HOME_LNG: f64 = 73.8567;

/// Transaction generator for mock datasets
struct TransactionGenerator {
    rng: StdRng,
    /// Latest possible timestamp
    anchor: DateTime<Utc>,
    days_back: i64,
}

impl TransactionGenerator {
    fn new(seed: Option<u64>, anchor: DateTime<Utc>, days_back: i64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            anchor,
            days_back,
        }
    }

    /// Generate a low-risk transaction close to home
    fn generate_legitimate(&mut self) -> Transaction {
        let status = if self.rng.gen_bool(0.7) {
            TransactionStatus::Verified
        } else {
            TransactionStatus::Approved
        };

        let risk_score = self.rng.gen_range(0..60);
        let amount = self.rng.gen_range(200.0..15_000.0);
        let lat_jitter: f64 = self.rng.gen_range(-0.05..0.05);
        let lng_jitter: f64 = self.rng.gen_range(-0.05..0.05);
        self.base(risk_score, amount, status)
            .with_coordinates(HOME_LAT + lat_jitter, HOME_LNG + lng_jitter)
    }

    /// Generate a high-risk transaction, usually blocked, often far from home
    fn generate_suspicious(&mut self) -> Transaction {
        let status = if self.rng.gen_bool(0.8) {
            TransactionStatus::Blocked
        } else {
            TransactionStatus::Approved
        };

        let risk_score = self.rng.gen_range(55..=100);
        let amount = self.rng.gen_range(10_000.0..150_000.0);
        self.base(risk_score, amount, status)
            .with_coordinates(
                self.rng.gen_range(8.0..32.0),
                self.rng.gen_range(68.0..92.0),
            )
    }

    fn base(&mut self, risk_score: u8, amount: f64, status: TransactionStatus) -> Transaction {
        let age = Duration::minutes(self.rng.gen_range(0..self.days_back * 24 * 60));
        let timestamp = (self.anchor - age).to_rfc3339();
        let amount = (amount * 100.0).round() / 100.0;
        let raw_id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let id = format!("TXN-{}", &raw_id.simple().to_string()[..8].to_uppercase());

        Transaction::new(id, timestamp, amount, risk_score, status)
            .with_product(self.random_choice(PRODUCTS))
            .with_customer(self.random_choice(CUSTOMERS))
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }

    fn generate(&mut self, count: usize, fraud_rate: f64) -> (Vec<Transaction>, usize) {
        let mut suspicious_count = 0;
        let mut transactions = Vec::with_capacity(count);

        for _ in 0..count {
            let transaction = if self.rng.gen_bool(fraud_rate) {
                suspicious_count += 1;
                self.generate_suspicious()
            } else {
                self.generate_legitimate()
            };
            transactions.push(transaction);
        }

        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        (transactions, suspicious_count)
    }
}

/// End of the given day, or now when no anchor is passed
fn anchor_from_arg(arg: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match arg {
        Some(raw) => {
            let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
            let end = day
                .and_hms_opt(23, 59, 59)
                .ok_or_else(|| anyhow::anyhow!("Invalid anchor date: {}", raw))?;
            Ok(end.and_utc())
        }
        None => Ok(Utc::now()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_dataset=info".parse()?),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let output = args.get(1).map(|s| s.as_str()).unwrap_or("data/transactions.json");
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);
    let fraud_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.15);
    let seed: Option<u64> = args.get(4).and_then(|s| s.parse().ok());
    let anchor = anchor_from_arg(args.get(5).map(|s| s.as_str()))?;

    info!(
        output = %output,
        count = count,
        fraud_rate = fraud_rate,
        seed = ?seed,
        anchor = %anchor,
        "Configuration loaded"
    );

    let fraud_rate = fraud_rate.clamp(0.0, 1.0);
    let mut generator = TransactionGenerator::new(seed, anchor, 30);
    let (transactions, suspicious_count) = generator.generate(count, fraud_rate);
    let legitimate_count = count - suspicious_count;

    if let Some(parent) = std::path::Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, serde_json::to_string_pretty(&transactions)?)?;

    info!(
        "Completed! Wrote {} transactions to {} ({} legitimate, {} suspicious)",
        count, output, legitimate_count, suspicious_count
    );

    Ok(())
}
