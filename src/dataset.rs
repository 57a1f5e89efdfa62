//! Transaction dataset loading

use crate::error::DatasetError;
use crate::types::Transaction;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Object layout: `{"transactions": [...]}`
#[derive(Deserialize)]
struct WrappedDataset {
    transactions: Vec<Transaction>,
}

/// Read a JSON transaction dataset from disk
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, DatasetError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let transactions = parse_transactions(&raw).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), count = transactions.len(), "Dataset loaded");
    Ok(transactions)
}

/// Parse a JSON transaction dataset, either a bare array or an object
/// wrapping one under `transactions`
pub fn parse_transactions(raw: &str) -> Result<Vec<Transaction>, serde_json::Error> {
    if raw.trim_start().starts_with('[') {
        serde_json::from_str(raw)
    } else {
        serde_json::from_str::<WrappedDataset>(raw).map(|file| file.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::DailyRiskBucketer;
    use chrono::NaiveDate;
    use std::io::Write;

    const RECORD: &str = r#"{"id":"TXN-1","timestamp":"2024-01-10T10:00:00Z","amount":10,"riskScore":5,"status":"Verified"}"#;

    #[test]
    fn test_parse_both_layouts() {
        let list = parse_transactions(&format!("[{RECORD}]")).unwrap();
        let wrapped = parse_transactions(&format!(r#"{{"transactions":[{RECORD}]}}"#)).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(list[0].id, wrapped[0].id);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{RECORD},{RECORD}]").unwrap();

        let transactions = load_transactions(file.path()).unwrap();
        assert_eq!(transactions.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load_transactions("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_transactions(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn test_records_without_timestamp_are_skipped_not_fatal() {
        let raw = format!(
            r#"[{RECORD},
                {{"id":"no_ts","amount":5,"riskScore":10,"status":"Approved"}},
                {{"id":"null_ts","timestamp":null,"amount":5,"riskScore":10}}]"#
        );

        let transactions = parse_transactions(&raw).unwrap();
        assert_eq!(transactions.len(), 3);

        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let buckets = DailyRiskBucketer::default().bucket(&transactions, today);

        assert_eq!(buckets.items.iter().map(|b| b.total()).sum::<u32>(), 1);
        let skipped: Vec<&str> = buckets
            .skipped
            .iter()
            .map(|s| s.transaction_id.as_str())
            .collect();
        assert_eq!(skipped, ["no_ts", "null_ts"]);
    }

    #[test]
    fn test_parse_error_keeps_position() {
        let err = parse_transactions("[\n{\"id\": 5}]").unwrap_err();
        assert!(err.is_data());
        assert_eq!(err.line(), 2);

        let err = parse_transactions("{\"transactions\": 3}").unwrap_err();
        assert!(err.is_data());
        assert!(!err.to_string().contains("untagged"));
    }
}
