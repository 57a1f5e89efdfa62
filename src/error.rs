//! Error and skip outcomes

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why a record was left out of a date-bucketed aggregation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    #[error("unparsable timestamp: {0:?}")]
    UnparsableTimestamp(String),
}

/// A transaction excluded from an aggregation, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub transaction_id: String,
    pub reason: SkipReason,
}

/// Failure loading a transaction dataset from disk
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
