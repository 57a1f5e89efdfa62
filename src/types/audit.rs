//! Audit log records derived from transactions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security action recorded for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    Blocked,
    Flagged,
    Approved,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditAction::Blocked => "Blocked",
            AuditAction::Flagged => "Flagged",
            AuditAction::Approved => "Approved",
        };
        f.write_str(s)
    }
}

/// Kind of security event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditEventType {
    #[serde(rename = "Image Forensics")]
    ImageForensics,
    #[serde(rename = "Geofence Breach")]
    GeofenceBreach,
    #[serde(rename = "Successful Verification")]
    SuccessfulVerification,
    #[serde(rename = "Transaction Processed")]
    TransactionProcessed,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::ImageForensics => "Image Forensics",
            AuditEventType::GeofenceBreach => "Geofence Breach",
            AuditEventType::SuccessfulVerification => "Successful Verification",
            AuditEventType::TransactionProcessed => "Transaction Processed",
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection module that produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditModule {
    Image,
    Location,
    #[serde(rename = "OTP")]
    Otp,
}

impl fmt::Display for AuditModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditModule::Image => "Image",
            AuditModule::Location => "Location",
            AuditModule::Otp => "OTP",
        };
        f.write_str(s)
    }
}

/// Synthesized audit record, one per transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Source transaction identifier
    pub id: String,
    /// Source transaction timestamp, unchanged
    pub timestamp: String,
    pub event_type: AuditEventType,
    /// Customer name, or the transaction id when the name is empty
    pub device_id: String,
    pub module: AuditModule,
    pub action_taken: AuditAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_entry_serialization() {
        let entry = AuditLogEntry {
            id: "TXN-7".to_string(),
            timestamp: "2024-03-05T10:00:00Z".to_string(),
            event_type: AuditEventType::SuccessfulVerification,
            device_id: "Ravi Kumar".to_string(),
            module: AuditModule::Otp,
            action_taken: AuditAction::Flagged,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"eventType\":\"Successful Verification\""));
        assert!(json.contains("\"module\":\"OTP\""));
        assert!(json.contains("\"actionTaken\":\"Flagged\""));

        let back: AuditLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
