//! Audit log derivation from transactions

use crate::rules::RuleSet;
use crate::types::{AuditAction, AuditEventType, AuditLogEntry, AuditModule, Transaction};

/// Risk score above which a transaction is blocked regardless of status
pub const AUTO_BLOCK_CUTOFF: u8 = 85;
/// Lowest risk score that gets flagged for review
pub const FLAG_THRESHOLD: u8 = 60;
/// Risk score above which a transaction is reported as a geofence breach
pub const GEOFENCE_CUTOFF: u8 = 80;

/// Maps each transaction to one synthesized audit record.
///
/// Action rules, first match wins:
/// 1. status Blocked, or risk score above 85: Blocked
/// 2. risk score 60 or more: Flagged
/// 3. otherwise: Approved
///
/// Event rules, first match wins:
/// 1. product name mentions "cam": Image Forensics / Image
/// 2. risk score above 80: Geofence Breach / Location
/// 3. status Verified: Successful Verification / OTP
/// 4. otherwise: Transaction Processed / Location
#[derive(Debug)]
pub struct AuditLogDeriver {
    actions: RuleSet<Transaction, AuditAction>,
    events: RuleSet<Transaction, (AuditEventType, AuditModule)>,
}

impl AuditLogDeriver {
    pub fn new() -> Self {
        let actions = RuleSet::new("approved", AuditAction::Approved)
            .rule(
                "blocked",
                |tx: &Transaction| tx.is_blocked() || tx.risk_score > AUTO_BLOCK_CUTOFF,
                AuditAction::Blocked,
            )
            .rule(
                "flagged",
                |tx: &Transaction| tx.risk_score >= FLAG_THRESHOLD,
                AuditAction::Flagged,
            );

        let events = RuleSet::new(
            "processed",
            (AuditEventType::TransactionProcessed, AuditModule::Location),
        )
        .rule(
            "image_forensics",
            |tx: &Transaction| tx.product_mentions("cam"),
            (AuditEventType::ImageForensics, AuditModule::Image),
        )
        .rule(
            "geofence_breach",
            |tx: &Transaction| tx.risk_score > GEOFENCE_CUTOFF,
            (AuditEventType::GeofenceBreach, AuditModule::Location),
        )
        .rule(
            "verified",
            |tx: &Transaction| tx.is_verified(),
            (AuditEventType::SuccessfulVerification, AuditModule::Otp),
        );

        Self { actions, events }
    }

    pub fn derive_entry(&self, tx: &Transaction) -> AuditLogEntry {
        let (event_type, module) = *self.events.evaluate(tx);
        let device_id = if tx.customer_name.is_empty() {
            tx.id.clone()
        } else {
            tx.customer_name.clone()
        };

        AuditLogEntry {
            id: tx.id.clone(),
            timestamp: tx.timestamp.clone(),
            event_type,
            device_id,
            module,
            action_taken: *self.actions.evaluate(tx),
        }
    }

    /// One entry per transaction, in input order
    pub fn derive(&self, transactions: &[Transaction]) -> Vec<AuditLogEntry> {
        transactions.iter().map(|tx| self.derive_entry(tx)).collect()
    }

    /// Entries whose device id or event type contains `query`, ignoring case.
    ///
    /// A blank query matches everything.
    pub fn search<'a>(entries: &'a [AuditLogEntry], query: &str) -> Vec<&'a AuditLogEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return entries.iter().collect();
        }

        entries
            .iter()
            .filter(|entry| {
                entry.device_id.to_lowercase().contains(&query)
                    || entry.event_type.as_str().to_lowercase().contains(&query)
            })
            .collect()
    }
}

impl Default for AuditLogDeriver {
    fn default() -> Self {
        Self::new()
    }
}
