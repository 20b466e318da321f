//! Audit-history projection of a record's change log.

use kyc_state::KeyModification;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::record::KycRecord;

/// One historical write or deletion of a KYC record's key.
///
/// Derived from the record store's change log on every read; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KycHistoryEntry {
    /// Transaction that performed the change.
    pub tx_id: String,

    /// Ledger timestamp (seconds) of the change.
    pub timestamp: i64,

    /// Whether the change removed the record.
    pub is_deleted: bool,

    /// Record as it existed after the change; `None` for deletions.
    pub record: Option<KycRecord>,
}

impl TryFrom<KeyModification> for KycHistoryEntry {
    type Error = super::error::KycError;

    fn try_from(modification: KeyModification) -> Result<Self> {
        let record = match (modification.is_deleted, modification.value) {
            (false, Some(bytes)) if !bytes.is_empty() => Some(KycRecord::from_slice(&bytes)?),
            _ => None,
        };

        Ok(Self {
            tx_id: modification.tx_id,
            timestamp: modification.timestamp,
            is_deleted: modification.is_deleted,
            record,
        })
    }
}
