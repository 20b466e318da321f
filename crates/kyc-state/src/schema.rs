//! Row types for the SurrealDB tables
//!
//! Tables:
//! - kyc_state: Current value per key (world state)
//! - kyc_history: Append-only change log, one row per write or deletion
//!
//! Values are hex-encoded so that arbitrary bytes survive the round trip
//! through SurrealDB's document model.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::record_store::{KeyModification, StorageResult};

/// Table holding the current value per key
pub(crate) const STATE_TABLE: &str = "kyc_state";

/// Table holding the per-key change log
pub(crate) const HISTORY_TABLE: &str = "kyc_history";

/// One row of `kyc_state`. The record id is the key itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StateRow {
    pub key: String,
    pub value: String,
    pub tx_id: String,
    pub timestamp: i64,
}

impl StateRow {
    pub fn decode_value(&self) -> StorageResult<Vec<u8>> {
        decode(&self.key, &self.value)
    }
}

/// One row of `kyc_history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HistoryRow {
    pub key: String,
    pub seq: u64,
    pub tx_id: String,
    pub timestamp: i64,
    pub is_deleted: bool,
    pub value: Option<String>,
}

impl HistoryRow {
    pub fn into_modification(self) -> StorageResult<KeyModification> {
        let value = match (self.is_deleted, self.value) {
            (true, _) => None,
            (false, Some(hex_value)) => Some(decode(&self.key, &hex_value)?),
            (false, None) => {
                return Err(StorageError::Corrupt {
                    key: self.key,
                    reason: format!("history entry {} has no value", self.seq),
                })
            }
        };

        Ok(KeyModification {
            tx_id: self.tx_id,
            timestamp: self.timestamp,
            is_deleted: self.is_deleted,
            value,
        })
    }
}

pub(crate) fn encode(value: &[u8]) -> String {
    hex::encode(value)
}

fn decode(key: &str, value: &str) -> StorageResult<Vec<u8>> {
    hex::decode(value).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
