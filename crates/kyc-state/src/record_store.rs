//! Record Store contract
//!
//! The store is a key-value map whose values are opaque bytes. Every write
//! and delete is additionally appended to a per-key change log, which is the
//! only source of audit history.
//!
//! All methods are async and backend-agnostic. An in-memory implementation
//! is provided in the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Transaction identity a write is recorded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStamp {
    /// Transaction identifier
    pub tx_id: String,
    /// Transaction timestamp, seconds since the Unix epoch
    pub timestamp: i64,
}

impl TxStamp {
    pub fn new(tx_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp,
        }
    }
}

/// One entry of a key's change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that performed the change
    pub tx_id: String,
    /// Transaction timestamp, seconds since the Unix epoch
    pub timestamp: i64,
    /// Whether this change removed the key
    pub is_deleted: bool,
    /// Value written by the change; `None` for deletions
    pub value: Option<Vec<u8>>,
}

impl KeyModification {
    pub(crate) fn write(stamp: &TxStamp, value: Vec<u8>) -> Self {
        Self {
            tx_id: stamp.tx_id.clone(),
            timestamp: stamp.timestamp,
            is_deleted: false,
            value: Some(value),
        }
    }

    pub(crate) fn deletion(stamp: &TxStamp) -> Self {
        Self {
            tx_id: stamp.tx_id.clone(),
            timestamp: stamp.timestamp,
            is_deleted: true,
            value: None,
        }
    }
}

/// Transactional key-value store with per-key history.
///
/// Guarantees:
/// - `put` is atomic per key: the current value and the change-log entry are
///   written together or not at all.
/// - A completed `put` is visible to every subsequent `get`.
/// - Overwrites are last-writer-wins. There is no compare-and-swap; two
///   writers to one key through the same store both succeed and both appear
///   in the history. A backend shared by independent processes may refuse a
///   conflicting commit with [`StorageError::Backend`], but never drops an
///   accepted write.
/// - `history_of` returns entries oldest first, in commit order.
/// - The empty key never holds a value: reads of it see an absent key with
///   no history, writes to it fail with [`StorageError::EmptyKey`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Current value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrite the value under `key` and log the write under `stamp`.
    async fn put(&self, key: &str, value: Vec<u8>, stamp: &TxStamp) -> StorageResult<()>;

    /// Remove the value under `key` and log a deletion. No-op if absent.
    async fn delete(&self, key: &str, stamp: &TxStamp) -> StorageResult<()>;

    /// Every write and deletion ever applied to `key`, oldest first.
    async fn history_of(&self, key: &str) -> StorageResult<Vec<KeyModification>>;

    /// Whether `key` currently holds a non-empty value.
    async fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .get(key)
            .await?
            .map(|value| !value.is_empty())
            .unwrap_or(false))
    }
}

/// Reject writes to the empty key before they reach a backend.
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::EmptyKey);
    }
    Ok(())
}
