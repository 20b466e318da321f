//! In-memory record store
//!
//! Provides `MemoryRecordStore`, which satisfies the `RecordStore` contract
//! without any external dependencies. Used by tests and by embedders that
//! do not need durability.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::record_store::{check_key, KeyModification, RecordStore, StorageResult, TxStamp};

#[derive(Debug, Default)]
struct KeyLog {
    current: Option<Vec<u8>>,
    history: Vec<KeyModification>,
}

/// In-memory record store backed by a `HashMap<key, KeyLog>`.
///
/// Each key maps to its current value plus the full change log (oldest
/// first). A single mutex serialises writers, which gives the same
/// commit-order semantics as the ledger.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    keys: Mutex<HashMap<String, KeyLog>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys that currently hold a value.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|log| log.current.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a KeyLog half-written:
    // every mutation below is a single push or assignment.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, KeyLog>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let keys = self.lock();
        Ok(keys.get(key).and_then(|log| log.current.clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>, stamp: &TxStamp) -> StorageResult<()> {
        check_key(key)?;
        let mut keys = self.lock();
        let log = keys.entry(key.to_string()).or_default();
        log.history.push(KeyModification::write(stamp, value.clone()));
        log.current = Some(value);
        debug!(key = %key, tx_id = %stamp.tx_id, "put");
        Ok(())
    }

    async fn delete(&self, key: &str, stamp: &TxStamp) -> StorageResult<()> {
        check_key(key)?;
        let mut keys = self.lock();
        if let Some(log) = keys.get_mut(key) {
            if log.current.take().is_some() {
                log.history.push(KeyModification::deletion(stamp));
                debug!(key = %key, tx_id = %stamp.tx_id, "delete");
            }
        }
        Ok(())
    }

    async fn history_of(&self, key: &str) -> StorageResult<Vec<KeyModification>> {
        let keys = self.lock();
        Ok(keys
            .get(key)
            .map(|log| log.history.clone())
            .unwrap_or_default())
    }
}
