//! SurrealDB-backed RecordStore implementation
//!
//! Current values live in `kyc_state` (one row per key, record id = key),
//! the change log lives in `kyc_history`. Every write or deletion touches
//! both tables inside a single SurrealQL transaction.
//!
//! Writes through one store handle (and its clones) are serialised, so
//! concurrent writers to a key all commit, in lock order. Handles on separate
//! connections to the same database are not coordinated: when their
//! transactions conflict, one of them fails with [`StorageError::Backend`].
//!
//! [`StorageError::Backend`]: crate::StorageError::Backend

use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::{Database, Root};
use surrealdb::Surreal;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::config::StoreConfig;
use crate::error::StateError;
use crate::migrations;
use crate::record_store::{check_key, KeyModification, RecordStore, StorageResult, TxStamp};
use crate::schema::{encode, HistoryRow, StateRow, HISTORY_TABLE, STATE_TABLE};

/// Appends a write to the change log and overwrites the current value.
const PUT_SQL: &str = r#"
    BEGIN TRANSACTION;
    LET $seq = array::len((SELECT VALUE id FROM kyc_history WHERE key = $key)) + 1;
    CREATE kyc_history CONTENT {
        key: $key,
        seq: $seq,
        tx_id: $tx_id,
        timestamp: $timestamp,
        is_deleted: false,
        value: $value
    };
    UPSERT type::thing('kyc_state', $key) CONTENT {
        key: $key,
        value: $value,
        tx_id: $tx_id,
        timestamp: $timestamp
    };
    COMMIT TRANSACTION;
"#;

/// Appends a deletion to the change log and drops the current value,
/// but only when the key currently holds one.
const DELETE_SQL: &str = r#"
    BEGIN TRANSACTION;
    LET $live = array::len((SELECT VALUE id FROM type::thing('kyc_state', $key)));
    IF $live > 0 {
        LET $seq = array::len((SELECT VALUE id FROM kyc_history WHERE key = $key)) + 1;
        CREATE kyc_history CONTENT {
            key: $key,
            seq: $seq,
            tx_id: $tx_id,
            timestamp: $timestamp,
            is_deleted: true
        };
        DELETE type::thing('kyc_state', $key);
    };
    COMMIT TRANSACTION;
"#;

const HISTORY_SQL: &str = "SELECT * FROM kyc_history WHERE key = $key ORDER BY seq ASC";

/// SurrealDB-backed implementation of [`RecordStore`].
#[derive(Clone)]
pub struct SurrealRecordStore {
    db: Surreal<Any>,
    // Held for the duration of each write transaction
    writes: Arc<Mutex<()>>,
}

impl SurrealRecordStore {
    /// Create an in-memory instance for testing.
    ///
    /// Connects to `mem://`, selects the default namespace/database, and
    /// runs `init_schema`.
    pub async fn in_memory() -> crate::Result<Self> {
        Self::connect(&StoreConfig::in_memory()).await
    }

    /// Create from environment variables.
    ///
    /// See [`StoreConfig::from_env`] for the variables consulted.
    pub async fn from_env() -> crate::Result<Self> {
        Self::connect(&StoreConfig::from_env()).await
    }

    /// Connect with an explicit configuration and initialise the schema.
    #[instrument(skip(config), fields(endpoint = %config.endpoint, namespace = %config.namespace, database = %config.database))]
    pub async fn connect(config: &StoreConfig) -> crate::Result<Self> {
        if config.is_local_path() {
            let path = config
                .endpoint
                .split_once("://")
                .map(|(_, path)| path)
                .unwrap_or_default();
            std::fs::create_dir_all(path).map_err(|e| {
                StateError::Connection(format!(
                    "Failed to create database directory {}: {}",
                    path, e
                ))
            })?;
        }

        let db = surrealdb::engine::any::connect(config.endpoint.as_str())
            .await
            .map_err(|e| {
                StateError::Connection(format!("Failed to connect to {}: {}", config.endpoint, e))
            })?;

        if let Some(credentials) = &config.credentials {
            if credentials.is_root {
                db.signin(Root {
                    username: &credentials.username,
                    password: &credentials.password,
                })
                .await
                .map_err(|e| StateError::Connection(format!("Root auth failed: {e}")))?;
            } else {
                db.signin(Database {
                    namespace: &config.namespace,
                    database: &config.database,
                    username: &credentials.username,
                    password: &credentials.password,
                })
                .await
                .map_err(|e| StateError::Connection(format!("DB auth failed: {e}")))?;
            }
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| StateError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;

        info!(endpoint = %config.endpoint, "SurrealRecordStore connected");
        Ok(Self {
            db,
            writes: Arc::new(Mutex::new(())),
        })
    }
}

#[async_trait]
impl RecordStore for SurrealRecordStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Ok(None);
        }
        let row: Option<StateRow> = self.db.select((STATE_TABLE, key.to_string())).await?;
        row.map(|r| r.decode_value()).transpose()
    }

    async fn put(&self, key: &str, value: Vec<u8>, stamp: &TxStamp) -> StorageResult<()> {
        check_key(key)?;
        debug!(key = %key, tx_id = %stamp.tx_id, bytes = value.len(), "put");

        let _write = self.writes.lock().await;
        self.db
            .query(PUT_SQL)
            .bind(("key", key.to_string()))
            .bind(("value", encode(&value)))
            .bind(("tx_id", stamp.tx_id.clone()))
            .bind(("timestamp", stamp.timestamp))
            .await?
            .check()?;

        Ok(())
    }

    async fn delete(&self, key: &str, stamp: &TxStamp) -> StorageResult<()> {
        check_key(key)?;
        debug!(key = %key, tx_id = %stamp.tx_id, "delete");

        let _write = self.writes.lock().await;
        self.db
            .query(DELETE_SQL)
            .bind(("key", key.to_string()))
            .bind(("tx_id", stamp.tx_id.clone()))
            .bind(("timestamp", stamp.timestamp))
            .await?
            .check()?;

        Ok(())
    }

    async fn history_of(&self, key: &str) -> StorageResult<Vec<KeyModification>> {
        if key.is_empty() {
            return Ok(Vec::new());
        }

        let mut res = self
            .db
            .query(HISTORY_SQL)
            .bind(("key", key.to_string()))
            .await?;

        let rows: Vec<HistoryRow> = res.take(0)?;
        debug!(key = %key, table = HISTORY_TABLE, entries = rows.len(), "history read");

        rows.into_iter().map(HistoryRow::into_modification).collect()
    }
}

impl std::fmt::Debug for SurrealRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrealRecordStore").finish_non_exhaustive()
    }
}
