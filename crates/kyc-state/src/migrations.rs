//! SurrealDB schema migrations and initialization
//!
//! This module sets up the world-state and change-log tables with the
//! constraints the record store relies on.

use crate::error::StateError;
use crate::Result;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

/// Initialize all KYC ledger tables in SurrealDB
///
/// Called on every connection. Safe to call multiple times (idempotent).
pub async fn init_schema(db: &Surreal<Any>) -> Result<()> {
    info!("Initializing KYC ledger schema");

    init_state_table(db).await?;
    init_history_table(db).await?;

    info!("KYC ledger schema initialization complete");
    Ok(())
}

/// Initialize `kyc_state` table
///
/// Schema:
/// ```text
/// TABLE kyc_state {
///   id:         RECORD (kyc_state:<key>)
///   key:        STRING (unique)
///   value:      STRING (hex-encoded bytes)
///   tx_id:      STRING
///   timestamp:  INT (seconds)
/// }
/// ```
///
/// Rows are overwritten in place (last writer wins) and removed on delete.
async fn init_state_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing kyc_state table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS kyc_state
            SCHEMALESS
            PERMISSIONS
                FOR create FULL,
                FOR select FULL,
                FOR update FULL,
                FOR delete FULL;

        DEFINE INDEX IF NOT EXISTS idx_state_key ON TABLE kyc_state COLUMNS key UNIQUE;
    "#;

    db.query(sql)
        .await
        .and_then(|res| res.check())
        .map_err(|e| StateError::SchemaSetup(format!("kyc_state: {e}")))?;
    info!("✓ kyc_state table initialized");
    Ok(())
}

/// Initialize `kyc_history` table
///
/// Schema:
/// ```text
/// TABLE kyc_history {
///   key:         STRING (indexed)
///   seq:         INT (1-indexed, monotonic per key)
///   tx_id:       STRING
///   timestamp:   INT (seconds)
///   is_deleted:  BOOL
///   value:       STRING? (hex-encoded bytes, NONE for deletions)
/// }
/// ```
///
/// Constraints:
/// - `(key, seq)` is unique, so two concurrent appends cannot claim one slot
/// - rows are never updated or deleted (append-only)
async fn init_history_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing kyc_history table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS kyc_history
            SCHEMALESS
            PERMISSIONS
                FOR create FULL,
                FOR select FULL,
                FOR update NONE,
                FOR delete NONE;

        DEFINE INDEX IF NOT EXISTS idx_history_key_seq ON TABLE kyc_history COLUMNS key, seq UNIQUE;

        DEFINE INDEX IF NOT EXISTS idx_history_tx_id ON TABLE kyc_history COLUMNS tx_id;
    "#;

    db.query(sql)
        .await
        .and_then(|res| res.check())
        .map_err(|e| StateError::SchemaSetup(format!("kyc_history: {e}")))?;
    info!("✓ kyc_history table initialized");
    Ok(())
}
