//! Error types for kyc-state

use thiserror::Error;

/// Errors that can occur while establishing a store
#[derive(Error, Debug)]
pub enum StateError {
    /// Database connection error
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Database query error
    #[error("Database query failed: {0}")]
    Query(String),

    /// Schema setup error
    #[error("Schema setup failed: {0}")]
    SchemaSetup(String),
}

impl From<surrealdb::Error> for StateError {
    fn from(err: surrealdb::Error) -> Self {
        StateError::Query(err.to_string())
    }
}

/// Errors returned by [`crate::RecordStore`] operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying backend rejected or failed the operation
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// Keys must be non-empty
    #[error("record key must not be empty")]
    EmptyKey,

    /// Persisted bytes could not be decoded
    #[error("stored value for key {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl From<surrealdb::Error> for StorageError {
    fn from(err: surrealdb::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}
