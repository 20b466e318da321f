//! KYC-State: Record Store backends for the KYC ledger
//!
//! This crate is the persistence layer underneath the KYC lifecycle engine.
//! It exposes a transactional key-value contract whose every write is also
//! appended to a per-key change log, so prior states stay recoverable.
//!
//! ## Layer 0 - Data/Persistence
//!
//! Focus: atomic single-key writes, last-writer-wins overwrites, ordered
//! audit history.
//!
//! ## Key Components
//!
//! - `RecordStore`: The backend-agnostic store contract
//! - `MemoryRecordStore`: In-process implementation (see [`fakes`])
//! - `SurrealRecordStore`: SurrealDB implementation (world state + history tables)
//! - `StoreConfig`: Connection settings resolved from the environment

mod config;
mod error;
pub mod fakes;
mod migrations;
pub mod record_store;
mod schema;
pub mod surreal_store;

pub use config::{StoreConfig, DEFAULT_DATABASE, DEFAULT_LOCAL_PATH, DEFAULT_NAMESPACE};
pub use error::{StateError, StorageError};
pub use fakes::MemoryRecordStore;
pub use migrations::init_schema;
pub use record_store::{KeyModification, RecordStore, StorageResult, TxStamp};
pub use surreal_store::SurrealRecordStore;

/// Result type for store setup operations
pub type Result<T> = std::result::Result<T, StateError>;
