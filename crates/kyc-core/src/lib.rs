//! KYC Core Library
//!
//! The lifecycle engine for Know-Your-Customer records on an append-only
//! ledger: registration, verification decisions, expiry and audit history.
//! Re-exports the store contract from `kyc-state` so embedders need a
//! single dependency.
//!
//! ## Embedding
//!
//! A host process installs logging once, connects a store, and drives the
//! engine with a [`TxContext`] per transaction:
//!
//! ```ignore
//! kyc_core::init_tracing_from_env();
//!
//! let store = Arc::new(SurrealRecordStore::from_env().await?);
//! let events = Arc::new(BroadcastPublisher::default());
//! let contract = KycContract::new(store, events.clone());
//!
//! let ctx = TxContext::for_org("org1.example.com", ledger_time);
//! contract.create_kyc(&ctx, application).await?;
//! ```

pub mod context;
pub mod contract;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod obs;
pub mod telemetry;

pub use context::{msp_id_for_org, TxContext};
pub use contract::KycContract;

pub use domain::{
    document_digest, Decision, KycApplication, KycError, KycHistoryEntry, KycRecord, KycStatus,
    Result,
};

pub use events::{BroadcastPublisher, EventPublisher, KycEvent, KycEventName, MemoryEventLog};

pub use telemetry::{init_tracing, init_tracing_from_env, LogSettings};

pub use kyc_state::{
    KeyModification, MemoryRecordStore, RecordStore, StorageError, StoreConfig,
    SurrealRecordStore, TxStamp,
};
