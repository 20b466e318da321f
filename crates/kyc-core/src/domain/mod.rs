//! KYC domain model: records, statuses, decisions, history entries, errors.

pub mod decision;
pub mod error;
pub mod history;
pub mod record;

pub use decision::Decision;
pub use error::{KycError, Result};
pub use history::KycHistoryEntry;
pub use record::{document_digest, KycApplication, KycRecord, KycStatus};
