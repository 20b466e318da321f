//! Error taxonomy for KYC lifecycle operations.

use kyc_state::StorageError;

/// KYC lifecycle errors.
///
/// Every variant carries a stable machine-readable code (see [`KycError::code`]).
#[derive(Debug, thiserror::Error)]
pub enum KycError {
    #[error("KYC record {id} does not exist")]
    NotFound { id: String },

    #[error("KYC record {id} already exists")]
    AlreadyExists { id: String },

    #[error("Invalid decision: {decision}. Must be APPROVE or REJECT")]
    InvalidDecision { decision: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl KycError {
    pub(crate) fn not_found(id: &str) -> Self {
        KycError::NotFound { id: id.to_string() }
    }

    pub(crate) fn already_exists(id: &str) -> Self {
        KycError::AlreadyExists { id: id.to_string() }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            KycError::NotFound { .. } => "KYC_NOT_FOUND",
            KycError::AlreadyExists { .. } => "KYC_ALREADY_EXISTS",
            KycError::InvalidDecision { .. } => "INVALID_DECISION",
            KycError::Serialization(_) => "SERIALIZATION_FAILED",
            KycError::Storage(_) => "STORAGE_FAILURE",
        }
    }

    /// Whether the error reflects a violated caller precondition rather
    /// than a storage or decoding fault.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            KycError::NotFound { .. }
                | KycError::AlreadyExists { .. }
                | KycError::InvalidDecision { .. }
        )
    }
}

/// Result type for KYC lifecycle operations.
pub type Result<T> = std::result::Result<T, KycError>;
