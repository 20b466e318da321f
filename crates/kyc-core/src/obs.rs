//! Structured observability hooks for KYC lifecycle operations.
//!
//! This module provides:
//! - Operation-scoped tracing spans (`record_span`, `RecordSpan` RAII guard)
//! - Emission functions for writes, rejected preconditions and history reads
//!
//! Events are emitted at `info!` level (filter with `RUST_LOG`).
//! For JSON output, initialise tracing with `init_tracing(true, ..)`.

use tracing::{debug, info, warn, Span};

use crate::domain::KycStatus;
use crate::events::KycEventName;

/// Span covering one lifecycle operation on one record.
///
/// Async callers attach it with `tracing::Instrument` so the future stays
/// `Send`.
///
/// ```ignore
/// async { /* ... */ }.instrument(record_span("verify", "kyc1")).await
/// // All tracing calls inside are associated with op = "verify", kyc_id = "kyc1"
/// ```
pub fn record_span(operation: &str, kyc_id: &str) -> Span {
    tracing::info_span!("kyc.op", op = %operation, kyc_id = %kyc_id)
}

/// RAII guard that enters a [`record_span`] for synchronous code.
pub struct RecordSpan {
    _span: tracing::span::EnteredSpan,
}

impl RecordSpan {
    /// Create and enter a span tagged with the operation and record id.
    pub fn enter(operation: &str, kyc_id: &str) -> Self {
        Self {
            _span: record_span(operation, kyc_id).entered(),
        }
    }
}

/// Emit event: a record write was accepted and its notification published.
///
/// ```ignore
/// emit_record_written(KycEventName::Created, "kyc1", KycStatus::Pending, "Org1MSP", "tx-1");
/// // logs: event=KYCCreated kyc_id=kyc1 status=PENDING msp_id=Org1MSP tx_id=tx-1
/// ```
pub fn emit_record_written(
    event: KycEventName,
    kyc_id: &str,
    status: KycStatus,
    msp_id: &str,
    tx_id: &str,
) {
    info!(
        event = %event,
        kyc_id = %kyc_id,
        status = %status,
        msp_id = %msp_id,
        tx_id = %tx_id,
    );
}

/// Emit event: an operation was refused before any write (warning level).
pub fn emit_precondition_failed(operation: &str, kyc_id: &str, code: &str) {
    warn!(event = "kyc.precondition_failed", op = %operation, kyc_id = %kyc_id, code = %code);
}

/// Emit event: audit history projected for a record.
pub fn emit_history_read(kyc_id: &str, entries: usize) {
    debug!(event = "kyc.history_read", kyc_id = %kyc_id, entries = entries);
}
