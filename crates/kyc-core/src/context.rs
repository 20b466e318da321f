//! Execution context threaded into every mutating lifecycle operation.
//!
//! The acting organization and the transaction timestamp come from the
//! environment that invokes the engine, never from operation arguments.

use chrono::Utc;
use kyc_state::TxStamp;
use uuid::Uuid;

/// Resolved caller identity and ledger time for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    /// Transaction identifier recorded in the change log.
    pub tx_id: String,
    /// Identifier of the acting organization (MSP id).
    pub msp_id: String,
    /// Transaction timestamp, seconds since the Unix epoch.
    pub timestamp: i64,
}

impl TxContext {
    /// Context with a fresh random transaction id.
    pub fn new(msp_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            tx_id: Uuid::new_v4().to_string(),
            msp_id: msp_id.into(),
            timestamp,
        }
    }

    /// Context stamped with the current wall-clock second.
    pub fn now(msp_id: impl Into<String>) -> Self {
        Self::new(msp_id, Utc::now().timestamp())
    }

    /// Context for an organization given by its domain name,
    /// e.g. `org1.example.com` acts as `Org1MSP`.
    pub fn for_org(org_domain: &str, timestamp: i64) -> Self {
        Self::new(msp_id_for_org(org_domain), timestamp)
    }

    /// Pin the transaction id (replays, deterministic tests).
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }

    /// Stamp under which the record store logs this transaction's writes.
    pub fn stamp(&self) -> TxStamp {
        TxStamp::new(self.tx_id.clone(), self.timestamp)
    }
}

/// MSP identifier for an organization domain: first label, capitalised,
/// suffixed with `MSP`.
pub fn msp_id_for_org(org_domain: &str) -> String {
    let base = org_domain.split('.').next().unwrap_or_default();
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => format!("{}{}MSP", first.to_uppercase(), chars.as_str()),
        None => "MSP".to_string(),
    }
}
