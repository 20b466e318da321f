//! The KYC lifecycle engine.
//!
//! Every mutating operation follows the same linear shape:
//! read current state, validate, write a complete replacement record,
//! then publish one notification carrying the stored bytes. A failed
//! precondition returns before anything is written or published.
//!
//! Concurrent writers to the same id are not coordinated here: the last
//! write accepted by the [`RecordStore`] becomes the current record.

use std::sync::Arc;

use kyc_state::RecordStore;
use tracing::{debug, Instrument};

use crate::context::TxContext;
use crate::domain::{
    Decision, KycApplication, KycError, KycHistoryEntry, KycRecord, KycStatus, Result,
};
use crate::events::{EventPublisher, KycEvent, KycEventName};
use crate::metrics::METRICS;
use crate::obs::{self, record_span};

/// Lifecycle engine over a record store and a notification channel.
#[derive(Clone)]
pub struct KycContract {
    store: Arc<dyn RecordStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl std::fmt::Debug for KycContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KycContract").finish_non_exhaustive()
    }
}

impl KycContract {
    pub fn new(store: Arc<dyn RecordStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }

    /// The record store this engine writes to.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Register a new application as a `PENDING` record credited to the caller.
    pub async fn create_kyc(
        &self,
        ctx: &TxContext,
        application: KycApplication,
    ) -> Result<KycRecord> {
        let span = record_span("create", &application.id);
        async move {
            if self.store.contains(&application.id).await? {
                let err = KycError::already_exists(&application.id);
                return Err(refused("create", &application.id, err));
            }

            let record = KycRecord::pending(application, &ctx.msp_id, ctx.timestamp);
            self.commit(ctx, KycEventName::Created, &record).await?;
            Ok(record)
        }
        .instrument(span)
        .await
    }

    /// Record an approval or rejection of an existing record.
    ///
    /// `decision` matches `APPROVE` or `REJECT` in any letter case. Records in
    /// any status may be re-decided.
    pub async fn verify_kyc(&self, ctx: &TxContext, id: &str, decision: &str) -> Result<KycRecord> {
        async {
            let existing = self.require("verify", id).await?;
            let decision: Decision =
                decision.parse().map_err(|err| refused("verify", id, err))?;

            let record = existing.transitioned(decision.status(), &ctx.msp_id, ctx.timestamp);
            self.commit(ctx, KycEventName::Verified, &record).await?;
            Ok::<_, KycError>(record)
        }
        .instrument(record_span("verify", id))
        .await
    }

    /// Current record under `id`.
    pub async fn get_kyc(&self, id: &str) -> Result<KycRecord> {
        self.require("get", id)
            .instrument(record_span("get", id))
            .await
    }

    /// Force an existing record to `EXPIRED`, whatever its current status.
    pub async fn expire_kyc(&self, ctx: &TxContext, id: &str) -> Result<KycRecord> {
        async {
            let existing = self.require("expire", id).await?;
            let record = existing.transitioned(KycStatus::Expired, &ctx.msp_id, ctx.timestamp);
            self.commit(ctx, KycEventName::Expired, &record).await?;
            Ok::<_, KycError>(record)
        }
        .instrument(record_span("expire", id))
        .await
    }

    /// Whether a non-empty record is stored under `id`.
    ///
    /// Only a failing record store produces an error.
    pub async fn kyc_exists(&self, id: &str) -> Result<bool> {
        Ok(self.store.contains(id).await?)
    }

    /// Every write and deletion ever recorded under `id`, oldest first.
    pub async fn get_kyc_history(&self, id: &str) -> Result<Vec<KycHistoryEntry>> {
        async {
            let modifications = self.store.history_of(id).await?;
            if modifications.is_empty() {
                return Err(refused("history", id, KycError::not_found(id)));
            }

            let entries = modifications
                .into_iter()
                .map(KycHistoryEntry::try_from)
                .collect::<Result<Vec<_>>>()?;
            obs::emit_history_read(id, entries.len());
            Ok(entries)
        }
        .instrument(record_span("history", id))
        .await
    }

    /// Load and decode the current record, treating an empty value as absent.
    async fn require(&self, operation: &str, id: &str) -> Result<KycRecord> {
        match self.store.get(id).await? {
            Some(bytes) if !bytes.is_empty() => KycRecord::from_slice(&bytes),
            _ => Err(refused(operation, id, KycError::not_found(id))),
        }
    }

    /// Persist `record` under its id and publish the matching notification.
    async fn commit(&self, ctx: &TxContext, name: KycEventName, record: &KycRecord) -> Result<()> {
        let payload = record.to_canonical_json()?;
        self.store
            .put(&record.id, payload.clone().into_bytes(), &ctx.stamp())
            .await?;
        debug!(kyc_id = %record.id, bytes = payload.len(), "record stored");

        self.publisher.publish(KycEvent {
            name,
            tx_id: ctx.tx_id.clone(),
            payload,
        });

        obs::emit_record_written(name, &record.id, record.status, &ctx.msp_id, &ctx.tx_id);
        METRICS.record_written(record.status);
        Ok(())
    }
}

fn refused(operation: &str, id: &str, err: KycError) -> KycError {
    obs::emit_precondition_failed(operation, id, err.code());
    METRICS.inc_precondition_failures();
    err
}
