//! Lifecycle notifications.
//!
//! Each successful mutating operation publishes exactly one [`KycEvent`]
//! after its write has been accepted by the record store. Publishing is
//! fire-and-forget: delivery is owned by the channel, not by the engine.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Name of a lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycEventName {
    #[serde(rename = "KYCCreated")]
    Created,
    #[serde(rename = "KYCVerified")]
    Verified,
    #[serde(rename = "KYCExpired")]
    Expired,
}

impl KycEventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycEventName::Created => "KYCCreated",
            KycEventName::Verified => "KYCVerified",
            KycEventName::Expired => "KYCExpired",
        }
    }
}

impl std::fmt::Display for KycEventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named notification carrying the canonical serialized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycEvent {
    pub name: KycEventName,
    /// Transaction that produced the event.
    pub tx_id: String,
    /// Canonical JSON of the record, byte-identical to the stored value.
    pub payload: String,
}

/// Outbound notification channel.
pub trait EventPublisher: Send + Sync {
    /// Hand an event to the channel. Must not block or fail the caller.
    fn publish(&self, event: KycEvent);
}

/// Publisher backed by a `tokio::sync::broadcast` channel.
///
/// Subscribers that fall behind by more than `capacity` events observe a
/// `Lagged` error on their receiver; the engine is never affected.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<KycEvent>,
}

impl BroadcastPublisher {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KycEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: KycEvent) {
        let name = event.name;
        if self.sender.send(event).is_err() {
            debug!(event = %name, "no subscribers, notification dropped");
        }
    }
}

/// Publisher that keeps every event in memory, in publish order.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<KycEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events published so far.
    pub fn events(&self) -> Vec<KycEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<KycEvent> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<KycEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventPublisher for MemoryEventLog {
    fn publish(&self, event: KycEvent) {
        self.lock().push(event);
    }
}
