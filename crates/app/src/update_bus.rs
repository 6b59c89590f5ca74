//! In-process update bus backed by a tokio broadcast channel.
//!
//! Entities do not report state to the host directly. They publish an
//! [`EntityUpdate`] naming themselves, and the host re-reads the entity's
//! properties on receipt.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// A request to refresh one entity's host-visible state.
#[derive(Debug, Clone)]
pub struct EntityUpdate {
    /// Unique id of the entity whose state should be re-read.
    pub unique_id: String,
    /// When the refresh was requested.
    pub at: DateTime<Utc>,
}

/// In-process update bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the update is simply dropped).
pub struct InProcessUpdateBus {
    sender: broadcast::Sender<EntityUpdate>,
}

impl InProcessUpdateBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to refresh requests published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntityUpdate> {
        self.sender.subscribe()
    }

    /// A cheaply cloneable publishing handle for entities to hold.
    #[must_use]
    pub fn handle(&self) -> UpdateHandle {
        UpdateHandle {
            sender: self.sender.clone(),
        }
    }
}

/// Publishing side of the bus.
#[derive(Debug, Clone)]
pub struct UpdateHandle {
    sender: broadcast::Sender<EntityUpdate>,
}

impl UpdateHandle {
    /// Request a state refresh for `unique_id`.
    pub fn schedule_update(&self, unique_id: &str) {
        tracing::trace!(unique_id, "state refresh requested");
        // send fails only when there are zero receivers — the update is
        // dropped, which is fine.
        let _ = self.sender.send(EntityUpdate {
            unique_id: unique_id.to_string(),
            at: Utc::now(),
        });
    }
}
