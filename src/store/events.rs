//! Store Event Bus
//!
//! Explicit message passing between stores. A store that deletes an entity
//! other stores reference publishes an event here; subscribed stores apply it
//! through their own actions. No store ever mutates another store directly.

use tokio::sync::broadcast;

/// Default event channel capacity
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Cross-store notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A project was removed server-side; dependent caches drop its tasks
    ProjectRemoved { project_id: String },
    /// An agent was removed; tasks assigned to it become unassigned
    AgentRemoved { agent_id: String },
}

/// Broadcast bus for [`StoreEvent`]s. Cheap to clone; every clone publishes
/// to the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        if let Err(broadcast::error::SendError(event)) = self.tx.send(event) {
            tracing::debug!(?event, "store event had no subscribers");
        }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
