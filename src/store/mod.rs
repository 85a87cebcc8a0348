//! Entity Stores
//!
//! One store per entity type, each a constructor-injected instance built on
//! the shared [`core::StoreCore`] lifecycle and the optimistic
//! mutation/rollback discipline. Stores communicate only through the
//! [`events::EventBus`].

pub mod agents;
pub mod core;
pub mod events;
pub mod mandates;
pub mod projects;
pub mod tasks;
pub mod templates;

pub use agents::AgentStore;
pub use core::StoreCore;
pub use events::{EventBus, StoreEvent};
pub use mandates::MandateStore;
pub use projects::ProjectStore;
pub use tasks::TaskStore;
pub use templates::TemplateStore;
