//! Taskboard Sync Engine
//!
//! Client-side synchronization layer for a task management service.
//! It includes:
//! - Per-entity stores with optimistic mutation and rollback
//! - A total status taxonomy resolver (static table + dynamic pattern rules)
//! - A pure filter/sort/group view pipeline
//! - A background polling loop that reconciles caches with the server
//! - Versioned JSON persistence for restoring state across restarts

pub mod api;
pub mod models;
pub mod poll;
pub mod status;
pub mod storage;
pub mod store;
pub mod utils;
pub mod view;

// Re-export the surface an embedding application works with
pub use api::{ApiError, ApiResult, HttpApi, TaskQuery};
pub use models::{
    Agent, AgentPatch, Mandate, MandatePatch, NewAgent, NewMandate, NewProject, NewTask,
    NewTemplate, Project, ProjectPatch, SortDirection, SortField, SortOptions, StatusFilter, Task,
    TaskFilters, TaskId, TaskPatch, Template,
};
pub use poll::{Pollable, PollingLoop};
pub use status::{
    get_displayable_status, get_status_attributes, DisplayableStatus, StatusAttributes,
    StatusCategory,
};
pub use storage::StatePersistence;
pub use store::{
    AgentStore, EventBus, MandateStore, ProjectStore, StoreEvent, TaskStore, TemplateStore,
};
pub use utils::error::{MutationKind, StoreError, StoreResult};
pub use view::{group_tasks, GroupBy, GroupedTasks};
