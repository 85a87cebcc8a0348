//! Data Models
//!
//! Entity shapes exchanged with the remote API, plus filter/sort option types.

pub mod agent;
pub mod filters;
pub mod mandate;
pub mod project;
pub mod task;
pub mod template;

pub use agent::{Agent, AgentPatch, NewAgent};
pub use filters::{SortDirection, SortField, SortOptions, StatusFilter, TaskFilters};
pub use mandate::{Mandate, MandatePatch, NewMandate};
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Task, TaskId, TaskPatch};
pub use template::{NewTemplate, Template};
