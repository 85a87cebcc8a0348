//! Filter/Sort/Group Pipeline
//!
//! Pure, pull-based view derivation over a store's cache. No store state is
//! touched here; stores and the presentation layer call in with the current
//! cache and filter/sort options.

pub mod filter;
pub mod group;

pub use filter::{apply_all_filters, is_completed_status};
pub use group::{
    compare_tasks, group_by_agent, group_by_project, group_by_status, group_tasks, EntityGroup,
    GroupBy, GroupedTasks, StatusGroup,
};
