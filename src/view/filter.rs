//! Filter Predicate
//!
//! Pure, total predicate over a task and a fully-populated filter state.
//! Never fails, regardless of optional fields being absent.

use crate::models::{StatusFilter, Task, TaskFilters};
use crate::status::{classify_status, normalize_status_id};

/// Whether a status counts as "completed" for meta-bucket purposes: the
/// resolved status is terminal. Statuses outside the taxonomy count as active.
pub fn is_completed_status(raw: &str) -> bool {
    classify_status(raw).map(|(_, terminal)| terminal).unwrap_or(false)
}

fn matches_status(status: &str, filter: &StatusFilter) -> bool {
    match filter {
        StatusFilter::Any => true,
        StatusFilter::Active => !is_completed_status(status),
        StatusFilter::Completed => is_completed_status(status),
        StatusFilter::Exact(wanted) => normalize_status_id(status) == normalize_status_id(wanted),
    }
}

/// Combined filter predicate: archived flag, relational equality
/// (project/agent), status bucket, and case-insensitive substring search over
/// title + description.
pub fn apply_all_filters(task: &Task, filters: &TaskFilters) -> bool {
    if task.archived && !filters.include_archived {
        return false;
    }
    if let Some(project_id) = &filters.project_id {
        if task.project_id != *project_id {
            return false;
        }
    }
    if let Some(agent_id) = &filters.agent_id {
        if task.agent_id.as_deref() != Some(agent_id.as_str()) {
            return false;
        }
    }
    if !matches_status(&task.status, &filters.status) {
        return false;
    }
    let needle = filters.search.trim().to_lowercase();
    if !needle.is_empty() {
        let in_title = task.title.to_lowercase().contains(&needle);
        let in_description = task
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&needle))
            .unwrap_or(false);
        if !in_title && !in_description {
            return false;
        }
    }
    true
}
