//! Grouped View Projections
//!
//! Partitions an already-filtered task set into named groups, each
//! independently sorted by the shared comparator. Status grouping follows the
//! taxonomy's preferred sequence; project/agent grouping is two-level, with
//! active/completed subgroups inside each top-level group.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::is_completed_status;
use crate::models::{SortField, SortOptions, Task};
use crate::status::resolver::preferred_display_order;
use crate::status::{get_displayable_status, status_sort_rank};

/// Grouping axis for the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Status,
    Project,
    Agent,
}

/// A grouped view-model over tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GroupedTasks {
    Status { groups: Vec<StatusGroup> },
    Project { groups: Vec<EntityGroup> },
    Agent { groups: Vec<EntityGroup> },
}

impl GroupedTasks {
    /// Number of top-level groups
    pub fn len(&self) -> usize {
        match self {
            Self::Status { groups } => groups.len(),
            Self::Project { groups } | Self::Agent { groups } => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One status bucket, keyed by resolved display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusGroup {
    pub status: String,
    pub tasks: Vec<Task>,
}

/// One project/agent bucket. The two-level shape (top-level group split into
/// active/completed sections) is what the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityGroup {
    /// `None` for the trailing "Unassigned" bucket
    pub key: Option<String>,
    /// Raw entity id except for the "Unassigned" bucket; tasks carry only
    /// ids, so mapping to display names is the presentation layer's job
    /// (it has the project/agent stores)
    pub label: String,
    pub active: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Shared comparator for every group and for client-side cache sorting.
/// Status ordering follows the taxonomy's preferred sequence; ties always
/// break on the task identity so derived views are deterministic.
pub fn compare_tasks(a: &Task, b: &Task, sort: &SortOptions) -> Ordering {
    let ordering = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Status => status_sort_rank(&a.status)
            .cmp(&status_sort_rank(&b.status))
            .then_with(|| {
                get_displayable_status(&a.status, None)
                    .display_name
                    .cmp(&get_displayable_status(&b.status, None).display_name)
            }),
        SortField::TaskNumber => a.task_number.cmp(&b.task_number),
    };
    let ordering = match sort.direction {
        crate::models::SortDirection::Asc => ordering,
        crate::models::SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id().cmp(&b.id()))
}

/// Group tasks by resolved status. Canonical statuses appear in the preferred
/// sequence (To Do → In Progress → Blocked → Pending Verification → Pending
/// Handoff → Cancelled → Completed → Failed); unrecognized statuses are
/// appended alphabetically by display name. Empty groups are omitted.
pub fn group_by_status(tasks: &[Task], sort: &SortOptions) -> GroupedTasks {
    let mut buckets: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        let display = get_displayable_status(&task.status, None).display_name;
        buckets.entry(display).or_default().push(task.clone());
    }

    let mut groups = Vec::with_capacity(buckets.len());
    for preferred in preferred_display_order() {
        if let Some(mut bucket) = buckets.remove(preferred) {
            bucket.sort_by(|a, b| compare_tasks(a, b, sort));
            groups.push(StatusGroup {
                status: preferred.to_string(),
                tasks: bucket,
            });
        }
    }
    // BTreeMap iteration gives the alphabetical tail
    for (status, mut bucket) in buckets {
        bucket.sort_by(|a, b| compare_tasks(a, b, sort));
        groups.push(StatusGroup {
            status,
            tasks: bucket,
        });
    }

    GroupedTasks::Status { groups }
}

/// Group tasks by project id, alphabetically. Every task carries a project,
/// so there is no unassigned bucket here.
pub fn group_by_project(tasks: &[Task], sort: &SortOptions) -> GroupedTasks {
    let mut buckets: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        buckets
            .entry(task.project_id.clone())
            .or_default()
            .push(task.clone());
    }

    let groups = buckets
        .into_iter()
        .map(|(project_id, bucket)| split_sections(Some(project_id.clone()), project_id, bucket, sort))
        .collect();
    GroupedTasks::Project { groups }
}

/// Group tasks by assigned agent, alphabetically, with a trailing
/// "Unassigned" bucket when any task has no agent.
pub fn group_by_agent(tasks: &[Task], sort: &SortOptions) -> GroupedTasks {
    let mut buckets: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    let mut unassigned: Vec<Task> = Vec::new();
    for task in tasks {
        match &task.agent_id {
            Some(agent_id) => buckets
                .entry(agent_id.clone())
                .or_default()
                .push(task.clone()),
            None => unassigned.push(task.clone()),
        }
    }

    let mut groups: Vec<EntityGroup> = buckets
        .into_iter()
        .map(|(agent_id, bucket)| split_sections(Some(agent_id.clone()), agent_id, bucket, sort))
        .collect();
    if !unassigned.is_empty() {
        groups.push(split_sections(None, "Unassigned".to_string(), unassigned, sort));
    }
    GroupedTasks::Agent { groups }
}

/// Dispatch on the grouping axis.
pub fn group_tasks(tasks: &[Task], group_by: GroupBy, sort: &SortOptions) -> GroupedTasks {
    match group_by {
        GroupBy::Status => group_by_status(tasks, sort),
        GroupBy::Project => group_by_project(tasks, sort),
        GroupBy::Agent => group_by_agent(tasks, sort),
    }
}

fn split_sections(
    key: Option<String>,
    label: String,
    bucket: Vec<Task>,
    sort: &SortOptions,
) -> EntityGroup {
    let (mut completed, mut active): (Vec<Task>, Vec<Task>) = bucket
        .into_iter()
        .partition(|t| is_completed_status(&t.status));
    active.sort_by(|a, b| compare_tasks(a, b, sort));
    completed.sort_by(|a, b| compare_tasks(a, b, sort));
    EntityGroup {
        key,
        label,
        active,
        completed,
    }
}
