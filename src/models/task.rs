//! Task Models
//!
//! Tasks are the primary entity of the engine. A task is identified by the
//! (project_id, task_number) pair, which is globally unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite task identity: tasks are numbered per project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId {
    pub project_id: String,
    pub task_number: u64,
}

impl TaskId {
    /// Create a new task id
    pub fn new(project_id: impl Into<String>, task_number: u64) -> Self {
        Self {
            project_id: project_id.into(),
            task_number,
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.project_id, self.task_number)
    }
}

/// A task as served by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Owning project
    pub project_id: String,
    /// Number within the project; (project_id, task_number) is the identity
    pub task_number: u64,
    /// Short task title
    pub title: String,
    /// Longer free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical or dynamically-parameterized StatusID string
    pub status: String,
    /// Assigned agent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Archived tasks are hidden unless explicitly requested
    #[serde(default)]
    pub archived: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (RFC 3339)
    pub updated_at: DateTime<Utc>,
    /// Parent task, if this is a subtask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,
    /// Tasks this task depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// The composite identity of this task
    pub fn id(&self) -> TaskId {
        TaskId::new(self.project_id.clone(), self.task_number)
    }
}

/// Payload for creating a task. The server assigns the task number,
/// timestamps, and the default status when none is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,
}

impl NewTask {
    /// Create a minimal task payload
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// All-optional task patch. `agent_id` is double-optional: `Some(None)`
/// explicitly unassigns, `None` leaves the assignment untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl TaskPatch {
    /// A patch that only changes the status
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Apply this patch to a task in place (the optimistic half of an edit;
    /// the server-confirmed entity replaces the result later)
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = &self.status {
            task.status = status.clone();
        }
        if let Some(agent_id) = &self.agent_id {
            task.agent_id = agent_id.clone();
        }
        if let Some(archived) = self.archived {
            task.archived = archived;
        }
        task.updated_at = Utc::now();
    }
}
