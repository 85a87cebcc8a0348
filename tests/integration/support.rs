//! Shared in-memory task API for integration flows.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use taskboard_sync::{ApiError, ApiResult, NewTask, Task, TaskId, TaskPatch, TaskQuery};

/// In-memory `TaskApi` that records the last list query and evaluates the
/// status meta-buckets the way the server does.
#[derive(Default)]
pub struct RecordingTaskApi {
    pub tasks: Mutex<Vec<Task>>,
    pub last_query: Mutex<Option<TaskQuery>>,
    pub fail: Mutex<bool>,
    next_number: Mutex<u64>,
}

impl RecordingTaskApi {
    pub fn failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn seed(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    pub fn last_query(&self) -> Option<TaskQuery> {
        self.last_query.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if *self.fail.lock().unwrap() {
            Err(ApiError::Status {
                status: 500,
                message: "simulated failure".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn matches(task: &Task, query: &TaskQuery) -> bool {
        if let Some(status) = &query.status {
            let terminal = taskboard_sync::view::is_completed_status(&task.status);
            let ok = match status.as_str() {
                "active" => !terminal,
                "completed" => terminal,
                exact => {
                    taskboard_sync::status::normalize_status_id(&task.status)
                        == taskboard_sync::status::normalize_status_id(exact)
                }
            };
            if !ok {
                return false;
            }
        }
        if let Some(project_id) = &query.project_id {
            if task.project_id != *project_id {
                return false;
            }
        }
        if let Some(agent_id) = &query.agent_id {
            if task.agent_id.as_deref() != Some(agent_id.as_str()) {
                return false;
            }
        }
        if !query.include_archived && task.archived {
            return false;
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let haystack = format!(
                "{} {}",
                task.title.to_lowercase(),
                task.description.as_deref().unwrap_or("").to_lowercase()
            );
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl taskboard_sync::api::TaskApi for RecordingTaskApi {
    async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<Task>> {
        self.check()?;
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| Self::matches(t, query))
            .cloned()
            .collect())
    }

    async fn create_task(&self, new: &NewTask) -> ApiResult<Task> {
        self.check()?;
        let mut number = self.next_number.lock().unwrap();
        *number += 1;
        let now = Utc::now();
        let task = Task {
            project_id: new.project_id.clone(),
            task_number: *number,
            title: new.title.clone(),
            description: new.description.clone(),
            status: new.status.clone().unwrap_or_else(|| "TO_DO".to_string()),
            agent_id: new.agent_id.clone(),
            archived: false,
            created_at: now,
            updated_at: now,
            parent: new.parent.clone(),
            dependencies: vec![],
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        self.check()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id() == *id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "not found".to_string(),
            })?;
        patch.apply(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        self.check()?;
        self.tasks.lock().unwrap().retain(|t| t.id() != *id);
        Ok(())
    }
}

/// A seeded task with sensible defaults for flow tests.
pub fn seeded_task(project: &str, number: u64, status: &str) -> Task {
    let now = Utc::now();
    Task {
        project_id: project.to_string(),
        task_number: number,
        title: format!("Task {number}"),
        description: None,
        status: status.to_string(),
        agent_id: None,
        archived: false,
        created_at: now,
        updated_at: now,
        parent: None,
        dependencies: vec![],
    }
}
