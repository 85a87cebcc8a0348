//! Task Store
//!
//! Reactive task cache synchronized against the remote task API. Mutations
//! are optimistic: the cache is patched immediately, the remote call is
//! awaited, and on rejection the pre-action snapshot is restored exactly.
//! Authoritative fetches replace the cache wholesale; each carries a
//! monotonic token so a stale response can never clobber a newer one.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::{TaskApi, TaskQuery};
use crate::models::{NewTask, SortOptions, Task, TaskFilters, TaskId, TaskPatch};
use crate::poll::Pollable;
use crate::store::core::StoreCore;
use crate::store::events::StoreEvent;
use crate::storage::StatePersistence;
use crate::utils::error::{MutationKind, StoreError, StoreResult};
use crate::view::{apply_all_filters, compare_tasks};

/// Slice of task store state written to durable storage.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedTasks {
    tasks: Vec<Task>,
    filters: TaskFilters,
    sort: SortOptions,
}

/// Store for the task entity. Construct one per app (or per test) with an
/// injected API client; the cache is owned exclusively by the store and
/// mutated only through its actions.
pub struct TaskStore {
    core: StoreCore,
    tasks: Vec<Task>,
    filters: TaskFilters,
    sort: SortOptions,
    polling_error: Option<String>,
    fetch_epoch: u64,
    api: Arc<dyn TaskApi>,
    persistence: Option<StatePersistence>,
}

impl TaskStore {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            core: StoreCore::new(),
            tasks: Vec::new(),
            filters: TaskFilters::default(),
            sort: SortOptions::default(),
            polling_error: None,
            fetch_epoch: 0,
            api,
            persistence: None,
        }
    }

    /// Attach durable persistence, restoring any saved snapshot of the same
    /// version.
    pub fn with_persistence(mut self, persistence: StatePersistence) -> Self {
        if let Some(saved) = persistence.load::<PersistedTasks>() {
            self.tasks = saved.tasks;
            self.filters = saved.filters;
            self.sort = saved.sort;
        }
        self.persistence = Some(persistence);
        self
    }

    // Read surface

    /// The raw cache, in current sort order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The cache filtered through the view pipeline and sorted. Catches
    /// locally-mutated entities that no longer match the active filter
    /// without waiting for the next fetch.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let mut visible: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| apply_all_filters(t, &self.filters))
            .collect();
        let sort = self.sort;
        visible.sort_by(|a, b| compare_tasks(a, b, &sort));
        visible
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn sort_options(&self) -> &SortOptions {
        &self.sort
    }

    pub fn loading(&self) -> bool {
        self.core.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.core.error()
    }

    pub fn clear_error(&mut self) {
        self.core.clear_error();
    }

    pub fn polling_error(&self) -> Option<&str> {
        self.polling_error.as_deref()
    }

    pub fn clear_polling_error(&mut self) {
        self.polling_error = None;
    }

    // Actions

    /// Authoritative fetch for the current filter/sort state; replaces the
    /// cache wholesale.
    pub async fn fetch_tasks(&mut self) -> StoreResult<()> {
        self.core.begin();
        let token = self.begin_fetch();
        let result = match self.api.list_tasks(&self.query()).await {
            Ok(tasks) => {
                self.finish_fetch(token, tasks);
                Ok(())
            }
            Err(err) => Err(StoreError::fetch(err.to_string())),
        };
        let result = self.core.settle(result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    /// Create a task and merge the server-confirmed entity into the cache.
    pub async fn add_task(&mut self, new: NewTask) -> StoreResult<Task> {
        self.core.begin();
        if new.title.trim().is_empty() {
            return self
                .core
                .settle(Err(StoreError::validation("Task title must not be empty")));
        }
        if new.project_id.trim().is_empty() {
            return self
                .core
                .settle(Err(StoreError::validation("Task project must not be empty")));
        }
        let result = match self.api.create_task(&new).await {
            Ok(task) => {
                self.merge_confirmed(task.clone());
                Ok(task)
            }
            Err(err) => Err(StoreError::mutation(MutationKind::Create, err.to_string())),
        };
        let result = self.core.settle(result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    /// Optimistically patch a task, then confirm with the server. On
    /// rejection the pre-action entity is restored exactly.
    pub async fn edit_task(&mut self, id: &TaskId, patch: TaskPatch) -> StoreResult<Task> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown task: {id}"))));
        };
        let snapshot = self.tasks[pos].clone();
        patch.apply(&mut self.tasks[pos]);

        let result = match self.api.update_task(id, &patch).await {
            Ok(confirmed) => {
                if let Some(pos) = self.position(id) {
                    self.tasks[pos] = confirmed.clone();
                }
                self.sort_cache();
                Ok(confirmed)
            }
            Err(err) => {
                tracing::warn!(task = %id, "rolling back optimistic edit: {err}");
                match self.position(id) {
                    Some(pos) => self.tasks[pos] = snapshot,
                    None => self.merge_confirmed(snapshot),
                }
                Err(StoreError::mutation(MutationKind::Update, err.to_string()))
            }
        };
        let result = self.core.settle(result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    /// Optimistically remove a task; a rejected delete restores it at its
    /// prior position.
    pub async fn remove_task(&mut self, id: &TaskId) -> StoreResult<()> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown task: {id}"))));
        };
        let snapshot = self.tasks.remove(pos);

        let result = match self.api.delete_task(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(task = %id, "rolling back optimistic removal: {err}");
                let at = pos.min(self.tasks.len());
                self.tasks.insert(at, snapshot);
                Err(StoreError::mutation(MutationKind::Delete, err.to_string()))
            }
        };
        let result = self.core.settle(result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    /// Best-effort bulk delete: each id applies the optimistic/rollback
    /// discipline independently. Failed and unknown ids are reported together;
    /// succeeded ids stand.
    pub async fn bulk_delete_tasks(&mut self, ids: &[TaskId]) -> StoreResult<()> {
        self.core.begin();
        let mut failed: Vec<String> = Vec::new();
        let mut changed = false;
        for id in ids {
            let Some(pos) = self.position(id) else {
                failed.push(id.to_string());
                continue;
            };
            let snapshot = self.tasks.remove(pos);
            match self.api.delete_task(id).await {
                Ok(()) => changed = true,
                Err(err) => {
                    tracing::warn!(task = %id, "bulk delete rolled back: {err}");
                    let at = pos.min(self.tasks.len());
                    self.tasks.insert(at, snapshot);
                    failed.push(id.to_string());
                }
            }
        }
        let result = if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::mutation(
                MutationKind::Delete,
                format!("Bulk delete failed for: {}", failed.join(", ")),
            ))
        };
        let result = self.core.settle(result);
        if changed {
            self.persist();
        }
        result
    }

    /// Best-effort bulk status change with per-id rollback, same policy as
    /// [`Self::bulk_delete_tasks`].
    pub async fn bulk_set_status_tasks(
        &mut self,
        ids: &[TaskId],
        status: &str,
    ) -> StoreResult<()> {
        self.core.begin();
        if status.trim().is_empty() {
            return self
                .core
                .settle(Err(StoreError::validation("Status must not be empty")));
        }
        let patch = TaskPatch::status(status);
        let mut failed: Vec<String> = Vec::new();
        let mut changed = false;
        for id in ids {
            let Some(pos) = self.position(id) else {
                failed.push(id.to_string());
                continue;
            };
            let snapshot = self.tasks[pos].clone();
            patch.apply(&mut self.tasks[pos]);
            match self.api.update_task(id, &patch).await {
                Ok(confirmed) => {
                    if let Some(pos) = self.position(id) {
                        self.tasks[pos] = confirmed;
                    }
                    changed = true;
                }
                Err(err) => {
                    tracing::warn!(task = %id, "bulk status change rolled back: {err}");
                    if let Some(pos) = self.position(id) {
                        self.tasks[pos] = snapshot;
                    }
                    failed.push(id.to_string());
                }
            }
        }
        if changed {
            self.sort_cache();
        }
        let result = if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::mutation(
                MutationKind::Update,
                format!("Bulk status update failed for: {}", failed.join(", ")),
            ))
        };
        let result = self.core.settle(result);
        if changed {
            self.persist();
        }
        result
    }

    /// Replace the filter state. Filters are server-evaluated, so this always
    /// triggers an authoritative refetch. The new filters stick (and are
    /// persisted) even when that fetch fails.
    pub async fn set_filters(&mut self, filters: TaskFilters) -> StoreResult<()> {
        self.filters = filters;
        let result = self.fetch_tasks().await;
        if result.is_err() {
            self.persist();
        }
        result
    }

    /// Replace the sort options. Ordering is client-owned: the cache is
    /// re-sorted without a network call.
    pub fn set_sort_options(&mut self, sort: SortOptions) {
        self.sort = sort;
        self.sort_cache();
        self.persist();
    }

    /// React to another store's published event.
    pub fn apply_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::ProjectRemoved { project_id } => {
                let before = self.tasks.len();
                self.tasks.retain(|t| t.project_id != *project_id);
                if self.tasks.len() != before {
                    tracing::debug!(
                        project = %project_id,
                        dropped = before - self.tasks.len(),
                        "pruned tasks of removed project"
                    );
                    self.persist();
                }
            }
            StoreEvent::AgentRemoved { agent_id } => {
                let mut changed = false;
                for task in &mut self.tasks {
                    if task.agent_id.as_deref() == Some(agent_id.as_str()) {
                        task.agent_id = None;
                        changed = true;
                    }
                }
                if changed {
                    self.persist();
                }
            }
        }
    }

    // Internals

    fn query(&self) -> TaskQuery {
        TaskQuery::new(&self.filters, &self.sort)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks
            .iter()
            .position(|t| t.project_id == id.project_id && t.task_number == id.task_number)
    }

    fn sort_cache(&mut self) {
        let sort = self.sort;
        self.tasks.sort_by(|a, b| compare_tasks(a, b, &sort));
    }

    /// Start an authoritative fetch; the returned token must accompany the
    /// response into [`Self::finish_fetch`].
    fn begin_fetch(&mut self) -> u64 {
        self.fetch_epoch += 1;
        self.fetch_epoch
    }

    /// Apply an authoritative response unless a newer fetch started since.
    /// Returns whether the response was applied.
    fn finish_fetch(&mut self, token: u64, tasks: Vec<Task>) -> bool {
        if token != self.fetch_epoch {
            tracing::debug!(
                token,
                current = self.fetch_epoch,
                "discarding stale task fetch response"
            );
            return false;
        }
        self.tasks = tasks;
        self.sort_cache();
        true
    }

    /// Insert or replace by identity key: a confirmed entity already present
    /// (the UI fired the action twice before the first resolved) replaces its
    /// duplicate instead of doubling.
    fn merge_confirmed(&mut self, task: Task) {
        if let Some(pos) = self.position(&task.id()) {
            self.tasks[pos] = task;
            return;
        }
        let sort = self.sort;
        let at = self
            .tasks
            .partition_point(|t| compare_tasks(t, &task, &sort) != Ordering::Greater);
        self.tasks.insert(at, task);
    }

    /// Best-effort durable snapshot; persistence failures are logged, never
    /// raised into the action result.
    fn persist(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let snapshot = PersistedTasks {
            tasks: self.tasks.clone(),
            filters: self.filters.clone(),
            sort: self.sort,
        };
        if let Err(err) = persistence.save(&snapshot) {
            tracing::warn!("failed to persist task state: {err}");
        }
    }
}

#[async_trait]
impl Pollable for TaskStore {
    async fn poll_refresh(&mut self) -> StoreResult<()> {
        // Reconciliation reports on its own channel: action-level
        // loading/error stay untouched.
        let token = self.begin_fetch();
        match self.api.list_tasks(&self.query()).await {
            Ok(tasks) => {
                self.finish_fetch(token, tasks);
                self.polling_error = None;
                self.persist();
                Ok(())
            }
            Err(err) => Err(StoreError::polling(err.to_string())),
        }
    }

    fn record_poll_failure(&mut self, message: String) {
        self.polling_error = Some(message);
    }
}
