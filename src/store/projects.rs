//! Project Store
//!
//! Same action discipline as the task store: authoritative fetches, optimistic
//! mutations with rollback. A confirmed project removal is announced on the
//! event bus so the task store can prune its cache without a direct call.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::ProjectApi;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::poll::Pollable;
use crate::store::core::StoreCore;
use crate::store::events::{EventBus, StoreEvent};
use crate::utils::error::{MutationKind, StoreError, StoreResult};

pub struct ProjectStore {
    core: StoreCore,
    projects: Vec<Project>,
    polling_error: Option<String>,
    fetch_epoch: u64,
    api: Arc<dyn ProjectApi>,
    events: EventBus,
}

impl ProjectStore {
    pub fn new(api: Arc<dyn ProjectApi>, events: EventBus) -> Self {
        Self {
            core: StoreCore::new(),
            projects: Vec::new(),
            polling_error: None,
            fetch_epoch: 0,
            api,
            events,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects visible by default: archived ones are excluded.
    pub fn active_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.archived).collect()
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

    /// Authoritative fetch; replaces the cache wholesale.
    pub async fn fetch_projects(&mut self) -> StoreResult<()> {
        self.core.begin();
        let token = self.begin_fetch();
        let result = match self.api.list_projects().await {
            Ok(projects) => {
                self.finish_fetch(token, projects);
                Ok(())
            }
            Err(err) => Err(StoreError::fetch(err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn add_project(&mut self, new: NewProject) -> StoreResult<Project> {
        self.core.begin();
        if new.name.trim().is_empty() {
            return self.core.settle(Err(StoreError::validation(
                "Project name must not be empty",
            )));
        }
        let result = match self.api.create_project(&new).await {
            Ok(project) => {
                self.merge_confirmed(project.clone());
                Ok(project)
            }
            Err(err) => Err(StoreError::mutation(MutationKind::Create, err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn edit_project(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown project: {id}"))));
        };
        let snapshot = self.projects[pos].clone();
        patch.apply(&mut self.projects[pos]);

        let result = match self.api.update_project(id, &patch).await {
            Ok(confirmed) => {
                if let Some(pos) = self.position(id) {
                    self.projects[pos] = confirmed.clone();
                }
                Ok(confirmed)
            }
            Err(err) => {
                tracing::warn!(project = %id, "rolling back optimistic edit: {err}");
                if let Some(pos) = self.position(id) {
                    self.projects[pos] = snapshot;
                }
                Err(StoreError::mutation(MutationKind::Update, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    /// Optimistic removal with rollback. On confirmation, publishes
    /// [`StoreEvent::ProjectRemoved`] for dependent stores.
    pub async fn remove_project(&mut self, id: &str) -> StoreResult<()> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown project: {id}"))));
        };
        let snapshot = self.projects.remove(pos);

        let result = match self.api.delete_project(id).await {
            Ok(()) => {
                self.events.publish(StoreEvent::ProjectRemoved {
                    project_id: id.to_string(),
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(project = %id, "rolling back optimistic removal: {err}");
                let at = pos.min(self.projects.len());
                self.projects.insert(at, snapshot);
                Err(StoreError::mutation(MutationKind::Delete, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    fn begin_fetch(&mut self) -> u64 {
        self.fetch_epoch += 1;
        self.fetch_epoch
    }

    fn finish_fetch(&mut self, token: u64, projects: Vec<Project>) -> bool {
        if token != self.fetch_epoch {
            tracing::debug!(token, current = self.fetch_epoch, "discarding stale project fetch");
            return false;
        }
        self.projects = projects;
        true
    }

    /// Insert or replace by id; newly created projects go first.
    fn merge_confirmed(&mut self, project: Project) {
        match self.position(&project.id) {
            Some(pos) => self.projects[pos] = project,
            None => self.projects.insert(0, project),
        }
    }
}

#[async_trait]
impl Pollable for ProjectStore {
    async fn poll_refresh(&mut self) -> StoreResult<()> {
        let token = self.begin_fetch();
        match self.api.list_projects().await {
            Ok(projects) => {
                self.finish_fetch(token, projects);
                self.polling_error = None;
                Ok(())
            }
            Err(err) => Err(StoreError::polling(err.to_string())),
        }
    }

    fn record_poll_failure(&mut self, message: String) {
        self.polling_error = Some(message);
    }
}
