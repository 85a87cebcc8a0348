//! Cross-store propagation through the event bus.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use taskboard_sync::api::{ApiResult, ProjectApi};
use taskboard_sync::{EventBus, NewProject, Project, ProjectPatch, ProjectStore, TaskStore};

use crate::support::{seeded_task, RecordingTaskApi};

#[derive(Default)]
struct InMemoryProjectApi {
    projects: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectApi for InMemoryProjectApi {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, new: &NewProject) -> ApiResult<Project> {
        let project = Project {
            id: new.name.to_lowercase().replace(' ', "-"),
            name: new.name.clone(),
            description: new.description.clone(),
            task_count: 0,
            archived: false,
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> ApiResult<Project> {
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(taskboard_sync::ApiError::Status {
                status: 404,
                message: "not found".to_string(),
            })?;
        patch.apply(project);
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &str) -> ApiResult<()> {
        self.projects.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn test_project_removal_prunes_task_cache_via_bus() {
    let bus = EventBus::default();
    let mut events = bus.subscribe();

    let project_api = Arc::new(InMemoryProjectApi::default());
    let mut projects = ProjectStore::new(Arc::clone(&project_api) as Arc<dyn ProjectApi>, bus);

    let task_api = Arc::new(RecordingTaskApi::default());
    task_api.seed(vec![
        seeded_task("alpha", 1, "TO_DO"),
        seeded_task("alpha", 2, "IN_PROGRESS"),
        seeded_task("beta", 3, "TO_DO"),
    ]);
    let mut tasks = TaskStore::new(Arc::clone(&task_api) as Arc<dyn taskboard_sync::api::TaskApi>);
    tasks.fetch_tasks().await.unwrap();
    assert_eq!(tasks.tasks().len(), 3);

    projects.add_project(NewProject::new("Alpha")).await.unwrap();
    projects.remove_project("alpha").await.unwrap();

    // the subscriber relays the confirmed removal into the task store
    let event = events.recv().await.unwrap();
    tasks.apply_event(&event);

    assert_eq!(tasks.tasks().len(), 1);
    assert_eq!(tasks.tasks()[0].project_id, "beta");
}
