//! Durable snapshot restore across store instances.

use std::sync::Arc;

use taskboard_sync::{
    SortDirection, SortField, SortOptions, StatePersistence, StatusFilter, TaskFilters, TaskStore,
};

use crate::support::{seeded_task, RecordingTaskApi};

const STATE_VERSION: u32 = 1;

#[tokio::test]
async fn test_restart_restores_tasks_filters_and_sort() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "TO_DO"),
        seeded_task("proj-1", 2, "COMPLETED"),
    ]);

    {
        let persistence = StatePersistence::in_dir(dir.path(), "tasks", STATE_VERSION);
        let mut store =
            TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>)
                .with_persistence(persistence);
        store
            .set_filters(TaskFilters::with_status(StatusFilter::Completed))
            .await
            .unwrap();
        store.set_sort_options(SortOptions::new(SortField::Title, SortDirection::Asc));
    }

    // a fresh instance starts from the snapshot, before any fetch
    let persistence = StatePersistence::in_dir(dir.path(), "tasks", STATE_VERSION);
    let restored = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>)
        .with_persistence(persistence);

    assert_eq!(restored.tasks().len(), 1);
    assert_eq!(restored.tasks()[0].status, "COMPLETED");
    assert_eq!(restored.filters().status, StatusFilter::Completed);
    assert_eq!(
        *restored.sort_options(),
        SortOptions::new(SortField::Title, SortDirection::Asc)
    );
}

#[tokio::test]
async fn test_version_bump_reinitializes_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![seeded_task("proj-1", 1, "TO_DO")]);

    {
        let persistence = StatePersistence::in_dir(dir.path(), "tasks", STATE_VERSION);
        let mut store =
            TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>)
                .with_persistence(persistence);
        store.fetch_tasks().await.unwrap();
        assert_eq!(store.tasks().len(), 1);
    }

    let persistence = StatePersistence::in_dir(dir.path(), "tasks", STATE_VERSION + 1);
    let restored = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>)
        .with_persistence(persistence);

    assert!(restored.tasks().is_empty());
    assert_eq!(*restored.filters(), TaskFilters::default());
}
