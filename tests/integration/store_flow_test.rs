//! Store action flows against the in-memory API.

use std::sync::Arc;

use taskboard_sync::{
    MutationKind, NewTask, StatusFilter, TaskFilters, TaskId, TaskPatch, TaskStore,
};

use crate::support::{seeded_task, RecordingTaskApi};

#[tokio::test]
async fn test_create_against_failing_api_surfaces_error_and_keeps_cache_clean() {
    let api = Arc::new(RecordingTaskApi::default());
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    api.failing(true);

    let err = store
        .add_task(NewTask::new("proj-1", "Write docs"))
        .await
        .unwrap_err();

    assert_eq!(err.mutation_kind(), Some(MutationKind::Create));
    assert_eq!(store.error(), Some(err.to_string().as_str()));
    assert!(!store.loading());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn test_rollback_error_carries_update_kind_and_exact_snapshot() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "TO_DO"),
        seeded_task("proj-1", 2, "IN_PROGRESS"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();
    let before = store.tasks().to_vec();

    api.failing(true);
    let err = store
        .edit_task(&TaskId::new("proj-1", 1), TaskPatch::status("COMPLETED"))
        .await
        .unwrap_err();

    assert_eq!(err.mutation_kind(), Some(MutationKind::Update));
    assert_eq!(store.tasks(), before.as_slice());
}

#[tokio::test]
async fn test_set_filters_refetches_with_completed_bucket() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "TO_DO"),
        seeded_task("proj-1", 2, "COMPLETED"),
        seeded_task("proj-1", 3, "FAILED"),
        seeded_task("proj-1", 4, "IN_PROGRESS"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();
    assert_eq!(store.tasks().len(), 4);

    store
        .set_filters(TaskFilters::with_status(StatusFilter::Completed))
        .await
        .unwrap();

    let query = api.last_query().unwrap();
    assert_eq!(query.status.as_deref(), Some("completed"));

    // terminal statuses only: COMPLETED and FAILED
    assert_eq!(store.visible_tasks().len(), 2);
    assert!(store
        .visible_tasks()
        .iter()
        .all(|t| matches!(t.status.as_str(), "COMPLETED" | "FAILED")));
}

#[tokio::test]
async fn test_locally_edited_task_drops_out_of_visible_set() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "COMPLETED"),
        seeded_task("proj-1", 2, "FAILED"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store
        .set_filters(TaskFilters::with_status(StatusFilter::Completed))
        .await
        .unwrap();
    assert_eq!(store.visible_tasks().len(), 2);

    // reopening a task makes it non-terminal; the visible view reflects that
    // immediately, before any refetch
    store
        .edit_task(&TaskId::new("proj-1", 1), TaskPatch::status("IN_PROGRESS"))
        .await
        .unwrap();
    assert_eq!(store.visible_tasks().len(), 1);
    assert_eq!(store.visible_tasks()[0].task_number, 2);
}

#[tokio::test]
async fn test_bulk_delete_reports_failed_ids() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "TO_DO"),
        seeded_task("proj-1", 2, "TO_DO"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();

    store
        .bulk_delete_tasks(&[TaskId::new("proj-1", 1)])
        .await
        .unwrap();
    api.failing(true);
    let err = store
        .bulk_delete_tasks(&[TaskId::new("proj-1", 2)])
        .await
        .unwrap_err();

    assert_eq!(err.mutation_kind(), Some(MutationKind::Delete));
    assert!(err.to_string().contains("proj-1#2"));
    // succeeded id stays deleted, failed id is restored
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].task_number, 2);
}
