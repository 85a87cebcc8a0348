//! Grouped view projections over fetched caches.

use std::sync::Arc;

use taskboard_sync::view::{group_tasks, GroupBy, GroupedTasks};
use taskboard_sync::{SortOptions, TaskStore};

use crate::support::{seeded_task, RecordingTaskApi};

#[tokio::test]
async fn test_board_grouping_follows_preferred_status_order() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "COMPLETED"),
        seeded_task("proj-1", 2, "TO_DO"),
        seeded_task("proj-1", 3, "IN_PROGRESS"),
        seeded_task("proj-1", 4, "TO_DO"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();

    let tasks: Vec<_> = store.tasks().to_vec();
    let grouped = group_tasks(&tasks, GroupBy::Status, store.sort_options());
    let GroupedTasks::Status { groups } = grouped else {
        panic!("expected status grouping");
    };

    let names: Vec<&str> = groups.iter().map(|g| g.status.as_str()).collect();
    assert_eq!(names, vec!["To Do", "In Progress", "Completed"]);
    assert_eq!(groups[0].tasks.len(), 2);
    assert_eq!(groups[1].tasks.len(), 1);
    assert_eq!(groups[2].tasks.len(), 1);
}

#[tokio::test]
async fn test_empty_cache_serializes_to_empty_board() {
    let api = Arc::new(RecordingTaskApi::default());
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();

    let grouped = group_tasks(store.tasks(), GroupBy::Status, &SortOptions::default());
    let json = serde_json::to_value(&grouped).unwrap();
    assert_eq!(json["type"], "status");
    assert_eq!(json["groups"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_dynamic_statuses_group_under_resolved_names() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![
        seeded_task("proj-1", 1, "COMPLETED_HANDOFF_TO_reviewer"),
        seeded_task("proj-1", 2, "COMPLETED_HANDOFF_TO_reviewer"),
        seeded_task("proj-1", 3, "WAITING_ON_deploy"),
    ]);
    let mut store = TaskStore::new(Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>);
    store.fetch_tasks().await.unwrap();

    let grouped = group_tasks(store.tasks(), GroupBy::Status, store.sort_options());
    let GroupedTasks::Status { groups } = grouped else {
        panic!("expected status grouping");
    };
    let names: Vec<&str> = groups.iter().map(|g| g.status.as_str()).collect();
    assert_eq!(names, vec!["Handoff to: reviewer", "Waiting on: deploy"]);
    assert_eq!(groups[0].tasks.len(), 2);
}
