//! Background reconciliation through the polling loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use taskboard_sync::{PollingLoop, TaskStore};

use crate::support::{seeded_task, RecordingTaskApi};

#[tokio::test]
async fn test_loop_reconciles_remote_changes() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![seeded_task("proj-1", 1, "TO_DO")]);
    let store = Arc::new(RwLock::new(TaskStore::new(
        Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>
    )));

    let mut poll = PollingLoop::new();
    poll.start(Arc::clone(&store), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(store.read().await.tasks().len(), 1);

    // another client creates a task; the next tick picks it up
    api.seed(vec![
        seeded_task("proj-1", 1, "TO_DO"),
        seeded_task("proj-1", 2, "TO_DO"),
    ]);
    tokio::time::sleep(Duration::from_millis(40)).await;
    poll.stop();
    assert_eq!(store.read().await.tasks().len(), 2);
}

#[tokio::test]
async fn test_poll_failure_keeps_cache_and_loop_recovers() {
    let api = Arc::new(RecordingTaskApi::default());
    api.seed(vec![seeded_task("proj-1", 1, "TO_DO")]);
    let store = Arc::new(RwLock::new(TaskStore::new(
        Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>
    )));
    store.write().await.fetch_tasks().await.unwrap();

    api.failing(true);
    let mut poll = PollingLoop::new();
    poll.start(Arc::clone(&store), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(40)).await;

    {
        let store = store.read().await;
        assert_eq!(store.tasks().len(), 1, "cache discarded on poll failure");
        assert!(store.polling_error().is_some());
        // action-level error channel stays clean
        assert_eq!(store.error(), None);
    }

    // server recovers, polling error clears on the next good tick
    api.failing(false);
    tokio::time::sleep(Duration::from_millis(40)).await;
    poll.stop();
    assert_eq!(store.read().await.polling_error(), None);
}

#[tokio::test]
async fn test_stop_halts_ticks() {
    let api = Arc::new(RecordingTaskApi::default());
    let store = Arc::new(RwLock::new(TaskStore::new(
        Arc::clone(&api) as Arc<dyn taskboard_sync::api::TaskApi>
    )));

    let mut poll = PollingLoop::new();
    poll.start(Arc::clone(&store), Duration::from_millis(10));
    assert!(poll.is_polling());
    tokio::time::sleep(Duration::from_millis(30)).await;
    poll.stop();
    assert!(!poll.is_polling());

    let seen = api.last_query().is_some();
    assert!(seen, "no tick observed before stop");

    *api.last_query.lock().unwrap() = None;
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(api.last_query().is_none(), "ticks continued after stop");
}
