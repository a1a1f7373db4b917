#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use boards_core::{Action, BoardsConfig, BoardsPage, StoreSnapshot};
use boards_engine::{Engine, MemoryBoardsApi, SharedStore, Subscription};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(boards_logging::initialize_for_tests);
}

/// Store on the board list route with `board-1..=loaded` in it.
pub fn home_store(loaded: usize, page_index: usize, is_last_page: bool) -> Arc<SharedStore> {
    Arc::new(SharedStore::new(StoreSnapshot::new(
        BoardsPage {
            ids: (1..=loaded).map(|n| format!("board-{n}")).collect(),
            is_fetching: false,
            page_index,
            is_last_page,
        },
        "/",
    )))
}

pub fn start(api: &Arc<MemoryBoardsApi>, store: &Arc<SharedStore>) -> Engine {
    Engine::start(BoardsConfig::default(), api.clone(), store.clone())
}

/// Collects bus actions until `done` holds for the trace so far.
pub async fn collect_until(
    trace: &mut Subscription,
    done: impl Fn(&[Action]) -> bool,
) -> Vec<Action> {
    let mut seen = Vec::new();
    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(action) = trace.recv().await {
            seen.push(action);
            if done(&seen) {
                return;
            }
        }
    })
    .await;
    assert!(outcome.is_ok(), "timed out; trace so far: {seen:?}");
    seen
}

/// Actions that arrive within a short grace period.
pub async fn drain_for(trace: &mut Subscription, grace: Duration) -> Vec<Action> {
    let mut seen = Vec::new();
    while let Ok(Some(action)) = tokio::time::timeout(grace, trace.recv()).await {
        seen.push(action);
    }
    seen
}

pub fn count(trace: &[Action], wanted: impl Fn(&Action) -> bool) -> usize {
    trace.iter().filter(|action| wanted(action)).count()
}
