//! Scripted walk through the boards page: load, scroll to the end, create,
//! star and remove, with a minimal reducer standing in for the host store.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use boards_core::{Action, BoardsPage, Completion, CompletionReceiver, Settled, StoreSnapshot};
use boards_engine::{EngineError, EngineHandle, MemoryBoardsApi, SharedStore, StateStore};
use boards_logging::{boards_debug, boards_info, boards_warn};
use serde_json::Value;

use super::AppConfig;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// State of the board list when the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub loaded: usize,
    pub page_index: usize,
    pub is_last_page: bool,
    pub actions_seen: usize,
}

pub struct Session {
    handle: EngineHandle,
    store: Arc<SharedStore>,
    page_size: usize,
    actions_seen: usize,
}

impl Session {
    pub fn start(config: &AppConfig) -> Result<Self, EngineError> {
        let api = Arc::new(MemoryBoardsApi::seeded(config.seed_boards));
        let store = Arc::new(SharedStore::new(StoreSnapshot::new(
            BoardsPage::default(),
            config.boards.home_path.clone(),
        )));
        let handle = EngineHandle::start(config.boards.clone(), api, store.clone())?;
        Ok(Self {
            handle,
            store,
            page_size: config.boards.boards_per_page,
            actions_seen: 0,
        })
    }

    pub fn run(mut self) -> Result<SessionSummary, EngineError> {
        self.handle.dispatch(Action::BoardsFetchRequest { page_index: 1 });
        self.handle.dispatch(Action::BoardsFetchStarredRequest);
        self.settle(|action| *action == Action::ProgressBarStop);

        while !self.page().is_last_page {
            self.handle.dispatch(Action::ScrollBottom);
            let moved = self.settle(|action| {
                matches!(
                    action,
                    Action::BoardsFetchSuccess { .. }
                        | Action::BoardsFetchFailure { .. }
                        | Action::BoardsSetPageIndex { .. }
                )
            });
            if !moved {
                boards_warn!("scroll produced no page, stopping");
                break;
            }
        }

        let (completion, mut receiver) = Completion::channel();
        self.handle.dispatch(Action::BoardCreateRequest {
            title: "Session board".to_string(),
            description: "Created by the scripted session".to_string(),
            completion,
        });
        self.settle(|action| {
            matches!(
                action,
                Action::ModalHide | Action::BoardCreateFailure { .. }
            )
        });
        match wait_settled(&mut receiver) {
            Some(Settled::Resolved) => boards_info!("create form resolved"),
            Some(Settled::Rejected) => boards_warn!("create form rejected"),
            None => boards_warn!("create form never settled"),
        }

        if let Some(first) = self.page().ids.first().cloned() {
            self.handle.dispatch(Action::BoardToggleStarredRequest {
                id: first.clone(),
                starred: true,
            });
            self.settle(|action| {
                matches!(
                    action,
                    Action::BoardToggleStarredSuccess { .. }
                        | Action::BoardToggleStarredFailure { .. }
                )
            });

            self.handle.dispatch(Action::BoardRemoveRequest { id: first });
            self.settle(|action| {
                matches!(
                    action,
                    Action::ModalHide | Action::BoardRemoveFailure { .. }
                )
            });
        }

        let page = self.page();
        let summary = SessionSummary {
            loaded: page.ids.len(),
            page_index: page.page_index,
            is_last_page: page.is_last_page,
            actions_seen: self.actions_seen,
        };
        self.handle.shutdown()?;
        Ok(summary)
    }

    fn page(&self) -> BoardsPage {
        self.store.snapshot().pages.main.all
    }

    /// Applies bus actions to the store until `done` matches one or the timeout passes.
    fn settle(&mut self, done: impl Fn(&Action) -> bool) -> bool {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        while Instant::now() < deadline {
            let Some(action) = self.handle.recv_timeout(POLL_INTERVAL) else {
                continue;
            };
            boards_debug!("session saw {}", action.action_type());
            self.actions_seen += 1;
            let page_size = self.page_size;
            self.store
                .update(|snapshot| reduce(snapshot, &action, page_size));
            if done(&action) {
                return true;
            }
        }
        false
    }
}

fn wait_settled(receiver: &mut CompletionReceiver) -> Option<Settled> {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    loop {
        if let Some(outcome) = receiver.try_settled() {
            return Some(outcome);
        }
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// The slice of the host's reducers the board list needs.
pub fn reduce(snapshot: &mut StoreSnapshot, action: &Action, page_size: usize) {
    let page = &mut snapshot.pages.main.all;
    match action {
        Action::BoardsFetchRequest { .. } => page.is_fetching = true,
        Action::BoardsFetchSuccess { payload, request } => {
            let fetched = board_ids(payload);
            page.is_last_page = fetched.len() < page_size;
            page.ids.extend(fetched);
            page.page_index = request.page_index;
            page.is_fetching = false;
        }
        Action::BoardsFetchFailure { .. } => page.is_fetching = false,
        Action::BoardsSetPageIndex { page_index } => page.page_index = *page_index,
        Action::BoardAdd { payload } => page.ids.extend(board_ids(payload)),
        Action::BoardCreateSuccess { payload } if page.is_last_page => {
            page.ids.extend(board_ids(payload));
        }
        Action::BoardRemoveSuccess { payload } => {
            if let Some(id) = payload["_id"].as_str() {
                page.ids.retain(|loaded| loaded != id);
            }
        }
        _ => {}
    }
}

/// Ids from a single board or a list of boards.
fn board_ids(payload: &Value) -> Vec<String> {
    let boards: Vec<&Value> = match payload {
        Value::Array(boards) => boards.iter().collect(),
        board => vec![board],
    };
    boards
        .into_iter()
        .filter_map(|board| board["_id"].as_str().map(str::to_string))
        .collect()
}
