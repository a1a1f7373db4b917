use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use boards_core::{ApiError, UpdateParams};
use boards_logging::boards_debug;
use serde_json::{json, Value};

use crate::BoardsApi;

/// In-process stand-in for the boards service.
///
/// Boards are JSON objects with `_id`, `title`, `description` and `starred`,
/// kept in display order. A failure injected for an operation name (the
/// method name, e.g. `"fetch_board"`) is returned by every call of that
/// operation until cleared.
#[derive(Debug, Default)]
pub struct MemoryBoardsApi {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    boards: Vec<Value>,
    next_id: usize,
    failures: HashMap<String, ApiError>,
    calls: Vec<String>,
}

impl MemoryBoardsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` boards named `board-1..=count`; every fifth one is starred.
    pub fn seeded(count: usize) -> Self {
        let api = Self::new();
        {
            let mut state = api.lock();
            for _ in 0..count {
                state.push_board(None, String::new());
            }
        }
        api
    }

    pub fn fail(&self, operation: &str, error: ApiError) {
        self.lock().failures.insert(operation.to_string(), error);
    }

    pub fn clear_failure(&self, operation: &str) {
        self.lock().failures.remove(operation);
    }

    /// Every board in display order.
    pub fn boards(&self) -> Vec<Value> {
        self.lock().boards.clone()
    }

    /// Operation names in call order, failed calls included.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call and returns the injected failure for it, if any.
    fn begin(&self, operation: &str) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(operation.to_string());
        if let Some(error) = state.failures.get(operation).cloned() {
            return Err(error);
        }
        Ok(state)
    }
}

impl MemoryState {
    fn push_board(&mut self, title: Option<&str>, description: String) -> Value {
        self.next_id += 1;
        let n = self.next_id;
        let board = json!({
            "_id": format!("board-{n}"),
            "title": title.map_or_else(|| format!("Board {n}"), str::to_string),
            "description": description,
            "starred": n % 5 == 0,
        });
        self.boards.push(board.clone());
        board
    }

    fn position(&self, id: &str) -> Result<usize, ApiError> {
        self.boards
            .iter()
            .position(|board| board["_id"] == id)
            .ok_or_else(|| ApiError::new(format!("board {id} not found")))
    }
}

#[async_trait]
impl BoardsApi for MemoryBoardsApi {
    async fn fetch_boards(&self, page_index: usize, page_size: usize) -> Result<Value, ApiError> {
        let state = self.begin("fetch_boards")?;
        let start = page_index.saturating_sub(1).saturating_mul(page_size);
        let page: Vec<Value> = state
            .boards
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();
        boards_debug!(
            "memory api: page {} x {} -> {} boards",
            page_index,
            page_size,
            page.len()
        );
        Ok(Value::Array(page))
    }

    async fn fetch_starred_boards(&self) -> Result<Value, ApiError> {
        let state = self.begin("fetch_starred_boards")?;
        let starred = state
            .boards
            .iter()
            .filter(|board| board["starred"] == true)
            .cloned()
            .collect();
        Ok(Value::Array(starred))
    }

    async fn fetch_board(&self, id: &str) -> Result<Value, ApiError> {
        let state = self.begin("fetch_board")?;
        let index = state.position(id)?;
        Ok(state.boards[index].clone())
    }

    async fn create_board(&self, title: &str, description: &str) -> Result<Value, ApiError> {
        let mut state = self.begin("create_board")?;
        if title.trim().is_empty() {
            return Err(ApiError::new("title is required"));
        }
        Ok(state.push_board(Some(title), description.to_string()))
    }

    async fn remove_board(&self, id: &str) -> Result<Value, ApiError> {
        let mut state = self.begin("remove_board")?;
        let index = state.position(id)?;
        Ok(state.boards.remove(index))
    }

    async fn update_board(
        &self,
        id: &str,
        props: &Value,
        params: Option<UpdateParams>,
    ) -> Result<Value, ApiError> {
        let mut state = self.begin("update_board")?;
        let index = state.position(id)?;
        let Some(props) = props.as_object() else {
            return Err(ApiError::new("update props must be an object"));
        };
        boards_debug!("memory api: update {} with {:?}", id, params);
        let board = &mut state.boards[index];
        for (key, value) in props {
            if key != "_id" {
                board[key.as_str()] = value.clone();
            }
        }
        Ok(board.clone())
    }

    async fn move_board(&self, source_id: &str, target_id: &str) -> Result<Value, ApiError> {
        let mut state = self.begin("move_board")?;
        let from = state.position(source_id)?;
        let to = state.position(target_id)?;
        let board = state.boards.remove(from);
        state.boards.insert(to, board.clone());
        Ok(board)
    }
}
