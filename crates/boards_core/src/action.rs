use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

pub type BoardId = String;

/// Stable action type identifiers shared with the store's reducers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    BoardsFetchRequest,
    BoardsFetchSuccess,
    BoardsFetchFailure,
    BoardsFetchStarredRequest,
    BoardsFetchStarredSuccess,
    BoardsFetchStarredFailure,
    BoardFetchRequest,
    BoardFetchSuccess,
    BoardFetchFailure,
    BoardCreateRequest,
    BoardCreateSuccess,
    BoardCreateFailure,
    BoardRemoveRequest,
    BoardRemoveSuccess,
    BoardRemoveFailure,
    BoardUpdateRequest,
    BoardUpdateSuccess,
    BoardUpdateFailure,
    BoardUpdateModalForm,
    BoardMoveRequest,
    BoardMoveSuccess,
    BoardMoveFailure,
    BoardToggleStarredRequest,
    BoardToggleStarredSuccess,
    BoardToggleStarredFailure,
    ScrollBottom,
    BoardsSetPageIndex,
    BoardAdd,
    ModalHide,
    ProgressBarStart,
    ProgressBarStop,
}

impl ActionType {
    pub const ALL: [ActionType; 31] = [
        ActionType::BoardsFetchRequest,
        ActionType::BoardsFetchSuccess,
        ActionType::BoardsFetchFailure,
        ActionType::BoardsFetchStarredRequest,
        ActionType::BoardsFetchStarredSuccess,
        ActionType::BoardsFetchStarredFailure,
        ActionType::BoardFetchRequest,
        ActionType::BoardFetchSuccess,
        ActionType::BoardFetchFailure,
        ActionType::BoardCreateRequest,
        ActionType::BoardCreateSuccess,
        ActionType::BoardCreateFailure,
        ActionType::BoardRemoveRequest,
        ActionType::BoardRemoveSuccess,
        ActionType::BoardRemoveFailure,
        ActionType::BoardUpdateRequest,
        ActionType::BoardUpdateSuccess,
        ActionType::BoardUpdateFailure,
        ActionType::BoardUpdateModalForm,
        ActionType::BoardMoveRequest,
        ActionType::BoardMoveSuccess,
        ActionType::BoardMoveFailure,
        ActionType::BoardToggleStarredRequest,
        ActionType::BoardToggleStarredSuccess,
        ActionType::BoardToggleStarredFailure,
        ActionType::ScrollBottom,
        ActionType::BoardsSetPageIndex,
        ActionType::BoardAdd,
        ActionType::ModalHide,
        ActionType::ProgressBarStart,
        ActionType::ProgressBarStop,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ActionType::BoardsFetchRequest => "BOARDS_FETCH_REQUEST",
            ActionType::BoardsFetchSuccess => "BOARDS_FETCH_SUCCESS",
            ActionType::BoardsFetchFailure => "BOARDS_FETCH_FAILURE",
            ActionType::BoardsFetchStarredRequest => "BOARDS_FETCH_STARRED_REQUEST",
            ActionType::BoardsFetchStarredSuccess => "BOARDS_FETCH_STARRED_SUCCESS",
            ActionType::BoardsFetchStarredFailure => "BOARDS_FETCH_STARRED_FAILURE",
            ActionType::BoardFetchRequest => "BOARD_FETCH_REQUEST",
            ActionType::BoardFetchSuccess => "BOARD_FETCH_SUCCESS",
            ActionType::BoardFetchFailure => "BOARD_FETCH_FAILURE",
            ActionType::BoardCreateRequest => "BOARD_CREATE_REQUEST",
            ActionType::BoardCreateSuccess => "BOARD_CREATE_SUCCESS",
            ActionType::BoardCreateFailure => "BOARD_CREATE_FAILURE",
            ActionType::BoardRemoveRequest => "BOARD_REMOVE_REQUEST",
            ActionType::BoardRemoveSuccess => "BOARD_REMOVE_SUCCESS",
            ActionType::BoardRemoveFailure => "BOARD_REMOVE_FAILURE",
            ActionType::BoardUpdateRequest => "BOARD_UPDATE_REQUEST",
            ActionType::BoardUpdateSuccess => "BOARD_UPDATE_SUCCESS",
            ActionType::BoardUpdateFailure => "BOARD_UPDATE_FAILURE",
            ActionType::BoardUpdateModalForm => "BOARD_UPDATE_MODAL_FORM",
            ActionType::BoardMoveRequest => "BOARD_MOVE_REQUEST",
            ActionType::BoardMoveSuccess => "BOARD_MOVE_SUCCESS",
            ActionType::BoardMoveFailure => "BOARD_MOVE_FAILURE",
            ActionType::BoardToggleStarredRequest => "BOARD_TOGGLE_STARRED_REQUEST",
            ActionType::BoardToggleStarredSuccess => "BOARD_TOGGLE_STARRED_SUCCESS",
            ActionType::BoardToggleStarredFailure => "BOARD_TOGGLE_STARRED_FAILURE",
            ActionType::ScrollBottom => "SCROLL_BOTTOM",
            ActionType::BoardsSetPageIndex => "BOARDS_SET_PAGE_INDEX",
            ActionType::BoardAdd => "BOARD_ADD",
            ActionType::ModalHide => "MODAL_HIDE",
            ActionType::ProgressBarStart => "PROGRESS_BAR_START",
            ActionType::ProgressBarStop => "PROGRESS_BAR_STOP",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request a page fetch answered, echoed back in its success action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page_index: usize,
}

/// Side-channel flags for an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateParams {
    pub notify: bool,
    pub activity: bool,
}

impl UpdateParams {
    /// A silent update: no notification and no activity entry.
    pub const fn silent() -> Self {
        Self {
            notify: false,
            activity: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BoardsFetchRequest {
        page_index: usize,
    },
    BoardsFetchSuccess {
        payload: Value,
        request: PageRequest,
    },
    BoardsFetchFailure {
        error: String,
    },
    BoardsFetchStarredRequest,
    BoardsFetchStarredSuccess {
        payload: Value,
    },
    BoardsFetchStarredFailure {
        error: String,
    },
    BoardFetchRequest {
        id: BoardId,
    },
    BoardFetchSuccess {
        payload: Value,
    },
    BoardFetchFailure {
        error: String,
    },
    BoardCreateRequest {
        title: String,
        description: String,
        completion: Completion,
    },
    BoardCreateSuccess {
        payload: Value,
    },
    BoardCreateFailure {
        error: String,
    },
    BoardRemoveRequest {
        id: BoardId,
    },
    BoardRemoveSuccess {
        payload: Value,
    },
    BoardRemoveFailure {
        error: String,
    },
    BoardUpdateRequest {
        id: BoardId,
        props: Value,
        params: Option<UpdateParams>,
    },
    BoardUpdateSuccess {
        payload: Value,
    },
    BoardUpdateFailure {
        error: String,
    },
    /// Update submitted from the edit modal; answered with the update success/failure pair.
    BoardUpdateModalForm {
        id: BoardId,
        props: Value,
        completion: Completion,
    },
    BoardMoveRequest {
        source_id: BoardId,
        target_id: BoardId,
    },
    BoardMoveSuccess {
        payload: Value,
    },
    BoardMoveFailure {
        error: String,
    },
    BoardToggleStarredRequest {
        id: BoardId,
        starred: bool,
    },
    BoardToggleStarredSuccess {
        payload: Value,
    },
    BoardToggleStarredFailure {
        error: String,
    },
    ScrollBottom,
    BoardsSetPageIndex {
        page_index: usize,
    },
    BoardAdd {
        payload: Value,
    },
    ModalHide,
    ProgressBarStart,
    ProgressBarStop,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::BoardsFetchRequest { .. } => ActionType::BoardsFetchRequest,
            Action::BoardsFetchSuccess { .. } => ActionType::BoardsFetchSuccess,
            Action::BoardsFetchFailure { .. } => ActionType::BoardsFetchFailure,
            Action::BoardsFetchStarredRequest => ActionType::BoardsFetchStarredRequest,
            Action::BoardsFetchStarredSuccess { .. } => ActionType::BoardsFetchStarredSuccess,
            Action::BoardsFetchStarredFailure { .. } => ActionType::BoardsFetchStarredFailure,
            Action::BoardFetchRequest { .. } => ActionType::BoardFetchRequest,
            Action::BoardFetchSuccess { .. } => ActionType::BoardFetchSuccess,
            Action::BoardFetchFailure { .. } => ActionType::BoardFetchFailure,
            Action::BoardCreateRequest { .. } => ActionType::BoardCreateRequest,
            Action::BoardCreateSuccess { .. } => ActionType::BoardCreateSuccess,
            Action::BoardCreateFailure { .. } => ActionType::BoardCreateFailure,
            Action::BoardRemoveRequest { .. } => ActionType::BoardRemoveRequest,
            Action::BoardRemoveSuccess { .. } => ActionType::BoardRemoveSuccess,
            Action::BoardRemoveFailure { .. } => ActionType::BoardRemoveFailure,
            Action::BoardUpdateRequest { .. } => ActionType::BoardUpdateRequest,
            Action::BoardUpdateSuccess { .. } => ActionType::BoardUpdateSuccess,
            Action::BoardUpdateFailure { .. } => ActionType::BoardUpdateFailure,
            Action::BoardUpdateModalForm { .. } => ActionType::BoardUpdateModalForm,
            Action::BoardMoveRequest { .. } => ActionType::BoardMoveRequest,
            Action::BoardMoveSuccess { .. } => ActionType::BoardMoveSuccess,
            Action::BoardMoveFailure { .. } => ActionType::BoardMoveFailure,
            Action::BoardToggleStarredRequest { .. } => ActionType::BoardToggleStarredRequest,
            Action::BoardToggleStarredSuccess { .. } => ActionType::BoardToggleStarredSuccess,
            Action::BoardToggleStarredFailure { .. } => ActionType::BoardToggleStarredFailure,
            Action::ScrollBottom => ActionType::ScrollBottom,
            Action::BoardsSetPageIndex { .. } => ActionType::BoardsSetPageIndex,
            Action::BoardAdd { .. } => ActionType::BoardAdd,
            Action::ModalHide => ActionType::ModalHide,
            Action::ProgressBarStart => ActionType::ProgressBarStart,
            Action::ProgressBarStop => ActionType::ProgressBarStop,
        }
    }

    /// True when the action's type is one of `pattern`.
    pub fn matches(&self, pattern: &[ActionType]) -> bool {
        pattern.contains(&self.action_type())
    }

    /// The error message carried by a failure action.
    pub fn error(&self) -> Option<&str> {
        match self {
            Action::BoardsFetchFailure { error }
            | Action::BoardsFetchStarredFailure { error }
            | Action::BoardFetchFailure { error }
            | Action::BoardCreateFailure { error }
            | Action::BoardRemoveFailure { error }
            | Action::BoardUpdateFailure { error }
            | Action::BoardMoveFailure { error }
            | Action::BoardToggleStarredFailure { error } => Some(error),
            _ => None,
        }
    }
}

/// How a [`Completion`] was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Resolved,
    Rejected,
}

/// Resolve/reject handle carried inside a request action.
///
/// Clones share the same underlying channel; the first settle wins.
#[derive(Clone)]
pub struct Completion {
    tx: Arc<Mutex<Option<oneshot::Sender<Settled>>>>,
}

impl Completion {
    pub fn channel() -> (Self, CompletionReceiver) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        };
        (completion, CompletionReceiver { rx })
    }

    /// A handle nobody waits on.
    pub fn detached() -> Self {
        Self::channel().0
    }

    /// Returns false if the handle was already settled or the receiver is gone.
    pub fn resolve(&self) -> bool {
        self.settle(Settled::Resolved)
    }

    /// Returns false if the handle was already settled or the receiver is gone.
    pub fn reject(&self) -> bool {
        self.settle(Settled::Rejected)
    }

    pub fn is_settled(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn settle(&self, outcome: Settled) -> bool {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl PartialEq for Completion {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }
}

/// The requester's side of a [`Completion`].
#[derive(Debug)]
pub struct CompletionReceiver {
    rx: oneshot::Receiver<Settled>,
}

impl CompletionReceiver {
    /// Waits for the task to settle. `None` if every handle was dropped unsettled.
    pub async fn wait(self) -> Option<Settled> {
        self.rx.await.ok()
    }

    pub fn try_settled(&mut self) -> Option<Settled> {
        self.rx.try_recv().ok()
    }
}
