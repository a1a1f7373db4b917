use serde_json::Value;
use thiserror::Error;

use crate::{Action, ActionType, BoardId, StoreSnapshot, UpdateParams};

/// Message used for failure actions when the API error carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something bad happened";

/// A deferred operation. Only an interpreter gives it meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Call(ApiCall),
    Put(Action),
    Select,
    Take(Vec<ActionType>),
}

impl Effect {
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Call(_) => "call",
            Effect::Put(_) => "put",
            Effect::Select => "select",
            Effect::Take(_) => "take",
        }
    }
}

/// Operations offered by the boards API collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchBoards {
        page_index: usize,
        page_size: usize,
    },
    FetchStarredBoards,
    FetchBoard {
        id: BoardId,
    },
    CreateBoard {
        title: String,
        description: String,
    },
    RemoveBoard {
        id: BoardId,
    },
    UpdateBoard {
        id: BoardId,
        props: Value,
        params: Option<UpdateParams>,
    },
    MoveBoard {
        source_id: BoardId,
        target_id: BoardId,
    },
}

impl ApiCall {
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::FetchBoards { .. } => "fetch_boards",
            ApiCall::FetchStarredBoards => "fetch_starred_boards",
            ApiCall::FetchBoard { .. } => "fetch_board",
            ApiCall::CreateBoard { .. } => "create_board",
            ApiCall::RemoveBoard { .. } => "remove_board",
            ApiCall::UpdateBoard { .. } => "update_board",
            ApiCall::MoveBoard { .. } => "move_board",
        }
    }
}

/// What the interpreter hands back to a suspended task.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Returned(Result<Value, ApiError>),
    Dispatched,
    Snapshot(StoreSnapshot),
    Took(Action),
    /// The action bus shut down while the task was waiting.
    Closed,
}

impl Resolution {
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Returned(_) => "returned",
            Resolution::Dispatched => "dispatched",
            Resolution::Snapshot(_) => "snapshot",
            Resolution::Took(_) => "took",
            Resolution::Closed => "closed",
        }
    }
}

/// A failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("api error: {}", .message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE))]
pub struct ApiError {
    message: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: (!message.trim().is_empty()).then_some(message),
        }
    }

    /// An error that says nothing about its cause.
    pub fn silent() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Message for the failure action, falling back to [`DEFAULT_FAILURE_MESSAGE`].
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
    }
}
