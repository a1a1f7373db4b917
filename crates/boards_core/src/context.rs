//! The contract between tasks and whatever executes their effects.
//!
//! Tasks never touch the API, the bus or the store directly. They build
//! [`Effect`] descriptors through a [`TaskContext`] and are suspended until
//! the [`Interpreter`] hands back a [`Resolution`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::{Action, ActionType, ApiCall, ApiError, BoardsConfig, Effect, Resolution, StoreSnapshot};

#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn perform(&self, effect: Effect) -> Resolution;
}

/// Failures of the effect machinery itself, as opposed to failed API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("{effect} effect resolved as {resolution}")]
    UnexpectedResolution {
        effect: &'static str,
        resolution: &'static str,
    },
    #[error("action bus closed")]
    BusClosed,
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        ApiError::new(err.to_string())
    }
}

#[derive(Clone)]
pub struct TaskContext {
    interpreter: Arc<dyn Interpreter>,
    config: Arc<BoardsConfig>,
}

impl TaskContext {
    pub fn new(interpreter: Arc<dyn Interpreter>, config: Arc<BoardsConfig>) -> Self {
        Self {
            interpreter,
            config,
        }
    }

    pub fn config(&self) -> &BoardsConfig {
        &self.config
    }

    /// Invokes an API operation and waits for its result.
    pub async fn call(&self, call: ApiCall) -> Result<Value, ApiError> {
        let name = call.name();
        match self.interpreter.perform(Effect::Call(call)).await {
            Resolution::Returned(result) => result,
            other => Err(ApiError::new(
                TaskError::UnexpectedResolution {
                    effect: name,
                    resolution: other.kind(),
                }
                .to_string(),
            )),
        }
    }

    /// Publishes an action. Returns once every current subscriber has it queued.
    pub async fn put(&self, action: Action) {
        // A put has nothing to report back; any resolution counts as done.
        let _ = self.interpreter.perform(Effect::Put(action)).await;
    }

    /// Reads the store snapshot and projects it through `selector`.
    pub async fn select<T, F>(&self, selector: F) -> Result<T, TaskError>
    where
        F: FnOnce(&StoreSnapshot) -> T + Send,
    {
        match self.interpreter.perform(Effect::Select).await {
            Resolution::Snapshot(snapshot) => Ok(selector(&snapshot)),
            Resolution::Closed => Err(TaskError::BusClosed),
            other => Err(TaskError::UnexpectedResolution {
                effect: "select",
                resolution: other.kind(),
            }),
        }
    }

    /// Suspends until an action whose type is in `pattern` is published.
    pub async fn take(&self, pattern: &[ActionType]) -> Result<Action, TaskError> {
        match self.interpreter.perform(Effect::Take(pattern.to_vec())).await {
            Resolution::Took(action) => Ok(action),
            Resolution::Closed => Err(TaskError::BusClosed),
            other => Err(TaskError::UnexpectedResolution {
                effect: "take",
                resolution: other.kind(),
            }),
        }
    }
}
