#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use boards_core::{
    Action, ApiCall, ApiError, BoardsConfig, BoardsPage, Effect, Interpreter, Resolution,
    StoreSnapshot, TaskContext,
};
use serde_json::Value;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(boards_logging::initialize_for_tests);
}

/// Interpreter double: records every effect, answers calls from a script,
/// serves a fixed snapshot and feeds takes from a queue.
#[derive(Default)]
pub struct ScriptedInterpreter {
    effects: Mutex<Vec<Effect>>,
    call_results: Mutex<VecDeque<Result<Value, ApiError>>>,
    snapshot: StoreSnapshot,
    takes: Mutex<VecDeque<Action>>,
}

impl ScriptedInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn answer(self, result: Result<Value, ApiError>) -> Self {
        self.call_results.lock().unwrap().push_back(result);
        self
    }

    pub fn feed(self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.takes.lock().unwrap().extend(actions);
        self
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<Action> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Put(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Call(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn perform(&self, effect: Effect) -> Resolution {
        self.effects.lock().unwrap().push(effect.clone());
        match effect {
            Effect::Call(_) => Resolution::Returned(
                self.call_results
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| Err(ApiError::new("unscripted call"))),
            ),
            Effect::Put(_) => Resolution::Dispatched,
            Effect::Select => Resolution::Snapshot(self.snapshot.clone()),
            Effect::Take(pattern) => {
                let mut takes = self.takes.lock().unwrap();
                while let Some(action) = takes.pop_front() {
                    if action.matches(&pattern) {
                        return Resolution::Took(action);
                    }
                }
                Resolution::Closed
            }
        }
    }
}

pub fn context(interpreter: &Arc<ScriptedInterpreter>) -> TaskContext {
    context_with(interpreter, BoardsConfig::default())
}

pub fn context_with(interpreter: &Arc<ScriptedInterpreter>, config: BoardsConfig) -> TaskContext {
    let interpreter: Arc<dyn Interpreter> = interpreter.clone();
    TaskContext::new(interpreter, Arc::new(config))
}

pub fn page(ids: usize, page_index: usize, is_fetching: bool, is_last_page: bool) -> BoardsPage {
    BoardsPage {
        ids: (0..ids).map(|n| format!("board-{n}")).collect(),
        is_fetching,
        page_index,
        is_last_page,
    }
}
