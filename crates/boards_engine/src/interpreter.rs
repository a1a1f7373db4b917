use std::sync::Arc;

use async_trait::async_trait;
use boards_core::{ApiCall, ApiError, Effect, Interpreter, Resolution};
use boards_logging::{boards_trace, boards_warn};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{ActionBus, BoardsApi, StateStore, Subscription};

/// Executes effects against the real collaborators.
///
/// Calls go to the [`BoardsApi`], puts to the [`ActionBus`], selects read the
/// [`StateStore`]. Takes need a subscription made before the task started;
/// without one they resolve as closed.
pub struct BusInterpreter {
    api: Arc<dyn BoardsApi>,
    bus: Arc<ActionBus>,
    store: Arc<dyn StateStore>,
    subscription: Option<Mutex<Subscription>>,
}

impl BusInterpreter {
    pub fn new(api: Arc<dyn BoardsApi>, bus: Arc<ActionBus>, store: Arc<dyn StateStore>) -> Self {
        Self {
            api,
            bus,
            store,
            subscription: None,
        }
    }

    /// Lets take effects read from `subscription`.
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(Mutex::new(subscription));
        self
    }

    async fn call(&self, call: ApiCall) -> Result<Value, ApiError> {
        boards_trace!("call {}", call.name());
        match call {
            ApiCall::FetchBoards {
                page_index,
                page_size,
            } => self.api.fetch_boards(page_index, page_size).await,
            ApiCall::FetchStarredBoards => self.api.fetch_starred_boards().await,
            ApiCall::FetchBoard { id } => self.api.fetch_board(&id).await,
            ApiCall::CreateBoard { title, description } => {
                self.api.create_board(&title, &description).await
            }
            ApiCall::RemoveBoard { id } => self.api.remove_board(&id).await,
            ApiCall::UpdateBoard { id, props, params } => {
                self.api.update_board(&id, &props, params).await
            }
            ApiCall::MoveBoard {
                source_id,
                target_id,
            } => self.api.move_board(&source_id, &target_id).await,
        }
    }
}

#[async_trait]
impl Interpreter for BusInterpreter {
    async fn perform(&self, effect: Effect) -> Resolution {
        match effect {
            Effect::Call(call) => Resolution::Returned(self.call(call).await),
            Effect::Put(action) => {
                if self.bus.publish(action) {
                    Resolution::Dispatched
                } else {
                    Resolution::Closed
                }
            }
            Effect::Select => Resolution::Snapshot(self.store.snapshot()),
            Effect::Take(pattern) => {
                let Some(subscription) = &self.subscription else {
                    boards_warn!("take {:?} without a subscription", pattern);
                    return Resolution::Closed;
                };
                match subscription.lock().await.next_matching(&pattern).await {
                    Some(action) => Resolution::Took(action),
                    None => Resolution::Closed,
                }
            }
        }
    }
}
