//! Boards core: actions, effect descriptors and the tasks that coordinate them.
mod action;
mod config;
mod context;
mod effect;
mod paging;
pub mod progress;
mod state;
pub mod tasks;
mod watch;

pub use action::{
    Action, ActionType, BoardId, Completion, CompletionReceiver, PageRequest, Settled,
    UpdateParams,
};
pub use config::{BoardsConfig, BOARDS_PER_PAGE, HOME_PATH};
pub use context::{Interpreter, TaskContext, TaskError};
pub use effect::{ApiCall, ApiError, Effect, Resolution, DEFAULT_FAILURE_MESSAGE};
pub use paging::ScrollDecision;
pub use progress::{ProgressCycle, ProgressPhase};
pub use state::{BoardsPage, Location, MainPage, PagesState, RoutingState, StoreSnapshot};
pub use watch::{progress_coordinator, watchers, TaskFuture, Watcher};
