//! The take-every table: which request action starts which task.

use futures_util::future::{BoxFuture, FutureExt};

use crate::progress::coordinate_progress_bar;
use crate::tasks;
use crate::{Action, ActionType, TaskContext, TaskError};

pub type TaskFuture = BoxFuture<'static, Result<(), TaskError>>;

/// Starts a fresh task for every action matching `pattern`.
#[derive(Clone, Copy)]
pub struct Watcher {
    pub name: &'static str,
    pub pattern: &'static [ActionType],
    start: fn(Action, TaskContext) -> Option<TaskFuture>,
}

impl Watcher {
    /// Builds the task for `action`; `None` if the action is not this watcher's.
    pub fn start(&self, action: Action, ctx: TaskContext) -> Option<TaskFuture> {
        if !action.matches(self.pattern) {
            return None;
        }
        (self.start)(action, ctx)
    }
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Every watcher the root process runs, in start order.
pub fn watchers() -> Vec<Watcher> {
    vec![
        Watcher {
            name: "fetch_boards",
            pattern: &[ActionType::BoardsFetchRequest],
            start: |action, ctx| match action {
                Action::BoardsFetchRequest { page_index } => {
                    Some(async move { tasks::fetch_boards(&ctx, page_index).await }.boxed())
                }
                _ => None,
            },
        },
        Watcher {
            name: "fetch_starred_boards",
            pattern: &[ActionType::BoardsFetchStarredRequest],
            start: |_, ctx| Some(async move { tasks::fetch_starred_boards(&ctx).await }.boxed()),
        },
        Watcher {
            name: "fetch_board",
            pattern: &[ActionType::BoardFetchRequest],
            start: |action, ctx| match action {
                Action::BoardFetchRequest { id } => {
                    Some(async move { tasks::fetch_board(&ctx, id).await }.boxed())
                }
                _ => None,
            },
        },
        Watcher {
            name: "create_board",
            pattern: &[ActionType::BoardCreateRequest],
            start: |action, ctx| match action {
                Action::BoardCreateRequest {
                    title,
                    description,
                    completion,
                } => Some(async move {
                    tasks::create_board(&ctx, title, description, completion).await
                }.boxed()),
                _ => None,
            },
        },
        Watcher {
            name: "remove_board",
            pattern: &[ActionType::BoardRemoveRequest],
            start: |action, ctx| match action {
                Action::BoardRemoveRequest { id } => {
                    Some(async move { tasks::remove_board(&ctx, id).await }.boxed())
                }
                _ => None,
            },
        },
        Watcher {
            name: "update_board",
            pattern: &[ActionType::BoardUpdateRequest],
            start: |action, ctx| match action {
                Action::BoardUpdateRequest { id, props, params } => Some(async move {
                    tasks::update_board(&ctx, id, props, params).await
                }.boxed()),
                _ => None,
            },
        },
        Watcher {
            name: "move_board",
            pattern: &[ActionType::BoardMoveRequest],
            start: |action, ctx| match action {
                Action::BoardMoveRequest {
                    source_id,
                    target_id,
                } => Some(async move {
                    tasks::move_board(&ctx, source_id, target_id).await
                }.boxed()),
                _ => None,
            },
        },
        Watcher {
            name: "update_board_modal_form",
            pattern: &[ActionType::BoardUpdateModalForm],
            start: |action, ctx| match action {
                Action::BoardUpdateModalForm {
                    id,
                    props,
                    completion,
                } => Some(async move {
                    tasks::update_board_modal_form(&ctx, id, props, completion).await
                }.boxed()),
                _ => None,
            },
        },
        Watcher {
            name: "scroll_bottom",
            pattern: &[ActionType::ScrollBottom],
            start: |_, ctx| Some(async move { tasks::fetch_boards_on_scroll(&ctx).await }.boxed()),
        },
        Watcher {
            name: "toggle_starred",
            pattern: &[ActionType::BoardToggleStarredRequest],
            start: |action, ctx| match action {
                Action::BoardToggleStarredRequest { id, starred } => Some(async move {
                    tasks::toggle_starred(&ctx, id, starred).await
                }.boxed()),
                _ => None,
            },
        },
    ]
}

/// The progress bar coordinator as a spawnable future.
pub fn progress_coordinator(ctx: TaskContext) -> TaskFuture {
    async move { coordinate_progress_bar(&ctx).await }.boxed()
}
