//! Per-feature tasks. Each one runs to completion and dispatches exactly one
//! success or one failure action.

mod board;
mod list;

pub use board::{
    create_board, fetch_board, move_board, remove_board, toggle_starred, update_board,
    update_board_modal_form,
};
pub use list::{fetch_boards, fetch_boards_on_scroll, fetch_starred_boards};

use boards_logging::boards_warn;
use serde_json::Value;

use crate::{Action, ApiCall, TaskContext};

/// Performs `call` and dispatches its success or failure action.
///
/// Returns true when the call succeeded.
async fn call_and_report(
    ctx: &TaskContext,
    call: ApiCall,
    success: fn(Value) -> Action,
    failure: fn(String) -> Action,
) -> bool {
    let name = call.name();
    match ctx.call(call).await {
        Ok(payload) => {
            ctx.put(success(payload)).await;
            true
        }
        Err(err) => {
            boards_warn!("{} failed: {}", name, err);
            ctx.put(failure(err.failure_message())).await;
            false
        }
    }
}
