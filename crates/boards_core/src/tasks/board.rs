use boards_logging::{boards_debug, boards_warn};
use serde_json::{json, Value};

use super::call_and_report;
use crate::{
    Action, ApiCall, ApiError, BoardId, Completion, TaskContext, TaskError, UpdateParams,
};

/// Fetches a single board with the progress bar shown for the whole call.
pub async fn fetch_board(ctx: &TaskContext, id: BoardId) -> Result<(), TaskError> {
    ctx.put(Action::ProgressBarStart).await;
    call_and_report(
        ctx,
        ApiCall::FetchBoard { id },
        |payload| Action::BoardFetchSuccess { payload },
        |error| Action::BoardFetchFailure { error },
    )
    .await;
    ctx.put(Action::ProgressBarStop).await;
    Ok(())
}

/// Creates a board from the modal form and settles the form's completion.
pub async fn create_board(
    ctx: &TaskContext,
    title: String,
    description: String,
    completion: Completion,
) -> Result<(), TaskError> {
    let created = call_and_report(
        ctx,
        ApiCall::CreateBoard { title, description },
        |payload| Action::BoardCreateSuccess { payload },
        |error| Action::BoardCreateFailure { error },
    )
    .await;
    settle_modal(ctx, created, &completion).await;
    Ok(())
}

/// Removes a board and, unless the last page is loaded, pulls in the next
/// unseen board so the visible page stays full.
///
/// A failed refill is reported as a failed removal even though the board is gone.
pub async fn remove_board(ctx: &TaskContext, id: BoardId) -> Result<(), TaskError> {
    match remove_and_refill(ctx, id).await {
        Ok(payload) => {
            ctx.put(Action::BoardRemoveSuccess { payload }).await;
            ctx.put(Action::ModalHide).await;
        }
        Err(err) => {
            boards_warn!("remove_board failed: {}", err);
            ctx.put(Action::BoardRemoveFailure {
                error: err.failure_message(),
            })
            .await;
        }
    }
    Ok(())
}

async fn remove_and_refill(ctx: &TaskContext, id: BoardId) -> Result<Value, ApiError> {
    let (is_last_page, loaded) = ctx
        .select(|state| {
            let page = state.boards_page();
            (page.is_last_page, page.ids.len())
        })
        .await?;

    let removed = ctx.call(ApiCall::RemoveBoard { id }).await?;

    if !is_last_page {
        // TODO: confirm whether the `+ 1` offset compensates for a store that
        // lags one board behind the server, and drop it if it does not.
        let offset = loaded.saturating_add(1);
        let refill = ctx
            .call(ApiCall::FetchBoards {
                page_index: offset,
                page_size: 1,
            })
            .await?;
        boards_debug!("refilled board list after removal at offset {}", offset);
        ctx.put(Action::BoardAdd { payload: refill }).await;
    }

    Ok(removed)
}

pub async fn update_board(
    ctx: &TaskContext,
    id: BoardId,
    props: Value,
    params: Option<UpdateParams>,
) -> Result<(), TaskError> {
    call_and_report(
        ctx,
        ApiCall::UpdateBoard { id, props, params },
        |payload| Action::BoardUpdateSuccess { payload },
        |error| Action::BoardUpdateFailure { error },
    )
    .await;
    Ok(())
}

/// Update submitted from the edit modal; reports through the plain update actions.
pub async fn update_board_modal_form(
    ctx: &TaskContext,
    id: BoardId,
    props: Value,
    completion: Completion,
) -> Result<(), TaskError> {
    let updated = call_and_report(
        ctx,
        ApiCall::UpdateBoard {
            id,
            props,
            params: None,
        },
        |payload| Action::BoardUpdateSuccess { payload },
        |error| Action::BoardUpdateFailure { error },
    )
    .await;
    settle_modal(ctx, updated, &completion).await;
    Ok(())
}

pub async fn move_board(
    ctx: &TaskContext,
    source_id: BoardId,
    target_id: BoardId,
) -> Result<(), TaskError> {
    call_and_report(
        ctx,
        ApiCall::MoveBoard {
            source_id,
            target_id,
        },
        |payload| Action::BoardMoveSuccess { payload },
        |error| Action::BoardMoveFailure { error },
    )
    .await;
    Ok(())
}

/// Stars or unstars a board without notifying members or logging activity.
pub async fn toggle_starred(ctx: &TaskContext, id: BoardId, starred: bool) -> Result<(), TaskError> {
    call_and_report(
        ctx,
        ApiCall::UpdateBoard {
            id,
            props: json!({ "starred": starred }),
            params: Some(UpdateParams::silent()),
        },
        |payload| Action::BoardToggleStarredSuccess { payload },
        |error| Action::BoardToggleStarredFailure { error },
    )
    .await;
    Ok(())
}

/// Closes the modal on success, then hands the outcome back to the form.
async fn settle_modal(ctx: &TaskContext, succeeded: bool, completion: &Completion) {
    if succeeded {
        ctx.put(Action::ModalHide).await;
        completion.resolve();
    } else {
        completion.reject();
    }
}
