use boards_logging::{boards_debug, boards_warn};

use super::call_and_report;
use crate::{Action, ApiCall, PageRequest, ScrollDecision, TaskContext, TaskError};

/// Fetches one page of boards; the success action echoes the requested page.
pub async fn fetch_boards(ctx: &TaskContext, page_index: usize) -> Result<(), TaskError> {
    let page_size = ctx.config().boards_per_page;
    let call = ApiCall::FetchBoards {
        page_index,
        page_size,
    };
    match ctx.call(call).await {
        Ok(payload) => {
            ctx.put(Action::BoardsFetchSuccess {
                payload,
                request: PageRequest { page_index },
            })
            .await;
        }
        Err(err) => {
            boards_warn!("fetch_boards page {} failed: {}", page_index, err);
            ctx.put(Action::BoardsFetchFailure {
                error: err.failure_message(),
            })
            .await;
        }
    }
    Ok(())
}

pub async fn fetch_starred_boards(ctx: &TaskContext) -> Result<(), TaskError> {
    call_and_report(
        ctx,
        ApiCall::FetchStarredBoards,
        |payload| Action::BoardsFetchStarredSuccess { payload },
        |error| Action::BoardsFetchStarredFailure { error },
    )
    .await;
    Ok(())
}

/// Reacts to the list being scrolled to the bottom.
///
/// Never calls the API itself: it either moves the page pointer over an
/// already-loaded page or asks for the next page to be fetched.
pub async fn fetch_boards_on_scroll(ctx: &TaskContext) -> Result<(), TaskError> {
    let config = ctx.config().clone();
    let decision = ctx
        .select(move |state| ScrollDecision::decide(state, &config))
        .await?;
    boards_debug!("scroll bottom: {:?}", decision);

    if let Some(action) = decision.into_action() {
        ctx.put(action).await;
    }
    Ok(())
}
