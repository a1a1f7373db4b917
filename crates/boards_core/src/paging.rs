use crate::{Action, BoardsConfig, StoreSnapshot};

/// What a scroll-to-bottom signal should do, given the current store snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    /// Not on the board list route.
    OffRoute,
    /// The next page is already loaded; only move the page pointer.
    RevealCached { page_index: usize },
    /// Ask for the next page.
    Fetch { page_index: usize },
    /// A fetch is in flight or the last page is loaded.
    Idle,
}

impl ScrollDecision {
    /// Pure decision: route guard first, then cache, then fetch.
    pub fn decide(snapshot: &StoreSnapshot, config: &BoardsConfig) -> Self {
        if snapshot.pathname() != config.home_path {
            return ScrollDecision::OffRoute;
        }

        let page = snapshot.boards_page();
        let next = page.page_index.saturating_add(1);
        if page.is_cached(config.boards_per_page) {
            return ScrollDecision::RevealCached { page_index: next };
        }

        if !page.is_fetching && !page.is_last_page {
            ScrollDecision::Fetch { page_index: next }
        } else {
            ScrollDecision::Idle
        }
    }

    /// The action to dispatch for this decision, if any.
    pub fn into_action(self) -> Option<Action> {
        match self {
            ScrollDecision::RevealCached { page_index } => {
                Some(Action::BoardsSetPageIndex { page_index })
            }
            ScrollDecision::Fetch { page_index } => {
                Some(Action::BoardsFetchRequest { page_index })
            }
            ScrollDecision::OffRoute | ScrollDecision::Idle => None,
        }
    }
}
