use serde::Deserialize;

use crate::BoardId;

/// Read-only projection of the external store that tasks may select from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub pages: PagesState,
    pub routing: RoutingState,
}

impl StoreSnapshot {
    pub fn new(all: BoardsPage, pathname: impl Into<String>) -> Self {
        Self {
            pages: PagesState {
                main: MainPage { all },
            },
            routing: RoutingState {
                location_before_transitions: Location {
                    pathname: pathname.into(),
                },
            },
        }
    }

    pub fn boards_page(&self) -> &BoardsPage {
        &self.pages.main.all
    }

    pub fn pathname(&self) -> &str {
        &self.routing.location_before_transitions.pathname
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PagesState {
    pub main: MainPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MainPage {
    pub all: BoardsPage,
}

/// The paginated board list as the store currently holds it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardsPage {
    /// Loaded ids in display order; only ever grows as pages arrive.
    pub ids: Vec<BoardId>,
    pub is_fetching: bool,
    pub page_index: usize,
    pub is_last_page: bool,
}

impl BoardsPage {
    /// True when the page after `page_index` is already loaded.
    pub fn is_cached(&self, page_size: usize) -> bool {
        self.page_index.saturating_mul(page_size) < self.ids.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingState {
    pub location_before_transitions: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Location {
    pub pathname: String,
}
