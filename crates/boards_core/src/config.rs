use serde::Deserialize;

/// Number of boards requested per list page.
pub const BOARDS_PER_PAGE: usize = 20;

/// Route of the board list; scroll paging only runs there.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardsConfig {
    pub boards_per_page: usize,
    pub home_path: String,
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            boards_per_page: BOARDS_PER_PAGE,
            home_path: HOME_PATH.to_string(),
        }
    }
}
