mod config;
mod session;

use std::path::PathBuf;

use boards_logging::boards_info;
use log::LevelFilter;

pub use config::{load_config, AppConfig, CONFIG_FILENAME};
pub use session::Session;

/// Loads the config named on the command line and runs the scripted session.
pub fn run_app() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_config(&path)?;
    boards_logging::initialize(config.log, LevelFilter::Info);
    boards_info!("boards session starting with {:?}", config);

    let summary = Session::start(&config)?.run()?;
    boards_info!(
        "session finished: {} boards loaded, page {}, last page {}, {} actions",
        summary.loaded,
        summary.page_index,
        summary.is_last_page,
        summary.actions_seen
    );
    Ok(())
}
