use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use boards_core::BoardsConfig;
use boards_logging::{boards_info, LogDestination};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "./boards.ron";

const SEED_BOARDS: usize = 45;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub boards: BoardsConfig,
    pub log: LogDestination,
    /// Boards the in-memory API starts with.
    pub seed_boards: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            boards: BoardsConfig::default(),
            log: LogDestination::default(),
            seed_boards: SEED_BOARDS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("boards_per_page must be at least 1")]
    EmptyPage,
}

/// Reads `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if config.boards.boards_per_page == 0 {
        return Err(ConfigError::EmptyPage);
    }
    boards_info!("Loaded config from {:?}", path);
    Ok(config)
}
