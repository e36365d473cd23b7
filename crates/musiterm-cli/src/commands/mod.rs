pub mod dictionary;
pub mod history;
pub mod init;
pub mod quiz;
pub mod settings;
pub mod theme;

use std::path::PathBuf;

use anyhow::Result;
use musiterm_store::{load_config, load_config_from, AppState};

/// Load the config and open the application state it points at.
pub fn open_state(config_path: Option<PathBuf>) -> Result<AppState> {
    let config = match config_path {
        Some(path) => load_config_from(Some(&path))?,
        None => load_config()?,
    };
    Ok(AppState::open(config))
}
