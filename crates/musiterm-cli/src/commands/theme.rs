//! The `musiterm theme` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let mut state = super::open_state(config_path)?;
    let theme = state.toggle_theme();
    println!("Theme set to {theme}.");
    Ok(())
}
