//! The `musiterm dictionary` command.

use std::path::PathBuf;

use anyhow::Result;
use musiterm_core::report::render_aligned;
use musiterm_core::Category;

pub fn execute(
    config_path: Option<PathBuf>,
    category: Option<Category>,
    search: Option<String>,
) -> Result<()> {
    let state = super::open_state(config_path)?;
    let category = category.unwrap_or(state.config.default_category);
    let set = state.dictionaries().get(category);

    let entries = match &search {
        Some(needle) => set.search(needle),
        None => set.entries(),
    };

    if entries.is_empty() {
        match search {
            Some(needle) => println!("No terms in {} match \"{needle}\".", category.label()),
            None => println!("The {} dictionary is empty.", category.label()),
        }
        return Ok(());
    }

    print!("{}", render_aligned(&entries));
    Ok(())
}
