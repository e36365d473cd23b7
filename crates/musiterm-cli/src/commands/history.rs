//! The `musiterm history` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use musiterm_core::report::{history_json, history_markdown};
use musiterm_core::PresentationSink;

use crate::terminal::TerminalSink;

pub fn show(config_path: Option<PathBuf>, format: String) -> Result<()> {
    let state = super::open_state(config_path)?;
    let records = state.history();

    match format.as_str() {
        "json" => println!("{}", history_json(records)?),
        "markdown" | "md" => print!("{}", history_markdown(records)),
        _ => {
            println!("Tests taken: {}", records.len());
            TerminalSink::new(std::io::stdout()).show_history(records);
        }
    }

    Ok(())
}

pub fn clear(config_path: Option<PathBuf>, yes: bool) -> Result<()> {
    let mut state = super::open_state(config_path)?;

    if state.history().is_empty() {
        println!("History is already empty.");
        return Ok(());
    }

    if !yes && !confirm("Clear all test history? [y/N] ")? {
        println!("Cancelled.");
        return Ok(());
    }

    let count = state.history().len();
    state.clear_history();
    println!("Cleared {count} test record(s).");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::Write::flush(&mut std::io::stdout()).context("failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read confirmation")?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
