//! The `musiterm quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use musiterm_core::{Category, QuizEngine, SessionOutcome};

use crate::terminal::{LineAnswers, TerminalSink, QUIT_COMMAND};

pub fn execute(
    config_path: Option<PathBuf>,
    category: Option<Category>,
    seed: Option<u64>,
) -> Result<()> {
    let mut state = super::open_state(config_path)?;
    let category = category.unwrap_or(state.config.default_category);

    let mut engine = match seed {
        Some(seed) => QuizEngine::with_seed(seed),
        None => QuizEngine::new(),
    };

    let set = state.dictionaries().get(category);
    if set.is_empty() {
        eprintln!(
            "No terms available for {}. Run `musiterm init` to create sample dictionaries.",
            category.label()
        );
    } else {
        println!(
            "{}: {} questions. Type the definition, or {QUIT_COMMAND} to stop.",
            category.label(),
            set.len()
        );
    }

    let mut sink = TerminalSink::new(std::io::stdout());
    let mut answers = LineAnswers::new(std::io::stdin().lock());
    let outcome = engine.run(
        set,
        category.label(),
        state.settings(),
        &mut sink,
        &mut answers,
    )?;

    match outcome {
        SessionOutcome::Completed(record) => state.record_result(record),
        SessionOutcome::Abandoned { answered, total } => {
            println!("\nTest stopped after {answered} of {total} questions. Nothing was recorded.");
        }
    }

    Ok(())
}
