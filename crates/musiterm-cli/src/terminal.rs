//! Terminal presentation: prints to a writer, reads answers line by line.

use std::io::{BufRead, Write};

use comfy_table::{Cell, Table};
use musiterm_core::report::newest_first;
use musiterm_core::{AnswerSource, PresentationSink, Question, TestRecord};

/// Typing this instead of an answer leaves the test.
pub const QUIT_COMMAND: &str = ":q";

pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!("failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn show_question(&mut self, term: &str, progress: &str) {
        self.emit(&format!("\n{progress}\n  {term}\n> "));
    }

    fn show_feedback(&mut self, correct: bool, correct_definition: Option<&str>) {
        let text = match (correct, correct_definition) {
            (true, _) => "Correct!\n".to_string(),
            (false, Some(definition)) => format!("Incorrect. The correct answer is: {definition}\n"),
            (false, None) => "Incorrect.\n".to_string(),
        };
        self.emit(&text);
    }

    fn show_result(&mut self, record: &TestRecord) {
        self.emit(&format!(
            "\n{} finished: {} ({})\n",
            record.test_type, record.score, record.percentage
        ));
    }

    fn show_history(&mut self, records: &[TestRecord]) {
        if records.is_empty() {
            self.emit("No tests taken yet.\n");
            return;
        }
        self.emit(&format!("{}\n", history_table(records)));
    }
}

pub fn history_table(records: &[TestRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Test", "Score", "Percentage"]);
    for r in newest_first(records) {
        table.add_row(vec![
            Cell::new(&r.date),
            Cell::new(&r.test_type),
            Cell::new(&r.score),
            Cell::new(&r.percentage),
        ]);
    }
    table
}

/// Reads one answer per line. End of input or [`QUIT_COMMAND`] ends the test.
pub struct LineAnswers<R: BufRead> {
    input: R,
}

impl<R: BufRead> LineAnswers<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> AnswerSource for LineAnswers<R> {
    fn next_answer(&mut self, _question: &Question) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.trim() == QUIT_COMMAND {
                    None
                } else {
                    Some(answer.to_string())
                }
            }
            Err(e) => {
                tracing::warn!("failed to read answer: {e}");
                None
            }
        }
    }
}
