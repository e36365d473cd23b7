//! Text renderings of history and dictionary listings.

use anyhow::{Context, Result};

use crate::model::{TermEntry, TestRecord};

/// History ordered for display, most recent first.
pub fn newest_first(records: &[TestRecord]) -> Vec<&TestRecord> {
    records.iter().rev().collect()
}

/// Pretty JSON array of the records, in stored order.
pub fn history_json(records: &[TestRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("failed to serialize history")
}

/// Markdown table of the records, most recent first.
pub fn history_markdown(records: &[TestRecord]) -> String {
    let mut md = String::new();

    md.push_str(&format!("**Tests taken:** {}\n\n", records.len()));
    if records.is_empty() {
        return md;
    }

    md.push_str("| Date | Test | Score | Percentage |\n");
    md.push_str("|------|------|-------|------------|\n");
    for r in newest_first(records) {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            r.date, r.test_type, r.score, r.percentage
        ));
    }

    md
}

/// One `term = definition` line per entry, terms padded to a common width.
pub fn render_aligned(entries: &[TermEntry]) -> String {
    let Some(width) = entries.iter().map(|e| e.term.chars().count()).max() else {
        return String::new();
    };

    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{:<width$} = {}\n",
            entry.term,
            entry.definition,
            width = width
        ));
    }
    out
}
