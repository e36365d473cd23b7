//! Core data model types for musiterm.
//!
//! These are the types every other part of the system passes around:
//! dictionary categories and their term sets, completed test records, and
//! the user's persisted preferences.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format used for [`TestRecord::date`].
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A dictionary grouping that can be browsed or tested.
///
/// `Complete` is its own resource, not the union of the six parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Complete,
    Tempo,
    Expression,
    Dynamics,
    General,
    Articulation,
    Signs,
}

impl Category {
    /// Every category, `Complete` first.
    pub const ALL: [Category; 7] = [
        Category::Complete,
        Category::Tempo,
        Category::Expression,
        Category::Dynamics,
        Category::General,
        Category::Articulation,
        Category::Signs,
    ];

    /// The six topical parts, in menu order.
    pub const PARTS: [Category; 6] = [
        Category::Tempo,
        Category::Expression,
        Category::Dynamics,
        Category::General,
        Category::Articulation,
        Category::Signs,
    ];

    /// Name of the encoded resource backing this category.
    pub fn resource_name(self) -> &'static str {
        match self {
            Category::Complete => "dictionary.enc",
            Category::Tempo => "tempo.enc",
            Category::Expression => "expression.enc",
            Category::Dynamics => "dynamics.enc",
            Category::General => "general.enc",
            Category::Articulation => "articulation.enc",
            Category::Signs => "signs.enc",
        }
    }

    /// Label written into a [`TestRecord`] for a test over this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Complete => "Complete Test",
            Category::Tempo => "Tempo",
            Category::Expression => "Expression",
            Category::Dynamics => "Dynamics",
            Category::General => "General",
            Category::Articulation => "Articulation",
            Category::Signs => "Signs",
        }
    }

    /// Short lowercase identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Complete => "complete",
            Category::Tempo => "tempo",
            Category::Expression => "expression",
            Category::Dynamics => "dynamics",
            Category::General => "general",
            Category::Articulation => "articulation",
            Category::Signs => "signs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complete" | "dictionary" => Ok(Category::Complete),
            "tempo" => Ok(Category::Tempo),
            "expression" => Ok(Category::Expression),
            "dynamics" => Ok(Category::Dynamics),
            "general" => Ok(Category::General),
            "articulation" => Ok(Category::Articulation),
            "signs" => Ok(Category::Signs),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A single term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub definition: String,
}

impl TermEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// An insertion-ordered term -> definition mapping for one category.
///
/// Inserting a term that already exists replaces its definition but keeps
/// the term at the position where it first appeared. Deserializing a JSON
/// object with duplicate keys follows the same rule, so the last
/// definition wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermSet {
    terms: IndexMap<String, String>,
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `term: definition` pairs.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Insert or replace a definition, returning the previous one.
    pub fn insert(
        &mut self,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Option<String> {
        self.terms.insert(term.into(), definition.into())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    /// Iterate over `(term, definition)` pairs in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    /// Owned copies of every entry, in dictionary order.
    pub fn entries(&self) -> Vec<TermEntry> {
        self.iter().map(|(t, d)| TermEntry::new(t, d)).collect()
    }

    /// Entries whose term or definition contains `needle`, ignoring case.
    ///
    /// The needle is trimmed first; an empty needle matches everything.
    pub fn search(&self, needle: &str) -> Vec<TermEntry> {
        let needle = needle.trim().to_lowercase();
        self.iter()
            .filter(|(term, definition)| {
                needle.is_empty()
                    || term.to_lowercase().contains(&needle)
                    || definition.to_lowercase().contains(&needle)
            })
            .map(|(t, d)| TermEntry::new(t, d))
            .collect()
    }
}

impl<T, D> FromIterator<(T, D)> for TermSet
where
    T: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, D)>>(iter: I) -> Self {
        let mut set = TermSet::new();
        for (term, definition) in iter {
            set.insert(term, definition);
        }
        set
    }
}

/// Summary of one completed test, as stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Completion time, `YYYY-MM-DD HH:MM`.
    pub date: String,
    /// Category label, e.g. "Complete Test" or "Tempo".
    pub test_type: String,
    /// `correct/total`.
    pub score: String,
    /// Percentage with one decimal place and a trailing `%`.
    pub percentage: String,
}

impl TestRecord {
    pub fn new(
        completed_at: NaiveDateTime,
        test_type: impl Into<String>,
        correct: usize,
        total: usize,
    ) -> Self {
        Self {
            date: completed_at.format(RECORD_DATE_FORMAT).to_string(),
            test_type: test_type.into(),
            score: format!("{correct}/{total}"),
            percentage: format_percentage(correct, total),
        }
    }
}

/// `correct / total * 100` with one decimal place, `"0.0%"` when `total` is 0.
pub fn format_percentage(correct: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", correct as f64 / total as f64 * 100.0)
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// The independently adjustable volume levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundChannel {
    Master,
    /// Persisted with the other volumes; the terminal front end has no
    /// buttons, so no cue is mixed on it.
    Click,
    Correct,
    Incorrect,
    Typing,
}

impl SoundChannel {
    pub const ALL: [SoundChannel; 5] = [
        SoundChannel::Master,
        SoundChannel::Click,
        SoundChannel::Correct,
        SoundChannel::Incorrect,
        SoundChannel::Typing,
    ];

    /// Human-readable name for settings screens.
    pub fn display_name(self) -> &'static str {
        match self {
            SoundChannel::Master => "Master Volume",
            SoundChannel::Click => "Button Clicks",
            SoundChannel::Correct => "Correct Sounds",
            SoundChannel::Incorrect => "Incorrect Sounds",
            SoundChannel::Typing => "Typing Sounds",
        }
    }
}

/// User preferences persisted across runs.
///
/// Fields are public so the settings store can rehydrate exactly what was
/// on disk; interactive edits go through [`Settings::set_volume`], which
/// clamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub theme: Theme,
    pub master_volume: f64,
    pub click_volume: f64,
    pub correct_volume: f64,
    pub incorrect_volume: f64,
    pub typing_volume: f64,
}

/// Volume every channel starts at.
pub const DEFAULT_VOLUME: f64 = 1.0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            master_volume: DEFAULT_VOLUME,
            click_volume: DEFAULT_VOLUME,
            correct_volume: DEFAULT_VOLUME,
            incorrect_volume: DEFAULT_VOLUME,
            typing_volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    pub fn is_dark_theme(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn volume(&self, channel: SoundChannel) -> f64 {
        match channel {
            SoundChannel::Master => self.master_volume,
            SoundChannel::Click => self.click_volume,
            SoundChannel::Correct => self.correct_volume,
            SoundChannel::Incorrect => self.incorrect_volume,
            SoundChannel::Typing => self.typing_volume,
        }
    }

    /// Set a channel's level, clamped to `[0.0, 1.0]`.
    pub fn set_volume(&mut self, channel: SoundChannel, value: f64) {
        let value = clamp_volume(value);
        let slot = match channel {
            SoundChannel::Master => &mut self.master_volume,
            SoundChannel::Click => &mut self.click_volume,
            SoundChannel::Correct => &mut self.correct_volume,
            SoundChannel::Incorrect => &mut self.incorrect_volume,
            SoundChannel::Typing => &mut self.typing_volume,
        };
        *slot = value;
    }

    /// Playback level for a channel: its own level scaled by the master.
    pub fn effective_volume(&self, channel: SoundChannel) -> f64 {
        match channel {
            SoundChannel::Master => self.master_volume,
            other => self.volume(other) * self.master_volume,
        }
    }
}

/// Clamp to `[0.0, 1.0]`; NaN and infinities become 0.0.
pub fn clamp_volume(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
