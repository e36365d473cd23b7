//! Wall-clock access for stamping test records.

use chrono::{Local, NaiveDateTime};

/// Source of completion timestamps for test records.
///
/// Records carry local wall-clock time; tests pin it with [`Clock::Fixed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(t) => *t,
        }
    }
}
