//! Seams between the core and its external collaborators.
//!
//! The presentation layer implements [`PresentationSink`] and
//! [`AnswerSource`]; resource access and at-rest encoding are supplied
//! through [`ResourceProvider`] and [`StateCodec`].

use std::collections::VecDeque;

use crate::model::{SoundChannel, TestRecord};
use crate::session::Question;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Feedback sounds the engine asks the presentation layer to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// An answer was typed and submitted.
    Keystroke,
    Correct,
    Incorrect,
}

impl SoundCue {
    /// The volume channel this cue is mixed on.
    pub fn channel(self) -> SoundChannel {
        match self {
            SoundCue::Keystroke => SoundChannel::Typing,
            SoundCue::Correct => SoundChannel::Correct,
            SoundCue::Incorrect => SoundChannel::Incorrect,
        }
    }
}

/// Receives everything the core wants shown to the user.
///
/// Calls are synchronous and the core never inspects what they do.
pub trait PresentationSink {
    fn show_question(&mut self, term: &str, progress: &str);

    /// `correct_definition` is present only when the answer was wrong.
    fn show_feedback(&mut self, correct: bool, correct_definition: Option<&str>);

    fn show_result(&mut self, record: &TestRecord);

    fn show_history(&mut self, records: &[TestRecord]);

    /// Play a feedback sound at `volume` (already scaled by master).
    fn play_cue(&mut self, _cue: SoundCue, _volume: f64) {}
}

/// Supplies the user's answer to each question.
pub trait AnswerSource {
    /// `None` means the user left the test early.
    fn next_answer(&mut self, question: &Question) -> Option<String>;
}

/// Replays a fixed list of answers, then exits early.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, _question: &Question) -> Option<String> {
        self.answers.pop_front()
    }
}

// ---------------------------------------------------------------------------
// Resources and at-rest encoding
// ---------------------------------------------------------------------------

/// Yields decoded bytes for a named, distributed resource.
pub trait ResourceProvider {
    fn decode(&self, name: &str) -> anyhow::Result<Vec<u8>>;
}

/// Encodes user state before it is written and decodes it after reading.
///
/// Implementations must round-trip: `decode(encode(x)) == x`.
pub trait StateCodec {
    fn encode(&self, plain: &[u8]) -> anyhow::Result<Vec<u8>>;

    fn decode(&self, blob: &[u8]) -> anyhow::Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            term: "forte".into(),
            number: 1,
            total: 1,
        }
    }

    #[test]
    fn scripted_answers_run_out() {
        let mut answers = ScriptedAnswers::new(["loud", "soft"]);
        assert_eq!(answers.next_answer(&question()).as_deref(), Some("loud"));
        assert_eq!(answers.next_answer(&question()).as_deref(), Some("soft"));
        assert_eq!(answers.next_answer(&question()), None);
    }

    #[test]
    fn cue_channels() {
        assert_eq!(SoundCue::Correct.channel(), SoundChannel::Correct);
        assert_eq!(SoundCue::Incorrect.channel(), SoundChannel::Incorrect);
        assert_eq!(SoundCue::Keystroke.channel(), SoundChannel::Typing);
    }
}
