//! Quiz engine driver.
//!
//! Walks one [`QuizSession`] from start to finish: every question goes to
//! the presentation sink, every answer comes from an [`AnswerSource`], and
//! the completed record is handed back to the caller for persistence.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::error::SessionError;
use crate::model::{Settings, TermSet, TestRecord};
use crate::session::{NextQuestion, QuizSession, SessionState};
use crate::traits::{AnswerSource, PresentationSink, SoundCue};

/// How a driven session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every question was answered. The record still has to be appended to
    /// history by the caller.
    Completed(TestRecord),
    /// The user left before the end; nothing is recorded.
    Abandoned { answered: usize, total: usize },
}

impl SessionOutcome {
    pub fn record(&self) -> Option<&TestRecord> {
        match self {
            SessionOutcome::Completed(record) => Some(record),
            SessionOutcome::Abandoned { .. } => None,
        }
    }
}

/// Sink that discards everything.
pub struct NoopSink;

impl PresentationSink for NoopSink {
    fn show_question(&mut self, _: &str, _: &str) {}
    fn show_feedback(&mut self, _: bool, _: Option<&str>) {}
    fn show_result(&mut self, _: &TestRecord) {}
    fn show_history(&mut self, _: &[TestRecord]) {}
}

/// Runs quiz sessions with a shared random source and clock.
pub struct QuizEngine {
    rng: StdRng,
    clock: Clock,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    /// Engine seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            clock: Clock::System,
        }
    }

    /// Engine with a reproducible question order.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Drive a full session over `set`.
    ///
    /// Feedback cues are played at the effective volumes in `settings`.
    /// Returns [`SessionOutcome::Abandoned`] as soon as `answers` yields
    /// `None`.
    pub fn run(
        &mut self,
        set: &TermSet,
        label: &str,
        settings: &Settings,
        sink: &mut dyn PresentationSink,
        answers: &mut dyn AnswerSource,
    ) -> Result<SessionOutcome, SessionError> {
        let mut session = QuizSession::new();
        session.start(set, label, &mut self.rng)?;

        let mut next = match session.state() {
            SessionState::InProgress => session.next_question()?,
            _ => NextQuestion::Finished,
        };

        while let NextQuestion::Question(question) = next {
            sink.show_question(&question.term, &question.progress());

            let Some(answer) = answers.next_answer(&question) else {
                let answered = question.number - 1;
                tracing::info!(
                    label,
                    answered,
                    total = session.total_questions(),
                    "session abandoned"
                );
                return Ok(SessionOutcome::Abandoned {
                    answered,
                    total: session.total_questions(),
                });
            };

            self.play(sink, settings, SoundCue::Keystroke);
            let result = session.submit_answer(&answer)?;
            let cue = if result.feedback.is_correct() {
                SoundCue::Correct
            } else {
                SoundCue::Incorrect
            };
            self.play(sink, settings, cue);
            sink.show_feedback(
                result.feedback.is_correct(),
                result.feedback.correct_definition(),
            );
            next = result.next;
        }

        let record = session.result(self.clock.now())?;
        tracing::info!(
            label,
            score = %record.score,
            percentage = %record.percentage,
            "session completed"
        );
        sink.show_result(&record);
        Ok(SessionOutcome::Completed(record))
    }

    fn play(&self, sink: &mut dyn PresentationSink, settings: &Settings, cue: SoundCue) {
        let volume = settings.effective_volume(cue.channel());
        tracing::debug!(?cue, volume, "sound cue");
        sink.play_cue(cue, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SoundChannel;
    use crate::traits::ScriptedAnswers;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq)]
    enum Event {
        Question(String, String),
        Feedback(bool, Option<String>),
        Cue(SoundCue, f64),
        Result(TestRecord),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<Event>,
    }

    impl PresentationSink for RecordingSink {
        fn show_question(&mut self, term: &str, progress: &str) {
            self.events
                .push(Event::Question(term.to_string(), progress.to_string()));
        }

        fn show_feedback(&mut self, correct: bool, correct_definition: Option<&str>) {
            self.events.push(Event::Feedback(
                correct,
                correct_definition.map(str::to_string),
            ));
        }

        fn show_result(&mut self, record: &TestRecord) {
            self.events.push(Event::Result(record.clone()));
        }

        fn show_history(&mut self, _records: &[TestRecord]) {}

        fn play_cue(&mut self, cue: SoundCue, volume: f64) {
            self.events.push(Event::Cue(cue, volume));
        }
    }

    fn clock() -> Clock {
        Clock::fixed(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        )
    }

    /// Answers correctly by looking the term up in the set.
    struct Oracle<'a> {
        set: &'a TermSet,
        wrong_from: usize,
    }

    impl AnswerSource for Oracle<'_> {
        fn next_answer(&mut self, question: &crate::session::Question) -> Option<String> {
            if question.number > self.wrong_from {
                return Some("no idea".into());
            }
            self.set.get(&question.term).map(str::to_string)
        }
    }

    #[test]
    fn completed_run_reports_and_returns_record() {
        let set: TermSet = [("forte", "loud"), ("piano", "soft")].into_iter().collect();
        let mut engine = QuizEngine::with_seed(42).with_clock(clock());
        let mut sink = RecordingSink::default();
        let mut answers = Oracle {
            set: &set,
            wrong_from: 1,
        };

        let outcome = engine
            .run(&set, "Dynamics", &Settings::default(), &mut sink, &mut answers)
            .unwrap();

        let record = outcome.record().unwrap().clone();
        assert_eq!(record.score, "1/2");
        assert_eq!(record.percentage, "50.0%");
        assert_eq!(record.date, "2024-06-01 18:00");

        let questions = sink
            .events
            .iter()
            .filter(|e| matches!(e, Event::Question(..)))
            .count();
        assert_eq!(questions, 2);
        assert_eq!(sink.events.last(), Some(&Event::Result(record)));
        assert!(matches!(sink.events[0], Event::Question(_, ref p) if p == "Question 1/2"));
        assert_eq!(sink.events[1], Event::Cue(SoundCue::Keystroke, 1.0));
        assert_eq!(sink.events[2], Event::Cue(SoundCue::Correct, 1.0));
        assert_eq!(sink.events[3], Event::Feedback(true, None));
    }

    #[test]
    fn incorrect_feedback_carries_definition_and_scaled_volume() {
        let set: TermSet = [("staccato", "detached")].into_iter().collect();
        let mut settings = Settings::default();
        settings.set_volume(SoundChannel::Master, 0.5);
        settings.set_volume(SoundChannel::Incorrect, 0.5);
        settings.set_volume(SoundChannel::Typing, 0.2);

        let mut engine = QuizEngine::with_seed(1).with_clock(clock());
        let mut sink = RecordingSink::default();
        let outcome = engine
            .run(
                &set,
                "Articulation",
                &settings,
                &mut sink,
                &mut ScriptedAnswers::new(["smooth"]),
            )
            .unwrap();

        assert_eq!(outcome.record().unwrap().score, "0/1");
        assert_eq!(sink.events[1], Event::Cue(SoundCue::Keystroke, 0.1));
        assert_eq!(sink.events[2], Event::Cue(SoundCue::Incorrect, 0.25));
        assert_eq!(
            sink.events[3],
            Event::Feedback(false, Some("detached".into()))
        );
    }

    #[test]
    fn running_out_of_answers_abandons() {
        let set: TermSet = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        let mut engine = QuizEngine::with_seed(9).with_clock(clock());
        let mut sink = RecordingSink::default();

        let outcome = engine
            .run(
                &set,
                "General",
                &Settings::default(),
                &mut sink,
                &mut ScriptedAnswers::new(["x"]),
            )
            .unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Abandoned {
                answered: 1,
                total: 3
            }
        );
        assert!(outcome.record().is_none());
        assert!(!sink.events.iter().any(|e| matches!(e, Event::Result(_))));
    }

    #[test]
    fn empty_set_goes_straight_to_result() {
        let mut engine = QuizEngine::with_seed(0).with_clock(clock());
        let mut sink = RecordingSink::default();
        let outcome = engine
            .run(
                &TermSet::new(),
                "Signs",
                &Settings::default(),
                &mut sink,
                &mut ScriptedAnswers::default(),
            )
            .unwrap();

        let record = outcome.record().unwrap();
        assert_eq!(record.score, "0/0");
        assert_eq!(record.percentage, "0.0%");
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn same_seed_same_order() {
        let set: TermSet = (0..10).map(|i| (format!("t{i}"), format!("d{i}"))).collect();
        let order = |seed| {
            let mut sink = RecordingSink::default();
            QuizEngine::with_seed(seed)
                .run(
                    &set,
                    "Complete Test",
                    &Settings::default(),
                    &mut sink,
                    &mut ScriptedAnswers::new(vec!["?"; 10]),
                )
                .unwrap();
            sink.events
                .into_iter()
                .filter_map(|e| match e {
                    Event::Question(term, _) => Some(term),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(order(3), order(3));
    }
}
