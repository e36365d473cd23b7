//! The quiz session state machine.
//!
//! A session moves `Idle -> InProgress -> Completed`. Starting it shuffles
//! a copy of the chosen term set; questions are then drawn one at a time
//! until the set is exhausted. Each submitted answer is scored and the
//! next question is drawn immediately, so callers only ever see
//! "here is the feedback, and here is what comes next".

use std::fmt;

use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SessionError;
use crate::model::{TermEntry, TermSet, TestRecord};

/// Lifecycle of a [`QuizSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// A question ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The term whose meaning is asked for.
    pub term: String,
    /// 1-based position of this question.
    pub number: usize,
    /// Total questions in the session.
    pub total: usize,
}

impl Question {
    /// Progress line, e.g. `Question 3/12`.
    pub fn progress(&self) -> String {
        format!("Question {}/{}", self.number, self.total)
    }
}

/// What drawing the next question produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    Question(Question),
    /// Every entry has been asked; the session is now completed.
    Finished,
}

/// Verdict on one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_definition: String },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }

    pub fn correct_definition(&self) -> Option<&str> {
        match self {
            Feedback::Correct => None,
            Feedback::Incorrect { correct_definition } => Some(correct_definition),
        }
    }
}

/// Feedback for the answered question plus the question that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub feedback: Feedback,
    pub next: NextQuestion,
}

/// One attempt at a test over a single term set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: SessionState,
    label: String,
    remaining: Vec<TermEntry>,
    current: Option<TermEntry>,
    total_questions: usize,
    correct_answers: usize,
    question_number: usize,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// A fresh session in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            label: String::new(),
            remaining: Vec::new(),
            current: None,
            total_questions: 0,
            correct_answers: 0,
            question_number: 0,
        }
    }

    /// Begin the session over `set`, reporting results under `label`.
    ///
    /// Entries are shuffled uniformly (Fisher-Yates) with `rng`. An empty set
    /// completes the session immediately with a 0/0 score.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        set: &TermSet,
        label: impl Into<String>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_state("start", SessionState::Idle)?;

        let mut entries = set.entries();
        entries.shuffle(rng);

        self.label = label.into();
        self.total_questions = entries.len();
        self.remaining = entries;
        self.current = None;
        self.correct_answers = 0;
        self.question_number = 0;
        self.state = if self.total_questions == 0 {
            tracing::warn!(label = %self.label, "starting a session over an empty term set");
            SessionState::Completed
        } else {
            SessionState::InProgress
        };
        Ok(())
    }

    /// Draw the next question, or complete the session if none remain.
    pub fn next_question(&mut self) -> Result<NextQuestion, SessionError> {
        self.expect_state("next_question", SessionState::InProgress)?;

        match self.remaining.pop() {
            Some(entry) => {
                self.question_number += 1;
                let question = Question {
                    term: entry.term.clone(),
                    number: self.question_number,
                    total: self.total_questions,
                };
                self.current = Some(entry);
                Ok(NextQuestion::Question(question))
            }
            None => {
                self.current = None;
                self.state = SessionState::Completed;
                Ok(NextQuestion::Finished)
            }
        }
    }

    /// Score `answer` against the pending question and draw the next one.
    ///
    /// Surrounding whitespace in the answer is ignored and the comparison is
    /// case-insensitive; anything else must match exactly.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerResult, SessionError> {
        self.expect_state("submit_answer", SessionState::InProgress)?;
        let entry = self.current.take().ok_or(SessionError::NoPendingQuestion)?;

        let feedback = if answers_match(answer, &entry.definition) {
            self.correct_answers += 1;
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                correct_definition: entry.definition,
            }
        };

        let next = self.next_question()?;
        Ok(AnswerResult { feedback, next })
    }

    /// Build the record for a completed session, stamped `completed_at`.
    pub fn result(&self, completed_at: NaiveDateTime) -> Result<TestRecord, SessionError> {
        self.expect_state("result", SessionState::Completed)?;
        Ok(TestRecord::new(
            completed_at,
            self.label.clone(),
            self.correct_answers,
            self.total_questions,
        ))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    /// Number of questions drawn so far.
    pub fn question_number(&self) -> usize {
        self.question_number
    }

    /// Entries not yet drawn.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Term of the question currently awaiting an answer.
    pub fn current_term(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.term.as_str())
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidSessionState {
                operation,
                state: self.state,
            })
        }
    }
}

/// Case-insensitive exact match after trimming the user's answer.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.to_lowercase()
}
