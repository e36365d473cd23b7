//! musiterm-core: quiz session engine, data model, and presentation traits.
//!
//! This crate holds everything with real state and sequencing: the term
//! dictionaries' shape, the quiz state machine, the driver that walks a
//! session through a presentation sink, and the formatting of history
//! records. Persistence lives in `musiterm-store`.

pub mod clock;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod traits;

pub use clock::Clock;
pub use engine::{QuizEngine, SessionOutcome};
pub use error::SessionError;
pub use model::{Category, Settings, SoundChannel, TermEntry, TermSet, TestRecord, Theme};
pub use session::{AnswerResult, Feedback, NextQuestion, Question, QuizSession, SessionState};
pub use traits::{
    AnswerSource, PresentationSink, ResourceProvider, ScriptedAnswers, SoundCue, StateCodec,
};
