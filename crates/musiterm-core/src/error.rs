//! Session error types.
//!
//! A quiz session only fails when it is driven out of order. That is a
//! contract violation by the caller, so it is reported once and never
//! retried.

use thiserror::Error;

use crate::session::SessionState;

/// Errors raised by [`QuizSession`](crate::session::QuizSession).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An operation was invoked in a state that does not allow it.
    #[error("invalid session state: `{operation}` is not allowed while the session is {state}")]
    InvalidSessionState {
        operation: &'static str,
        state: SessionState,
    },

    /// `submit_answer` was called with no question on screen.
    #[error("invalid session state: `submit_answer` called with no question pending")]
    NoPendingQuestion,
}
