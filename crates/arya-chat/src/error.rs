//! Error types for the routing core.
//!
//! Data-level failures (menu store outage, QA backend error) never
//! surface here; the router converts those into apology text. What
//! remains is caller misuse and poisoned internal state.

use arya_core::error::AryaError;

/// Errors from the intent router.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("question exceeds maximum length of {0} characters")]
    QuestionTooLong(usize),
    #[error("state error: {0}")]
    State(String),
}

impl From<AryaError> for ChatError {
    fn from(err: AryaError) -> Self {
        ChatError::State(err.to_string())
    }
}
