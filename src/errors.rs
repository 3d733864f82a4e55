//! Error types for matcher construction and assertions.
//!
//! Mismatches are not errors: they flow through [`Matcher::matches`] and
//! [`Matcher::describe_mismatch`]. The types here cover programming errors
//! and the failure raised by the assertion helpers.
//!
//! [`Matcher::matches`]: crate::Matcher::matches
//! [`Matcher::describe_mismatch`]: crate::Matcher::describe_mismatch

use thiserror::Error;

/// Errors that can occur while building or inspecting matchers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    /// A function matcher was built without a source object.
    #[error("source object for {function} must be present")]
    AbsentSource { function: String },

    /// Evaluation state was queried before any candidate was matched.
    #[error("no candidate has been evaluated yet")]
    NotEvaluated,

    /// Describe configuration could not be read or parsed.
    #[error("invalid describe config: {message}")]
    Config { message: String },
}

/// Result type for matcher operations.
pub type MatcherResult<T> = Result<T, MatcherError>;

/// Raised by the assertion helpers when a candidate does not match.
///
/// The message has the fixed three-line shape:
///
/// ```text
/// <reason>
/// Expected: <description>
///      but: <mismatch>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The full failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
