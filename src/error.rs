//! Error types raised by expectations.
//!
//! [`UnmetExpectation`] is the distinguished assertion-failure signal: the
//! predicate's truth value did not match the requested polarity. Every other
//! variant of [`ExpectError`] is a hard error (a coercion that cannot be
//! performed, an undefined ordering, a malformed pattern) and propagates
//! unchanged. Hard errors are never downgraded to an unmet expectation.

use crate::fluent::CallError;

/// Raised when an expectation's predicate does not match its polarity.
///
/// Carries the formatted failure message. Callers can match on this type
/// specifically, or on [`ExpectError`] as the generic failure kind; the two
/// are interchangeable via the transparent `Unmet` variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct UnmetExpectation(pub String);

/// Errors surfaced by matcher evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ExpectError {
    /// The predicate's truth value did not match the requested polarity.
    #[error(transparent)]
    Unmet(#[from] UnmetExpectation),

    /// A value could not be coerced for a coercing comparison.
    #[error("cannot interpret '{value}' as {target}")]
    Conversion {
        /// Textual form of the value that failed to coerce.
        value: String,
        /// What it was being coerced to ("an integer", "a float", "text").
        target: &'static str,
    },

    /// The two values have no defined ordering or membership relation.
    #[error("cannot compare '{subject}' with '{other}'")]
    Incomparable {
        /// Textual form of the subject.
        subject: String,
        /// Textual form of the other operand.
        other: String,
    },

    /// No matcher is registered under the requested name.
    #[error("no matcher named '{0}' is registered")]
    UnknownMatcher(String),

    /// A matcher was invoked with the wrong number of arguments.
    #[error("matcher '{matcher}' takes {expected} argument(s), got {got}")]
    Arity {
        /// Name of the matcher that was invoked.
        matcher: &'static str,
        /// Number of arguments the matcher takes.
        expected: usize,
        /// Number of arguments it received.
        got: usize,
    },

    /// An error-message pattern was not a valid regular expression.
    #[error("invalid message pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A wrapped callable failed while a return value was expected.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl ExpectError {
    /// Whether this is an unmet expectation, as opposed to a hard error.
    pub fn is_unmet(&self) -> bool {
        matches!(self, ExpectError::Unmet(_))
    }
}
