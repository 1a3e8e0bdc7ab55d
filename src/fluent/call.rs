//! Expectations over callables.
//!
//! This module provides the callable-specific half of the fluent API:
//! - `expect_call()` - Entry point wrapping a callable under test
//! - `CallableExpectation` - Captures the callable plus its arguments
//! - `CallArgs` - The positional and named arguments of the deferred call
//! - `CallError` - The error a callable signals, a kind label plus a message
//!
//! The callable is never invoked at construction. Each invocation-based
//! matcher (`returns`, `raises`, `raises_matching`) invokes it exactly once,
//! so side effects of the callable occur once per matcher call; results are
//! never memoized and the callable is never retried.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::expression::ensure_polarity;
use crate::error::{ExpectError, UnmetExpectation};
use crate::value::{into_value, repr, values_equal};

/// Positional and named arguments captured for a deferred call.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    /// Positional arguments, in order.
    pub positional: Vec<Value>,
    /// Named arguments.
    pub named: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Positional argument by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument by name.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }
}

/// Error signalled by a wrapped callable: a kind label plus a message, the
/// analogue of an exception type and its text.
///
/// [`raises`](CallableExpectation::raises) compares the kind;
/// [`raises_matching`](CallableExpectation::raises_matching) additionally
/// matches the message against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CallError {
    kind: String,
    message: String,
}

impl CallError {
    /// Create an error of the given kind with a message.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The kind label, compared by `raises`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The message text, matched by `raises_matching`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Create an expectation on a callable.
///
/// The callable takes the captured [`CallArgs`] and returns either a value
/// or a [`CallError`]. Rust functions carry no runtime name, so the display
/// name used in failure messages is supplied explicitly. Nothing is invoked
/// until an invocation-based matcher runs.
///
/// # Example
///
/// ```rust
/// use expectly::{expect_call, CallArgs, CallError};
/// use serde_json::{json, Value};
///
/// fn summer(args: &CallArgs) -> Result<Value, CallError> {
///     let mut total = 0i64;
///     for value in &args.positional {
///         total += value.as_i64().ok_or_else(|| {
///             CallError::new("ValueError", format!("not a number: {value}"))
///         })?;
///     }
///     Ok(json!(total))
/// }
///
/// expect_call("summer", summer)
///     .args([12, 50, 45])
///     .returns(107)
///     .unwrap();
/// ```
pub fn expect_call<F>(name: impl Into<String>, target: F) -> CallableExpectation
where
    F: Fn(&CallArgs) -> Result<Value, CallError> + Send + Sync + 'static,
{
    CallableExpectation {
        name: name.into(),
        target: Arc::new(target),
        args: CallArgs::default(),
        polarity: true,
    }
}

/// Wraps a callable plus a fixed argument list, and adds invocation-based
/// matchers: return-value comparison and error-kind-and-message comparison.
///
/// Polarity behaves exactly as on [`Expectation`](super::Expectation) and
/// failures route through the same evaluation primitive.
#[derive(Clone)]
pub struct CallableExpectation {
    name: String,
    target: Arc<dyn Fn(&CallArgs) -> Result<Value, CallError> + Send + Sync>,
    args: CallArgs,
    polarity: bool,
}

impl fmt::Debug for CallableExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableExpectation")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("polarity", &self.polarity)
            .finish_non_exhaustive()
    }
}

impl CallableExpectation {
    // =========================================================================
    // Argument builders (chainable)
    // =========================================================================

    /// Append one positional argument.
    pub fn arg(mut self, value: impl Serialize) -> Self {
        self.args.positional.push(into_value(value));
        self
    }

    /// Append positional arguments.
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        self.args.positional.extend(values.into_iter().map(into_value));
        self
    }

    /// Set one named argument.
    pub fn named_arg(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.args.named.insert(name.into(), into_value(value));
        self
    }

    /// Merge a map of named arguments.
    pub fn named_args(mut self, values: BTreeMap<String, Value>) -> Self {
        self.args.named.extend(values);
        self
    }

    /// The captured arguments.
    pub fn call_args(&self) -> &CallArgs {
        &self.args
    }

    /// Whether matchers currently require their predicate to hold.
    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// Require subsequent predicates to hold (the default). Idempotent.
    pub fn affirm(mut self) -> Self {
        self.polarity = true;
        self
    }

    /// Require subsequent predicates to fail. Idempotent.
    pub fn negate(mut self) -> Self {
        self.polarity = false;
        self
    }

    // =========================================================================
    // Invocation matchers
    // =========================================================================

    /// Invoke the callable exactly once and compare its return value to
    /// `expected` via structural equality.
    ///
    /// A [`CallError`] escaping here propagates as a hard error
    /// ([`ExpectError::Call`]), never as an unmet expectation.
    pub fn returns(self, expected: impl Serialize) -> Result<Self, ExpectError> {
        let expected = into_value(expected);
        debug!(
            target: "expectly",
            "calling '{}' with {} positional and {} named argument(s)",
            self.name,
            self.args.positional.len(),
            self.args.named.len()
        );
        let actual = (self.target)(&self.args)?;
        debug!(
            target: "expectly",
            "checking if '{}' return '{}' is{} equal to '{}'",
            self.name,
            repr(&actual),
            if self.polarity { "" } else { " not" },
            repr(&expected)
        );
        let holds = values_equal(&actual, &expected);
        let message = if self.polarity {
            format!(
                "'{}' did not return '{}', it returned '{}' instead",
                self.name,
                repr(&expected),
                repr(&actual)
            )
        } else {
            format!("'{}' returned '{}'", self.name, repr(&expected))
        };
        self.ensure(holds, message)
    }

    /// Invoke the callable exactly once and require it to fail with an error
    /// of the given kind.
    ///
    /// Returning normally fails the expectation ("did not raise"); failing
    /// with a different kind fails it reporting the kind actually observed.
    pub fn raises(self, kind: &str) -> Result<Self, ExpectError> {
        self.check_raises(kind, None)
    }

    /// Like [`raises`](Self::raises), additionally requiring the error's
    /// message to fully match `pattern` as a regular expression.
    ///
    /// The match is anchored: the whole message must match, not a substring.
    /// An invalid pattern is [`ExpectError::Pattern`], never an unmet
    /// expectation.
    pub fn raises_matching(self, kind: &str, pattern: &str) -> Result<Self, ExpectError> {
        self.check_raises(kind, Some(pattern))
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn check_raises(self, kind: &str, pattern: Option<&str>) -> Result<Self, ExpectError> {
        debug!(
            target: "expectly",
            "calling '{}' expecting an error of kind '{}'", self.name, kind
        );
        let error = match (self.target)(&self.args) {
            Ok(value) => {
                return Err(UnmetExpectation(format!(
                    "call '{}' did not raise '{}', it returned '{}'",
                    self.name,
                    kind,
                    repr(&value)
                ))
                .into());
            }
            Err(error) => error,
        };

        let holds = error.kind() == kind;
        let message = if self.polarity {
            format!(
                "'{}' did not raise '{}', it raised '{}' instead",
                self.name,
                kind,
                error.kind()
            )
        } else {
            format!("'{}' raised '{}'", self.name, kind)
        };
        let this = self.ensure(holds, message)?;

        let Some(pattern) = pattern else {
            return Ok(this);
        };
        // Anchor the pattern: the whole message must match, not a substring.
        let anchored = Regex::new(&format!(r"\A(?:{pattern})\z"))?;
        let holds = anchored.is_match(error.message());
        let message = if this.polarity {
            format!(
                "'{}' does not match pattern '{}'",
                error.message(),
                pattern
            )
        } else {
            format!("'{}' matches pattern '{}'", error.message(), pattern)
        };
        this.ensure(holds, message)
    }

    fn ensure(self, holds: bool, message: String) -> Result<Self, ExpectError> {
        ensure_polarity(holds, self.polarity, message)?;
        Ok(self)
    }
}
