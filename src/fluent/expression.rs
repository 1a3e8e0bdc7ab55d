//! The expectation wrapper: subject, polarity, and the evaluation primitive.
//!
//! This module provides the core types of the fluent API:
//! - `expect()` - Entry point wrapping a value under test
//! - `Expectation` - Holds the subject and polarity, exposes the matchers
//!
//! Every matcher routes its pass/fail decision through [`Expectation::ensure`]
//! so negation stays centralized: no matcher handles polarity itself.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::registry;
use crate::error::{ExpectError, UnmetExpectation};
use crate::value::{compare_values, into_value, repr, values_equal};

/// Create an expectation on a value.
///
/// This is the entry point of the fluent API. Matchers either hand the
/// wrapper back for further chaining or raise
/// [`UnmetExpectation`](crate::UnmetExpectation), so chains read naturally
/// with `?` in tests that return `Result`.
///
/// # Example
///
/// ```rust
/// use expectly::{expect, ExpectError};
///
/// fn checks() -> Result<(), ExpectError> {
///     expect(5 + 10).equal_to(15)?;
///     expect("new value").equal_to("new value")?.and().contains("val")?;
///     expect(20).negate().less_than(10)?;
///     Ok(())
/// }
/// # checks().unwrap();
/// ```
///
/// # Panics
///
/// Panics if the subject does not serialize to a JSON-shaped value (for
/// example, a map with non-text keys).
pub fn expect(subject: impl Serialize) -> Expectation {
    Expectation::new(into_value(subject))
}

/// Wraps a value under test together with the polarity of the checks to run
/// against it.
///
/// One wrapper is created per assertion statement and discarded once the
/// statement completes. The subject is immutable; polarity defaults to
/// affirmative and persists across chained matcher calls until toggled via
/// [`affirm`](Expectation::affirm) or [`negate`](Expectation::negate).
#[derive(Debug, Clone)]
pub struct Expectation {
    subject: Value,
    polarity: bool,
}

impl Expectation {
    /// Wrap an already-converted subject. Prefer [`expect`].
    pub fn new(subject: Value) -> Self {
        Self {
            subject,
            polarity: true,
        }
    }

    /// The value under test.
    pub fn subject(&self) -> &Value {
        &self.subject
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

    /// Affirmative connective so chains read naturally after a negated step:
    /// `expect(v).negate().equal_to(w)?.and().contains(x)?`. Resets polarity.
    pub fn and(self) -> Self {
        self.affirm()
    }

    /// The shared pass/fail primitive.
    ///
    /// Succeeds and returns the wrapper for chaining iff `holds` matches the
    /// current polarity; otherwise raises
    /// [`UnmetExpectation`](crate::UnmetExpectation) carrying `message`.
    /// Every matcher, built-in or registered, must route its decision through
    /// here rather than special-casing negation.
    pub fn ensure(self, holds: bool, message: String) -> Result<Self, ExpectError> {
        ensure_polarity(holds, self.polarity, message)?;
        Ok(self)
    }

    /// Dispatch a matcher by name through the process-wide registry.
    ///
    /// This is how registered extensions are invoked:
    ///
    /// ```rust
    /// use expectly::{expect, register, value, Expectation};
    /// use serde_json::Value;
    ///
    /// register("is_palindrome", |e: Expectation, _args: &[Value]| {
    ///     let text = value::repr(e.subject());
    ///     let reversed: String = text.chars().rev().collect();
    ///     let message = format!("'{text}' is not a palindrome");
    ///     let holds = text == reversed;
    ///     e.ensure(holds, message)
    /// });
    ///
    /// expect("abba").check("is_palindrome", &[]).unwrap();
    /// ```
    pub fn check(self, name: &str, args: &[Value]) -> Result<Self, ExpectError> {
        registry::dispatch(self, name, args)
    }

    // =========================================================================
    // Built-in matchers (typed wrappers over `check`)
    // =========================================================================

    /// Structural equality between the subject and `other`.
    pub fn equal_to(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("equal_to", &[into_value(other)])
    }

    /// Equality after coercing both sides to their canonical textual form.
    pub fn equal_to_as_text(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("equal_to_as_text", &[into_value(other)])
    }

    /// Equality after coercing both sides to integers.
    ///
    /// A side that is not integer-parsable raises a conversion error, never
    /// an unmet expectation.
    pub fn equal_to_as_integer(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("equal_to_as_integer", &[into_value(other)])
    }

    /// Equality after coercing both sides to floats.
    pub fn equal_to_as_float(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("equal_to_as_float", &[into_value(other)])
    }

    /// Ordering comparison; the operands must be mutually ordered.
    pub fn greater_than(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("greater_than", &[into_value(other)])
    }

    /// Ordering comparison; the operands must be mutually ordered.
    pub fn greater_than_or_equal_to(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("greater_than_or_equal_to", &[into_value(other)])
    }

    /// Ordering comparison; the operands must be mutually ordered.
    pub fn less_than(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("less_than", &[into_value(other)])
    }

    /// Ordering comparison; the operands must be mutually ordered.
    pub fn less_than_or_equal_to(self, other: impl Serialize) -> Result<Self, ExpectError> {
        self.check("less_than_or_equal_to", &[into_value(other)])
    }

    /// The subject is the absent value. Distinct from [`falsy`](Self::falsy).
    pub fn null(self) -> Result<Self, ExpectError> {
        self.check("null", &[])
    }

    /// The subject is truthy under the crate's enumerated truthiness rule.
    pub fn truthy(self) -> Result<Self, ExpectError> {
        self.check("truthy", &[])
    }

    /// The subject is falsy: `false`, numeric zero, empty text, an empty
    /// sequence or map, or the absent value.
    pub fn falsy(self) -> Result<Self, ExpectError> {
        self.check("falsy", &[])
    }

    /// `member` is an element of the subject sequence, a substring of the
    /// subject text, or a key of the subject map.
    pub fn contains(self, member: impl Serialize) -> Result<Self, ExpectError> {
        self.check("contains", &[into_value(member)])
    }

    /// The subject is a number.
    pub fn numeric(self) -> Result<Self, ExpectError> {
        self.check("numeric", &[])
    }

    /// The subject text consists only of ASCII letters.
    pub fn alphabetical(self) -> Result<Self, ExpectError> {
        self.check("alphabetical", &[])
    }

    /// The subject text consists only of ASCII letters and digits.
    pub fn alphanumeric(self) -> Result<Self, ExpectError> {
        self.check("alphanumeric", &[])
    }

    // =========================================================================
    // Message helpers (shared with registered matchers)
    // =========================================================================

    /// `"not "` in affirmative mode, empty when negated. Failure messages
    /// describe the failing case, so the connective inverts the polarity.
    pub fn connective(&self) -> &'static str {
        if self.polarity {
            "not "
        } else {
            ""
        }
    }

    /// Standard message for a binary comparison:
    /// `'<subject>' is [not ]<fragment> '<other>'`.
    pub fn binary_message(&self, fragment: &str, other: &str) -> String {
        comparison_message(self.polarity, &repr(&self.subject), fragment, other)
    }

    /// Standard message for a unary property:
    /// `<subject> doesn't seem <fragment>` / `<subject> seems <fragment>`.
    pub fn seems_message(&self, fragment: &str) -> String {
        format!(
            "{} {} {}",
            repr(&self.subject),
            if self.polarity { "doesn't seem" } else { "seems" },
            fragment
        )
    }
}

/// Compare a predicate result against the requested polarity.
///
/// Shared by [`Expectation::ensure`] and the callable wrapper so both kinds
/// of expectation fail through the same primitive.
pub(crate) fn ensure_polarity(
    holds: bool,
    polarity: bool,
    message: String,
) -> Result<(), ExpectError> {
    if holds == polarity {
        Ok(())
    } else {
        Err(UnmetExpectation(message).into())
    }
}

pub(crate) fn comparison_message(
    polarity: bool,
    subject: &str,
    fragment: &str,
    other: &str,
) -> String {
    format!(
        "'{}' is {}{} '{}'",
        subject,
        if polarity { "not " } else { "" },
        fragment,
        other
    )
}

// =========================================================================
// Operator aliases
// =========================================================================
//
// The equality and ordering matchers are also reachable through the native
// comparison operators. Rust's comparison traits must return `bool` /
// `Option<Ordering>`, so these forward to the identical predicates but
// cannot raise or carry polarity; the raising path is only available through
// the named matchers.

impl<T: Serialize> PartialEq<T> for Expectation {
    fn eq(&self, other: &T) -> bool {
        serde_json::to_value(other)
            .map(|other| values_equal(&self.subject, &other))
            .unwrap_or(false)
    }
}

impl<T: Serialize> PartialOrd<T> for Expectation {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        let other = serde_json::to_value(other).ok()?;
        compare_values(&self.subject, &other).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_polarity_defaults_to_affirmative() {
        assert!(expect(5).polarity());
    }

    #[test]
    fn test_polarity_accessors_are_idempotent() {
        let e = expect(5).negate().negate();
        assert!(!e.polarity());
        let e = e.affirm().affirm();
        assert!(e.polarity());
    }

    #[test]
    fn test_most_recent_polarity_wins() {
        assert!(!expect(5).affirm().negate().polarity());
        assert!(expect(5).negate().affirm().polarity());
    }

    #[test]
    fn test_and_resets_to_affirmative() {
        assert!(expect(5).negate().and().polarity());
    }

    #[test]
    fn test_negation_is_involutive() {
        assert!(expect(5).negate().affirm().equal_to(5).is_ok());
        assert!(expect(5).equal_to(5).is_ok());
    }

    #[test]
    fn test_subject_is_preserved_across_chaining() {
        let e = expect(5).equal_to(5).unwrap().negate().equal_to(6).unwrap();
        assert_eq!(e.subject(), &json!(5));
    }

    #[test]
    fn test_ensure_routes_polarity() {
        assert!(expect(5).ensure(true, "m".to_string()).is_ok());
        assert!(expect(5).ensure(false, "m".to_string()).is_err());
        assert!(expect(5).negate().ensure(false, "m".to_string()).is_ok());
        assert!(expect(5).negate().ensure(true, "m".to_string()).is_err());
    }

    #[test]
    fn test_operator_equality_alias() {
        assert!(expect(5) == 5);
        assert!(expect(5) != 6);
        assert!(expect("abc") == "abc");
        assert!(expect(20) == 20.0);
    }

    #[test]
    fn test_operator_ordering_alias() {
        assert!(expect(5) < 10);
        assert!(expect(5) >= 5);
        assert!(expect("a") < "b");
    }

    #[test]
    fn test_operator_ordering_undefined_for_mixed_types() {
        assert_eq!(expect(5).partial_cmp(&"a"), None);
    }
}
