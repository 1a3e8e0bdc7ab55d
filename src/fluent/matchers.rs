//! Built-in matcher implementations.
//!
//! Every matcher follows the same shape: log the check about to run, build
//! the polarity-aware failure message, evaluate the predicate, and route the
//! outcome through [`Expectation::ensure`]. Negation is never handled here.
//!
//! The diagnostic lines are emitted through `tracing` at debug level. They
//! are observable but non-functional: with no subscriber installed they are
//! a no-op, and they never affect the pass/fail outcome.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::expression::comparison_message;
use super::Expectation;
use crate::error::ExpectError;
use crate::value::{
    compare_values, contains_value, is_truthy, repr, to_float, to_integer, values_equal,
};

static ALPHABETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z]*$").expect("literal pattern compiles"));
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]*$").expect("literal pattern compiles"));

pub(crate) fn equal_to(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    let other = one_arg("equal_to", args)?;
    log_check(&e, "equal_to", Some(other));
    let message = e.binary_message("equal to", &repr(other));
    let holds = values_equal(e.subject(), other);
    e.ensure(holds, message)
}

pub(crate) fn equal_to_as_text(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    let other = one_arg("equal_to_as_text", args)?;
    log_check(&e, "equal_to_as_text", Some(other));
    let message = e.binary_message("equal to", &repr(other));
    let holds = repr(e.subject()) == repr(other);
    e.ensure(holds, message)
}

pub(crate) fn equal_to_as_integer(
    e: Expectation,
    args: &[Value],
) -> Result<Expectation, ExpectError> {
    let other = one_arg("equal_to_as_integer", args)?;
    log_check(&e, "equal_to_as_integer", Some(other));
    let lhs = to_integer(e.subject())?;
    let rhs = to_integer(other)?;
    // The message shows the coerced operands, not the raw subject.
    let message = comparison_message(e.polarity(), &lhs.to_string(), "equal to", &rhs.to_string());
    e.ensure(lhs == rhs, message)
}

pub(crate) fn equal_to_as_float(
    e: Expectation,
    args: &[Value],
) -> Result<Expectation, ExpectError> {
    let other = one_arg("equal_to_as_float", args)?;
    log_check(&e, "equal_to_as_float", Some(other));
    let lhs = to_float(e.subject())?;
    let rhs = to_float(other)?;
    let message = comparison_message(e.polarity(), &lhs.to_string(), "equal to", &rhs.to_string());
    e.ensure(lhs == rhs, message)
}

pub(crate) fn greater_than(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    ordered(e, args, "greater_than", "greater than", |o| {
        o == Ordering::Greater
    })
}

pub(crate) fn greater_than_or_equal_to(
    e: Expectation,
    args: &[Value],
) -> Result<Expectation, ExpectError> {
    ordered(
        e,
        args,
        "greater_than_or_equal_to",
        "greater than or equal to",
        |o| o != Ordering::Less,
    )
}

pub(crate) fn less_than(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    ordered(e, args, "less_than", "less than", |o| o == Ordering::Less)
}

pub(crate) fn less_than_or_equal_to(
    e: Expectation,
    args: &[Value],
) -> Result<Expectation, ExpectError> {
    ordered(
        e,
        args,
        "less_than_or_equal_to",
        "less than or equal to",
        |o| o != Ordering::Greater,
    )
}

pub(crate) fn null(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    no_args("null", args)?;
    log_check(&e, "null", None);
    let message = format!("{} is {}null", repr(e.subject()), e.connective());
    let holds = e.subject().is_null();
    e.ensure(holds, message)
}

pub(crate) fn truthy(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    no_args("truthy", args)?;
    log_check(&e, "truthy", None);
    let message = e.seems_message("truthy");
    let holds = is_truthy(e.subject());
    e.ensure(holds, message)
}

pub(crate) fn falsy(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    no_args("falsy", args)?;
    log_check(&e, "falsy", None);
    let message = e.seems_message("falsy");
    let holds = !is_truthy(e.subject());
    e.ensure(holds, message)
}

pub(crate) fn contains(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    let member = one_arg("contains", args)?;
    debug!(
        target: "expectly",
        "checking if '{}' is{} in '{}'",
        repr(member),
        negation_suffix(&e),
        repr(e.subject())
    );
    let message = format!(
        "'{}' was {}in '{}'",
        repr(member),
        e.connective(),
        repr(e.subject())
    );
    let holds = contains_value(e.subject(), member)?;
    e.ensure(holds, message)
}

pub(crate) fn numeric(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    no_args("numeric", args)?;
    log_check(&e, "numeric", None);
    let message = e.seems_message("numeric");
    let holds = matches!(e.subject(), Value::Number(_));
    e.ensure(holds, message)
}

pub(crate) fn alphabetical(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    character_class(e, args, "alphabetical", &ALPHABETIC)
}

pub(crate) fn alphanumeric(e: Expectation, args: &[Value]) -> Result<Expectation, ExpectError> {
    character_class(e, args, "alphanumeric", &ALPHANUMERIC)
}

// =========================================================================
// Internal helpers
// =========================================================================

fn ordered(
    e: Expectation,
    args: &[Value],
    name: &'static str,
    fragment: &'static str,
    accepts: fn(Ordering) -> bool,
) -> Result<Expectation, ExpectError> {
    let other = one_arg(name, args)?;
    log_check(&e, name, Some(other));
    let message = e.binary_message(fragment, &repr(other));
    let holds = accepts(compare_values(e.subject(), other)?);
    e.ensure(holds, message)
}

fn character_class(
    e: Expectation,
    args: &[Value],
    name: &'static str,
    pattern: &Regex,
) -> Result<Expectation, ExpectError> {
    no_args(name, args)?;
    log_check(&e, name, None);
    let text = match e.subject() {
        Value::String(text) => text.clone(),
        other => {
            return Err(ExpectError::Conversion {
                value: repr(other),
                target: "text",
            })
        }
    };
    let message = e.seems_message(name);
    let holds = pattern.is_match(&text);
    e.ensure(holds, message)
}

fn log_check(e: &Expectation, name: &str, other: Option<&Value>) {
    match other {
        Some(other) => debug!(
            target: "expectly",
            "checking if '{}' is{} {} '{}'",
            repr(e.subject()),
            negation_suffix(e),
            name,
            repr(other)
        ),
        None => debug!(
            target: "expectly",
            "checking if '{}' is{} {}",
            repr(e.subject()),
            negation_suffix(e),
            name
        ),
    }
}

fn negation_suffix(e: &Expectation) -> &'static str {
    if e.polarity() {
        ""
    } else {
        " not"
    }
}

fn one_arg<'a>(matcher: &'static str, args: &'a [Value]) -> Result<&'a Value, ExpectError> {
    match args {
        [value] => Ok(value),
        _ => Err(ExpectError::Arity {
            matcher,
            expected: 1,
            got: args.len(),
        }),
    }
}

fn no_args(matcher: &'static str, args: &[Value]) -> Result<(), ExpectError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ExpectError::Arity {
            matcher,
            expected: 0,
            got: args.len(),
        })
    }
}
