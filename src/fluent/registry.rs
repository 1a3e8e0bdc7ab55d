//! Process-wide matcher registry.
//!
//! Matcher names map to functions that take the wrapper (plus any
//! matcher-specific arguments) and either return the wrapper for chaining or
//! raise. The table is seeded with every built-in on first touch;
//! [`register`] makes new matchers visible to every existing and future
//! wrapper for the remainder of the process. Overwriting a name silently
//! replaces the prior matcher so callers can override built-ins.
//!
//! The registry validates nothing about a registered function; contract
//! violations surface when the matcher is invoked. Concurrent registration
//! is last-writer-wins; registration is expected at initialization time,
//! not steady-state.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use serde_json::Value;

use super::{matchers, Expectation};
use crate::error::ExpectError;

/// A registered matcher: takes the wrapper and the matcher arguments,
/// returns the wrapper for chaining or raises.
pub type Matcher =
    Arc<dyn Fn(Expectation, &[Value]) -> Result<Expectation, ExpectError> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, Matcher>>> =
    LazyLock::new(|| RwLock::new(builtins()));

fn builtins() -> HashMap<String, Matcher> {
    type BuiltinFn = fn(Expectation, &[Value]) -> Result<Expectation, ExpectError>;
    let entries: &[(&str, BuiltinFn)] = &[
        ("equal_to", matchers::equal_to),
        ("equal_to_as_text", matchers::equal_to_as_text),
        ("equal_to_as_integer", matchers::equal_to_as_integer),
        ("equal_to_as_float", matchers::equal_to_as_float),
        ("greater_than", matchers::greater_than),
        ("greater_than_or_equal_to", matchers::greater_than_or_equal_to),
        ("less_than", matchers::less_than),
        ("less_than_or_equal_to", matchers::less_than_or_equal_to),
        ("null", matchers::null),
        ("truthy", matchers::truthy),
        ("falsy", matchers::falsy),
        ("contains", matchers::contains),
        ("numeric", matchers::numeric),
        ("alphabetical", matchers::alphabetical),
        ("alphanumeric", matchers::alphanumeric),
    ];

    let mut table = HashMap::new();
    for (name, matcher) in entries {
        table.insert(name.to_string(), Arc::new(*matcher) as Matcher);
    }
    table
}

/// Register a matcher under `name`, process-wide and effective immediately
/// for all existing and future wrappers.
///
/// Registering over an existing name (built-in or not) silently replaces it;
/// the last registration wins.
///
/// # Example
///
/// ```rust
/// use expectly::{expect, register, Expectation};
/// use serde_json::Value;
///
/// register("has_length", |e: Expectation, args: &[Value]| {
///     let want = args.first().and_then(Value::as_u64).unwrap_or(0) as usize;
///     let got = match e.subject() {
///         Value::String(s) => s.len(),
///         Value::Array(items) => items.len(),
///         _ => 0,
///     };
///     let message = format!(
///         "'{}' does not have length {}",
///         expectly::value::repr(e.subject()),
///         want
///     );
///     e.ensure(got == want, message)
/// });
///
/// expect("abba")
///     .check("has_length", &[Value::from(4)])
///     .unwrap();
/// ```
pub fn register<F>(name: impl Into<String>, matcher: F)
where
    F: Fn(Expectation, &[Value]) -> Result<Expectation, ExpectError> + Send + Sync + 'static,
{
    let mut table = REGISTRY.write().expect("matcher registry lock poisoned");
    table.insert(name.into(), Arc::new(matcher));
}

/// Names currently registered, sorted.
pub fn matcher_names() -> Vec<String> {
    let table = REGISTRY.read().expect("matcher registry lock poisoned");
    let mut names: Vec<String> = table.keys().cloned().collect();
    names.sort();
    names
}

pub(crate) fn dispatch(
    expectation: Expectation,
    name: &str,
    args: &[Value],
) -> Result<Expectation, ExpectError> {
    // Clone the entry out so the lock is not held across matcher execution.
    let matcher = {
        let table = REGISTRY.read().expect("matcher registry lock poisoned");
        table.get(name).cloned()
    };
    match matcher {
        Some(matcher) => matcher(expectation, args),
        None => Err(ExpectError::UnknownMatcher(name.to_string())),
    }
}
