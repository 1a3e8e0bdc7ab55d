//! Coercion and predicate helpers over the dynamic subject model.
//!
//! Subjects are held as [`serde_json::Value`], so one wrapper type can carry
//! numbers, text, booleans, sequences, maps, and the absent value. The
//! helpers here define the crate-wide meaning of equality, ordering,
//! truthiness, and membership; custom matchers should reuse them so their
//! semantics stay aligned with the built-ins.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::error::ExpectError;

/// Convert any serializable value into the dynamic subject model.
///
/// # Panics
///
/// Panics if the value does not serialize to a JSON-shaped value (for
/// example, a map with non-text keys).
pub fn into_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).expect("subject must serialize to a JSON-shaped value")
}

/// Render a value for failure messages and text coercion.
///
/// Text renders unquoted (its raw contents); every other value renders in
/// its canonical JSON form, so `20.01` is `"20.01"` and a sequence is
/// `"[1,2,3]"`.
pub fn repr(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Structural equality with numeric awareness: `20` and `20.0` are equal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => numbers_equal(a, b),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(a: &Value, b: &Value) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
    }
}

/// Ordering between two values.
///
/// Numbers compare numerically and text lexicographically. Any other pairing
/// (or a NaN operand) has no defined order and surfaces as
/// [`ExpectError::Incomparable`], never as a failed expectation.
pub fn compare_values(a: &Value, b: &Value) -> Result<Ordering, ExpectError> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                return Ok(x.cmp(&y));
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).ok_or_else(|| incomparable(a, b)),
                _ => Err(incomparable(a, b)),
            }
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(incomparable(a, b)),
    }
}

/// Coerce to an integer: numbers truncate, text parses as `i64`.
///
/// Text that parses as a float but not an integer (`"20.5"`) is a
/// [`ExpectError::Conversion`] error, not a failed expectation.
pub fn to_integer(value: &Value) -> Result<i64, ExpectError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f.trunc() as i64)
            } else {
                Err(conversion(value, "an integer"))
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| conversion(value, "an integer")),
        _ => Err(conversion(value, "an integer")),
    }
}

/// Coerce to a float: text parses as `f64`.
pub fn to_float(value: &Value) -> Result<f64, ExpectError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| conversion(value, "a float")),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| conversion(value, "a float")),
        _ => Err(conversion(value, "a float")),
    }
}

/// The crate's enumerated notion of truthiness.
///
/// Falsy values are exactly: `false`, numeric zero, empty text, an empty
/// sequence, an empty map, and `null`. Everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Membership: element of a sequence, substring of text, or key of a map.
///
/// A subject that supports none of these, or a non-text needle against a
/// text subject, is [`ExpectError::Incomparable`].
pub fn contains_value(subject: &Value, member: &Value) -> Result<bool, ExpectError> {
    match subject {
        Value::Array(items) => Ok(items.iter().any(|item| values_equal(item, member))),
        Value::String(text) => match member {
            Value::String(needle) => Ok(text.contains(needle.as_str())),
            other => Err(incomparable(subject, other)),
        },
        Value::Object(map) => Ok(matches!(member, Value::String(key) if map.contains_key(key))),
        _ => Err(incomparable(subject, member)),
    }
}

fn incomparable(subject: &Value, other: &Value) -> ExpectError {
    ExpectError::Incomparable {
        subject: repr(subject),
        other: repr(other),
    }
}

fn conversion(value: &Value, target: &'static str) -> ExpectError {
    ExpectError::Conversion {
        value: repr(value),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repr_text_is_unquoted() {
        assert_eq!(repr(&json!("abc")), "abc");
        assert_eq!(repr(&json!(20)), "20");
        assert_eq!(repr(&json!(20.01)), "20.01");
        assert_eq!(repr(&json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(repr(&json!(null)), "null");
    }

    #[test]
    fn test_values_equal_numeric_awareness() {
        assert!(values_equal(&json!(20), &json!(20.0)));
        assert!(values_equal(&json!(20), &json!(20)));
        assert!(!values_equal(&json!(20), &json!(21)));
        assert!(!values_equal(&json!(20), &json!("20")));
    }

    #[test]
    fn test_values_equal_recurses_into_collections() {
        assert!(values_equal(&json!([1, 2.0]), &json!([1.0, 2])));
        assert!(values_equal(&json!({"x": 1}), &json!({"x": 1.0})));
        assert!(!values_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!values_equal(&json!({"x": 1}), &json!({"y": 1})));
    }

    #[test]
    fn test_compare_numbers_and_text() {
        assert_eq!(compare_values(&json!(2), &json!(1)).unwrap(), Ordering::Greater);
        assert_eq!(compare_values(&json!(1.5), &json!(2)).unwrap(), Ordering::Less);
        assert_eq!(compare_values(&json!("a"), &json!("b")).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_mixed_types_is_an_error() {
        let err = compare_values(&json!(5), &json!("a")).unwrap_err();
        assert!(matches!(err, ExpectError::Incomparable { .. }));
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer(&json!(20)).unwrap(), 20);
        assert_eq!(to_integer(&json!(20.9)).unwrap(), 20);
        assert_eq!(to_integer(&json!("20")).unwrap(), 20);
        assert_eq!(to_integer(&json!(" 20 ")).unwrap(), 20);
        assert!(matches!(
            to_integer(&json!("20.5")).unwrap_err(),
            ExpectError::Conversion { .. }
        ));
        assert!(matches!(
            to_integer(&json!(null)).unwrap_err(),
            ExpectError::Conversion { .. }
        ));
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&json!(20.5)).unwrap(), 20.5);
        assert_eq!(to_float(&json!("20.5")).unwrap(), 20.5);
        assert_eq!(to_float(&json!(20)).unwrap(), 20.0);
        assert!(matches!(
            to_float(&json!("apples")).unwrap_err(),
            ExpectError::Conversion { .. }
        ));
    }

    #[test]
    fn test_truthiness_enumerated_falsy_values() {
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!(null)));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!([0])));
    }

    #[test]
    fn test_contains_sequence_membership() {
        assert!(contains_value(&json!([1, 2, 3]), &json!(2)).unwrap());
        assert!(!contains_value(&json!([1, 2, 3]), &json!(9)).unwrap());
    }

    #[test]
    fn test_contains_substring() {
        assert!(contains_value(&json!("abc"), &json!("b")).unwrap());
        assert!(!contains_value(&json!("abc"), &json!("z")).unwrap());
        assert!(matches!(
            contains_value(&json!("abc"), &json!(5)).unwrap_err(),
            ExpectError::Incomparable { .. }
        ));
    }

    #[test]
    fn test_contains_key_membership() {
        assert!(contains_value(&json!({"x": 1}), &json!("x")).unwrap());
        assert!(!contains_value(&json!({"x": 1}), &json!("y")).unwrap());
        assert!(!contains_value(&json!({"x": 1}), &json!(9)).unwrap());
    }

    #[test]
    fn test_contains_unsupported_subject() {
        assert!(matches!(
            contains_value(&json!(5), &json!(5)).unwrap_err(),
            ExpectError::Incomparable { .. }
        ));
    }
}
