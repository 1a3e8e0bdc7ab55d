//! End-to-end tests through the public API only.

use expectly::{expect, expect_call, register, CallArgs, CallError, ExpectError, Expectation};
use serde_json::{json, Value};

fn summer(args: &CallArgs) -> Result<Value, CallError> {
    let mut total = 0i64;
    for value in &args.positional {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(text) => text.parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => total += n,
            None => {
                return Err(CallError::new(
                    "ValueError",
                    format!(
                        "invalid literal for int() with base 10: '{}'",
                        expectly::value::repr(value)
                    ),
                ))
            }
        }
    }
    Ok(json!(total))
}

#[test]
fn chained_expectations_read_like_prose() -> Result<(), ExpectError> {
    expect("new value").equal_to("new value")?.and().contains("val")?;
    expect("new value")
        .negate()
        .equal_to("new value 1")?
        .and()
        .contains("val")?;

    expect(20)
        .numeric()?
        .and()
        .equal_to_as_integer("20")?
        .and()
        .equal_to_as_integer(20)?
        .equal_to_as_text(20)?;

    expect(0).falsy()?;
    expect(1).truthy()?;
    expect(-1).truthy()?;
    Ok(())
}

#[test]
fn unmet_expectations_carry_readable_messages() {
    let err = expect(20).equal_to("apples").unwrap_err();
    assert_eq!(err.to_string(), "'20' is not equal to 'apples'");

    let err = expect(20).negate().numeric().unwrap_err();
    assert_eq!(err.to_string(), "20 seems numeric");
}

#[test]
fn callable_return_value_scenario() {
    expect_call("summer", summer)
        .args([12, 50, 45])
        .returns(107)
        .unwrap();

    let err = expect_call("summer", summer)
        .args([1, 2])
        .returns(999)
        .unwrap_err();
    assert!(matches!(err, ExpectError::Unmet(_)));
}

#[test]
fn callable_exception_scenario() {
    expect_call("summer", summer)
        .args(["25", "apples", "75"])
        .raises_matching("ValueError", "invalid literal for .* 'apples'")
        .unwrap();

    // The pattern must cover the whole message, not a fragment of it.
    let err = expect_call("summer", summer)
        .args(["25", "apples", "75"])
        .raises_matching("ValueError", "invalid literal")
        .unwrap_err();
    assert!(matches!(err, ExpectError::Unmet(_)));
}

#[test]
fn registry_extension_scenario() {
    register("integration_is_palindrome", |e: Expectation, _args: &[Value]| {
        let text = expectly::value::repr(e.subject());
        let reversed: String = text.chars().rev().collect();
        let message = format!("'{text}' is not a palindrome");
        let holds = text == reversed;
        e.ensure(holds, message)
    });

    expect("abba")
        .check("integration_is_palindrome", &[])
        .unwrap();
    let err = expect("abc")
        .check("integration_is_palindrome", &[])
        .unwrap_err();
    assert_eq!(err.to_string(), "'abc' is not a palindrome");

    // Negation applies to extensions exactly as to built-ins.
    expect("abc")
        .negate()
        .check("integration_is_palindrome", &[])
        .unwrap();

    // Existing matchers are untouched.
    expect("abba").equal_to("abba").unwrap();
}

#[test]
fn hard_errors_are_distinguishable_from_unmet_expectations() {
    let conversion = expect("20.5").equal_to_as_integer(20).unwrap_err();
    assert!(matches!(conversion, ExpectError::Conversion { .. }));

    let incomparable = expect(5).greater_than("a").unwrap_err();
    assert!(matches!(incomparable, ExpectError::Incomparable { .. }));

    let unknown = expect(5).check("definitely_not_registered", &[]).unwrap_err();
    assert!(matches!(unknown, ExpectError::UnknownMatcher(_)));
}

#[test]
fn operator_aliases_reuse_the_matcher_predicates() {
    assert!(expect(15) == 15);
    assert!(expect(15) != 16);
    assert!(expect(5) < 10);
    assert!(expect("a") < "b");
    assert!(expect(20) == 20.0);
}
