//! # expectly
//!
//! A fluent expectation library for expressive test assertions.
//!
//! Wrap a value with [`expect`] (or a callable with [`expect_call`]) and
//! chain readable matchers against it. A matcher either hands the wrapper
//! back for further chaining or raises [`UnmetExpectation`], so assertions
//! compose with `?` in tests that return `Result`.
//!
//! ## Quick Start
//!
//! ```rust
//! use expectly::{expect, ExpectError};
//!
//! fn checks() -> Result<(), ExpectError> {
//!     expect(5 + 10).equal_to(15)?;
//!     expect("abba").contains("bb")?.and().alphabetical()?;
//!     expect(20).negate().less_than(10)?;
//!     expect("20").equal_to_as_integer(20)?;
//!     Ok(())
//! }
//! # checks().unwrap();
//! ```
//!
//! ## Callables
//!
//! ```rust
//! use expectly::{expect_call, CallArgs, CallError};
//! use serde_json::{json, Value};
//!
//! fn summer(args: &CallArgs) -> Result<Value, CallError> {
//!     let mut total = 0i64;
//!     for value in &args.positional {
//!         total += value.as_i64().ok_or_else(|| {
//!             CallError::new("ValueError", format!("not a number: {value}"))
//!         })?;
//!     }
//!     Ok(json!(total))
//! }
//!
//! expect_call("summer", summer)
//!     .args([12, 50, 45])
//!     .returns(107)
//!     .unwrap();
//!
//! expect_call("summer", summer)
//!     .arg("apples")
//!     .raises_matching("ValueError", "not a number: .*")
//!     .unwrap();
//! ```
//!
//! ## Extending
//!
//! New matchers attach to the wrapper type process-wide through
//! [`register`]; see its documentation. Registered matchers dispatch by
//! name via [`Expectation::check`].
//!
//! ## Logging
//!
//! Each matcher emits a `tracing` debug line describing the check about to
//! run. Install any `tracing` subscriber to observe them; with none
//! installed they are a no-op. Logging never affects pass/fail outcomes.

pub mod error;
pub mod fluent;
pub mod value;

// Core types
pub use error::{ExpectError, UnmetExpectation};
pub use fluent::{expect, expect_call, CallArgs, CallError, CallableExpectation, Expectation};

// Matcher registry
pub use fluent::{matcher_names, register, Matcher};
