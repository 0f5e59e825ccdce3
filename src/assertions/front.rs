//! Assertion front ends, one per calling convention.

use super::builtins::{rejects, throws};
use super::evaluate::{evaluate, Assertion, Judgment};
use crate::error::Result;
use crate::message::Strategy;
use crate::value::{Deferred, Value};

/// Assert that `predicate` holds for `argv`.
///
/// Failure messages splice the arguments into the predicate's source as
/// `name = value` pairs. A non-callable `predicate` is judged by its
/// truthiness.
///
/// # Errors
///
/// Returns the assertion failure when the predicate settles immediately
/// and fails.
///
/// # Example
///
/// ```rust
/// use avow::{actually, argv, predicate};
///
/// assert!(actually(predicate!(|a, b| a == b), argv![1, 1]).is_ok());
///
/// let error = actually(predicate!(|a, b| a == b), argv!["a", "b"]).unwrap_err();
/// assert_eq!(error.to_string(), "Assertion failed. |a = 'a', b = 'b'| a == b");
/// ```
pub fn actually(predicate: impl Into<Value>, argv: Vec<Value>) -> Result<Assertion> {
    evaluate(Strategy::Pair, predicate, argv)
}

/// Assert that `predicate` holds for `argv`, arguments first.
///
/// Failure messages show the predicate's returned expression with the
/// arguments substituted for its parameters.
///
/// # Errors
///
/// Returns the assertion failure when the predicate settles immediately
/// and fails.
///
/// # Example
///
/// ```rust
/// use avow::{argv, predicate, prove};
///
/// let error = prove(argv![true, false], predicate!(|a, b| a == b)).unwrap_err();
/// assert_eq!(error.to_string(), "Assertion failed. { `true` == `false` }");
/// ```
pub fn prove(argv: Vec<Value>, predicate: impl Into<Value>) -> Result<Assertion> {
    evaluate(Strategy::Expression, predicate, argv)
}

/// Assert that the callable last in `argv` throws, optionally with a value
/// matching the `[class] [pattern]` filters before it.
///
/// Returns `true` when it did.
///
/// # Errors
///
/// Returns the assertion failure when the callable does not throw, or
/// throws something the filters reject.
///
/// # Example
///
/// ```rust
/// use avow::{argv, assert_throws, predicate, Class, Failure};
///
/// let boom = predicate!(|| Err::<bool, _>(Failure::new(Class::RANGE_ERROR, "out of range")));
/// assert!(assert_throws(argv![Class::ERROR, "range", boom]).is_ok());
/// ```
pub fn assert_throws(argv: Vec<Value>) -> Result<Value> {
    let judgment = Judgment::new(Strategy::Pair, throws().into(), argv);
    let outcome = judgment.invoke();
    judgment.settle(outcome)
}

/// Assert that the future last in `argv` rejects, optionally with a reason
/// matching the `[class] [pattern]` filters before it.
///
/// # Errors
///
/// Returns a failure immediately when `argv` is malformed; otherwise the
/// returned assertion settles to the failure.
///
/// # Example
///
/// ```rust
/// use avow::{argv, assert_rejects, Class, Deferred, Failure};
///
/// # futures::executor::block_on(async {
/// let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "!"));
/// assert!(assert_rejects(argv![Class::TYPE_ERROR, promise]).unwrap().await.is_ok());
/// # });
/// ```
pub fn assert_rejects(argv: Vec<Value>) -> Result<Assertion> {
    actually(rejects(), argv)
}

/// Assert that `future` resolves and, if `predicate` is given, that it
/// holds for the resolved value followed by `argv`.
///
/// A `future` that is not a [`Value::Future`] counts as already resolved.
/// Settles to the predicate's result, or to `true` without one.
///
/// # Errors
///
/// Never fails immediately; the returned assertion settles to the failure.
///
/// # Example
///
/// ```rust
/// use avow::{argv, assert_resolves, predicate, Deferred};
///
/// # futures::executor::block_on(async {
/// let answer = Deferred::resolved(42);
/// let is = predicate!(|value, expected| value == expected);
/// assert!(assert_resolves(answer, argv![42], Some(is)).unwrap().await.is_ok());
/// # });
/// ```
pub fn assert_resolves(
    future: impl Into<Value>,
    argv: Vec<Value>,
    predicate: Option<impl Into<Value>>,
) -> Result<Assertion> {
    let deferred = match future.into() {
        Value::Future(deferred) => deferred,
        value => Deferred::resolved(value),
    };
    let predicate = predicate.map(Into::into);

    let settled = Deferred::new(async move {
        let value = deferred.await?;
        let Some(predicate) = predicate else {
            return Ok(Value::Bool(true));
        };

        let args = std::iter::once(value).chain(argv).collect();
        match actually(predicate, args) {
            Ok(assertion) => assertion.await.map_err(Value::from),
            Err(error) => Err(error.into()),
        }
    });

    evaluate(Strategy::Pair, settled, Vec::new())
}

/// Assert that a predicate holds for the given arguments, panicking with
/// the failure message otherwise.
///
/// Evaluates to the [`Assertion`], which may still be pending.
///
/// # Panics
///
/// Panics if the predicate settles immediately and fails.
///
/// # Example
///
/// ```rust
/// use avow::{assert_actually, predicate};
///
/// let _ = assert_actually!(predicate!(|a, b| a == b), 1, 1);
/// ```
///
/// ```rust,should_panic
/// use avow::{assert_actually, predicate};
///
/// // panics with "Assertion failed. |a = 1, b = 2| a == b"
/// let _ = assert_actually!(predicate!(|a, b| a == b), 1, 2);
/// ```
#[macro_export]
macro_rules! assert_actually {
    ($predicate:expr $(, $arg:expr)* $(,)?) => {{
        match $crate::actually($predicate, $crate::argv![$($arg),*]) {
            ::std::result::Result::Ok(assertion) => assertion,
            ::std::result::Result::Err(error) => ::std::panic!("{}", error),
        }
    }};
}
