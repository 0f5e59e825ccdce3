//! The outcome evaluator shared by every front end.
//!
//! Whether a predicate settles inline or inside a future, its outcome goes
//! through the same [`Judgment::settle`], so the synchronous and deferred
//! paths cannot disagree about what passes and what the message says.

use std::future::IntoFuture;

use futures::future::{self, Either, Ready};

use super::future::Settle;
use crate::config;
use crate::error::{Error, Result};
use crate::message::{format, Strategy};
use crate::value::{Class, Deferred, Failure, Value};

/// Everything needed to turn an outcome into a pass or a failure.
#[derive(Clone, Debug)]
pub(crate) struct Judgment {
    strategy: Strategy,
    subject: Value,
    argv: Vec<Value>,
}

impl Judgment {
    /// Use `strategy` unless the configuration forces another one.
    pub(crate) fn new(strategy: Strategy, subject: Value, argv: Vec<Value>) -> Self {
        let strategy = match config::get().strategy {
            Some(forced) if forced != strategy => {
                tracing::debug!(%forced, requested = %strategy, "strategy overridden by configuration");
                forced
            }
            _ => strategy,
        };

        Self {
            strategy,
            subject,
            argv,
        }
    }

    /// Call the subject, or take it as the outcome when it is not callable.
    pub(crate) fn invoke(&self) -> std::result::Result<Value, Value> {
        self.subject
            .call(&self.argv)
            .unwrap_or_else(|| Ok(self.subject.clone()))
    }

    /// Judge a subject that is neither callable nor deferred by its
    /// truthiness alone.
    pub(crate) fn literal(&self) -> Result<Value> {
        if self.subject.is_truthy() {
            return Ok(self.subject.clone());
        }
        tracing::debug!(subject = %self.subject, "literal subject is falsy");
        Err(self.synthesized())
    }

    /// Decide a settled outcome.
    ///
    /// Returned or thrown failures report their own message; other truthy
    /// results pass; other falsy results get a synthesized message; other
    /// thrown values report their text.
    pub(crate) fn settle(&self, outcome: std::result::Result<Value, Value>) -> Result<Value> {
        match outcome {
            Ok(Value::Error(failure)) | Err(Value::Error(failure)) => Err(self.custom(&failure)),
            Ok(value) if value.is_truthy() => Ok(value),
            Ok(value) => {
                tracing::debug!(%value, "predicate returned a falsy value");
                Err(self.synthesized())
            }
            Err(thrown) => Err(Error::assertion(format(
                &thrown.to_string(),
                &self.argv,
                self.strategy.style(),
            ))),
        }
    }

    fn custom(&self, failure: &Failure) -> Error {
        let Some(message) = failure.message() else {
            tracing::debug!(class = failure.class().name(), "failure without a message");
            return self.synthesized();
        };

        if failure.class().is_a(Class::ASSERTION_ERROR) {
            return Error::relay(message);
        }

        let argv = failure.argv().unwrap_or(&self.argv);
        Error::assertion(format(message, argv, self.strategy.style()))
    }

    fn synthesized(&self) -> Error {
        let source = self.subject.source_text();
        match self.strategy.synthesize(&source, &self.argv) {
            Ok(message) => Error::AssertionFailed(message),
            Err(error) => error,
        }
    }
}

/// A passed assertion, or one waiting on a deferred outcome.
///
/// Awaiting an `Assertion` yields the passing value or the failure:
///
/// ```rust
/// use avow::{actually, argv, predicate, Deferred, Value};
///
/// # futures::executor::block_on(async {
/// let pending = actually(predicate!(|a| a), argv![Deferred::resolved(false)]).unwrap();
/// assert!(pending.is_pending());
/// assert!(pending.await.is_err());
///
/// let passed = actually(predicate!(|a| a.is_truthy()), argv![1]).unwrap();
/// assert_eq!(passed.await.unwrap(), Value::from(true));
/// # });
/// ```
#[derive(Debug)]
#[must_use = "a pending assertion does nothing unless awaited"]
pub enum Assertion {
    /// The predicate held; carries what it returned.
    Passed(Value),
    /// The predicate's outcome is still deferred.
    Pending(Settle<Deferred>),
}

impl Assertion {
    /// Returns `true` if the outcome is still deferred.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The passing value, if the assertion already passed.
    #[must_use]
    pub fn passed(self) -> Option<Value> {
        match self {
            Self::Passed(value) => Some(value),
            Self::Pending(_) => None,
        }
    }
}

impl IntoFuture for Assertion {
    type Output = Result<Value>;
    type IntoFuture = Either<Ready<Result<Value>>, Settle<Deferred>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Passed(value) => Either::Left(future::ready(Ok(value))),
            Self::Pending(settle) => Either::Right(settle),
        }
    }
}

/// A pending assertion becomes a deferred value rejecting with the
/// `AssertionError` it fails with, so it can feed further assertions.
impl From<Assertion> for Value {
    fn from(assertion: Assertion) -> Self {
        match assertion {
            Assertion::Passed(value) => value,
            Assertion::Pending(settle) => {
                Value::Future(Deferred::new(async move { settle.await.map_err(Value::from) }))
            }
        }
    }
}

/// Evaluate `subject` against `argv`, synthesizing messages with
/// `strategy`.
///
/// A callable subject is invoked with `argv`; anything else is judged as a
/// literal, by its truthiness. A deferred outcome (or a deferred subject) yields
/// [`Assertion::Pending`].
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] if the subject settles immediately
/// and fails, or [`Error::UnsupportedParameter`] if it fails and its source
/// cannot be rendered.
///
/// # Example
///
/// ```rust
/// use avow::{argv, evaluate, predicate, Strategy};
///
/// let error = evaluate(Strategy::Expression, predicate!(|a, b| a == b), argv![1, 2]).unwrap_err();
/// assert_eq!(error.to_string(), "Assertion failed. { `1` == `2` }");
/// ```
pub fn evaluate(strategy: Strategy, subject: impl Into<Value>, argv: Vec<Value>) -> Result<Assertion> {
    let judgment = Judgment::new(strategy, subject.into(), argv);
    if !judgment.subject.is_callable() && !judgment.subject.is_future() {
        return judgment.literal().map(Assertion::Passed);
    }

    let outcome = judgment.invoke();

    match outcome {
        Ok(Value::Future(deferred)) => {
            tracing::trace!("deferring judgment");
            Ok(Assertion::Pending(Settle::new(deferred, judgment)))
        }
        outcome => judgment.settle(outcome).map(Assertion::Passed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{argv, predicate};
    use futures::executor::block_on;

    fn judgment(strategy: Strategy, subject: impl Into<Value>, argv: Vec<Value>) -> Judgment {
        Judgment {
            strategy,
            subject: subject.into(),
            argv,
        }
    }

    fn message(result: Result<Value>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_truthy_passes_with_value() {
        let j = judgment(Strategy::Pair, predicate!(|| true), vec![]);
        assert_eq!(j.settle(Ok(Value::from("kept"))), Ok(Value::from("kept")));
        assert_eq!(j.settle(Ok(Value::from(1))), Ok(Value::from(1)));
    }

    #[test]
    fn test_falsy_synthesizes() {
        let j = judgment(Strategy::Pair, predicate!(|a, b| a == b), argv![true, false]);
        assert_eq!(
            message(j.settle(Ok(Value::from(false)))),
            "Assertion failed. |a = true, b = false| a == b"
        );
        assert!(message(j.settle(Ok(Value::from(0)))).starts_with("Assertion failed. "));
    }

    #[test]
    fn test_custom_message_uses_outer_argv() {
        let j = judgment(Strategy::Expression, predicate!(|| true), argv![true, "x"]);
        let failure = Failure::error("${0} does not equal ${1}.");
        assert_eq!(
            message(j.settle(Err(failure.clone().into()))),
            "Assertion failed. `true` does not equal \"x\"."
        );
        assert_eq!(
            message(j.settle(Ok(failure.into()))),
            "Assertion failed. `true` does not equal \"x\"."
        );
    }

    #[test]
    fn test_custom_argv_replaces_outer() {
        let j = judgment(Strategy::Pair, predicate!(|| true), argv![true, false]);
        let failure = Failure::error("${0} vs ${1} vs ${2}").with_argv(argv!["a"]);
        assert_eq!(
            message(j.settle(Err(failure.into()))),
            "Assertion failed. 'a' vs undefined vs undefined"
        );
    }

    #[test]
    fn test_missing_message_falls_back_to_synthesis() {
        let j = judgment(Strategy::Pair, predicate!(|a| a), argv![0]);
        let bare = Failure::without_message(Class::ERROR);
        assert_eq!(message(j.settle(Err(bare.into()))), "Assertion failed. |a = 0| a");
    }

    #[test]
    fn test_assertion_errors_are_relayed() {
        let j = judgment(Strategy::Pair, predicate!(|| true), argv!["unused"]);
        let earlier: Value = Error::assertion("${0} stays").into();
        assert_eq!(message(j.settle(Err(earlier))), "Assertion failed. ${0} stays");
    }

    #[test]
    fn test_thrown_values_are_formatted() {
        let j = judgment(Strategy::Pair, predicate!(|| true), argv![7]);
        assert_eq!(
            message(j.settle(Err(Value::from("bad ${0}")))),
            "Assertion failed. bad 7"
        );
    }

    #[test]
    fn test_evaluate_literals() {
        assert!(evaluate(Strategy::Pair, true, vec![]).is_ok());
        assert_eq!(
            message(evaluate(Strategy::Pair, false, vec![]).map(|_| Value::Undefined)),
            "Assertion failed. false"
        );
        assert_eq!(
            message(evaluate(Strategy::Expression, false, vec![]).map(|_| Value::Undefined)),
            "Assertion failed. { false }"
        );
    }

    #[test]
    fn test_literal_failure_subject_is_truthy() {
        let literal = Value::from(Failure::error("x"));
        let assertion = evaluate(Strategy::Pair, literal.clone(), vec![]).unwrap();
        assert_eq!(assertion.passed(), Some(literal));

        assert!(evaluate(Strategy::Pair, "", vec![]).is_err());
        assert!(evaluate(Strategy::Pair, Value::Null, vec![]).is_err());
    }

    #[test]
    fn test_evaluate_class_subject() {
        let error = evaluate(Strategy::Expression, Class::ERROR, argv!["`f()` was called."]);
        assert_eq!(
            message(error.map(|_| Value::Undefined)),
            "Assertion failed. `f()` was called."
        );
    }

    #[test]
    fn test_deferred_outcome_settles_the_same_way() {
        let p = predicate!(|a| a);
        let assertion = evaluate(Strategy::Pair, p, argv![Deferred::resolved(false)]).unwrap();
        assert!(assertion.is_pending());
        assert_eq!(
            message(block_on(assertion.into_future())),
            "Assertion failed. |a = [object Promise]| a"
        );
    }

    #[test]
    fn test_pending_converts_into_rejecting_future() {
        let assertion = evaluate(Strategy::Pair, Deferred::rejected(Failure::error("no")), vec![])
            .unwrap();
        let Value::Future(deferred) = Value::from(assertion) else {
            panic!("expected a future");
        };

        match block_on(deferred) {
            Err(Value::Error(failure)) => {
                assert_eq!(failure.class(), Class::ASSERTION_ERROR);
                assert_eq!(failure.message(), Some("Assertion failed. no"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
