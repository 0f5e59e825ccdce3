//! Built-in predicates.
//!
//! Each built-in takes its subject last, after optional filters, and
//! reports mismatches as failures whose messages name the subject as
//! `${0}`:
//!
//! ```rust
//! use avow::assertions::builtins::throws;
//! use avow::{actually, argv, predicate, Class, Failure};
//!
//! let explode = predicate!(|| Err::<bool, _>(Failure::new(Class::TYPE_ERROR, "boom")));
//! assert!(actually(throws(), argv![Class::TYPE_ERROR, "boom", explode]).is_ok());
//!
//! let calm = predicate!(fn calm() { true });
//! let error = actually(throws(), argv![calm]).unwrap_err();
//! assert_eq!(error.to_string(), "Assertion failed. Expected calm() to throw an exception.");
//! ```

use super::front::actually;
use super::matcher::{matches_pattern, Filters, Templates};
use crate::value::{Class, Deferred, Failure, Predicate, Value};

const THROWS: Templates = Templates {
    single: "Expected ${0} to throw ${1}, but caught ${2}.",
    double: "Expected ${0} to throw ${1} ${2}, but caught ${3} ${4}.",
};

const REJECTS: Templates = Templates {
    single: "Expected promise to reject with reason ${1}, but caught ${2}.",
    double: "Expected promise to reject with reason ${1} ${2}, but caught ${3} ${4}.",
};

/// Split `[filters..] subject` into its parts.
fn subject_last(argv: &[Value]) -> Result<(&Value, Filters), Value> {
    let Some((subject, filters)) = argv.split_last() else {
        return Err(Failure::new(Class::TYPE_ERROR, "Expected a subject, but got no arguments.").into());
    };
    let filters = Filters::from_argv(filters)?;
    Ok((subject, filters))
}

/// `[class] [pattern] callable`: the callable throws when called without
/// arguments, with a value matching the filters.
#[must_use]
pub fn throws() -> Predicate {
    Predicate::native("throws", |argv| {
        let (subject, filters) = subject_last(argv)?;

        let Some(outcome) = subject.call(&[]) else {
            return Err(Failure::new(Class::TYPE_ERROR, "${0} is not a function.")
                .with_argv(vec![subject.clone()])
                .into());
        };

        let Err(caught) = outcome else {
            return Ok(Failure::error("Expected ${0} to throw an exception.")
                .with_argv(vec![subject.clone()])
                .into());
        };

        tracing::trace!(%caught, "subject threw");
        Ok(filters
            .check(subject, &caught, THROWS)
            .map_or(Value::Bool(true), Value::from))
    })
}

/// `[class] [pattern] future`: the future rejects with a reason matching the
/// filters.
///
/// Resolves to `true`, or rejects with the failure.
#[must_use]
pub fn rejects() -> Predicate {
    Predicate::native("rejects", |argv| {
        let (subject, filters) = subject_last(argv)?;

        let Value::Future(deferred) = subject else {
            return Err(Failure::new(Class::TYPE_ERROR, "Expected ${0} to be a promise.")
                .with_argv(vec![subject.clone()])
                .into());
        };

        let (deferred, subject) = (deferred.clone(), subject.clone());
        Ok(Deferred::new(async move {
            match deferred.await {
                Ok(value) => {
                    let argv = [value, subject].into_iter().chain(filters.to_argv()).collect();
                    Err(Failure::error("Expected promise to reject, but it resolved as ${0}.")
                        .with_argv(argv)
                        .into())
                }
                Err(reason) => match filters.check(&subject, &reason, REJECTS) {
                    Some(failure) => Err(failure.into()),
                    None => Ok(Value::Bool(true)),
                },
            }
        })
        .into())
    })
}

/// `[predicate] args.. future`: the future resolves, and `predicate`, if
/// given, holds for `args` followed by the resolved value.
///
/// Resolves to `true` without a predicate, or to the predicate's result.
#[must_use]
pub fn resolves() -> Predicate {
    Predicate::native("resolves", |argv| {
        let Some((Value::Future(deferred), rest)) = argv.split_last() else {
            return Err(Failure::new(Class::TYPE_ERROR, "Expected the last argument to be a promise.")
                .with_argv(argv.to_vec())
                .into());
        };

        let (predicate, args) = match rest.split_first() {
            Some((first, args)) if first.is_callable() => (Some(first.clone()), args.to_vec()),
            _ => (None, rest.to_vec()),
        };

        let deferred = deferred.clone();
        Ok(Deferred::new(async move {
            let value = deferred.await?;
            let Some(predicate) = predicate else {
                return Ok(Value::Bool(true));
            };

            let mut args = args;
            args.push(value);
            match actually(predicate, args) {
                Ok(assertion) => assertion.await.map_err(Value::from),
                Err(error) => Err(error.into()),
            }
        })
        .into())
    })
}

/// `(pattern, value)`: regular expressions search the value's text,
/// strings must occur in it, anything else must render the same.
#[must_use]
pub fn matches() -> Predicate {
    Predicate::native("matches", |argv| {
        let pattern = argv.first().cloned().unwrap_or_default();
        let value = argv.get(1).cloned().unwrap_or_default();
        Ok(Value::Bool(matches_pattern(&pattern, &value)))
    })
}
