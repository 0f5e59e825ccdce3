//! Deferred-outcome adapter.
//!
//! When a predicate's outcome is a future, the assertion itself becomes a
//! future: [`Settle`] drives the outcome, follows any futures it resolves
//! to, and hands the final settlement to the same judgment the synchronous
//! path uses.
//!
//! # Example
//!
//! ```rust
//! use avow::assertions::poll_once;
//! use avow::{actually, argv, predicate, Deferred};
//! use std::future::IntoFuture;
//!
//! let never = Deferred::new(futures::future::pending());
//! let assertion = actually(predicate!(|a| a), argv![never]).unwrap();
//! assert!(poll_once(assertion.into_future()).is_pending());
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{ready, FutureExt};
use pin_project_lite::pin_project;

use super::evaluate::Judgment;
use crate::error::Result;
use crate::value::{Deferred, Value};

/// Poll a future once and return the result.
///
/// This is useful for checking that an assertion has not settled yet
/// without an executor.
pub fn poll_once<F: Future>(future: F) -> Poll<F::Output> {
    let mut cx = Context::from_waker(futures::task::noop_waker_ref());
    let mut pinned = Box::pin(future);
    pinned.as_mut().poll(&mut cx)
}

pin_project! {
    /// Future returned for an assertion whose outcome is deferred.
    ///
    /// Resolves to the passing value, or to the assertion failure.
    #[derive(Debug)]
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Settle<F> {
        #[pin]
        outcome: F,
        nested: Option<Deferred>,
        judgment: Option<Judgment>,
    }
}

impl<F> Settle<F> {
    pub(crate) fn new(outcome: F, judgment: Judgment) -> Self {
        Self {
            outcome,
            nested: None,
            judgment: Some(judgment),
        }
    }
}

impl<F> Future for Settle<F>
where
    F: Future<Output = std::result::Result<Value, Value>>,
{
    type Output = Result<Value>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        assert!(this.judgment.is_some(), "polled after completion");

        loop {
            let outcome = match this.nested.as_mut() {
                Some(nested) => ready!(nested.poll_unpin(cx)),
                None => ready!(this.outcome.as_mut().poll(cx)),
            };

            let outcome = match outcome {
                Ok(Value::Future(next)) => {
                    tracing::trace!("outcome resolved to another future");
                    *this.nested = Some(next);
                    continue;
                }
                outcome => outcome,
            };

            let judgment = this.judgment.take().expect("polled after completion");
            tracing::trace!(resolved = outcome.is_ok(), "deferred outcome settled");
            return Poll::Ready(judgment.settle(outcome));
        }
    }
}
