//! Shared, settle-once futures carried inside [`Value`].

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

use super::{Failure, Value};

/// An asynchronous value that settles once, to a resolution or a rejection.
///
/// Cloning a `Deferred` shares the underlying future: every clone observes
/// the same settlement. A panic while driving the future settles it as a
/// rejection with a `Panic` failure.
///
/// # Example
///
/// ```rust
/// use avow::{Deferred, Value};
///
/// let deferred = Deferred::new(async { Ok(Value::from(42)) });
/// let settled = futures::executor::block_on(deferred.clone());
/// assert_eq!(settled, Ok(Value::from(42)));
/// assert!(deferred.is_settled());
/// ```
#[derive(Clone)]
pub struct Deferred {
    inner: Shared<BoxFuture<'static, Result<Value, Value>>>,
}

impl Deferred {
    /// Wrap a future that resolves with `Ok` or rejects with `Err`.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, Value>> + Send + 'static,
    {
        let guarded = AssertUnwindSafe(future)
            .catch_unwind()
            .map(|settled| {
                settled.unwrap_or_else(|payload| Err(Failure::panic(payload.as_ref()).into()))
            });

        Self {
            inner: guarded.boxed().shared(),
        }
    }

    /// A deferred value that is already resolved.
    pub fn resolved(value: impl Into<Value>) -> Self {
        Self::new(futures::future::ready(Ok(value.into())))
    }

    /// A deferred value that is already rejected.
    pub fn rejected(reason: impl Into<Value>) -> Self {
        Self::new(futures::future::ready(Err(reason.into())))
    }

    /// The settlement, if the future has already completed.
    #[must_use]
    pub fn peek(&self) -> Option<&Result<Value, Value>> {
        self.inner.peek()
    }

    /// Returns `true` once the future has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.peek().is_some()
    }

    /// Returns `true` if both handles share the same future.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for Deferred {
    type Output = Result<Value, Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.peek())
            .finish()
    }
}
