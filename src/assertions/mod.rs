//! Assertions over predicates, literals and deferred values.
//!
//! This module provides the assertion front ends:
//!
//! - [`actually`] - predicate first, `name = value` messages
//! - [`prove`] - arguments first, expression messages
//! - [`assert_throws`] - a callable throws
//! - [`assert_rejects`] - a deferred value rejects
//! - [`assert_resolves`] - a deferred value resolves
//! - [`evaluate`] - any subject, with an explicit [`Strategy`](crate::Strategy)
//!
//! and the [`builtins`] and [`matcher`] filters they are made of.
//!
//! # Synchronous Assertions
//!
//! ```rust
//! use avow::{actually, argv, predicate, prove};
//!
//! assert!(actually(predicate!(|a, b| a == b), argv![1, 1]).is_ok());
//!
//! let error = prove(argv![1, 2], predicate!(fn eq(a, b) { a == b })).unwrap_err();
//! assert_eq!(error.to_string(), "Assertion failed. { `1` == `2` }");
//! ```
//!
//! # Deferred Assertions
//!
//! A predicate that returns a [`Deferred`](crate::Deferred) makes the
//! assertion pending; awaiting it yields the outcome.
//!
//! ```rust
//! use avow::{argv, assert_rejects, Class, Deferred, Failure};
//!
//! # futures::executor::block_on(async {
//! let promise = Deferred::rejected(Failure::new(Class::TYPE_ERROR, "† Failed."));
//! let assertion = assert_rejects(argv![Class::TYPE_ERROR, "†", promise]).unwrap();
//! assert!(assertion.await.is_ok());
//! # });
//! ```

pub mod builtins;
mod evaluate;
mod front;
mod future;
pub mod matcher;

pub use evaluate::{evaluate, Assertion};
pub use front::{actually, assert_rejects, assert_resolves, assert_throws, prove};
pub use future::{poll_once, Settle};
