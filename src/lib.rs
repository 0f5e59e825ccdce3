//! # avow
//!
//! > Assertions that explain themselves
//!
//! **avow** turns a predicate into an assertion. When the predicate fails
//! without saying why, the failure message is written from the predicate's
//! own source, with the arguments it was called with filled in.
//!
//! ## Quick Start
//!
//! ```rust
//! use avow::prelude::*;
//!
//! let error = actually(predicate!(|a, b| a == b), argv![true, false]).unwrap_err();
//! assert_eq!(error.to_string(), "Assertion failed. |a = true, b = false| a == b");
//!
//! let error = prove(argv![true, false], predicate!(|a, b| a == b)).unwrap_err();
//! assert_eq!(error.to_string(), "Assertion failed. { `true` == `false` }");
//! ```
//!
//! ## Features
//!
//! - **Synthesized messages** - `name = value` pairs or substituted
//!   expressions, see [`Strategy`]
//! - **Custom messages** - failures with `${n}` placeholders, see [`Failure`]
//! - **Deferred outcomes** - predicates returning a [`Deferred`] make the
//!   assertion awaitable
//! - **Built-ins** - [`assert_throws`], [`assert_rejects`],
//!   [`assert_resolves`] with class and pattern filters

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod config;
pub mod error;
pub mod message;
pub mod source;
pub mod value;

/// Prelude for convenient imports
///
/// ```rust
/// use avow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::{
        actually, assert_rejects, assert_resolves, assert_throws, evaluate, prove, Assertion,
    };
    pub use crate::error::{Error, Result};
    pub use crate::message::Strategy;
    pub use crate::value::{Class, Deferred, Failure, Predicate, Value};
    pub use crate::{argv, assert_actually, predicate};
}

// Re-exports
pub use assertions::{
    actually, assert_rejects, assert_resolves, assert_throws, evaluate, prove, Assertion,
};
pub use error::{Error, Result};
pub use message::Strategy;
pub use value::{Class, Deferred, Failure, IntoReturn, Predicate, Value};
