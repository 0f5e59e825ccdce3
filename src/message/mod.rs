//! Failure message synthesis.
//!
//! When a predicate fails without saying why, its message is synthesized
//! from its source text and the arguments it was called with. Two
//! strategies exist, and each front end picks one:
//!
//! - [`Strategy::Pair`] splices `name = value` pairs into the source in
//!   place of the parameter list.
//! - [`Strategy::Expression`] rewrites the returned expression with the
//!   argument values substituted for the parameter names.
//!
//! Custom messages carried by failures go through [`format`] instead, with
//! the quoting [`Style`] of the active strategy.
//!
//! # Example
//!
//! ```rust
//! use avow::{argv, Strategy};
//!
//! let source = "(a, b) => a === b";
//! let argv = argv![true, false];
//!
//! assert_eq!(
//!     Strategy::Pair.synthesize(source, &argv).unwrap(),
//!     "(a = true, b = false) => a === b"
//! );
//! assert_eq!(
//!     Strategy::Expression.synthesize(source, &argv).unwrap(),
//!     "{ `true` === `false` }"
//! );
//! ```

mod format;
mod stringify;
mod synthesize;

use std::fmt;

use crate::config::{self, Syntax};
use crate::error::Result;
use crate::value::Value;

pub use format::{escape_placeholders, format};
pub use stringify::{stringify, Style};

/// A message synthesis strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `(a = 'x', b = 'y') => a === b`
    Pair,
    /// `` { "x" === "y" } ``
    Expression,
}

impl Strategy {
    /// Parse a strategy name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("pair") {
            Some(Self::Pair)
        } else if name.eq_ignore_ascii_case("expression") {
            Some(Self::Expression)
        } else {
            None
        }
    }

    /// The quoting style this strategy renders arguments with.
    #[must_use]
    pub const fn style(self) -> Style {
        match self {
            Self::Pair => Style::Bare,
            Self::Expression => Style::Ticked,
        }
    }

    /// Synthesize the message body for a predicate with source `source`
    /// that failed for `argv`, using the configured syntax.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedParameter`] when the source has a
    /// parameter shape that cannot be rendered.
    pub fn synthesize(self, source: &str, argv: &[Value]) -> Result<String> {
        self.synthesize_with(source, argv, &config::get().syntax)
    }

    /// [`Strategy::synthesize`] with explicit syntax.
    ///
    /// # Errors
    ///
    /// See [`Strategy::synthesize`].
    pub fn synthesize_with(self, source: &str, argv: &[Value], syntax: &Syntax) -> Result<String> {
        match self {
            Self::Pair => synthesize::pair(source, argv, syntax),
            Self::Expression => synthesize::expression(source, argv, syntax),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pair => "pair",
            Self::Expression => "expression",
        })
    }
}
