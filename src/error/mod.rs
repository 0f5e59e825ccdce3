//! Error definitions
//!
//! This module provides the error type surfaced by every assertion front end.

use thiserror::Error;

use crate::value::{Class, Failure, Value};

/// Marker every assertion failure message starts with.
pub const FAILURE_MARKER: &str = "Assertion failed.";

/// Main error type for avow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The predicate (or a filter check) failed.
    ///
    /// Holds the fully resolved message without the leading marker.
    #[error("Assertion failed. {0}")]
    AssertionFailed(String),

    /// The predicate failed, but its source uses a parameter shape the
    /// message synthesizer cannot render faithfully.
    #[error("Assertion failed. {text} (cannot render parameter `{parameter}`: {reason})")]
    UnsupportedParameter {
        /// Whitespace-collapsed source text of the predicate.
        text: String,
        /// The offending parameter as written.
        parameter: String,
        /// Why the parameter was rejected.
        reason: &'static str,
    },

    /// [`crate::config::install`] was called after a configuration was fixed.
    #[error("configuration was already installed")]
    ConfigAlreadyInstalled,
}

impl Error {
    /// Create an assertion failure from a resolved message body.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Rebuild an error from a message that may already carry the marker.
    ///
    /// Chained assertions observe earlier failures as values; relaying their
    /// text through here keeps the marker from being stacked twice.
    #[must_use]
    pub fn relay(message: &str) -> Self {
        let body = message
            .strip_prefix(FAILURE_MARKER)
            .map_or(message, str::trim_start);
        Self::AssertionFailed(body.to_string())
    }

    /// The complete failure message, marker included.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Failure::new(Class::ASSERTION_ERROR, error.to_string())
    }
}

impl From<Error> for Value {
    fn from(error: Error) -> Self {
        Value::Error(error.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
