//! Error-shaped failure values.

use std::any::Any;
use std::fmt;

use super::{Class, Value};

/// An error-shaped value a predicate can return or throw.
///
/// The message may contain `${n}` placeholders. When `argv` is set it fully
/// replaces the assertion's own arguments while those placeholders are
/// resolved.
///
/// # Example
///
/// ```rust
/// use avow::{argv, Failure};
///
/// let failure = Failure::error("${0} did not equal ${1}").with_argv(argv![1, 2]);
/// assert_eq!(failure.message(), Some("${0} did not equal ${1}"));
/// assert_eq!(failure.argv().map(<[_]>::len), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    class: Class,
    message: Option<String>,
    argv: Option<Vec<Value>>,
}

impl Failure {
    /// Create a failure of the given class.
    #[must_use]
    pub fn new(class: Class, message: impl Into<String>) -> Self {
        Self {
            class,
            message: Some(message.into()),
            argv: None,
        }
    }

    /// Create a plain `Error` failure.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Class::ERROR, message)
    }

    /// Create a failure that carries no message.
    ///
    /// Assertions fall back to a synthesized message for these.
    #[must_use]
    pub fn without_message(class: Class) -> Self {
        Self {
            class,
            message: None,
            argv: None,
        }
    }

    /// Build a failure from a caught panic payload.
    #[must_use]
    pub fn panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new(Class::PANIC, message)
    }

    /// Override the arguments used to resolve the message placeholders.
    #[must_use]
    pub fn with_argv(mut self, argv: Vec<Value>) -> Self {
        self.argv = Some(argv);
        self
    }

    /// The failure's class.
    #[must_use]
    pub fn class(&self) -> Class {
        self.class
    }

    /// The message template, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The argument override, if any.
    #[must_use]
    pub fn argv(&self) -> Option<&[Value]> {
        self.argv.as_deref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) if !message.is_empty() => write!(f, "{}: {message}", self.class.name()),
            _ => f.write_str(self.class.name()),
        }
    }
}

impl std::error::Error for Failure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Failure::new(Class::TYPE_ERROR, "boom").to_string(), "TypeError: boom");
        assert_eq!(Failure::without_message(Class::ERROR).to_string(), "Error");
    }

    #[test]
    fn test_panic_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(Failure::panic(payload.as_ref()).message(), Some("static"));

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let failure = Failure::panic(payload.as_ref());
        assert_eq!(failure.message(), Some("owned"));
        assert_eq!(failure.class(), Class::PANIC);

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(Failure::panic(payload.as_ref()).message(), Some("Box<dyn Any>"));
    }
}
