//! Constructor-like classes used for type filters.

use std::fmt;

use super::{Failure, Value};

/// A constructor-like callable naming the type of an error or value.
///
/// Classes form a single-inheritance chain so that filters can ask
/// "is this reason an instance of `Error`?" the way `instanceof` does:
/// a `TypeError` is an `Error`, and every class is an `Object`.
///
/// # Example
///
/// ```rust
/// use avow::Class;
///
/// assert!(Class::TYPE_ERROR.is_a(Class::ERROR));
/// assert!(!Class::ERROR.is_a(Class::TYPE_ERROR));
///
/// const TIMEOUT: Class = Class::extends("Timeout", &Class::ERROR);
/// assert!(TIMEOUT.is_a(Class::ERROR));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Class {
    name: &'static str,
    parent: Option<&'static Class>,
}

impl Class {
    /// Root of every class chain.
    pub const OBJECT: Class = Class::root("Object");
    /// Generic error.
    pub const ERROR: Class = Class::extends("Error", &Class::OBJECT);
    /// A value had the wrong type.
    pub const TYPE_ERROR: Class = Class::extends("TypeError", &Class::ERROR);
    /// A value was outside its allowed range.
    pub const RANGE_ERROR: Class = Class::extends("RangeError", &Class::ERROR);
    /// Failures raised by the assertion engine itself.
    pub const ASSERTION_ERROR: Class = Class::extends("AssertionError", &Class::ERROR);
    /// A Rust panic caught while invoking a predicate or polling a future.
    pub const PANIC: Class = Class::extends("Panic", &Class::ERROR);
    /// Strings.
    pub const STRING: Class = Class::extends("String", &Class::OBJECT);
    /// Numbers.
    pub const NUMBER: Class = Class::extends("Number", &Class::OBJECT);
    /// Booleans.
    pub const BOOLEAN: Class = Class::extends("Boolean", &Class::OBJECT);
    /// Lists.
    pub const ARRAY: Class = Class::extends("Array", &Class::OBJECT);
    /// Callables, classes included.
    pub const FUNCTION: Class = Class::extends("Function", &Class::OBJECT);
    /// Patterns.
    pub const REGEXP: Class = Class::extends("RegExp", &Class::OBJECT);
    /// Deferred values.
    pub const PROMISE: Class = Class::extends("Promise", &Class::OBJECT);

    /// Create a class with no parent.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Create a class deriving from `parent`.
    #[must_use]
    pub const fn extends(name: &'static str, parent: &'static Class) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// The class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The direct parent, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static Class> {
        self.parent
    }

    /// Returns `true` if `self` is `other` or derives from it.
    #[must_use]
    pub fn is_a(&self, other: Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if *class == other {
                return true;
            }
            current = class.parent;
        }
        false
    }

    /// Invoke the class as a constructor.
    ///
    /// The first argument becomes the message of the new failure; with no
    /// arguments the failure has no message.
    #[must_use]
    pub fn construct(&self, argv: &[Value]) -> Failure {
        match argv.first() {
            Some(message) => Failure::new(*self, message.to_string()),
            None => Failure::without_message(*self),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}() {{ [native code] }}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain() {
        assert!(Class::ASSERTION_ERROR.is_a(Class::ERROR));
        assert!(Class::ASSERTION_ERROR.is_a(Class::OBJECT));
        assert!(!Class::STRING.is_a(Class::ERROR));
        assert!(Class::OBJECT.is_a(Class::OBJECT));
    }

    #[test]
    fn test_user_class() {
        const NOT_FOUND: Class = Class::extends("NotFound", &Class::RANGE_ERROR);
        assert!(NOT_FOUND.is_a(Class::ERROR));
        assert!(!NOT_FOUND.is_a(Class::TYPE_ERROR));
        assert_eq!(NOT_FOUND.parent(), Some(&Class::RANGE_ERROR));
    }

    #[test]
    fn test_construct() {
        let failure = Class::TYPE_ERROR.construct(&[Value::from("boom")]);
        assert_eq!(failure.class(), Class::TYPE_ERROR);
        assert_eq!(failure.message(), Some("boom"));

        let bare = Class::ERROR.construct(&[]);
        assert_eq!(bare.message(), None);
    }
}
