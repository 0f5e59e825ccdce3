//! Dynamic values flowing through assertions.
//!
//! Predicates receive their arguments as an ordered [`Value`] slice, and
//! return, throw or settle with a `Value`. The enum covers the shapes the
//! engine has to tell apart:
//!
//! - plain data ([`Value::Bool`], [`Value::Number`], [`Value::Str`], ...)
//! - error-shaped failures ([`Value::Error`], see [`Failure`])
//! - callables ([`Value::Function`] and constructor-like [`Value::Class`])
//! - deferred results ([`Value::Future`], see [`Deferred`])

mod class;
mod deferred;
mod failure;
mod predicate;

use std::fmt;

use regex::Regex;

pub use class::Class;
pub use deferred::Deferred;
pub use failure::Failure;
pub use predicate::{IntoReturn, Predicate};

/// A dynamically typed argument, result or rejection reason.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,
    /// An explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Str(String),
    /// An ordered list.
    List(Vec<Value>),
    /// An error-shaped failure.
    Error(Failure),
    /// A predicate or other callable.
    Function(Predicate),
    /// A constructor-like class.
    Class(Class),
    /// A regular expression.
    Pattern(Regex),
    /// A value that settles later.
    Future(Deferred),
}

impl Value {
    /// Returns `true` for predicates and classes.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Class(_))
    }

    /// Returns `true` for deferred values.
    #[must_use]
    pub fn is_future(&self) -> bool {
        matches!(self, Self::Future(_))
    }

    /// Returns `true` for `Undefined` and `Null`.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns `true` for anything but `Undefined`.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Returns `true` for failures.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns `true` for strings.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Loose truthiness: `undefined`, `null`, `false`, `0`, `NaN` and the
    /// empty string are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The class this value is an instance of; `None` for nil values.
    #[must_use]
    pub fn class(&self) -> Option<Class> {
        match self {
            Self::Undefined | Self::Null => None,
            Self::Bool(_) => Some(Class::BOOLEAN),
            Self::Number(_) => Some(Class::NUMBER),
            Self::Str(_) => Some(Class::STRING),
            Self::List(_) => Some(Class::ARRAY),
            Self::Error(failure) => Some(failure.class()),
            Self::Function(_) | Self::Class(_) => Some(Class::FUNCTION),
            Self::Pattern(_) => Some(Class::REGEXP),
            Self::Future(_) => Some(Class::PROMISE),
        }
    }

    /// Returns `true` if the value's class is `class` or derives from it.
    #[must_use]
    pub fn is_instance_of(&self, class: Class) -> bool {
        self.class().is_some_and(|own| own.is_a(class))
    }

    /// The name of a callable, if it has one.
    #[must_use]
    pub fn callable_name(&self) -> Option<&str> {
        match self {
            Self::Function(predicate) => predicate.name(),
            Self::Class(class) => Some(class.name()),
            _ => None,
        }
    }

    /// Source text of a callable, or the rendered value otherwise.
    #[must_use]
    pub fn source_text(&self) -> String {
        match self {
            Self::Function(predicate) => predicate.source().to_string(),
            other => other.to_string(),
        }
    }

    /// Invoke a callable.
    ///
    /// Returns `None` when the value is not callable. Calling a class
    /// returns a fresh failure of that class.
    #[must_use]
    pub fn call(&self, argv: &[Value]) -> Option<Result<Value, Value>> {
        match self {
            Self::Function(predicate) => Some(predicate.invoke(argv)),
            Self::Class(class) => Some(Ok(Self::Error(class.construct(argv)))),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Class(a), Self::Class(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Future(a), Self::Future(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_nil() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Error(failure) => write!(f, "{failure}"),
            Self::Function(predicate) => f.write_str(predicate.source()),
            Self::Class(class) => write!(f, "{class}"),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            Self::Future(_) => f.write_str("[object Promise]"),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless, clippy::unnecessary_cast)]
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Failure> for Value {
    fn from(failure: Failure) -> Self {
        Self::Error(failure)
    }
}

impl From<Predicate> for Value {
    fn from(predicate: Predicate) -> Self {
        Self::Function(predicate)
    }
}

impl From<Class> for Value {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

impl From<Regex> for Value {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Self::Future(deferred)
    }
}

/// Build an argument vector, converting every element into a [`Value`].
///
/// ```rust
/// use avow::{argv, Value};
///
/// let args = argv![1, "two", true];
/// assert_eq!(args, vec![Value::from(1), Value::from("two"), Value::from(true)]);
/// ```
#[macro_export]
macro_rules! argv {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
