//! Filters narrowing which thrown or rejected values satisfy an assertion.
//!
//! - [`Matcher`] trait for filters
//! - [`ClassMatcher`] - the value is an instance of a class
//! - [`PatternMatcher`] - the value's message matches a pattern
//! - [`Filters`] - the optional `[class] [pattern]` prefix of an argument
//!   list
//!
//! # Example
//!
//! ```rust
//! use avow::assertions::matcher::{ClassMatcher, Matcher, PatternMatcher};
//! use avow::{Class, Failure, Value};
//! use regex::Regex;
//!
//! let reason = Value::from(Failure::new(Class::TYPE_ERROR, "boom"));
//!
//! assert!(ClassMatcher::new(Class::ERROR).matches(&reason));
//! assert!(PatternMatcher::new(Regex::new("^bo").unwrap()).matches(&reason));
//! assert!(!PatternMatcher::new("bang").matches(&reason));
//! ```

use crate::value::{Class, Failure, Value};

/// A matcher for testing values.
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

/// Matches values whose class is, or derives from, a given class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassMatcher {
    class: Class,
}

impl ClassMatcher {
    /// Create a class matcher.
    #[must_use]
    pub const fn new(class: Class) -> Self {
        Self { class }
    }

    /// The expected class.
    #[must_use]
    pub const fn class(&self) -> Class {
        self.class
    }
}

impl Matcher<Value> for ClassMatcher {
    fn matches(&self, value: &Value) -> bool {
        value.is_instance_of(self.class)
    }

    fn describe(&self) -> String {
        format!("instance of {}", self.class.name())
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        match value.class() {
            Some(class) => format!("{} is not a {}", class.name(), self.class.name()),
            None => format!("{value} is not a {}", self.class.name()),
        }
    }
}

/// Matches values whose message matches a pattern.
///
/// Regular expressions are searched, strings are looked for as
/// substrings, and any other pattern must render to the same text.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatcher {
    pattern: Value,
}

impl PatternMatcher {
    /// Create a pattern matcher.
    pub fn new(pattern: impl Into<Value>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The expected pattern.
    #[must_use]
    pub fn pattern(&self) -> &Value {
        &self.pattern
    }
}

impl Matcher<Value> for PatternMatcher {
    fn matches(&self, value: &Value) -> bool {
        matches_pattern(&self.pattern, &message_of(value))
    }

    fn describe(&self) -> String {
        format!("message matching {}", self.pattern)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{} does not match {}", message_of(value), self.pattern)
    }
}

/// Returns `true` if `value` matches `pattern`.
///
/// ```rust
/// use avow::assertions::matcher::matches_pattern;
/// use avow::Value;
/// use regex::Regex;
///
/// let value = Value::from("qwerty");
/// assert!(matches_pattern(&Regex::new("^qw").unwrap().into(), &value));
/// assert!(matches_pattern(&"wer".into(), &value));
/// assert!(!matches_pattern(&"xyz".into(), &value));
/// ```
#[must_use]
pub fn matches_pattern(pattern: &Value, value: &Value) -> bool {
    let text = value.to_string();
    match pattern {
        Value::Pattern(regex) => regex.is_match(&text),
        Value::Str(needle) => text.contains(needle.as_str()),
        other => other.to_string() == text,
    }
}

/// The message of a failure, or the value itself.
#[must_use]
pub fn message_of(value: &Value) -> Value {
    match value {
        Value::Error(failure) => failure
            .message()
            .filter(|message| !message.is_empty())
            .map_or_else(|| value.clone(), Value::from),
        other => other.clone(),
    }
}

/// Templates for a mismatching caught value.
///
/// `single` is used when one filter was given and reads `${1}` as the
/// filter and `${2}` as what was caught; `double` is used with both filters
/// and reads `${1} ${2}` as the filters and `${3} ${4}` as the caught class
/// and message.
#[derive(Clone, Copy, Debug)]
pub struct Templates {
    /// One filter.
    pub single: &'static str,
    /// Class and pattern.
    pub double: &'static str,
}

/// The optional `[class] [pattern]` filters of an argument list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    class: Option<ClassMatcher>,
    pattern: Option<PatternMatcher>,
}

impl Filters {
    /// Read filters from the arguments that precede an assertion's subject.
    ///
    /// A lone class is a class filter, any other lone value is a pattern.
    /// Two filters must be a class followed by a pattern.
    ///
    /// # Errors
    ///
    /// Returns a `TypeError` failure for more than two filters, or for two
    /// filters whose first is not a class.
    pub fn from_argv(filters: &[Value]) -> Result<Self, Failure> {
        match filters {
            [] => Ok(Self::default()),
            [Value::Class(class)] => Ok(Self {
                class: Some(ClassMatcher::new(*class)),
                pattern: None,
            }),
            [pattern] => Ok(Self {
                class: None,
                pattern: Some(PatternMatcher::new(pattern.clone())),
            }),
            [Value::Class(class), pattern] => Ok(Self {
                class: Some(ClassMatcher::new(*class)),
                pattern: Some(PatternMatcher::new(pattern.clone())),
            }),
            [first, _] => Err(Failure::new(Class::TYPE_ERROR, "Expected ${0} to be a class.")
                .with_argv(vec![first.clone()])),
            _ => Err(
                Failure::new(Class::TYPE_ERROR, "Expected at most 2 filters, but got ${0}.")
                    .with_argv(vec![filters.len().into()]),
            ),
        }
    }

    /// Returns `true` if no filter was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.pattern.is_none()
    }

    /// The filters as values, class first.
    #[must_use]
    pub fn to_argv(&self) -> Vec<Value> {
        let class = self.class.map(|m| Value::Class(m.class()));
        let pattern = self.pattern.as_ref().map(|m| m.pattern().clone());
        class.into_iter().chain(pattern).collect()
    }

    /// Check a caught value against the filters.
    ///
    /// Returns the failure to report, with `subject` as `${0}`, or `None`
    /// if `caught` satisfies every filter.
    #[must_use]
    pub fn check(&self, subject: &Value, caught: &Value, templates: Templates) -> Option<Failure> {
        let is_instance = self.class.map_or(true, |m| m.matches(caught));
        let is_match = self.pattern.as_ref().map_or(true, |m| m.matches(caught));
        if is_instance && is_match {
            return None;
        }

        let caught_class = caught.class().map_or(Value::Undefined, Value::Class);
        let (template, argv) = match (&self.class, &self.pattern) {
            (Some(class), Some(pattern)) => (
                templates.double,
                vec![
                    subject.clone(),
                    Value::Class(class.class()),
                    pattern.pattern().clone(),
                    caught_class,
                    message_of(caught),
                ],
            ),
            (Some(class), None) => {
                tracing::debug!(mismatch = %class.describe_mismatch(caught), "class filter failed");
                (
                    templates.single,
                    vec![subject.clone(), Value::Class(class.class()), caught_class],
                )
            }
            (None, Some(pattern)) => {
                tracing::debug!(mismatch = %pattern.describe_mismatch(caught), "pattern filter failed");
                (
                    templates.single,
                    vec![subject.clone(), pattern.pattern().clone(), message_of(caught)],
                )
            }
            (None, None) => return None,
        };

        Some(Failure::error(template).with_argv(argv))
    }
}
