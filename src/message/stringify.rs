//! Rendering of argument values inside failure messages.

use crate::value::Value;

/// How argument values are quoted when spliced into a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Strings in single quotes, other values as plain text.
    ///
    /// `(a = 'x', b = 1)`
    Bare,
    /// Strings in double quotes, other values in backticks.
    ///
    /// `` "x" === `1` ``
    Ticked,
}

/// Render one value for a failure message.
///
/// Callables render by name (`eq()`), or as `function ()` when anonymous,
/// in either style.
///
/// # Example
///
/// ```rust
/// use avow::message::{stringify, Style};
/// use avow::Value;
///
/// assert_eq!(stringify(&Value::from("a"), Style::Bare), "'a'");
/// assert_eq!(stringify(&Value::from("a"), Style::Ticked), "\"a\"");
/// assert_eq!(stringify(&Value::from(true), Style::Ticked), "`true`");
/// ```
#[must_use]
pub fn stringify(value: &Value, style: Style) -> String {
    if let Value::Str(s) = value {
        return match style {
            Style::Bare => format!("'{s}'"),
            Style::Ticked => format!("\"{s}\""),
        };
    }

    if value.is_callable() {
        return match value.callable_name() {
            Some(name) => format!("{name}()"),
            None => "function ()".to_string(),
        };
    }

    match style {
        Style::Bare => value.to_string(),
        Style::Ticked => format!("`{value}`"),
    }
}
