//! Placeholder templates.
//!
//! A template refers to arguments by position with `${n}`. A backslash in
//! front of a placeholder keeps it literal: `\${0}` renders as `${0}`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::stringify::{stringify, Style};
use crate::value::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\?\$\{(\d+)\}").expect("placeholder pattern is valid"));

/// Resolve every `${n}` in `template` against `argv`.
///
/// Indices past the end of `argv` render as `undefined`.
///
/// # Example
///
/// ```rust
/// use avow::message::{format, Style};
/// use avow::argv;
///
/// let argv = argv![true, "b"];
/// assert_eq!(format("${0} is not ${1}", &argv, Style::Ticked), "`true` is not \"b\"");
/// assert_eq!(format(r"\${0} stays", &argv, Style::Bare), "${0} stays");
/// ```
#[must_use]
pub fn format(template: &str, argv: &[Value], style: Style) -> String {
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let whole = &caps[0];
        if let Some(literal) = whole.strip_prefix('\\') {
            return literal.to_string();
        }

        let value = caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| argv.get(index))
            .unwrap_or(&Value::Undefined);
        stringify(value, style)
    });

    if matches!(rendered, Cow::Owned(_)) {
        tracing::trace!(template, "resolved placeholders");
    }

    rendered.into_owned()
}

/// Protect any `${n}` already present in `text` from [`format`].
#[must_use]
pub fn escape_placeholders(text: &str) -> Cow<'_, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let whole = &caps[0];
        if whole.starts_with('\\') {
            whole.to_string()
        } else {
            format!("\\{whole}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argv;

    #[test]
    fn test_substitutes_by_index() {
        let argv = argv!["a", 2];
        assert_eq!(format("${1} then ${0}", &argv, Style::Bare), "2 then 'a'");
        assert_eq!(format("${0}${0}", &argv, Style::Ticked), "\"a\"\"a\"");
    }

    #[test]
    fn test_out_of_range_is_undefined() {
        assert_eq!(format("${3}", &argv![1], Style::Bare), "undefined");
        assert_eq!(
            format("${99999999999999999999999}", &argv![1], Style::Ticked),
            "`undefined`"
        );
    }

    #[test]
    fn test_escaped_placeholder_is_literal() {
        assert_eq!(format(r"cost: \${0}", &argv![1], Style::Bare), "cost: ${0}");
    }

    #[test]
    fn test_non_placeholders_untouched() {
        assert_eq!(format("${x} ${ 0 } $0 {0}", &argv![1], Style::Bare), "${x} ${ 0 } $0 {0}");
        assert_eq!(format("plain", &[], Style::Bare), "plain");
    }

    #[test]
    fn test_escape_round_trips_through_format() {
        let text = "`${0}` and ${1}";
        let escaped = escape_placeholders(text);
        assert_eq!(escaped, r"`\${0}` and \${1}");
        assert_eq!(format(&escaped, &argv![true], Style::Ticked), text);
    }

    #[test]
    fn test_does_not_double_escape() {
        let message = format("${0}", &argv!["${1}"], Style::Bare);
        assert_eq!(message, "'${1}'");
    }
}
