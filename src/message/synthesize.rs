//! Failure messages built from a predicate's own source.

use std::fmt::Write as _;

use super::format::{escape_placeholders, format};
use super::stringify::{stringify, Style};
use crate::config::Syntax;
use crate::error::Result;
use crate::source::{collapse_whitespace, tokenize, Anatomy, Kind, SourceForm};
use crate::value::Value;

/// Splice `name = value` pairs into the source in place of its parameter
/// list.
///
/// Named functions shrink to a call expression (`eq(a = 1, b = 2);`).
/// Arguments past the named parameters render unnamed; parameters without
/// an argument are left out.
pub(crate) fn pair(source: &str, argv: &[Value], syntax: &Syntax) -> Result<String> {
    let text = collapse_whitespace(source);
    let anatomy = Anatomy::parse(&text, syntax);
    tracing::debug!(form = %anatomy.form(), "synthesizing pair message");

    let names = anatomy.parameters()?;
    let Some(group) = anatomy.params() else {
        return Ok(text);
    };

    let pairs = argv
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let rendered = stringify(value, Style::Bare);
            match names.get(index) {
                Some(name) => format!("{name} = {rendered}"),
                None => rendered,
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    if let Some(name) = anatomy.name() {
        return Ok(format!("{name}({pairs});"));
    }

    let (open, close) = match anatomy.form() {
        SourceForm::Closure => ('|', '|'),
        _ => ('(', ')'),
    };

    Ok(format!(
        "{}{open}{pairs}{close}{}",
        &text[..group.outer.start],
        &text[group.outer.end..]
    ))
}

/// Rewrite the returned expression with each bound parameter replaced by
/// its argument, wrapped as `{ .. }`.
///
/// Sources without a recognisable return expression are rewritten whole.
pub(crate) fn expression(source: &str, argv: &[Value], syntax: &Syntax) -> Result<String> {
    let text = collapse_whitespace(source);
    let anatomy = Anatomy::parse(&text, syntax);
    tracing::debug!(form = %anatomy.form(), "synthesizing expression message");

    let names = anatomy.parameters()?;
    let expression = anatomy.return_expression().unwrap_or_else(|| {
        tracing::debug!(text = anatomy.text(), "no return expression, using whole source");
        anatomy.text()
    });

    let bound = names.len().min(argv.len());
    let template = placeholder_template(expression, &names[..bound], &syntax.arrow);
    tracing::trace!(%template, "expression template");

    Ok(format!("{{ {} }}", format(&template, argv, Style::Ticked)))
}

/// Replace whole-identifier occurrences of `names` with `${index}`.
///
/// Member accesses (`x.a`) and string literals keep their text; anything
/// else is escaped so it survives formatting verbatim.
fn placeholder_template(expression: &str, names: &[String], arrow: &str) -> String {
    let mut template = String::with_capacity(expression.len());
    let mut cursor = 0;
    let mut previous = None;

    for token in tokenize(expression, arrow) {
        if token.kind == Kind::Ident && previous != Some(Kind::Dot) {
            let ident = token.span.slice(expression);
            if let Some(index) = names.iter().position(|name| name == ident) {
                template.push_str(&escape_placeholders(&expression[cursor..token.span.start]));
                let _ = write!(template, "${{{index}}}");
                cursor = token.span.end;
            }
        }
        previous = Some(token.kind);
    }

    template.push_str(&escape_placeholders(&expression[cursor..]));
    template
}
