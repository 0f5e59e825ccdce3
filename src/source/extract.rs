//! Parameter-name and return-expression extraction.

use super::{Anatomy, Delimiter, Kind, SourceForm, Token};
use crate::error::{Error, Result};

impl<'a> Anatomy<'a> {
    /// Ordered parameter names of the head.
    ///
    /// A head without a parameter list yields an empty list. Type
    /// annotations and `mut` reduce to the bound name; a rest parameter
    /// (`...rest`) ends the list, so the arguments it absorbs render
    /// unnamed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedParameter`] for destructured or
    /// default-valued parameters.
    pub fn parameters(&self) -> Result<Vec<String>> {
        let Some(group) = self.params else {
            return Ok(Vec::new());
        };

        let tokens: Vec<Token> = self
            .tokens
            .iter()
            .filter(|t| t.span.start >= group.inner.start && t.span.end <= group.inner.end)
            .copied()
            .collect();

        let segments = split_top_level(&tokens);
        let count = segments.len();
        let mut names = Vec::with_capacity(count);

        for (index, segment) in segments.into_iter().enumerate() {
            match self.parameter(segment)? {
                Parameter::Named(name) => names.push(name.to_string()),
                Parameter::Rest => break,
                Parameter::Empty if index + 1 == count => {}
                Parameter::Empty => return Err(self.unsupported("", "empty parameter")),
            }
        }

        Ok(names)
    }

    fn parameter(&self, segment: &[Token]) -> Result<Parameter<'a>> {
        let text = self.text;
        let ident = |index: usize| {
            segment
                .get(index)
                .filter(|t| t.kind == Kind::Ident)
                .map(|t| t.span.slice(text))
        };

        let (Some(first), Some(last)) = (segment.first(), segment.last()) else {
            return Ok(Parameter::Empty);
        };
        let written = &text[first.span.start..last.span.end];

        let (binding, after) = match (first.kind, ident(0)) {
            (Kind::Spread, _) => return Ok(Parameter::Rest),
            (_, Some("mut")) if ident(1).is_some() => (ident(1), 2),
            (_, Some(name)) => (Some(name), 1),
            (Kind::Open(_) | Kind::Punct('&'), _) => {
                return Err(self.unsupported(written, "destructured parameters are not supported"));
            }
            _ => (None, 0),
        };

        match (binding, segment.get(after).map(|t| t.kind)) {
            (Some(name), None | Some(Kind::Punct(':'))) => Ok(Parameter::Named(name)),
            (Some(_), Some(Kind::Punct('='))) => {
                Err(self.unsupported(written, "default values are not supported"))
            }
            _ => Err(self.unsupported(written, "unrecognised parameter syntax")),
        }
    }

    fn unsupported(&self, parameter: &str, reason: &'static str) -> Error {
        tracing::debug!(parameter, reason, "unsupported parameter");
        Error::UnsupportedParameter {
            text: self.text.to_string(),
            parameter: parameter.to_string(),
            reason,
        }
    }

    /// The expression a predicate returns, as written.
    ///
    /// Arrow and closure expression bodies are returned whole. Block bodies
    /// yield the operand of their first `return`, or, without one, a lone
    /// tail expression. `None` when neither shape matches.
    #[must_use]
    pub fn return_expression(&self) -> Option<&'a str> {
        let body = self.body?;
        let first = self.tokens.get(body)?;

        if first.kind != Kind::Open(Delimiter::Brace) {
            if !matches!(self.form, SourceForm::Arrow | SourceForm::Closure) {
                return None;
            }
            let end = self.tokens[body..]
                .iter()
                .rposition(|t| t.kind != Kind::Semi)?;
            return self.slice(body, body + end);
        }

        let close = self.matching(body).unwrap_or(self.tokens.len());
        let inner = body + 1..close;

        let returned = inner.clone().find(|&i| {
            self.tokens[i].kind == Kind::Ident && self.tokens[i].span.slice(self.text) == "return"
        });

        if let Some(keyword) = returned {
            let start = keyword + 1;
            let end = statement_end(&self.tokens, start, close);
            return (end > start).then(|| self.slice(start, end - 1)).flatten();
        }

        if inner.is_empty() || statement_end(&self.tokens, inner.start, close) < close {
            return None;
        }

        self.slice(inner.start, close - 1)
    }

    /// Text from the start of token `first` to the end of token `last`.
    fn slice(&self, first: usize, last: usize) -> Option<&'a str> {
        let (first, last) = (self.tokens.get(first)?, self.tokens.get(last)?);
        Some(self.text[first.span.start..last.span.end].trim())
    }
}

enum Parameter<'a> {
    Named(&'a str),
    Rest,
    Empty,
}

/// Split on commas that are not nested inside delimiters or angle brackets.
fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            Kind::Open(_) | Kind::Punct('<') => depth += 1,
            Kind::Close(_) | Kind::Punct('>') => depth = depth.saturating_sub(1),
            Kind::Comma if depth == 0 => {
                segments.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    segments.push(&tokens[start..]);
    segments
}

/// Index of the first `;` at nesting depth zero from `start`, or of the
/// token that closes the enclosing block, bounded by `limit`.
fn statement_end(tokens: &[Token], start: usize, limit: usize) -> usize {
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate().take(limit).skip(start) {
        match token.kind {
            Kind::Open(_) => depth += 1,
            Kind::Close(_) if depth == 0 => return index,
            Kind::Close(_) => depth -= 1,
            Kind::Semi if depth == 0 => return index,
            _ => {}
        }
    }

    limit
}
