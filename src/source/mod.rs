//! Classification of rendered callable source.
//!
//! A predicate's source text is whitespace-collapsed, lexed, and sorted into
//! one of the [`SourceForm`] families. Each family has its own notion of
//! where the parameter list sits and where the body starts; [`Anatomy`]
//! records both so the extractor and the message synthesizer can work on
//! spans instead of re-matching text.
//!
//! Rules, in priority order:
//!
//! 1. **Closure** - the head (after `move` / `async`) opens with `|`.
//! 2. **Arrow** - an arrow token occurs, and either no function keyword
//!    does, or the arrow comes first. Head-only keywords (`fn`) count only
//!    when they open a named definition.
//! 3. **Named** - keyword, identifier, parameter list, body brace.
//! 4. **Generic** - anything else.
//!
//! ```rust
//! use avow::config::Syntax;
//! use avow::source::{classify, SourceForm};
//!
//! let syntax = Syntax::default();
//! assert_eq!(classify("(a, b) => a === b", &syntax), SourceForm::Arrow);
//! assert_eq!(classify("function eq(a, b) { return a === b; }", &syntax), SourceForm::Named);
//! assert_eq!(classify("function (a) { return () => a; }", &syntax), SourceForm::Generic);
//! assert_eq!(classify("|x| match x { _ => true }", &syntax), SourceForm::Closure);
//! ```

mod extract;
mod lexer;

use std::fmt;

use crate::config::Syntax;

pub use lexer::{tokenize, Delimiter, Kind, Lexer, Span, Token};

/// Syntactic family of a callable's source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceForm {
    /// `(a, b) => expr` or `a => { .. }`
    Arrow,
    /// `function name(a, b) { .. }`
    Named,
    /// `function (a, b) { .. }`, or text that is not a recognisable head.
    Generic,
    /// `|a, b| expr`
    Closure,
}

impl fmt::Display for SourceForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arrow => "arrow",
            Self::Named => "named",
            Self::Generic => "generic",
            Self::Closure => "closure",
        })
    }
}

/// The delimited parameter list of a head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamGroup {
    /// The list including its delimiters (or a bare arrow parameter).
    pub outer: Span,
    /// The list contents.
    pub inner: Span,
}

/// A classified source with the spans of its head.
#[derive(Clone, Debug)]
pub struct Anatomy<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    form: SourceForm,
    name: Option<Span>,
    params: Option<ParamGroup>,
    body: Option<usize>,
}

impl<'a> Anatomy<'a> {
    /// Classify whitespace-collapsed `text`.
    #[must_use]
    pub fn parse(text: &'a str, syntax: &Syntax) -> Self {
        let tokens = tokenize(text, &syntax.arrow);

        let mut anatomy = Self {
            text,
            tokens,
            form: SourceForm::Generic,
            name: None,
            params: None,
            body: None,
        };

        if !anatomy.closure() && !anatomy.arrow(syntax) && !anatomy.function(syntax) {
            tracing::trace!(text, "no recognisable head");
        }

        anatomy
    }

    /// The analysed text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The source family.
    #[must_use]
    pub fn form(&self) -> SourceForm {
        self.form
    }

    /// The declared name of a named function.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.name.map(|span| span.slice(self.text))
    }

    /// The parameter list, if one was found.
    #[must_use]
    pub fn params(&self) -> Option<ParamGroup> {
        self.params
    }

    fn kind(&self, index: usize) -> Option<Kind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    fn ident(&self, index: usize) -> Option<&'a str> {
        self.tokens
            .get(index)
            .filter(|t| t.kind == Kind::Ident)
            .map(|t| t.span.slice(self.text))
    }

    fn skip_modifiers(&self, mut index: usize, modifiers: &[&str]) -> usize {
        while self.ident(index).is_some_and(|ident| modifiers.contains(&ident)) {
            index += 1;
        }
        index
    }

    /// Index of the delimiter closing the one opened at `open`.
    fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                Kind::Open(_) => depth += 1,
                Kind::Close(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn group(&self, open: usize, close: usize) -> ParamGroup {
        let (open, close) = (self.tokens[open].span, self.tokens[close].span);
        ParamGroup {
            outer: Span::new(open.start, close.end),
            inner: Span::new(open.end, close.start),
        }
    }

    fn first_brace_from(&self, index: usize) -> Option<usize> {
        (index..self.tokens.len()).find(|&i| self.kind(i) == Some(Kind::Open(Delimiter::Brace)))
    }

    fn closure(&mut self) -> bool {
        let open = self.skip_modifiers(0, &["move", "async"]);
        if self.kind(open) != Some(Kind::Pipe) {
            return false;
        }

        let Some(close) = (open + 1..self.tokens.len()).find(|&i| self.kind(i) == Some(Kind::Pipe))
        else {
            return false;
        };

        self.form = SourceForm::Closure;
        self.params = Some(self.group(open, close));
        self.body = if self.kind(close + 1) == Some(Kind::ThinArrow) {
            self.first_brace_from(close + 1)
        } else {
            Some(close + 1)
        };
        true
    }

    fn arrow(&mut self, syntax: &Syntax) -> bool {
        let arrow = self.tokens.iter().position(|t| t.kind == Kind::Arrow);
        let anywhere = self.tokens.iter().position(|t| {
            t.kind == Kind::Ident && syntax.is_function_keyword(t.span.slice(self.text))
        });
        let keyword = [anywhere, self.definition_head(syntax)].into_iter().flatten().min();

        let arrow = match (arrow, keyword) {
            (Some(arrow), None) => arrow,
            (Some(arrow), Some(keyword)) if arrow < keyword => arrow,
            _ => return false,
        };

        self.form = SourceForm::Arrow;
        self.body = Some(arrow + 1);

        let start = self.skip_modifiers(0, &["async"]);
        if start < arrow {
            let last = arrow - 1;
            let outer = Span::new(self.tokens[start].span.start, self.tokens[last].span.end);
            self.params = Some(
                if self.kind(start) == Some(Kind::Open(Delimiter::Paren))
                    && self.matching(start) == Some(last)
                {
                    self.group(start, last)
                } else {
                    ParamGroup {
                        outer,
                        inner: outer,
                    }
                },
            );
        }

        true
    }

    /// Index of a head-only keyword opening a named definition
    /// (`fn name(`), skipping `async`.
    fn definition_head(&self, syntax: &Syntax) -> Option<usize> {
        let keyword = self.skip_modifiers(0, &["async"]);
        let is_head = self.ident(keyword).is_some_and(|ident| syntax.is_head_keyword(ident))
            && self.ident(keyword + 1).is_some_and(|ident| !is_keyword(syntax, ident))
            && self.kind(keyword + 2) == Some(Kind::Open(Delimiter::Paren));
        is_head.then_some(keyword)
    }

    fn function(&mut self, syntax: &Syntax) -> bool {
        let keyword = self.skip_modifiers(0, &["async"]);
        let Some(ident) = self.ident(keyword) else {
            return false;
        };
        if !syntax.is_function_keyword(ident) && self.definition_head(syntax) != Some(keyword) {
            return false;
        }

        let mut next = keyword + 1;
        if self.kind(next) == Some(Kind::Punct('*')) {
            next += 1;
        }

        if self
            .ident(next)
            .is_some_and(|ident| !is_keyword(syntax, ident))
        {
            if self.kind(next + 1) == Some(Kind::Open(Delimiter::Paren)) {
                if let Some(close) = self.matching(next + 1) {
                    let body = match self.kind(close + 1) {
                        Some(Kind::ThinArrow) => self.first_brace_from(close + 1),
                        Some(Kind::Open(Delimiter::Brace)) => Some(close + 1),
                        _ => None,
                    };

                    if body.is_some() {
                        self.form = SourceForm::Named;
                        self.name = Some(self.tokens[next].span);
                        self.params = Some(self.group(next + 1, close));
                        self.body = body;
                        return true;
                    }
                }
            }
            return false;
        }

        if self.kind(next) == Some(Kind::Open(Delimiter::Paren)) {
            if let Some(close) = self.matching(next) {
                self.params = Some(self.group(next, close));
                self.body = self.first_brace_from(close + 1);
                return true;
            }
        }

        false
    }
}

fn is_keyword(syntax: &Syntax, ident: &str) -> bool {
    syntax.is_function_keyword(ident) || syntax.is_head_keyword(ident)
}

/// Collapse every whitespace run to a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify whitespace-collapsed source text.
#[must_use]
pub fn classify(text: &str, syntax: &Syntax) -> SourceForm {
    Anatomy::parse(text, syntax).form()
}

/// The declared name of a named function definition, if `source` is one.
#[must_use]
pub fn declared_name(source: &str, syntax: &Syntax) -> Option<String> {
    let text = collapse_whitespace(source);
    Anatomy::parse(&text, syntax).name().map(str::to_string)
}
