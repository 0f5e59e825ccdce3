//! A small lexer over rendered callable source.
//!
//! It only knows enough to find parameter lists, bodies and identifiers:
//! string literals are single tokens, whitespace is skipped, and everything
//! that is not an identifier, number, delimiter or one of a few compound
//! operators comes out as a single-character [`Kind::Punct`].

/// Byte range into the lexed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Construct a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The text covered by this span.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Bracket-like delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// `(` `)`
    Paren,
    /// `{` `}`
    Brace,
    /// `[` `]`
    Bracket,
}

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// An identifier or keyword.
    Ident,
    /// A numeric literal.
    Number,
    /// A quoted string, char or template literal.
    Str,
    /// A Rust lifetime (`'a`, `'static`).
    Lifetime,
    /// The configured arrow token (`=>` by default).
    Arrow,
    /// `->`
    ThinArrow,
    /// `...`
    Spread,
    /// An opening delimiter.
    Open(Delimiter),
    /// A closing delimiter.
    Close(Delimiter),
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `.`
    Dot,
    /// `|`
    Pipe,
    /// Any other single character.
    Punct(char),
}

/// A lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// What was lexed.
    pub kind: Kind,
    /// Where it was lexed.
    pub span: Span,
}

/// Lexer over callable source text.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    cursor: usize,
    source: &'a str,
    arrow: &'a str,
}

impl<'a> Lexer<'a> {
    /// Construct a new lexer, recognising `arrow` as the arrow token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avow::source::{Kind, Lexer, Span, Token};
    ///
    /// let tokens: Vec<_> = Lexer::new("a => b", "=>").collect();
    /// assert_eq!(tokens[1], Token { kind: Kind::Arrow, span: Span::new(2, 4) });
    /// ```
    #[must_use]
    pub fn new(source: &'a str, arrow: &'a str) -> Self {
        Self {
            cursor: 0,
            source,
            arrow,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.cursor..]
    }

    fn take_while(&mut self, mut accept: impl FnMut(char) -> bool) {
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !accept(c))
            .map_or(self.rest().len(), |(n, _)| n);
        self.cursor += len;
    }

    fn take_quoted(&mut self, quote: char) {
        let mut escaped = false;
        let mut it = self.rest().char_indices().skip(1);

        let len = loop {
            match it.next() {
                Some((n, c)) if !escaped && c == quote => break n + c.len_utf8(),
                Some((_, '\\')) => escaped = !escaped,
                Some(_) => escaped = false,
                None => break self.rest().len(),
            }
        };

        self.cursor += len;
    }

    /// Length of a lifetime at the cursor, which sits on a `'`.
    ///
    /// A quote followed by an identifier is a lifetime when no closing
    /// quote follows the identifier and it sits where lifetimes do: after
    /// `&` or `<`, before `>`, or spelled `'static`.
    fn lifetime_len(&self) -> Option<usize> {
        let name = &self.rest()[1..];
        if !name.starts_with(is_ident_start) {
            return None;
        }

        let len = name.find(|c| !is_ident_continue(c)).unwrap_or(name.len());
        let after = name[len..].chars().next();
        if after == Some('\'') {
            return None;
        }

        let before = self.source[..self.cursor].trim_end().chars().next_back();
        let lifetime =
            matches!(before, Some('&' | '<')) || after == Some('>') || &name[..len] == "static";
        lifetime.then_some(1 + len)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.take_while(char::is_whitespace);

        let start = self.cursor;
        let rest = self.rest();
        let c = rest.chars().next()?;

        let kind = if !self.arrow.is_empty() && rest.starts_with(self.arrow) {
            self.cursor += self.arrow.len();
            Kind::Arrow
        } else if rest.starts_with("->") {
            self.cursor += 2;
            Kind::ThinArrow
        } else if rest.starts_with("...") {
            self.cursor += 3;
            Kind::Spread
        } else if let Some(len) = (c == '\'').then(|| self.lifetime_len()).flatten() {
            self.cursor += len;
            Kind::Lifetime
        } else if is_ident_start(c) {
            self.take_while(is_ident_continue);
            Kind::Ident
        } else if c.is_ascii_digit() {
            self.take_while(|c| is_ident_continue(c) || c == '.');
            Kind::Number
        } else if matches!(c, '"' | '\'' | '`') {
            self.take_quoted(c);
            Kind::Str
        } else {
            self.cursor += c.len_utf8();
            match c {
                '(' => Kind::Open(Delimiter::Paren),
                ')' => Kind::Close(Delimiter::Paren),
                '{' => Kind::Open(Delimiter::Brace),
                '}' => Kind::Close(Delimiter::Brace),
                '[' => Kind::Open(Delimiter::Bracket),
                ']' => Kind::Close(Delimiter::Bracket),
                ',' => Kind::Comma,
                ';' => Kind::Semi,
                '.' => Kind::Dot,
                '|' => Kind::Pipe,
                other => Kind::Punct(other),
            }
        };

        Some(Token {
            kind,
            span: Span::new(start, self.cursor),
        })
    }
}

/// Lex `source` into a token vector.
#[must_use]
pub fn tokenize(source: &str, arrow: &str) -> Vec<Token> {
    Lexer::new(source, arrow).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Kind> {
        tokenize(source, "=>").into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_arrow_and_idents() {
        assert_eq!(
            kinds("(a, b) => a"),
            vec![
                Kind::Open(Delimiter::Paren),
                Kind::Ident,
                Kind::Comma,
                Kind::Ident,
                Kind::Close(Delimiter::Paren),
                Kind::Arrow,
                Kind::Ident,
            ]
        );
    }

    #[test]
    fn test_strings_are_opaque() {
        let source = r#"return "=> function" + 'it\'s'"#;
        let tokens = tokenize(source, "=>");
        let strs: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == Kind::Str)
            .map(|t| t.span.slice(source))
            .collect();
        assert_eq!(strs, vec![r#""=> function""#, r"'it\'s'"]);
        assert!(!tokens.iter().any(|t| t.kind == Kind::Arrow));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("'abc", "=>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(0, 4));
    }

    #[test]
    fn test_lifetimes_are_not_strings() {
        assert_eq!(
            kinds("|a: &'static str| a"),
            vec![
                Kind::Pipe,
                Kind::Ident,
                Kind::Punct(':'),
                Kind::Punct('&'),
                Kind::Lifetime,
                Kind::Ident,
                Kind::Pipe,
                Kind::Ident,
            ]
        );
        assert_eq!(
            kinds("Ref<'a, 'b>"),
            vec![
                Kind::Ident,
                Kind::Punct('<'),
                Kind::Lifetime,
                Kind::Comma,
                Kind::Lifetime,
                Kind::Punct('>'),
            ]
        );
        assert_eq!(kinds("'a' + 'static'"), vec![Kind::Str, Kind::Punct('+'), Kind::Str]);
        assert_eq!(kinds("x = 'it is'"), vec![Kind::Ident, Kind::Punct('='), Kind::Str]);
    }

    #[test]
    fn test_compound_tokens() {
        assert_eq!(
            kinds("...rest -> |x| a.b"),
            vec![
                Kind::Spread,
                Kind::Ident,
                Kind::ThinArrow,
                Kind::Pipe,
                Kind::Ident,
                Kind::Pipe,
                Kind::Ident,
                Kind::Dot,
                Kind::Ident,
            ]
        );
    }

    #[test]
    fn test_custom_arrow() {
        let tokens = tokenize("x ~> y", "~>");
        assert_eq!(tokens[1].kind, Kind::Arrow);
    }

    #[test]
    fn test_numbers_and_unicode() {
        assert_eq!(kinds("1.5 §"), vec![Kind::Number, Kind::Punct('§')]);
        assert_eq!(kinds("$x _y"), vec![Kind::Ident, Kind::Ident]);
    }
}
