//! Fluent constructors for building syntax trees without source text.
//!
//! Every constructor produces the token text the lexer would have read,
//! so a built tree formats to source that re-reads to an equal tree.
//! [`Node::symbol`] checks its name against the lexer and refuses text
//! that would not read back as one identifier.

use crate::ast::{Delimiter, Node, NodeKind, Quotation};
use crate::lexer::{NEGATION, tokenize};
use crate::token::{Position, Token, TokenKind};

impl Node {
    /// Wrap a token as an unquoted atom at the token's position.
    #[must_use]
    pub fn atom(token: Token) -> Self {
        let position = token.position;
        Self {
            kind: NodeKind::Atom(token),
            position,
            quotation: Quotation::Unquoted,
        }
    }

    /// Atom from a kind and its literal text.
    #[must_use]
    pub fn literal(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::atom(Token::new(kind, text, Position::START))
    }

    /// Parenthesised list.
    #[must_use]
    pub const fn list(children: Vec<Self>) -> Self {
        Self::delimited(Delimiter::Paren, children)
    }

    /// Square-bracketed list.
    #[must_use]
    pub const fn square(children: Vec<Self>) -> Self {
        Self::delimited(Delimiter::Square, children)
    }

    #[must_use]
    pub const fn delimited(delimiter: Delimiter, children: Vec<Self>) -> Self {
        Self {
            kind: NodeKind::List {
                delimiter,
                children,
            },
            position: Position::START,
            quotation: Quotation::Unquoted,
        }
    }

    /// Identifier atom; keyword spellings become keyword tokens.
    ///
    /// Returns `None` unless `name` reads back as exactly one identifier
    /// or keyword token, so numbers, blank text, and names holding
    /// whitespace or brackets are refused.
    #[must_use]
    pub fn symbol(name: &str) -> Option<Self> {
        let [token]: [Token; 1] = tokenize(name).ok()?.try_into().ok()?;
        let is_symbol = token.kind == TokenKind::Identifier || token.kind.is_keyword();
        (is_symbol && token.text == name).then(|| Self::literal(token.kind, name))
    }

    /// Integer atom, negatives spelled with `~`.
    #[must_use]
    pub fn int(value: i64) -> Self {
        let text = if value < 0 {
            format!("{NEGATION}{}", value.unsigned_abs())
        } else {
            value.to_string()
        };
        Self::literal(TokenKind::Int, text)
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        if value {
            Self::literal(TokenKind::True, "true")
        } else {
            Self::literal(TokenKind::False, "false")
        }
    }

    /// String atom, escaping quotes, backslashes, tabs, and newlines.
    #[must_use]
    pub fn string(contents: &str) -> Self {
        let mut text = String::with_capacity(contents.len() + 2);
        text.push('"');
        for ch in contents.chars() {
            match ch {
                '"' => text.push_str("\\\""),
                '\\' => text.push_str("\\\\"),
                '\t' => text.push_str("\\t"),
                '\n' => text.push_str("\\n"),
                _ => text.push(ch),
            }
        }
        text.push('"');
        Self::literal(TokenKind::String, text)
    }

    /// Character atom; whitespace uses the named spellings, and a carriage
    /// return is spelled as a newline.
    #[must_use]
    pub fn character(ch: char) -> Self {
        let text = match ch {
            ' ' => "\\space".to_string(),
            '\t' => "\\tab".to_string(),
            '\n' | '\r' => "\\newline".to_string(),
            _ => format!("\\{ch}"),
        };
        Self::literal(TokenKind::Character, text)
    }

    /// Append a child. Has no effect on atoms.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        if let NodeKind::List { children, .. } = &mut self.kind {
            children.push(child);
        }
        self
    }

    #[must_use]
    pub const fn quoted(self) -> Self {
        self.with_quotation(Quotation::Quoted)
    }

    #[must_use]
    pub const fn backquoted(self) -> Self {
        self.with_quotation(Quotation::Backquoted)
    }

    #[must_use]
    pub const fn with_quotation(mut self, quotation: Quotation) -> Self {
        self.quotation = quotation;
        self
    }

    /// Set the node's own position.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}
