//! Tokenizer and tree builder for the ikou S-expression language.
//!
//! Source text is scanned into typed [`Token`]s by a single-pass state
//! machine, then assembled into a syntax tree of nested lists, atoms, and
//! quotation markers.
//!
//! # Quick start
//!
//! ## Tokenize and parse
//!
//! ```
//! use ikou::{tokenize, parse, format, TokenKind};
//!
//! let tokens = tokenize("(+ 15 25)").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Identifier);
//!
//! let tree = parse(&tokens).unwrap();
//! assert_eq!(tree.children().map(|c| c.len()), Some(3));
//! assert_eq!(format(&tree), "(+ 15 25)");
//! ```
//!
//! ## Build a tree programmatically
//!
//! ```
//! use ikou::{Node, format};
//!
//! let tree = Node::list(vec![Node::symbol("list").unwrap()])
//!     .child(Node::int(-1))
//!     .child(Node::character(' '))
//!     .quoted();
//!
//! assert_eq!(format(&tree), "'(list ~1 \\space)");
//! ```
//!
//! ## Report errors
//!
//! ```
//! let err = ikou::parse_str("(+ 1.2.1)").unwrap_err();
//! assert!(err.to_string().contains("multiple decimal points"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod diagnostic;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Delimiter, Node, NodeKind, Quotation};
pub use formatter::{format, format_forms, format_pretty, format_tokens};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{
    ParseError, ParseErrorKind, parse, parse_forms, parse_forms_with_source, parse_with_source,
};
pub use token::{Position, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Position of the offending character or token.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(err) => err.position,
            Self::Parse(err) => err.position,
        }
    }
}

/// Tokenize and parse a source string holding a single form.
pub fn parse_str(input: &str) -> Result<Node, Error> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let tokens = tokenize(input)?;
    Ok(parse_with_source(&tokens, input)?)
}

/// Tokenize and parse every top-level form of a source string.
pub fn parse_str_forms(input: &str) -> Result<Vec<Node>, Error> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let tokens = tokenize(input)?;
    Ok(parse_forms_with_source(&tokens, input)?)
}
