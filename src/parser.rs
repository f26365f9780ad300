use std::fmt;

use tracing::{debug, trace};

use crate::ast::{Delimiter, Node, Quotation};
use crate::diagnostic;
use crate::token::{Position, Token};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Closing bracket with no open list.
    UnexpectedClose,
    /// Closing bracket of the wrong kind for the innermost open list.
    MismatchedClose { expected: char, found: char },
    /// Input ended with this many lists still open.
    Unclosed(usize),
    /// Quotation marker directly after another quotation marker.
    AdjacentQuotations,
    /// Quotation marker followed by a closing bracket or end of input.
    DanglingQuotation,
    /// A second top-level form where exactly one is expected.
    MultipleForms,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedClose => {
                write!(f, "mismatched brackets - unexpected closing bracket")
            }
            Self::MismatchedClose { expected, found } => {
                write!(
                    f,
                    "mismatched brackets - expected '{expected}' but found '{found}'"
                )
            }
            Self::Unclosed(count) => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(
                    f,
                    "mismatched brackets - expected {count} more closing bracket{plural}"
                )
            }
            Self::AdjacentQuotations => {
                write!(f, "cannot have two adjacent quotation markers")
            }
            Self::DanglingQuotation => {
                write!(f, "quotation marker must be followed by a form")
            }
            Self::MultipleForms => {
                write!(f, "expected a single top-level form")
            }
        }
    }
}

/// Error produced during parsing.
///
/// `position` is that of the last token processed. `line` is the source
/// line when the source is known, otherwise that token's text aligned to
/// its column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}\n\nparsing error at {position} - {kind}",
    diagnostic::excerpt(.line, .position)
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub line: String,
}

/// Parse a token stream into its single top-level form.
///
/// An empty token stream yields an empty, unquoted list.
///
/// # Errors
///
/// Returns `ParseError` on unbalanced or mismatched brackets, misplaced
/// quotation markers, or more than one top-level form.
pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    Parser::new(tokens, None, Mode::Single).parse_single()
}

/// Like [`parse`], quoting `source` in error excerpts.
pub fn parse_with_source(tokens: &[Token], source: &str) -> Result<Node, ParseError> {
    Parser::new(tokens, Some(source), Mode::Single).parse_single()
}

/// Parse a token stream into every top-level form, in order.
pub fn parse_forms(tokens: &[Token]) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, None, Mode::Sequence).parse()
}

/// Like [`parse_forms`], quoting `source` in error excerpts.
pub fn parse_forms_with_source(tokens: &[Token], source: &str) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, Some(source), Mode::Sequence).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Sequence,
}

struct Parser<'a> {
    tokens: &'a [Token],
    source: Option<&'a str>,
    mode: Mode,
    /// Currently open lists, innermost last.
    path: Vec<OpenList>,
    pending: Quotation,
    forms: Vec<Node>,
    last: Option<&'a Token>,
}

/// A list whose closing bracket has not been read yet.
struct OpenList {
    delimiter: Delimiter,
    quotation: Quotation,
    position: Position,
    children: Vec<Node>,
}

impl OpenList {
    fn into_node(self) -> Node {
        Node::delimited(self.delimiter, self.children)
            .with_quotation(self.quotation)
            .at(self.position)
    }
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], source: Option<&'a str>, mode: Mode) -> Self {
        Self {
            tokens,
            source,
            mode,
            path: Vec::new(),
            pending: Quotation::Unquoted,
            forms: Vec::new(),
            last: None,
        }
    }

    fn parse_single(self) -> Result<Node, ParseError> {
        let mut forms = self.parse()?;
        Ok(forms.pop().unwrap_or_else(|| Node::list(Vec::new())))
    }

    fn parse(mut self) -> Result<Vec<Node>, ParseError> {
        let tokens = self.tokens;
        for token in tokens {
            self.last = Some(token);
            self.process(token)?;
        }

        if !self.path.is_empty() {
            return Err(self.error(ParseErrorKind::Unclosed(self.path.len())));
        }
        if self.pending != Quotation::Unquoted {
            return Err(self.error(ParseErrorKind::DanglingQuotation));
        }

        debug!(forms = self.forms.len(), "parsed token stream");
        Ok(self.forms)
    }

    fn process(&mut self, token: &Token) -> Result<(), ParseError> {
        if let Some(delimiter) = Delimiter::opened_by(token.kind) {
            self.expect_new_form()?;
            let list = OpenList {
                delimiter,
                quotation: self.take_quotation(),
                position: token.position,
                children: Vec::new(),
            };
            trace!(position = %token.position, depth = self.path.len(), "open list");
            self.path.push(list);
            Ok(())
        } else if let Some(delimiter) = Delimiter::closed_by(token.kind) {
            self.close(delimiter)
        } else if let Some(quotation) = Quotation::from_token_kind(token.kind) {
            self.expect_new_form()?;
            if self.pending != Quotation::Unquoted {
                return Err(self.error(ParseErrorKind::AdjacentQuotations));
            }
            self.pending = quotation;
            Ok(())
        } else {
            self.expect_new_form()?;
            let atom = Node::atom(token.clone()).with_quotation(self.take_quotation());
            self.attach(atom);
            Ok(())
        }
    }

    fn close(&mut self, delimiter: Delimiter) -> Result<(), ParseError> {
        let Some(list) = self.path.pop() else {
            return Err(self.error(ParseErrorKind::UnexpectedClose));
        };
        if self.pending != Quotation::Unquoted {
            return Err(self.error(ParseErrorKind::DanglingQuotation));
        }

        if list.delimiter != delimiter {
            return Err(self.error(ParseErrorKind::MismatchedClose {
                expected: list.delimiter.close_char(),
                found: delimiter.close_char(),
            }));
        }

        trace!(position = %list.position, depth = self.path.len(), "close list");
        self.attach(list.into_node());
        Ok(())
    }

    /// Append `node` to the innermost open list, or record it as a
    /// finished top-level form.
    fn attach(&mut self, node: Node) {
        match self.path.last_mut() {
            Some(list) => list.children.push(node),
            None => self.forms.push(node),
        }
    }

    /// Reject the start of a second top-level form in single mode.
    fn expect_new_form(&self) -> Result<(), ParseError> {
        if self.mode == Mode::Single && self.path.is_empty() && !self.forms.is_empty() {
            return Err(self.error(ParseErrorKind::MultipleForms));
        }
        Ok(())
    }

    const fn take_quotation(&mut self) -> Quotation {
        std::mem::replace(&mut self.pending, Quotation::Unquoted)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        let Some(token) = self.last else {
            return ParseError {
                kind,
                position: Position::START,
                line: String::new(),
            };
        };

        let line = match self.source {
            Some(source) => diagnostic::source_line(source, token.position.line).to_string(),
            None => {
                let tail = token.text.rsplit('\n').next().unwrap_or_default();
                diagnostic::aligned_fragment(tail, token.position.column)
            }
        };

        ParseError {
            kind,
            position: token.position,
            line,
        }
    }
}
