use std::fmt;

use tracing::{debug, trace};

use crate::diagnostic;
use crate::token::{Position, Token, TokenKind};

/// Marks a negative number when directly followed by a digit.
pub const NEGATION: char = '~';

/// Non-alphanumeric characters allowed inside identifiers.
const IDENTIFIER_SYMBOLS: &[char] = &['+', '-', '*', '/', '_', '?', '!', '<', '>', '='];

/// Characters allowed after a backslash inside a string literal.
const STRING_ESCAPES: &[char] = &['"', 't', 'n', '\\'];

/// Character literals longer than a single character.
pub static NAMED_CHARACTERS: phf::Set<&'static str> = phf::phf_set! {
    "\\space",
    "\\tab",
    "\\newline",
};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Backslash followed by whitespace; carries the whitespace's name.
    WhitespaceCharacterLiteral(&'static str),
    /// Backslash inside a string followed by a character outside the
    /// escape set.
    InvalidEscape(char),
    /// Character literal that is neither `\x` nor a named literal.
    InvalidCharacterLiteral(String),
    /// Identifier directly followed by `.`.
    IdentifierPeriodAdjacent,
    /// Integer literal directly followed by an identifier character.
    IntIdentifierAdjacent,
    /// Float literal directly followed by an identifier character.
    FloatIdentifierAdjacent,
    /// Second `.` inside a float literal.
    MultipleDecimalPoints,
    /// Input ended inside a string literal.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch:?}")
            }
            Self::WhitespaceCharacterLiteral(name) => {
                write!(
                    f,
                    "a {name} character cannot be used as a character literal, \
                     consider using `\\{name}` instead"
                )
            }
            Self::InvalidEscape(ch) => {
                write!(f, "invalid escape sequence \\{ch} in string literal")
            }
            Self::InvalidCharacterLiteral(text) => {
                write!(f, "invalid character literal: {text}")
            }
            Self::IdentifierPeriodAdjacent => {
                write!(f, "identifier and '.' must be separated by whitespace")
            }
            Self::IntIdentifierAdjacent => {
                write!(
                    f,
                    "integer literal and identifier must be separated by whitespace"
                )
            }
            Self::FloatIdentifierAdjacent => {
                write!(
                    f,
                    "floating-point literal and identifier must be separated by whitespace"
                )
            }
            Self::MultipleDecimalPoints => {
                write!(f, "multiple decimal points in floating-point literal")
            }
            Self::UnterminatedString => {
                write!(f, "reached end of input inside a string literal")
            }
        }
    }
}

/// Error produced during lexing.
///
/// `line` holds the full text of the source line containing `position`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}\n\nlexical error at {position} - {kind}",
    diagnostic::excerpt(.line, .position)
)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
    pub line: String,
}

/// Tokenize a source string into a sequence of tokens.
///
/// Whitespace and `;` comments are discarded. Empty input yields no
/// tokens.
///
/// # Errors
///
/// Returns `LexError` on the first lexical error; no partial token
/// sequence is produced.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).tokenize()?;
    debug!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    Identifier,
    Comment,
    Int,
    Float,
    String { escaped: bool },
    Character,
}

struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    state: State,
    lexeme: String,
    position: Position,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            source: input.strip_prefix('\u{FEFF}').unwrap_or(input),
            tokens: Vec::new(),
            state: State::Initial,
            lexeme: String::new(),
            position: Position::START,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let source = self.source;
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            self.step(ch, chars.peek().copied())?;
        }

        if matches!(self.state, State::String { .. }) {
            return Err(self.error(LexErrorKind::UnterminatedString));
        }
        self.finish_lexeme()?;

        Ok(self.tokens)
    }

    /// Consume `ch` with one character of lookahead.
    fn step(&mut self, ch: char, peek: Option<char>) -> Result<(), LexError> {
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 0;
            match self.state {
                State::Comment => self.discard(),
                State::String { .. } => self.lexeme.push(ch),
                _ => {}
            }
            return Ok(());
        }

        self.position.column += 1;
        self.lexeme.push(ch);

        match self.state {
            State::Initial => self.step_initial(ch, peek),
            State::Identifier => self.step_identifier(peek),
            State::Comment => Ok(()),
            State::Int => self.step_int(ch, peek),
            State::Float => self.step_float(peek),
            State::String { escaped } => self.step_string(ch, peek, escaped),
            State::Character => self.step_character(peek),
        }
    }

    fn step_initial(&mut self, ch: char, peek: Option<char>) -> Result<(), LexError> {
        if let Some(kind) = TokenKind::from_single_char(ch) {
            self.emit(kind);
            return Ok(());
        }

        match ch {
            ';' => {
                self.state = State::Comment;
                Ok(())
            }
            '"' => {
                self.state = State::String { escaped: false };
                Ok(())
            }
            '\\' => {
                if let Some(name) = peek.and_then(whitespace_name) {
                    return Err(self.error(LexErrorKind::WhitespaceCharacterLiteral(name)));
                }
                self.state = State::Character;
                Ok(())
            }
            _ if is_digit(ch) || (ch == NEGATION && peek.is_some_and(is_digit)) => {
                self.state = State::Int;
                self.step_int(ch, peek)
            }
            '.' if peek.is_some_and(is_digit) => {
                self.state = State::Float;
                Ok(())
            }
            _ if is_identifier_char(ch) => {
                self.state = State::Identifier;
                self.step_identifier(peek)
            }
            _ if is_whitespace(ch) => {
                self.discard();
                Ok(())
            }
            _ => Err(self.error(LexErrorKind::UnexpectedCharacter(ch))),
        }
    }

    fn step_identifier(&mut self, peek: Option<char>) -> Result<(), LexError> {
        match peek {
            Some('.') => Err(self.error(LexErrorKind::IdentifierPeriodAdjacent)),
            Some(next) if is_identifier_char(next) => Ok(()),
            _ => self.finish_lexeme(),
        }
    }

    fn step_int(&mut self, ch: char, peek: Option<char>) -> Result<(), LexError> {
        if ch == '.' {
            self.state = State::Float;
            return self.step_float(peek);
        }

        match peek {
            Some(next) if is_digit(next) || next == '.' => Ok(()),
            Some(next) if is_identifier_char(next) => {
                Err(self.error(LexErrorKind::IntIdentifierAdjacent))
            }
            _ => self.finish_lexeme(),
        }
    }

    fn step_float(&mut self, peek: Option<char>) -> Result<(), LexError> {
        match peek {
            Some('.') => Err(self.error(LexErrorKind::MultipleDecimalPoints)),
            Some(next) if is_digit(next) => Ok(()),
            Some(next) if is_identifier_char(next) => {
                Err(self.error(LexErrorKind::FloatIdentifierAdjacent))
            }
            _ => self.finish_lexeme(),
        }
    }

    fn step_string(&mut self, ch: char, peek: Option<char>, escaped: bool) -> Result<(), LexError> {
        if escaped {
            self.state = State::String { escaped: false };
            return Ok(());
        }

        match ch {
            '"' => {
                self.emit(TokenKind::String);
                Ok(())
            }
            '\\' => match peek {
                Some(next) if STRING_ESCAPES.contains(&next) => {
                    self.state = State::String { escaped: true };
                    Ok(())
                }
                Some(next) => Err(self.error(LexErrorKind::InvalidEscape(next))),
                None => Err(self.error(LexErrorKind::UnterminatedString)),
            },
            _ => Ok(()),
        }
    }

    fn step_character(&mut self, peek: Option<char>) -> Result<(), LexError> {
        if peek.is_some_and(is_alpha) {
            Ok(())
        } else {
            self.finish_lexeme()
        }
    }

    /// Close the current lexeme, classifying it by the current state.
    fn finish_lexeme(&mut self) -> Result<(), LexError> {
        let kind = match self.state {
            State::Initial | State::Comment => {
                self.discard();
                return Ok(());
            }
            State::Identifier => TokenKind::from_identifier(&self.lexeme),
            State::Int => TokenKind::Int,
            State::Float => TokenKind::Float,
            State::String { .. } => TokenKind::String,
            State::Character => {
                if !is_valid_character_literal(&self.lexeme) {
                    let text = self.lexeme.clone();
                    return Err(self.error(LexErrorKind::InvalidCharacterLiteral(text)));
                }
                TokenKind::Character
            }
        };
        self.emit(kind);
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind) {
        let text = std::mem::take(&mut self.lexeme);
        trace!(%kind, text = %text, position = %self.position, "emit token");
        self.tokens.push(Token {
            kind,
            text,
            position: self.position,
        });
        self.state = State::Initial;
    }

    fn discard(&mut self) {
        self.lexeme.clear();
        self.state = State::Initial;
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            position: self.position,
            line: diagnostic::source_line(self.source, self.position.line).to_string(),
        }
    }
}

const fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

const fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

const fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_identifier_char(ch: char) -> bool {
    is_alpha(ch) || is_digit(ch) || IDENTIFIER_SYMBOLS.contains(&ch)
}

const fn whitespace_name(ch: char) -> Option<&'static str> {
    match ch {
        ' ' => Some("space"),
        '\t' => Some("tab"),
        '\n' | '\r' => Some("newline"),
        _ => None,
    }
}

fn is_valid_character_literal(text: &str) -> bool {
    text.chars().count() == 2 || NAMED_CHARACTERS.contains(text)
}
