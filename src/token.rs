use std::fmt;

/// Source location of a token or syntax node.
///
/// `line` is 1-indexed. `column` counts the characters consumed on the
/// current line, so a token's column is the column of its last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Position before the first character of the input.
    pub const START: Self = Self { line: 1, column: 0 };

    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Opening parenthesis `(`.
    Open,
    /// Closing parenthesis `)`.
    Close,
    /// Opening square bracket `[`.
    SquareOpen,
    /// Closing square bracket `]`.
    SquareClose,
    /// Colon `:`.
    Colon,
    /// Quote mark `'`.
    Quote,
    /// Backquote mark `,`.
    Backquote,
    /// Integer literal (`20`, `~3`).
    Int,
    /// Floating-point literal (`26.05`, `.5`, `~0.5`).
    Float,
    Identifier,
    /// Double-quoted string, quotes and escapes kept verbatim.
    String,
    /// Character literal (`\a`, `\space`).
    Character,
    True,
    False,
    Lambda,
    If,
    Let,
    Define,
}

/// Identifier-shaped lexemes that are reclassified as keywords.
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "lambda" => TokenKind::Lambda,
    "if" => TokenKind::If,
    "let" => TokenKind::Let,
    "define" => TokenKind::Define,
};

impl TokenKind {
    /// Kind of a token that is always exactly one character long.
    #[must_use]
    pub const fn from_single_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Open),
            ')' => Some(Self::Close),
            '[' => Some(Self::SquareOpen),
            ']' => Some(Self::SquareClose),
            ':' => Some(Self::Colon),
            '\'' => Some(Self::Quote),
            ',' => Some(Self::Backquote),
            _ => None,
        }
    }

    /// Classify an identifier-shaped lexeme, resolving keywords.
    #[must_use]
    pub fn from_identifier(text: &str) -> Self {
        KEYWORDS.get(text).copied().unwrap_or(Self::Identifier)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::True | Self::False | Self::Lambda | Self::If | Self::Let | Self::Define
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open ( bracket",
            Self::Close => "close ) bracket",
            Self::SquareOpen => "square open [ bracket",
            Self::SquareClose => "square close ] bracket",
            Self::Colon => "colon :",
            Self::Quote => "quote '",
            Self::Backquote => "backquote ,",
            Self::Int => "integer literal",
            Self::Float => "float literal",
            Self::Identifier => "identifier",
            Self::String => "string literal",
            Self::Character => "character literal",
            Self::True => "true",
            Self::False => "false",
            Self::Lambda => "lambda keyword",
            Self::If => "if keyword",
            Self::Let => "let keyword",
            Self::Define => "define keyword",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, original text, and source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} token {:?} at {}", self.kind, self.text, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_exact() {
        assert_eq!(TokenKind::from_identifier("let"), TokenKind::Let);
        assert_eq!(TokenKind::from_identifier("Let"), TokenKind::Identifier);
        assert_eq!(TokenKind::from_identifier("iff"), TokenKind::Identifier);
        assert_eq!(TokenKind::from_identifier("true"), TokenKind::True);
    }

    #[test]
    fn single_char_kinds() {
        assert_eq!(TokenKind::from_single_char('('), Some(TokenKind::Open));
        assert_eq!(TokenKind::from_single_char(','), Some(TokenKind::Backquote));
        assert_eq!(TokenKind::from_single_char('a'), None);
    }

    #[test]
    fn token_display() {
        let token = Token::new(TokenKind::Int, "15", Position::new(1, 5));
        assert_eq!(
            token.to_string(),
            "integer literal token \"15\" at line 1, column 5"
        );
    }

    #[test]
    fn default_position_is_start() {
        assert_eq!(Position::default(), Position::new(1, 0));
    }
}
