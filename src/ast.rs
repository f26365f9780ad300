use crate::token::{Position, Token, TokenKind};

/// Quotation marker attached to a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Quotation {
    #[default]
    Unquoted,
    /// Prefixed by `'`.
    Quoted,
    /// Prefixed by `,`.
    Backquoted,
}

impl Quotation {
    /// Marker for a quotation token kind, if it is one.
    #[must_use]
    pub const fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Quote => Some(Self::Quoted),
            TokenKind::Backquote => Some(Self::Backquoted),
            _ => None,
        }
    }

    /// Surface prefix, empty for unquoted forms.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Unquoted => "",
            Self::Quoted => "'",
            Self::Backquoted => ",",
        }
    }
}

/// Bracket pair enclosing a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `( ... )`.
    #[default]
    Paren,
    /// `[ ... ]`.
    Square,
}

impl Delimiter {
    /// Delimiter opened by a token kind, if it is an opening bracket.
    #[must_use]
    pub const fn opened_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Open => Some(Self::Paren),
            TokenKind::SquareOpen => Some(Self::Square),
            _ => None,
        }
    }

    /// Delimiter closed by a token kind, if it is a closing bracket.
    #[must_use]
    pub const fn closed_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Close => Some(Self::Paren),
            TokenKind::SquareClose => Some(Self::Square),
            _ => None,
        }
    }

    #[must_use]
    pub const fn open_char(self) -> char {
        match self {
            Self::Paren => '(',
            Self::Square => '[',
        }
    }

    #[must_use]
    pub const fn close_char(self) -> char {
        match self {
            Self::Paren => ')',
            Self::Square => ']',
        }
    }
}

/// Syntax tree node: an atom or a list, with its own start position
/// and quotation marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub quotation: Quotation,
}

/// Content of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Leaf wrapping exactly one token.
    Atom(Token),
    /// Bracketed sequence of exclusively owned children.
    List {
        delimiter: Delimiter,
        children: Vec<Node>,
    },
}

impl Node {
    #[must_use]
    pub const fn is_atom(&self) -> bool {
        matches!(self.kind, NodeKind::Atom(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.kind, NodeKind::List { .. })
    }

    /// Wrapped token of an atom.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Atom(token) => Some(token),
            NodeKind::List { .. } => None,
        }
    }

    /// Children of a list.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match &self.kind {
            NodeKind::Atom(_) => None,
            NodeKind::List { children, .. } => Some(children),
        }
    }

    /// Delimiter of a list.
    #[must_use]
    pub const fn delimiter(&self) -> Option<Delimiter> {
        match &self.kind {
            NodeKind::Atom(_) => None,
            NodeKind::List { delimiter, .. } => Some(*delimiter),
        }
    }

    /// Compare two trees ignoring source positions.
    ///
    /// Atoms match on token kind and text; lists match on delimiter and
    /// pairwise children. Quotation markers must agree at every level.
    #[must_use]
    pub fn structurally_eq(&self, other: &Self) -> bool {
        if self.quotation != other.quotation {
            return false;
        }
        match (&self.kind, &other.kind) {
            (NodeKind::Atom(a), NodeKind::Atom(b)) => a.kind == b.kind && a.text == b.text,
            (
                NodeKind::List {
                    delimiter: da,
                    children: ca,
                },
                NodeKind::List {
                    delimiter: db,
                    children: cb,
                },
            ) => {
                da == db
                    && ca.len() == cb.len()
                    && ca.iter().zip(cb).all(|(a, b)| a.structurally_eq(b))
            }
            _ => false,
        }
    }

    /// Number of nodes in the tree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(Self::node_count).sum())
    }

    /// Nesting depth; an atom or empty list has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .and_then(|children| children.iter().map(Self::depth).max())
            .unwrap_or(0)
    }
}
