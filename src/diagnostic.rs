//! Source-line excerpts shared by lexer and parser errors.
//!
//! An excerpt reproduces the offending line between two pointer glyphs
//! aligned on the reported column:
//!
//! ```text
//! |      ▼
//! | (+ 1.2.1)
//! |      ▲
//! ```

use crate::token::Position;

/// Glyph drawn above the offending character.
pub const UPPER_POINTER: char = '▼';
/// Glyph drawn below the offending character.
pub const LOWER_POINTER: char = '▲';

/// Render `line` with pointers above and below the character at
/// `position.column`.
///
/// Columns count consumed characters, so the pointed-at character is
/// preceded by `column - 1` others. A column of 0 points at the first
/// character.
#[must_use]
pub fn excerpt(line: &str, position: &Position) -> String {
    let padding = " ".repeat(position.column.saturating_sub(1));
    format!("| {padding}{UPPER_POINTER}\n| {line}\n| {padding}{LOWER_POINTER}")
}

/// Return the 1-indexed `line` of `source`, without its line terminator.
#[must_use]
pub fn source_line(source: &str, line: usize) -> &str {
    line.checked_sub(1)
        .and_then(|index| source.split('\n').nth(index))
        .map_or("", |text| text.strip_suffix('\r').unwrap_or(text))
}

/// Right-align `text` so that its last character sits at `column`.
///
/// Used when only a token is known, not the line it came from.
#[must_use]
pub fn aligned_fragment(text: &str, column: usize) -> String {
    format!("{text:>column$}")
}
