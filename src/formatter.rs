//! Renders syntax trees and token streams back into text.
//!
//! `format` produces the compact surface form; `format_pretty` breaks
//! lists that do not fit on a line. Both re-read to an equal tree.

use std::fmt::{self, Write as _};

use crate::ast::{Node, NodeKind};
use crate::token::Token;

/// Widest line `format_pretty` keeps a list on before breaking it.
pub const MAX_WIDTH: usize = 60;

/// Indentation of broken list children relative to the list.
const INDENT: usize = 2;

/// Format a syntax tree on a single line.
///
/// Quoted forms are prefixed with `'`, backquoted forms with `,`,
/// lists are bracketed with space-separated children, and atoms keep
/// their original token text.
#[must_use]
pub fn format(node: &Node) -> String {
    let mut out = String::new();
    format_node(&mut out, node);
    out
}

/// Format a syntax tree, one child per line for lists wider than
/// [`MAX_WIDTH`].
#[must_use]
pub fn format_pretty(node: &Node) -> String {
    let mut out = String::new();
    format_node_pretty(&mut out, node, 0);
    out
}

/// Format a sequence of top-level forms, separated by blank lines.
#[must_use]
pub fn format_forms(forms: &[Node]) -> String {
    let mut out = String::new();
    for (i, form) in forms.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        format_node_pretty(&mut out, form, 0);
        out.push('\n');
    }
    out
}

/// Format one token per line: kind, text, and position.
#[must_use]
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{token}");
    }
    out
}

fn format_node(out: &mut String, node: &Node) {
    out.push_str(node.quotation.prefix());
    match &node.kind {
        NodeKind::Atom(token) => out.push_str(&token.text),
        NodeKind::List {
            delimiter,
            children,
        } => {
            out.push(delimiter.open_char());
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                format_node(out, child);
            }
            out.push(delimiter.close_char());
        }
    }
}

/// `column` is where the node's first character lands on its line.
fn format_node_pretty(out: &mut String, node: &Node, column: usize) {
    let inline = format(node);
    let NodeKind::List {
        delimiter,
        children,
    } = &node.kind
    else {
        out.push_str(&inline);
        return;
    };
    if column + inline.chars().count() <= MAX_WIDTH {
        out.push_str(&inline);
        return;
    }

    let prefix = node.quotation.prefix();
    out.push_str(prefix);
    out.push(delimiter.open_char());

    let child_column = column + prefix.len() + INDENT;
    for (i, child) in children.iter().enumerate() {
        if i == 0 {
            format_node_pretty(out, child, column + prefix.len() + 1);
        } else {
            out.push('\n');
            out.push_str(&" ".repeat(child_column));
            format_node_pretty(out, child, child_column);
        }
    }
    out.push(delimiter.close_char());
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
