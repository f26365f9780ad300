//! Syntax tree accessors and structural comparison.

mod common;

use common::symbol;
use ikou::{Delimiter, Node, NodeKind, Position, Quotation, Token, TokenKind, parse_str};

#[test]
fn atom_accessors() {
    let node = symbol("x");
    assert!(node.is_atom());
    assert!(!node.is_list());
    assert!(node.children().is_none());
    assert!(node.delimiter().is_none());
    assert_eq!(node.token().map(|t| t.kind), Some(TokenKind::Identifier));
}

#[test]
fn list_accessors() {
    let node = Node::square(vec![Node::int(1)]);
    assert!(node.is_list());
    assert!(node.token().is_none());
    assert_eq!(node.delimiter(), Some(Delimiter::Square));
    assert_eq!(node.children().map(<[Node]>::len), Some(1));
}

#[test]
fn atom_takes_token_position() {
    let token = Token::new(TokenKind::Int, "7", Position::new(3, 4));
    let node = Node::atom(token);
    assert_eq!(node.position, Position::new(3, 4));
}

#[test]
fn structural_equality_ignores_positions() {
    let parsed = parse_str("(a\n\n   (b 1))").expect("parse failed");
    let built = Node::list(vec![
        symbol("a"),
        Node::list(vec![symbol("b"), Node::int(1)]),
    ]);
    assert!(parsed.structurally_eq(&built));
    assert_ne!(parsed, built);
}

#[test]
fn structural_equality_checks_quotation() {
    let a = Node::list(vec![symbol("x")]);
    let b = Node::list(vec![symbol("x").quoted()]);
    assert!(!a.structurally_eq(&b));
    assert!(!a.structurally_eq(&a.clone().backquoted()));
}

#[test]
fn structural_equality_checks_delimiter_and_kind() {
    let paren = Node::list(vec![Node::int(1)]);
    let square = Node::square(vec![Node::int(1)]);
    assert!(!paren.structurally_eq(&square));

    let int = Node::literal(TokenKind::Int, "1");
    let ident = Node::literal(TokenKind::Identifier, "1");
    assert!(!int.structurally_eq(&ident));
    assert!(!int.structurally_eq(&paren));
}

#[test]
fn structural_equality_checks_arity() {
    let short = Node::list(vec![Node::int(1)]);
    let long = Node::list(vec![Node::int(1), Node::int(2)]);
    assert!(!short.structurally_eq(&long));
}

#[test]
fn node_count_and_depth() {
    let node = parse_str("(a (b (c)) d)").expect("parse failed");
    assert_eq!(node.node_count(), 7);
    assert_eq!(node.depth(), 4);
    assert_eq!(symbol("a").depth(), 1);
    assert_eq!(Node::list(Vec::new()).depth(), 1);
}

#[test]
fn node_kind_is_matchable() {
    let node = parse_str("'[x]").expect("parse failed");
    assert_eq!(node.quotation, Quotation::Quoted);
    match &node.kind {
        NodeKind::List {
            delimiter,
            children,
        } => {
            assert_eq!(*delimiter, Delimiter::Square);
            assert_eq!(children.len(), 1);
        }
        NodeKind::Atom(_) => panic!("expected a list"),
    }
}
