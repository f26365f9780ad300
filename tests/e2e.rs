//! End-to-end tests over whole programs through the one-step helpers.

mod common;

use common::symbol;
use ikou::{
    Error, LexErrorKind, Node, ParseErrorKind, Position, Quotation, TokenKind, format,
    format_forms, parse_str, parse_str_forms, tokenize,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

const PROGRAM: &str = indoc! {r#"
    ; Compute factorials.
    (define factorial
      (lambda (n)
        (if (<= n 1)
            1
            (* n (factorial (- n 1))))))

    (define greeting "hello\n") ; trailing comment
    (display '(factorial ,5 \space ~2.5))
"#};

#[test]
fn e2e_program_forms() {
    let forms = parse_str_forms(PROGRAM).expect("parse failed");
    assert_eq!(forms.len(), 3);

    let heads: Vec<_> = forms
        .iter()
        .filter_map(|form| form.children()?.first()?.token())
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        heads,
        [TokenKind::Define, TokenKind::Define, TokenKind::Identifier]
    );
}

#[test]
fn e2e_program_reformats() {
    let forms = parse_str_forms(PROGRAM).expect("parse failed");
    let expected = indoc! {r#"
        (define
          factorial
          (lambda (n) (if (<= n 1) 1 (* n (factorial (- n 1))))))

        (define greeting "hello\n")

        (display '(factorial ,5 \space ~2.5))
    "#};
    assert_eq!(format_forms(&forms), expected);

    let reparsed = parse_str_forms(&format_forms(&forms)).expect("re-parse failed");
    assert_eq!(reparsed.len(), forms.len());
    assert!(
        forms
            .iter()
            .zip(&reparsed)
            .all(|(a, b)| a.structurally_eq(b))
    );
}

#[test]
fn e2e_program_positions() {
    let forms = parse_str_forms(PROGRAM).expect("parse failed");
    assert_eq!(forms[0].position, Position::new(2, 1));
    assert_eq!(forms[1].position, Position::new(8, 1));
    assert_eq!(forms[2].position, Position::new(9, 1));

    let quoted = &forms[2].children().expect("list")[1];
    assert_eq!(quoted.quotation, Quotation::Quoted);
    assert_eq!(quoted.position, Position::new(9, 11));
}

#[test]
fn e2e_single_form() {
    let node = parse_str("(define x '(1 2 3))").expect("parse failed");
    let expected = Node::list(vec![
        symbol("define"),
        symbol("x"),
        Node::list(vec![Node::int(1), Node::int(2), Node::int(3)]).quoted(),
    ]);
    assert!(node.structurally_eq(&expected));
    assert_eq!(format(&node), "(define x '(1 2 3))");
}

#[test]
fn e2e_lex_error_through_unified_error() {
    let err = parse_str("(define x\n  12abc)").expect_err("should fail");
    let Error::Lex(lex) = &err else {
        panic!("expected a lexical error, got {err:?}");
    };
    assert_eq!(lex.kind, LexErrorKind::IntIdentifierAdjacent);
    assert_eq!(lex.line, "  12abc)");
    assert_eq!(err.position(), Position::new(2, 4));
}

#[test]
fn e2e_parse_error_through_unified_error() {
    let err = parse_str("(define x\n  (+ 1 2)").expect_err("should fail");
    let Error::Parse(parse) = &err else {
        panic!("expected a parsing error, got {err:?}");
    };
    assert_eq!(parse.kind, ParseErrorKind::Unclosed(1));
    assert_eq!(parse.line, "  (+ 1 2)");
    let rendered = err.to_string();
    assert!(rendered.starts_with("|         ▼\n|   (+ 1 2)\n|         ▲"));
    assert!(rendered.ends_with("expected 1 more closing bracket"));
}

#[test]
fn e2e_single_form_rejects_program() {
    let err = parse_str(PROGRAM).expect_err("should fail");
    assert!(matches!(
        err,
        Error::Parse(ref parse) if parse.kind == ParseErrorKind::MultipleForms
    ));
    assert_eq!(err.position(), Position::new(8, 1));
}

#[test]
fn e2e_tokens_then_tree() {
    let tokens = tokenize("(if flag ,yes 'no)").expect("tokenize failed");
    assert_eq!(tokens.len(), 8);
    let node = ikou::parse(&tokens).expect("parse failed");
    assert_eq!(node.node_count(), 5);
}

#[test]
fn e2e_bom_is_ignored() {
    let node = parse_str("\u{FEFF}(a)").expect("parse failed");
    assert_eq!(format(&node), "(a)");
}
