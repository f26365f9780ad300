#![allow(dead_code)]

use ikou::{Node, format, format_pretty, parse, parse_str, tokenize};

/// Parse then format should reproduce `input` exactly.
pub fn roundtrip(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    let node = parse(&tokens).expect("parse failed");
    let output = format(&node);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Helper: format a tree, parse it back, assert structural equality.
pub fn assert_tree_roundtrip(original: &Node) {
    for formatted in [format(original), format_pretty(original)] {
        let parsed = parse_str(&formatted).unwrap_or_else(|e| {
            panic!(
                "failed to re-parse formatted output: {e}\n\
                 --- formatted ---\n{formatted}"
            )
        });

        assert!(
            original.structurally_eq(&parsed),
            "tree mismatch\n--- formatted ---\n{formatted}\n--- parsed ---\n{parsed}"
        );
    }
}

/// Identifier atom for names known to be valid.
pub fn symbol(name: &str) -> Node {
    Node::symbol(name).expect("valid symbol")
}
