use myrpal::{
    ast::AstNode,
    interpreter::normalizer::normalize,
    parse_source, standardize_source,
};

fn assert_ast(src: &str, expected: &[&str]) {
    match parse_source(src) {
        Ok(ast) => assert_eq!(ast.dot_lines(), expected, "for program: {src}"),
        Err(e) => panic!("Script failed to parse: {src}\nError: {e}"),
    }
}

fn assert_st(src: &str, expected: &[&str]) {
    match standardize_source(src) {
        Ok(st) => assert_eq!(st.dot_lines(), expected, "for program: {src}"),
        Err(e) => panic!("Script failed to standardize: {src}\nError: {e}"),
    }
}

fn assert_standard_labels(node: &AstNode) {
    assert!(node.kind.is_standard(), "label '{}' survived standardization", node.kind.label());
    for child in &node.children {
        assert_standard_labels(child);
    }
}

#[test]
fn ast_of_a_let_binding() {
    assert_ast("let x = 1 in x", &["let", ".=", "..<ID:x>", "..<INT:1>", ".<ID:x>"]);
}

#[test]
fn ast_preserves_surface_forms() {
    assert_ast("x + 3 where x = 5",
               &["where", ".+", "..<ID:x>", "..<INT:3>", ".=", "..<ID:x>", "..<INT:5>"]);

    assert_ast("2 @Add 3", &["@", ".<INT:2>", ".<ID:Add>", ".<INT:3>"]);

    assert_ast("fn x y. x",
               &["lambda", ".<ID:x>", ".<ID:y>", ".<ID:x>"]);

    assert_ast("let x = 1 and y = 2 in x",
               &["let",
                 ".and",
                 "..=",
                 "...<ID:x>",
                 "...<INT:1>",
                 "..=",
                 "...<ID:y>",
                 "...<INT:2>",
                 ".<ID:x>"]);

    assert_ast("'hi', true, nil, dummy",
               &["tau", ".<STR:'hi'>", ".<true>", ".<nil>", ".<dummy>"]);

    assert_ast("2 > 1", &["gr", ".<INT:2>", ".<INT:1>"]);
}

#[test]
fn st_of_a_let_binding() {
    assert_st("let x = 1 in x", &["gamma", ".lambda", "..<ID:x>", "..<ID:x>", ".<INT:1>"]);
}

#[test]
fn st_of_a_where_matches_the_let_form() {
    assert_st("x where x = 1", &["gamma", ".lambda", "..<ID:x>", "..<ID:x>", ".<INT:1>"]);
}

#[test]
fn st_curries_multi_parameter_lambdas() {
    assert_st("fn x y. x",
              &["lambda", ".<ID:x>", ".lambda", "..<ID:y>", "..<ID:x>"]);
}

#[test]
fn st_of_a_recursive_definition() {
    assert_st("let rec f n = n in f",
              &["gamma",
                ".lambda",
                "..<ID:f>",
                "..<ID:f>",
                ".gamma",
                "..<Y*>",
                "..lambda",
                "...<ID:f>",
                "...lambda",
                "....<ID:n>",
                "....<ID:n>"]);
}

#[test]
fn st_of_simultaneous_definitions() {
    assert_st("let x = 1 and y = 2 in x",
              &["gamma",
                ".lambda",
                "..,",
                "...<ID:x>",
                "...<ID:y>",
                "..<ID:x>",
                ".tau",
                "..<INT:1>",
                "..<INT:2>"]);
}

#[test]
fn st_of_a_within_definition() {
    assert_st("let a = 2 within b = a in b",
              &["gamma",
                ".lambda",
                "..<ID:b>",
                "..<ID:b>",
                ".gamma",
                "..lambda",
                "...<ID:a>",
                "...<ID:a>",
                "..<INT:2>"]);
}

#[test]
fn st_rewrites_infix_application() {
    assert_st("2 @Add 3",
              &["gamma", ".gamma", "..<ID:Add>", "..<INT:2>", ".<INT:3>"]);
}

#[test]
fn standardized_trees_use_only_core_labels() {
    let programs = ["let x = 5 in x + 3",
                    "let rec f n = n eq 0 -> 1 | n * f (n - 1) in f 5",
                    "let a = 2 within b = a + 3 and c = 4 in (b, c)",
                    "(fn (x, y). x aug y) (nil aug 1, 2)",
                    "Len 'hello' where rec Len s = Null s -> 0 | 1 + Len (Stern s)"];

    for program in programs {
        let st = standardize_source(program).unwrap_or_else(|e| {
                     panic!("Failed to standardize {program}: {e}")
                 });
        assert_standard_labels(&st);
    }
}

#[test]
fn normalization_rejects_malformed_trees() {
    use myrpal::ast::NodeKind;

    // A 'rec' must wrap an '=' definition.
    let malformed = AstNode::branch(NodeKind::Rec,
                                    vec![AstNode::leaf(NodeKind::Identifier("f".to_string()), 1)],
                                    1);
    assert!(normalize(malformed).is_err());

    // A 'let' whose definition position holds a bare leaf.
    let malformed = AstNode::branch(NodeKind::Let,
                                    vec![AstNode::leaf(NodeKind::Integer(1), 1),
                                         AstNode::leaf(NodeKind::Integer(2), 1)],
                                    1);
    assert!(normalize(malformed).is_err());
}
