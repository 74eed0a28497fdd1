use std::rc::Rc;

use olang::{
    ast::Node,
    error::ParseError,
    interpreter::lexer::{Token, TokenKind},
    parse,
};

fn tree(source: &str) -> String {
    let nodes = parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"));
    nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

fn single(source: &str) -> Node {
    let mut nodes = parse(source).unwrap();
    assert_eq!(nodes.len(), 1, "expected one statement in {source:?}");
    nodes.remove(0)
}

#[test]
fn product_nests_under_sum() {
    let node = single("1 + 2 * 3");
    let Node::Binary { left, right, op } = &node else {
        panic!("expected a binary expression");
    };

    assert_eq!(op.kind, TokenKind::Plus);
    assert_eq!(**left, Node::Leaf(Token::new(TokenKind::Number, "1", 1, 1)));
    assert_eq!(right.binary_operator().map(|op| op.kind), Some(TokenKind::Star));
}

#[test]
fn leading_product_becomes_left_operand() {
    let node = single("1 * 2 + 3");
    let Node::Binary { left, right, op } = &node else {
        panic!("expected a binary expression");
    };

    assert_eq!(op.kind, TokenKind::Plus);
    assert_eq!(left.binary_operator().map(|op| op.kind), Some(TokenKind::Star));
    assert_eq!(**right, Node::Leaf(Token::new(TokenKind::Number, "3", 1, 9)));
}

#[test]
fn parentheses_are_never_split() {
    assert_eq!(tree("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    assert_eq!(tree("2 * (3 + 4) * 5"), "(* (* 2 (group (+ 3 4))) 5)");
}

#[test]
fn mixed_chains() {
    assert_eq!(tree("1 * 2 + 3 * 4 - 5"), "(- (+ (* 1 2) (* 3 4)) 5)");
    assert_eq!(tree("1 + 2 * 3 * 4"), "(+ 1 (* (* 2 3) 4))");
    assert_eq!(tree("1 - 2 / 4 + 8"), "(+ (- 1 (/ 2 4)) 8)");
}

#[test]
fn sum_and_product_are_left_associative() {
    assert_eq!(tree("5 - 1 - 1"), "(- (- 5 1) 1)");
    assert_eq!(tree("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn assignment_is_right_associative_and_loosest() {
    assert_eq!(tree("x = y = 1"), "(= x (= y 1))");
    assert_eq!(tree("var x = 1 + 2 * 3"), "(= (var x) (+ 1 (* 2 3)))");
    assert_eq!(tree("a == b + 1"), "(== a (+ b 1))");
}

#[test]
fn identical_text_gives_equal_trees() {
    assert_eq!(parse("var x = (1 + 2) * y"), parse("var x = (1 + 2) * y"));
    assert_eq!(parse("if (a) { b } else c"), parse("if (a) { b } else c"));
}

#[test]
fn any_difference_breaks_equality() {
    let base = single("1 + 2");

    assert_ne!(base, single("1 + 3"));
    assert_ne!(base, single("1 - 2"));
    assert_ne!(base, single(" 1 + 2"));
    assert_ne!(base, single("1  + 2"));
    assert_ne!(single("1"), single("(1)"));
    assert_ne!(single("if (a) b"), single("if (a) b else c"));
}

#[test]
fn unary_signs() {
    assert_eq!(tree("-x"), "(- x)");
    assert_eq!(tree("-(1 + 2)"), "(- (group (+ 1 2)))");
    assert_eq!(tree("- -x * 2"), "(* (- (- x)) 2)");
    assert_eq!(tree("x = -1"), "(= x -1)");
}

#[test]
fn declarations_and_literals() {
    assert_eq!(tree("var x"), "(var x)");
    assert_eq!(tree("\"hi\""), "\"hi\"");
    assert_eq!(tree("true; false; null; this"), "true\nfalse\nnull\nthis");
}

#[test]
fn function_declarations() {
    assert_eq!(tree("function add(a, b) { a + b }"), "(function add (a b) (block (+ a b)))");
    assert_eq!(tree("function f() {}"), "(function f () (block))");
}

#[test]
fn function_calls() {
    assert_eq!(tree("f(1, 2 + 3)"), "(call f 1 (+ 2 3))");
    assert_eq!(tree("f()"), "(call f)");
    assert_eq!(tree("f(g(x))"), "(call f (call g x))");
}

#[test]
fn call_needs_parenthesis_on_the_same_line() {
    assert_eq!(tree("f\n(1)"), "f\n(group 1)");
}

#[test]
fn scope_blocks() {
    assert_eq!(tree("{ var x = 1; x }"), "(block (= (var x) 1) x)");
    assert_eq!(tree("{\n  a\n  b\n}"), "(block a b)");
    assert_eq!(tree("{ ; ; }"), "(block)");
}

#[test]
fn if_statements() {
    assert_eq!(tree("if (x) { y } else z"), "(if x (block y) z)");
    assert_eq!(tree("if (x) y = 1 else y = 2"), "(if x (= y 1) (= y 2))");
    assert_eq!(tree("if (a) b else if (c) d"), "(if a b (if c d))");
    assert_eq!(tree("if (a) {\n  b\n}\nc"), "(if a (block b))\nc");
}

#[test]
fn while_statements() {
    assert_eq!(tree("while (x) { x = x - 1 }"), "(while x (block (= x (- x 1))))");
}

#[test]
fn postfix_accesses() {
    assert_eq!(tree("a[1]"), "(index a 1)");
    assert_eq!(tree("a[i + 1][0]"), "(index (index a (+ i 1)) 0)");
    assert_eq!(tree("a.b"), "(field a b)");
    assert_eq!(tree("a.b(1)"), "(field a (call b 1))");
    assert_eq!(tree("a[0].b = 2"), "(= (field (index a 0) b) 2)");
}

#[test]
fn constructors() {
    assert_eq!(tree("new Point(1, 2)"), "(new (call Point 1 2))");
    assert_eq!(tree("var p = new P()"), "(= (var p) (new (call P)))");
}

#[test]
fn statements_end_at_line_breaks() {
    assert_eq!(tree("var x = 1\nx = x + 1"), "(= (var x) 1)\n(= x (+ x 1))");
    assert_eq!(tree("1\n+ 2"), "1\n(+ 2)");
}

#[test]
fn line_breaks_inside_groupings_continue_the_expression() {
    assert_eq!(tree("(1\n+ 2)"), "(group (+ 1 2))");
    assert_eq!(tree("var x = (1\n  + 2) * 3"), "(= (var x) (* (group (+ 1 2)) 3))");
    assert_eq!(tree("f(1,\n  2\n  + 3)"), "(call f 1 (+ 2 3))");
    assert_eq!(tree("a[i\n+ 1]"), "(index a (+ i 1))");
    assert_eq!(tree("if (a\n+ b) c"), "(if (+ a b) c)");
    assert_eq!(tree("while (x\n- 1) { x }"), "(while (- x 1) (block x))");
}

#[test]
fn line_breaks_end_statements_again_after_a_grouping_closes() {
    assert_eq!(tree("(1\n+ 2)\n+ 3"), "(group (+ 1 2))\n(+ 3)");
    assert_eq!(tree("f(\n1\n)\n(2)"), "(call f 1)\n(group 2)");
}

#[test]
fn signed_number_after_an_operand_is_an_operator() {
    assert_eq!(tree("y -1"), "(- y 1)");
    assert_eq!(tree("x = y -1"), "(= x (- y 1))");
    assert_eq!(tree("2 * 3 +4"), "(+ (* 2 3) 4)");
    assert_eq!(tree("y -1 * 2"), "(- y (* 1 2))");
    assert_eq!(tree("y\n-1"), "y\n-1");

    let node = single("y -1");
    let Node::Binary { right, op, .. } = &node else {
        panic!("expected a binary expression");
    };
    assert_eq!(op.column, 3);
    assert_eq!(**right, Node::Leaf(Token::new(TokenKind::Number, "1", 1, 4)));
}

#[test]
fn semicolons_separate_statements() {
    assert_eq!(parse("a; b;; c").unwrap().len(), 3);
    assert!(parse("").unwrap().is_empty());
    assert!(parse(";;").unwrap().is_empty());
}

#[test]
fn positions_of_nodes() {
    let node = single("x = (1 + 2)");
    let Node::Binary { right, .. } = &node else {
        panic!("expected a binary expression");
    };

    assert_eq!((node.position().line, node.position().column), (1, 3));
    assert_eq!((right.position().line, right.position().column), (1, 5));
    assert_eq!(single("\n  if (a) b").position().line, 2);
}

#[test]
fn missing_terminator() {
    assert_eq!(parse("x = 1 x = 2"),
               Err(ParseError::ExpectedTerminator { token:  "x".to_string(),
                                                    line:   1,
                                                    column: 7, }));
}

#[test]
fn unclosed_parenthesis() {
    assert_eq!(parse("(1 + 2"),
               Err(ParseError::UnexpectedEndOfInput { expected: "')'".to_string(),
                                                      line:     1,
                                                      column:   7, }));
}

#[test]
fn missing_operand() {
    assert_eq!(parse("1 +"),
               Err(ParseError::UnexpectedEndOfInput { expected: "an expression".to_string(),
                                                      line:     1,
                                                      column:   4, }));
    assert_eq!(parse(")"),
               Err(ParseError::UnexpectedToken { token:    ")".to_string(),
                                                 expected: "an expression".to_string(),
                                                 line:     1,
                                                 column:   1, }));
}

#[test]
fn unclosed_block() {
    assert_eq!(parse("{ x"),
               Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string(),
                                                      line:     1,
                                                      column:   4, }));
}

#[test]
fn malformed_statements() {
    assert_eq!(parse("if x"),
               Err(ParseError::UnexpectedToken { token:    "x".to_string(),
                                                 expected: "'(' after 'if'".to_string(),
                                                 line:     1,
                                                 column:   4, }));
    assert_eq!(parse("while (x) y"),
               Err(ParseError::UnexpectedToken { token:    "y".to_string(),
                                                 expected: "'{'".to_string(),
                                                 line:     1,
                                                 column:   11, }));
    assert_eq!(parse("function f(a b) {}"),
               Err(ParseError::UnexpectedToken { token:    "b".to_string(),
                                                 expected: "',' or ')'".to_string(),
                                                 line:     1,
                                                 column:   14, }));
    assert_eq!(parse("var 1"),
               Err(ParseError::UnexpectedToken { token:    "1".to_string(),
                                                 expected: "identifier".to_string(),
                                                 line:     1,
                                                 column:   5, }));
    assert!(matches!(parse("new f"), Err(ParseError::UnexpectedEndOfInput { .. })));
}

#[test]
fn nesting_is_limited() {
    let deep = |open: &str, close: &str, count: usize| {
        format!("{}1{}", open.repeat(count), close.repeat(count))
    };

    assert!(parse(&deep("(", ")", 128)).is_ok());
    assert!(matches!(parse(&deep("(", ")", 129)),
                     Err(ParseError::NestingTooDeep { limit: 128, .. })));

    for source in [deep("(", ")", 10_000),
                   deep("f(", ")", 10_000),
                   deep("a[", "]", 10_000),
                   deep("- ", "", 10_000),
                   deep("{", "}", 10_000),
                   deep("if (1) ", "", 10_000),
                   format!("a{}", "[0]".repeat(10_000)),
                   format!("a{}", ".b".repeat(10_000))]
    {
        assert!(matches!(parse(&source), Err(ParseError::NestingTooDeep { limit: 128, .. })),
                "{}",
                &source[..20]);
    }
}

#[test]
fn nesting_error_reports_the_first_token_past_the_limit() {
    let source = "(".repeat(200);

    assert_eq!(parse(&source),
               Err(ParseError::NestingTooDeep { limit:  128,
                                                line:   1,
                                                column: 130, }));
}

#[test]
fn long_operator_chains_parse_and_drop() {
    let sum = vec!["1"; 10_000].join(" + ");
    let rendered = tree(&sum);
    assert!(rendered.starts_with(&"(+ ".repeat(9_999)));
    assert!(rendered.ends_with(&" 1)".repeat(9_999)));

    let mixed = vec!["2 * 3"; 5_000].join(" - ");
    assert_eq!(parse(&mixed).unwrap().len(), 1);

    let assignments = (0..2_000).map(|i| format!("a{i} = ")).collect::<String>() + "1";
    let node = single(&assignments);
    let mut spine = &node;
    let mut depth = 0;
    while let Node::Binary { right, .. } = spine {
        spine = right;
        depth += 1;
    }
    assert_eq!(depth, 2_000);
}

#[test]
fn lexical_errors_abort_parsing() {
    assert_eq!(parse("x = \"open"),
               Err(ParseError::UnterminatedString { line: 1, column: 5 }));
}

#[test]
fn dropping_a_deep_tree_releases_every_node() {
    let x = Token::new(TokenKind::Identifier, "x", 1, 1);
    let plus = Token::new(TokenKind::Plus, "+", 1, 2);

    let mut node = Node::Leaf(x.clone());
    for _ in 0..100 {
        node = Node::Binary { left:  Box::new(node),
                              right: Box::new(Node::Leaf(x.clone())),
                              op:    plus.clone(), };
    }
    assert_eq!(Rc::strong_count(&x.value), 102);
    assert_eq!(Rc::strong_count(&plus.value), 101);

    drop(node);

    assert_eq!(Rc::strong_count(&x.value), 1);
    assert_eq!(Rc::strong_count(&plus.value), 1);
}

#[test]
fn deeply_nested_source_parses_and_drops() {
    let depth = 100;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let root = single(&source);
    let mut node = &root;
    let mut levels = 0;
    while let Node::Parenthesized { inner, .. } = node {
        node = inner;
        levels += 1;
    }

    assert_eq!(levels, depth);
    assert_eq!(*node, Node::Leaf(Token::new(TokenKind::Number, "1", 1, 101)));
}

#[test]
fn dropping_a_parsed_assignment_chain_releases_every_node() {
    let source = (0..100).map(|i| format!("a{i} = ")).collect::<String>() + "1";
    let node = single(&source);

    let mut handles = Vec::new();
    let mut spine = &node;
    while let Node::Binary { left, right, op } = spine {
        handles.push(Rc::clone(&op.value));
        if let Node::Leaf(name) = &**left {
            handles.push(Rc::clone(&name.value));
        }
        spine = right;
    }
    assert_eq!(handles.len(), 200);
    assert_eq!(*spine, Node::Leaf(Token::new(TokenKind::Number, "1", 1, 591)));

    let copy = node.clone();
    assert!(handles.iter().all(|handle| Rc::strong_count(handle) == 3));

    drop(copy);
    assert!(handles.iter().all(|handle| Rc::strong_count(handle) == 2));

    drop(node);
    assert!(handles.iter().all(|handle| Rc::strong_count(handle) == 1));
}
