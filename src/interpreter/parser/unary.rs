use crate::{
    ast::Node,
    interpreter::{
        lexer::{Scanner, Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{
                MAX_NESTING, expect, nested, parse_comma_separated, parse_identifier, too_deep,
                unexpected,
            },
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` and `+`. A sign written directly in
/// front of a number is already part of the number token, so this only
/// sees signs in front of other operands, such as `-x` or `-(1 + 2)`.
///
/// Unary operators are right-associative: `- -x` is `-(-x)`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | primary postfix*
/// ```
pub(crate) fn parse_unary(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    if matches!(scanner.peek()?.kind, TokenKind::Minus | TokenKind::Plus) {
        let op = scanner.next()?;
        let operand = nested(scanner, false, parse_unary)?;
        return Ok(Node::Unary { op,
                                operand: Box::new(operand) });
    }

    let primary = parse_primary(scanner)?;
    parse_postfix(scanner, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - number and string literals
/// - the keyword literals `true`, `false`, `null` and `this`
/// - identifiers and function calls
/// - `var` declarations
/// - parenthesized expressions
/// - constructions with `new`
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier ( "(" arguments ")" )?
///              | "var" identifier
///              | "(" expression ")"
///              | "new" identifier "(" arguments ")"
/// ```
///
/// # Errors
/// Returns a `ParseError` for any token that cannot start an expression.
pub(crate) fn parse_primary(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let token = scanner.next()?;

    match token.kind {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null
        | TokenKind::This => Ok(Node::Leaf(token)),
        TokenKind::Identifier => parse_identifier_or_call(scanner, token),
        TokenKind::Var => {
            let name = parse_identifier(scanner)?;
            Ok(Node::VarDeclaration { name })
        },
        TokenKind::LParen => parse_grouping(scanner, &token),
        TokenKind::New => parse_constructor(scanner, &token),
        _ => Err(unexpected(&token, "an expression")),
    }
}

/// Parses postfix operators applied to an expression.
///
/// 1. **Array access** `expr[index]`
/// 2. **Field access** `expr.field`, where the field is itself a primary
///    expression, so `a.b(1)` accesses the call `b(1)` on `a`.
///
/// Postfixes chain (`a[0].b[1]`) and must start on the line where the
/// expression ends, unless a parenthesis or bracket is open. Each postfix
/// counts as one nesting level.
///
/// Grammar:
/// ```text
///     postfix := "[" expression "]"
///              | "." primary
/// ```
fn parse_postfix(scanner: &mut Scanner<'_>, mut node: Node) -> ParseResult<Node> {
    let mut chain = 0;

    loop {
        let next = scanner.peek()?;
        if scanner.starts_new_line(&next) {
            return Ok(node);
        }
        if matches!(next.kind, TokenKind::LBracket | TokenKind::Dot) {
            chain += 1;
            if scanner.depth() + chain > MAX_NESTING {
                return Err(too_deep(&next));
            }
        }

        match next.kind {
            TokenKind::LBracket => {
                scanner.next()?;
                let index = nested(scanner, true, |scanner| {
                                let index = parse_expression(scanner)?;
                                expect(scanner, TokenKind::RBracket, "']' after array index")?;
                                Ok(index)
                            })?;
                node = Node::ArrayAccess { array: Box::new(node),
                                           index: Box::new(index), };
            },
            TokenKind::Dot => {
                scanner.next()?;
                let field = parse_primary(scanner)?;
                node = Node::FieldAccess { record: Box::new(node),
                                           field:  Box::new(field), };
            },
            _ => return Ok(node),
        }
    }
}

/// Parses an identifier, or a function call when the identifier is followed
/// by `(` on the same line (or anywhere, inside an open grouping).
///
/// Grammar: `call := identifier "(" (expression ("," expression)*)? ")"`
fn parse_identifier_or_call(scanner: &mut Scanner<'_>, name: Token) -> ParseResult<Node> {
    let next = scanner.peek()?;
    if next.kind != TokenKind::LParen || scanner.starts_new_line(&next) {
        return Ok(Node::Leaf(name));
    }

    scanner.next()?;
    let arguments = nested(scanner, true, |scanner| {
                        parse_comma_separated(scanner, parse_expression, TokenKind::RParen)
                    })?;
    Ok(Node::FunctionCall { callee: Box::new(Node::Leaf(name)),
                            arguments })
}

/// Parses a parenthesized expression; the `(` is already consumed.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping(scanner: &mut Scanner<'_>, open: &Token) -> ParseResult<Node> {
    let inner = nested(scanner, true, |scanner| {
                    let inner = parse_expression(scanner)?;
                    expect(scanner, TokenKind::RParen, "')'")?;
                    Ok(inner)
                })?;

    Ok(Node::Parenthesized { inner:    Box::new(inner),
                             position: open.position(), })
}

/// Parses a construction; the `new` keyword is already consumed.
///
/// Grammar: `constructor := "new" call`
///
/// # Errors
/// Returns a `ParseError` if `new` is not followed by a function call.
fn parse_constructor(scanner: &mut Scanner<'_>, keyword: &Token) -> ParseResult<Node> {
    let name = parse_identifier(scanner)?;
    let call = parse_identifier_or_call(scanner, name)?;
    if !matches!(call, Node::FunctionCall { .. }) {
        return Err(unexpected(&scanner.peek()?, "'(' after constructor name"));
    }

    Ok(Node::Constructor { call:     Box::new(call),
                           position: keyword.position(), })
}
