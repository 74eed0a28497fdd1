use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Scanner, TokenKind},
        parser::{
            block::parse_scope_block,
            core::{ParseResult, parse_expression},
            utils::{expect, nested, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a function declaration,
/// - a scope block,
/// - an `if` statement,
/// - a `while` statement,
/// - an expression used as a statement.
///
/// Block-bodied statements end at their closing brace; a `;` right after
/// them is allowed and consumed. Expression statements must be terminated
/// as described in [`expect_terminator`].
///
/// # Parameters
/// - `scanner`: Scanner positioned at the first token of the statement.
///
/// # Returns
/// The parsed statement node.
pub fn parse_statement(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let node = match scanner.peek()?.kind {
        TokenKind::Function => parse_function_declaration(scanner)?,
        TokenKind::LBrace => parse_scope_block(scanner)?,
        TokenKind::If => parse_if(scanner)?,
        TokenKind::While => parse_while(scanner)?,
        _ => {
            let expression = parse_expression(scanner)?;
            expect_terminator(scanner)?;
            return Ok(expression);
        },
    };

    if scanner.peek()?.kind == TokenKind::Semicolon {
        scanner.next()?;
    }
    Ok(node)
}

/// Checks that an expression statement ends here.
///
/// A statement ends at a `;` (which is consumed), at the end of input, or
/// when the next token starts on a later line than the last token of the
/// statement. A following `}` or `else` also ends it without being
/// consumed, so blocks and `if` bodies can be written on one line.
///
/// # Errors
/// Returns `ParseError::ExpectedTerminator` when another token follows on
/// the same line.
fn expect_terminator(scanner: &mut Scanner<'_>) -> ParseResult<()> {
    let next = scanner.peek()?;

    match next.kind {
        TokenKind::Semicolon => {
            scanner.next()?;
            Ok(())
        },
        TokenKind::EndOfFile | TokenKind::RBrace | TokenKind::Else => Ok(()),
        _ if next.line > scanner.previous_line() => Ok(()),
        _ => Err(ParseError::ExpectedTerminator { token:  next.to_string(),
                                                  line:   next.line,
                                                  column: next.column, }),
    }
}

/// Parses a function declaration of the form
/// `function name(param1, param2, ...) { body }`.
///
/// # Errors
/// Returns a `ParseError` if the name or a parameter is not an identifier,
/// the parameter list is malformed, or the body is not a scope block.
fn parse_function_declaration(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    expect(scanner, TokenKind::Function, "'function'")?;
    let name = parse_identifier(scanner)?;
    expect(scanner, TokenKind::LParen, "'(' after function name")?;
    let params = parse_comma_separated(scanner, parse_identifier, TokenKind::RParen)?;
    let body = parse_scope_block(scanner)?;

    Ok(Node::FunctionDeclaration { name,
                                   params,
                                   body: Box::new(body) })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if (<condition>) <statement>
///     else <statement>
/// ```
/// Either branch may be a scope block or a single statement, so `else if`
/// chains nest naturally.
///
/// # Errors
/// Returns a `ParseError` if the parentheses around the condition are
/// missing or a branch fails to parse.
fn parse_if(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let keyword = expect(scanner, TokenKind::If, "'if'")?;
    expect(scanner, TokenKind::LParen, "'(' after 'if'")?;
    let condition = parse_condition(scanner)?;
    let body = nested(scanner, false, parse_statement)?;

    let else_body = if scanner.peek()?.kind == TokenKind::Else {
        scanner.next()?;
        Some(Box::new(nested(scanner, false, parse_statement)?))
    } else {
        None
    };

    Ok(Node::If { condition: Box::new(condition),
                  body: Box::new(body),
                  else_body,
                  position: keyword.position() })
}

/// Parses a `while` statement: `while (<condition>) { body }`.
///
/// # Errors
/// Returns a `ParseError` if the parentheses are missing or the body is not
/// a scope block.
fn parse_while(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let keyword = expect(scanner, TokenKind::While, "'while'")?;
    expect(scanner, TokenKind::LParen, "'(' after 'while'")?;
    let condition = parse_condition(scanner)?;
    let body = parse_scope_block(scanner)?;

    Ok(Node::While { condition: Box::new(condition),
                     body:      Box::new(body),
                     position:  keyword.position(), })
}

/// Parses a condition and its closing `)`; the `(` is already consumed.
/// Line breaks inside the parentheses do not end the expression.
fn parse_condition(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    nested(scanner, true, |scanner| {
        let condition = parse_expression(scanner)?;
        expect(scanner, TokenKind::RParen, "')' after condition")?;
        Ok(condition)
    })
}
