use crate::{
    ast::Node,
    interpreter::{
        lexer::{Scanner, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect, nested, unexpected},
        },
    },
};

/// Parses a scope block of the form `{ statement* }`.
///
/// Statements inside the block follow the usual termination rules; the
/// closing `}` also ends the last statement, so `{ x = 1 }` is valid.
/// Empty statements are skipped. Each block counts as one nesting level.
///
/// # Parameters
/// - `scanner`: Scanner positioned at `{`.
///
/// # Returns
/// A [`Node::ScopeBlock`] with its statements in source order.
///
/// # Errors
/// Returns a `ParseError` if `{` is missing, a statement fails to parse, or
/// the input ends before the closing `}`.
pub fn parse_scope_block(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let open = expect(scanner, TokenKind::LBrace, "'{'")?;
    let mut statements = Vec::new();

    loop {
        let next = scanner.peek()?;
        match next.kind {
            TokenKind::RBrace => {
                scanner.next()?;
                break;
            },
            TokenKind::Semicolon => {
                scanner.next()?;
            },
            TokenKind::EndOfFile => return Err(unexpected(&next, "'}'")),
            _ => statements.push(nested(scanner, false, parse_statement)?),
        }
    }

    Ok(Node::ScopeBlock { statements,
                          position: open.position() })
}
