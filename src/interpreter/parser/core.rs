use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Scanner, TokenKind},
        parser::{binary::parse_binary, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Statements are parsed one after another until the end of input. Empty
/// statements (a lone `;`) are skipped. The first grammar violation aborts
/// parsing; no partial result is returned.
///
/// Grammar: `program := statement* EOF`
///
/// # Parameters
/// - `scanner`: Scanner positioned at the start of the source.
///
/// # Returns
/// One node per top-level statement, in source order.
pub fn parse_program(scanner: &mut Scanner<'_>) -> ParseResult<Vec<Node>> {
    let mut nodes = Vec::new();

    loop {
        match scanner.peek()?.kind {
            TokenKind::EndOfFile => return Ok(nodes),
            TokenKind::Semicolon => {
                scanner.next()?;
            },
            _ => nodes.push(parse_statement(scanner)?),
        }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Operators of every tier
/// are handled by one left-to-right loop in [`parse_binary`].
///
/// Grammar: `expression := unary (operator unary)*`
pub fn parse_expression(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    parse_binary(scanner)
}
