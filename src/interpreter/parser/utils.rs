use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Scanner, Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Builds the error for a token that does not fit the grammar.
///
/// An end-of-file token produces `UnexpectedEndOfInput`, anything else
/// `UnexpectedToken`. Both carry the token's position.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, expected: &str) -> ParseError {
    if token.kind == TokenKind::EndOfFile {
        return ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                  line:     token.line,
                                                  column:   token.column, };
    }

    ParseError::UnexpectedToken { token:    token.to_string(),
                                  expected: expected.to_string(),
                                  line:     token.line,
                                  column:   token.column, }
}

/// Consumes the next token and checks that it has the given kind.
///
/// # Errors
/// Returns a `ParseError` describing `expected` if the kind differs.
pub(in crate::interpreter::parser) fn expect(scanner: &mut Scanner<'_>,
                                             kind: TokenKind,
                                             expected: &str)
                                             -> ParseResult<Token> {
    let token = scanner.next()?;
    if token.kind == kind {
        Ok(token)
    } else {
        Err(unexpected(&token, expected))
    }
}

/// Parses a plain identifier and returns its token.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier. Keywords
/// are rejected too, since they have their own token kinds.
pub(in crate::interpreter::parser) fn parse_identifier(scanner: &mut Scanner<'_>)
                                                       -> ParseResult<Token> {
    expect(scanner, TokenKind::Identifier, "identifier")
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by parameter lists and call arguments. The opening
/// delimiter must already be consumed. An immediately encountered closing
/// token produces an empty list; the closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, or if anything other
/// than `,` or `closing` follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    scanner: &mut Scanner<'_>,
    parse_item: impl Fn(&mut Scanner<'_>) -> ParseResult<T>,
    closing: TokenKind)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if scanner.peek()?.kind == closing {
        scanner.next()?;
        return Ok(items);
    }

    loop {
        items.push(parse_item(scanner)?);
        let token = scanner.next()?;
        match token.kind {
            TokenKind::Comma => {},
            kind if kind == closing => return Ok(items),
            _ => return Err(unexpected(&token, &format!("',' or {closing}"))),
        }
    }
}

/// Deepest nesting of parentheses, brackets, blocks, statement bodies,
/// prefix signs and postfix accesses the parser accepts.
pub const MAX_NESTING: usize = 128;

/// Runs `parse` one nesting level deeper.
///
/// Every recursive production goes through this function, which bounds the
/// parser's recursion and the depth of the trees it builds. With `grouping`
/// set, line breaks inside `parse` do not end expressions.
///
/// # Errors
/// Returns `ParseError::NestingTooDeep` at the token that would exceed
/// [`MAX_NESTING`], or whatever `parse` returns.
pub(in crate::interpreter::parser) fn nested<T>(scanner: &mut Scanner<'_>,
                                                grouping: bool,
                                                parse: impl FnOnce(&mut Scanner<'_>)
                                                          -> ParseResult<T>)
                                                -> ParseResult<T> {
    if scanner.depth() >= MAX_NESTING {
        return Err(too_deep(&scanner.peek()?));
    }

    scanner.enter(grouping);
    let result = parse(scanner);
    scanner.leave(grouping);
    result
}

/// Builds the error for a construct beyond [`MAX_NESTING`].
pub(in crate::interpreter::parser) const fn too_deep(token: &Token) -> ParseError {
    ParseError::NestingTooDeep { limit:  MAX_NESTING,
                                 line:   token.line,
                                 column: token.column, }
}
