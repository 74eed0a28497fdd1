use crate::{
    ast::{Node, Precedence},
    interpreter::{
        lexer::{Scanner, Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses a chain of binary operators.
///
/// Operands are read left to right. Each new operator and its right operand
/// are attached to the tree built so far with [`splice`], which puts the
/// operator at the depth its precedence calls for. The chain ends at the
/// first token that is not a binary operator, or at an operator that starts
/// a new source line while no parenthesis or bracket is open.
///
/// A signed number right after an operand on the same line, as in `y -1`,
/// is read as the operator followed by the unsigned number.
///
/// Grammar: `binary := unary (("=" | "==" | "===" | "+" | "-" | "*" | "/")
/// unary)*`
///
/// # Parameters
/// - `scanner`: Scanner positioned at the first operand.
///
/// # Returns
/// The expression tree.
pub fn parse_binary(scanner: &mut Scanner<'_>) -> ParseResult<Node> {
    let mut left = parse_unary(scanner)?;

    loop {
        let next = scanner.peek()?;
        if scanner.starts_new_line(&next) {
            break;
        }

        let (op, right) = if Precedence::of(next.kind) != Precedence::Lowest {
            let op = scanner.next()?;
            (op, parse_unary(scanner)?)
        } else if let Some((op, number)) = split_sign(&next) {
            scanner.next()?;
            (op, Node::Leaf(number))
        } else {
            break;
        };

        left = splice(left, right, op);
    }

    Ok(left)
}

/// Splits a signed number token into its sign operator and the unsigned
/// number.
fn split_sign(token: &Token) -> Option<(Token, Token)> {
    if token.kind != TokenKind::Number {
        return None;
    }

    let kind = match token.value.chars().next() {
        Some('-') => TokenKind::Minus,
        Some('+') => TokenKind::Plus,
        _ => return None,
    };
    let (sign, digits) = token.value.split_at(1);

    Some((Token::new(kind, sign, token.line, token.column),
          Token::new(TokenKind::Number, digits, token.line, token.column + 1)))
}

/// Attaches `right` to `left` with operator `op`, repairing the shape of
/// the tree.
///
/// When `left` is a binary expression whose operator binds more loosely
/// than `op`, the new node is inserted on `left`'s right spine instead of
/// wrapping `left`; this repeats down the spine. Equal precedence descends
/// only for right-associative tiers, so `5 - 1 - 1` groups as
/// `(5 - 1) - 1` while `a = b = 1` groups as `a = (b = 1)`. Anything that
/// is not a binary expression, including a parenthesized one, is treated as
/// an atom.
///
/// ## Example
/// ```
/// use olang::{
///     ast::Node,
///     interpreter::{
///         lexer::{Token, TokenKind},
///         parser::binary::splice,
///     },
/// };
///
/// let leaf = |text, column| Node::Leaf(Token::new(TokenKind::Number, text, 1, column));
/// let plus = Token::new(TokenKind::Plus, "+", 1, 3);
/// let star = Token::new(TokenKind::Star, "*", 1, 7);
///
/// // 1 + 2 * 3
/// let tree = splice(splice(leaf("1", 1), leaf("2", 5), plus), leaf("3", 9), star);
///
/// assert_eq!(tree.to_string(), "(+ 1 (* 2 3))");
/// ```
#[must_use]
pub fn splice(left: Node, right: Node, op: Token) -> Node {
    let mut depth = 0;
    let mut cursor = &left;
    while let Node::Binary { right: spine_right,
                             op: spine_op,
                             .. } = cursor
          && binds_tighter(&op, spine_op)
    {
        cursor = spine_right;
        depth += 1;
    }

    let mut root = left;
    let mut slot = &mut root;
    for _ in 0..depth {
        slot = match slot {
            Node::Binary { right: spine_right, .. } => &mut **spine_right,
            atom => atom,
        };
    }

    let attached = std::mem::replace(slot, Node::empty());
    *slot = Node::Binary { left: Box::new(attached),
                           right: Box::new(right),
                           op };
    root
}

fn binds_tighter(op: &Token, existing: &Token) -> bool {
    let incoming = Precedence::of(op.kind);
    let current = Precedence::of(existing.kind);

    incoming > current || (incoming == current && incoming.is_right_associative())
}
