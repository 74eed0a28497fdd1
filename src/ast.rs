use std::fmt::{self, Display, Formatter};

use crate::interpreter::lexer::{Position, Token, TokenKind};

/// A node of the abstract syntax tree (AST).
///
/// `Node` is a closed set of expression and statement variants. Every
/// composite variant owns its children through `Box` or `Vec`, so a tree is
/// strictly hierarchical and dropping the root releases every node exactly
/// once.
///
/// Equality is structural: two nodes are equal when they are the same
/// variant and all children and tokens, including token positions, are
/// equal. Variants that hold no token of their own record the position of
/// their opening token instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single token: number, string, identifier or keyword literal.
    Leaf(Token),
    /// A `var` declaration.
    VarDeclaration {
        /// The declared name.
        name: Token,
    },
    /// A binary operation, including assignment and equality.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// The operator token.
        op:    Token,
    },
    /// A prefix `-` or `+` applied to an operand.
    Unary {
        /// The operator token.
        op:      Token,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// An expression wrapped in parentheses.
    Parenthesized {
        /// The wrapped expression.
        inner:    Box<Self>,
        /// Position of the `(`.
        position: Position,
    },
    /// `function name(params) { body }`.
    FunctionDeclaration {
        /// The function name.
        name:   Token,
        /// The parameter names.
        params: Vec<Token>,
        /// The body, always a scope block.
        body:   Box<Self>,
    },
    /// `callee(arguments)`.
    FunctionCall {
        /// The called expression.
        callee:    Box<Self>,
        /// The argument expressions.
        arguments: Vec<Self>,
    },
    /// `{ statements }`.
    ScopeBlock {
        /// The statements in source order.
        statements: Vec<Self>,
        /// Position of the `{`.
        position:   Position,
    },
    /// `if (condition) body else else_body`.
    If {
        /// The condition expression.
        condition: Box<Self>,
        /// Statement run when the condition holds.
        body:      Box<Self>,
        /// Statement run otherwise, if present.
        else_body: Option<Box<Self>>,
        /// Position of the `if` keyword.
        position:  Position,
    },
    /// `while (condition) { body }`.
    While {
        /// The condition expression.
        condition: Box<Self>,
        /// The loop body, always a scope block.
        body:      Box<Self>,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// `array[index]`.
    ArrayAccess {
        /// The indexed expression.
        array: Box<Self>,
        /// The index expression.
        index: Box<Self>,
    },
    /// `record.field`.
    FieldAccess {
        /// The accessed expression.
        record: Box<Self>,
        /// The field expression.
        field:  Box<Self>,
    },
    /// `new call(...)`.
    Constructor {
        /// The wrapped function call.
        call:     Box<Self>,
        /// Position of the `new` keyword.
        position: Position,
    },
}

impl Node {
    /// Gets the source position of `self`.
    ///
    /// Binary and unary expressions report their operator, declarations
    /// their name, calls and accesses the expression they are attached to.
    ///
    /// ## Example
    /// ```
    /// use olang::parse;
    ///
    /// let nodes = parse("x = 1 + 2").unwrap();
    ///
    /// assert_eq!(nodes[0].position().column, 3);
    /// ```
    #[must_use]
    pub fn position(&self) -> Position {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(token)
                | Self::VarDeclaration { name: token }
                | Self::Binary { op: token, .. }
                | Self::Unary { op: token, .. }
                | Self::FunctionDeclaration { name: token, .. } => return token.position(),
                Self::Parenthesized { position, .. }
                | Self::ScopeBlock { position, .. }
                | Self::If { position, .. }
                | Self::While { position, .. }
                | Self::Constructor { position, .. } => return *position,
                Self::FunctionCall { callee: inner, .. }
                | Self::ArrayAccess { array: inner, .. }
                | Self::FieldAccess { record: inner, .. } => node = inner,
            }
        }
    }

    /// Returns the operator token when `self` is a binary expression.
    #[must_use]
    pub const fn binary_operator(&self) -> Option<&Token> {
        match self {
            Self::Binary { op, .. } => Some(op),
            _ => None,
        }
    }

    /// A short human-readable name of the construct, used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "literal",
            Self::VarDeclaration { .. } => "variable declaration",
            Self::Binary { .. } => "binary expression",
            Self::Unary { .. } => "unary expression",
            Self::Parenthesized { .. } => "parenthesized expression",
            Self::FunctionDeclaration { .. } => "function declaration",
            Self::FunctionCall { .. } => "function call",
            Self::ScopeBlock { .. } => "scope block",
            Self::If { .. } => "if statement",
            Self::While { .. } => "while statement",
            Self::ArrayAccess { .. } => "array access",
            Self::FieldAccess { .. } => "field access",
            Self::Constructor { .. } => "constructor",
        }
    }

    /// An empty block with no position. It owns nothing, so it stands in
    /// for a child that has been moved out of its parent.
    pub(crate) const fn empty() -> Self {
        Self::ScopeBlock { statements: Vec::new(),
                           position:   Position::new(0, 0), }
    }

    /// Moves every direct child of `self` into `out`, leaving empty blocks
    /// in their place.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        fn take(child: &mut Node) -> Node {
            std::mem::replace(child, Node::empty())
        }

        match self {
            Self::Leaf(_) | Self::VarDeclaration { .. } => {},
            Self::Binary { left: first,
                           right: second,
                           .. }
            | Self::ArrayAccess { array: first,
                                  index: second, }
            | Self::FieldAccess { record: first,
                                  field: second, }
            | Self::While { condition: first,
                            body: second,
                            .. } => {
                out.push(take(first));
                out.push(take(second));
            },
            Self::Unary { operand: child, .. }
            | Self::Parenthesized { inner: child, .. }
            | Self::FunctionDeclaration { body: child, .. }
            | Self::Constructor { call: child, .. } => out.push(take(child)),
            Self::FunctionCall { callee, arguments } => {
                out.push(take(callee));
                out.append(arguments);
            },
            Self::ScopeBlock { statements, .. } => out.append(statements),
            Self::If { condition,
                       body,
                       else_body,
                       .. } => {
                out.push(take(condition));
                out.push(take(body));
                if let Some(else_body) = else_body {
                    out.push(take(else_body));
                }
            },
        }
    }
}

/// Releases the tree one node at a time, so arbitrarily long operator
/// chains drop without deep recursion.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// A piece of the S-expression rendering still to be written.
enum Part<'n> {
    Tree(&'n Node),
    Text(&'static str),
    Token(&'n Token),
    Params(&'n [Token]),
}

impl Node {
    /// The rendering of `self`, one level deep, in output order.
    fn parts(&self) -> Vec<Part<'_>> {
        use Part::{Params, Text, Tree};

        match self {
            Self::Leaf(token) => vec![Part::Token(token)],
            Self::VarDeclaration { name } => vec![Text("(var "), Part::Token(name), Text(")")],
            Self::Binary { left, right, op } => {
                vec![Text("("), Part::Token(op), Text(" "), Tree(left), Text(" "), Tree(right), Text(")")]
            },
            Self::Unary { op, operand } => {
                vec![Text("("), Part::Token(op), Text(" "), Tree(operand), Text(")")]
            },
            Self::Parenthesized { inner, .. } => vec![Text("(group "), Tree(inner), Text(")")],
            Self::FunctionDeclaration { name, params, body } => {
                vec![Text("(function "),
                     Part::Token(name),
                     Text(" ("),
                     Params(params),
                     Text(") "),
                     Tree(body),
                     Text(")")]
            },
            Self::FunctionCall { callee, arguments } => {
                let mut parts = vec![Text("(call "), Tree(callee)];
                for argument in arguments {
                    parts.extend([Text(" "), Tree(argument)]);
                }
                parts.push(Text(")"));
                parts
            },
            Self::ScopeBlock { statements, .. } => {
                let mut parts = vec![Text("(block")];
                for statement in statements {
                    parts.extend([Text(" "), Tree(statement)]);
                }
                parts.push(Text(")"));
                parts
            },
            Self::If { condition,
                       body,
                       else_body,
                       .. } => {
                let mut parts = vec![Text("(if "), Tree(condition), Text(" "), Tree(body)];
                if let Some(else_body) = else_body {
                    parts.extend([Text(" "), Tree(else_body)]);
                }
                parts.push(Text(")"));
                parts
            },
            Self::While { condition, body, .. } => {
                vec![Text("(while "), Tree(condition), Text(" "), Tree(body), Text(")")]
            },
            Self::ArrayAccess { array, index } => {
                vec![Text("(index "), Tree(array), Text(" "), Tree(index), Text(")")]
            },
            Self::FieldAccess { record, field } => {
                vec![Text("(field "), Tree(record), Text(" "), Tree(field), Text(")")]
            },
            Self::Constructor { call, .. } => vec![Text("(new "), Tree(call), Text(")")],
        }
    }
}

/// Renders the tree as an S-expression, e.g. `(= (var x) (+ 1 (* 2 3)))`.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Part::Tree(self)];

        while let Some(part) = pending.pop() {
            match part {
                Part::Tree(node) => pending.extend(node.parts().into_iter().rev()),
                Part::Text(text) => f.write_str(text)?,
                Part::Token(token) => write!(f, "{token}")?,
                Part::Params(params) => {
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        f.write_str(&param.value)?;
                    }
                },
            }
        }

        Ok(())
    }
}

/// Precedence tiers of binary operators, from loosest to tightest.
///
/// Parenthesized expressions and other operands sit above `Product`; they
/// are never split by the parser's right-spine splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Not a binary operator.
    Lowest,
    /// `=`, `==`, `===`
    Assignment,
    /// `+`, `-`
    Sum,
    /// `*`, `/`
    Product,
}

impl Precedence {
    /// Returns the tier of a token kind, `Lowest` for non-operators.
    ///
    /// ## Example
    /// ```
    /// use olang::{ast::Precedence, interpreter::lexer::TokenKind};
    ///
    /// assert!(Precedence::of(TokenKind::Star) > Precedence::of(TokenKind::Minus));
    /// assert_eq!(Precedence::of(TokenKind::Comma), Precedence::Lowest);
    /// ```
    #[must_use]
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Assign | TokenKind::LooseEquality | TokenKind::StrictEquality => {
                Self::Assignment
            },
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Star | TokenKind::Slash => Self::Product,
            _ => Self::Lowest,
        }
    }

    /// Whether operators of this tier group to the right (`a = b = c`).
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Assignment)
    }
}
