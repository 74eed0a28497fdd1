use ordered_float::OrderedFloat;
use tracing::debug;

use crate::{
    ast::Node,
    error::CompileError,
    interpreter::{
        compiler::program::{Instruction, Program, Slot},
        lexer::{Position, Token, TokenKind},
    },
};

/// Result type used by the compiler.
pub type CompileResult<T> = Result<T, CompileError>;

/// Pending work of [`Compiler::compile_statement`].
enum Task<'n> {
    Compile(&'n Node),
    Emit(Instruction, Position),
    /// Stores the value on top of the stack into `target` and reloads it.
    Store { target: &'n Node, op: &'n Token },
}

/// Lowers statement trees into a [`Program`].
///
/// A `Compiler` owns the program under construction. Locals are declared as
/// the compiler meets them, so a name must be declared before it is read,
/// in source order.
#[derive(Debug, Default)]
pub struct Compiler {
    program: Program,
}

impl Compiler {
    /// Creates a compiler with an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles one top-level statement.
    ///
    /// Each statement leaves its value, if it has one, on the operand stack.
    /// The tree is walked with an explicit work list, so long operator chains
    /// compile without deep recursion.
    pub fn compile_statement(&mut self, node: &Node) -> CompileResult<()> {
        let mut pending = vec![Task::Compile(node)];

        while let Some(task) = pending.pop() {
            match task {
                Task::Compile(node) => self.visit(node, &mut pending)?,
                Task::Emit(instruction, position) => self.program.emit(instruction, position),
                Task::Store { target, op } => {
                    let slot = self.assignment_target(target)?;
                    self.program.emit(Instruction::StoreLocal(slot), op.position());
                    self.program.emit(Instruction::LoadLocal(slot), op.position());
                },
            }
        }

        Ok(())
    }

    /// Appends the final `End` instruction and returns the program.
    #[must_use]
    pub fn finish(mut self, position: Position) -> Program {
        self.program.emit(Instruction::End, position);
        self.program
    }

    /// Lowers the parts of `node` that need no children and schedules the
    /// rest. Tasks run last in, first out.
    fn visit<'n>(&mut self, node: &'n Node, pending: &mut Vec<Task<'n>>) -> CompileResult<()> {
        match node {
            Node::Leaf(token) => self.compile_leaf(token),
            Node::VarDeclaration { name } => self.declare(name).map(|_| ()),
            Node::Binary { left, right, op } => {
                let instruction = match op.kind {
                    TokenKind::Assign => {
                        // The value is computed before the target is resolved.
                        pending.extend([Task::Store { target: left, op }, Task::Compile(right)]);
                        return Ok(());
                    },
                    TokenKind::Plus => Instruction::Add,
                    TokenKind::Minus => Instruction::Subtract,
                    TokenKind::Star => Instruction::Multiply,
                    TokenKind::Slash => Instruction::Divide,
                    _ => return Err(unsupported("equality comparison", op.position())),
                };

                pending.extend([Task::Emit(instruction, op.position()),
                                Task::Compile(right),
                                Task::Compile(left)]);
                Ok(())
            },
            Node::Unary { op, operand } => {
                if op.kind == TokenKind::Minus {
                    pending.push(Task::Emit(Instruction::Negate, op.position()));
                }
                pending.push(Task::Compile(operand));
                Ok(())
            },
            Node::Parenthesized { inner, .. } => {
                pending.push(Task::Compile(inner));
                Ok(())
            },
            Node::FunctionDeclaration { .. }
            | Node::FunctionCall { .. }
            | Node::ScopeBlock { .. }
            | Node::If { .. }
            | Node::While { .. }
            | Node::ArrayAccess { .. }
            | Node::FieldAccess { .. }
            | Node::Constructor { .. } => Err(unsupported(node.describe(), node.position())),
        }
    }

    fn compile_leaf(&mut self, token: &Token) -> CompileResult<()> {
        match token.kind {
            TokenKind::Number => {
                let value = token.value
                                 .parse::<f64>()
                                 .map_err(|_| CompileError::InvalidNumber { text:   token.value.to_string(),
                                                                            line:   token.line,
                                                                            column: token.column, })?;
                self.program
                    .emit(Instruction::LoadConstant(OrderedFloat(value)), token.position());
                Ok(())
            },
            TokenKind::Identifier => {
                let slot = self.resolve(token)?;
                self.program.emit(Instruction::LoadLocal(slot), token.position());
                Ok(())
            },
            TokenKind::String => Err(unsupported("string literal", token.position())),
            _ => Err(unsupported("keyword literal", token.position())),
        }
    }

    fn assignment_target(&mut self, target: &Node) -> CompileResult<Slot> {
        let mut target = target;
        while let Node::Parenthesized { inner, .. } = target {
            target = inner;
        }

        match target {
            Node::VarDeclaration { name } => self.declare(name),
            Node::Leaf(token) if token.kind == TokenKind::Identifier => self.resolve(token),
            _ => {
                let Position { line, column } = target.position();
                Err(CompileError::InvalidAssignmentTarget { line, column })
            },
        }
    }

    fn declare(&mut self, name: &Token) -> CompileResult<Slot> {
        let slot = self.program
                       .declare(&name.value)
                       .ok_or_else(|| CompileError::Redeclaration { name:   name.value.to_string(),
                                                                   line:   name.line,
                                                                   column: name.column, })?;
        debug!(name = %name.value, slot, "local declared");
        Ok(slot)
    }

    fn resolve(&self, name: &Token) -> CompileResult<Slot> {
        self.program
            .slot(&name.value)
            .ok_or_else(|| CompileError::UndeclaredVariable { name:   name.value.to_string(),
                                                              line:   name.line,
                                                              column: name.column, })
    }
}

fn unsupported(construct: &'static str, position: Position) -> CompileError {
    CompileError::Unsupported { construct,
                                line: position.line,
                                column: position.column }
}

/// Compiles a parsed program.
///
/// Statements are compiled in order into a single instruction sequence that
/// ends with [`Instruction::End`].
///
/// # Errors
/// Returns a `CompileError` for constructs without a lowering, for reads of
/// undeclared variables, and for redeclarations.
///
/// ## Example
/// ```
/// use olang::{
///     interpreter::compiler::{Instruction, compile},
///     parse,
/// };
/// use ordered_float::OrderedFloat;
///
/// let program = compile(&parse("2 * 3").unwrap()).unwrap();
///
/// assert_eq!(program.instructions(),
///            [Instruction::LoadConstant(OrderedFloat(2.0)),
///             Instruction::LoadConstant(OrderedFloat(3.0)),
///             Instruction::Multiply,
///             Instruction::End]);
/// ```
pub fn compile(nodes: &[Node]) -> CompileResult<Program> {
    let mut compiler = Compiler::new();
    for node in nodes {
        compiler.compile_statement(node)?;
    }

    let end = nodes.last().map(Node::position).unwrap_or_default();
    let program = compiler.finish(end);
    debug!(statements = nodes.len(),
           instructions = program.instructions().len(),
           locals = program.locals().len(),
           "program compiled");
    Ok(program)
}
