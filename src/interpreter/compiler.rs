/// Bytecode definitions.
///
/// Declares the `Instruction` set, the `Slot` index type and the compiled
/// `Program`, which owns the instruction sequence together with its local
/// variable table and source positions.
pub mod program;

/// AST lowering.
///
/// Walks statement trees and emits instructions for literals, variables,
/// declarations, assignments and arithmetic. Everything else is rejected
/// with a `CompileError`.
pub mod core;

pub use self::{
    core::{CompileResult, Compiler, compile},
    program::{Instruction, Program, Slot},
};
