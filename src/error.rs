/// Parsing errors.
///
/// Defines all error types that can occur while scanning and parsing source
/// code: unterminated literals and comments, unexpected tokens, missing
/// delimiters and missing statement terminators.
pub mod parse_error;
/// Compilation errors.
///
/// Raised while lowering the AST to bytecode: constructs that have no
/// lowering yet, undeclared or redeclared variables, invalid assignment
/// targets and malformed numeric literals.
pub mod compile_error;
/// Runtime errors.
///
/// Contains the errors the virtual machine can raise while executing a
/// compiled program.
pub mod runtime_error;

pub use compile_error::CompileError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
