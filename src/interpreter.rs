/// The compiler module lowers the AST to bytecode.
///
/// The compiler walks the statement trees produced by the parser and emits a
/// flat sequence of stack-machine instructions, assigning every declared
/// variable a slot in a flat local table.
///
/// # Responsibilities
/// - Defines the instruction set and the compiled `Program`.
/// - Resolves variable names to slots and rejects undeclared reads and
///   redeclarations.
/// - Rejects constructs that parse but have no lowering.
pub mod compiler;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, text and
///   source location.
/// - Skips whitespace and comments and folds leading signs into numbers.
/// - Reports lexical errors for unterminated strings and comments.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Encodes operator precedence in the shape of the tree.
/// - Validates grammar and statement termination, reporting errors with
///   location info.
pub mod parser;
/// The virtual machine executes compiled programs.
pub mod vm;
