//! # olang
//!
//! olang is a small scripting language front end written in Rust. Source
//! text is tokenized, parsed into an abstract syntax tree, compiled to a
//! flat bytecode program and executed on a stack-based virtual machine.
//!
//! The whole grammar (declarations, functions, blocks, `if`, `while`,
//! arrays, fields and constructors) is parsed. Numeric variables,
//! assignment and arithmetic are compiled and executed.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    error::ParseError,
    interpreter::{compiler::compile, lexer::Scanner, parser::core::parse_program, vm::Vm},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum that represents the syntactic
/// structure of source code as a tree, and the precedence tiers the parser
/// uses to shape binary expressions.
///
/// # Responsibilities
/// - Defines one variant for every expression and statement form.
/// - Attaches source positions to nodes for error reporting.
/// - Renders trees as S-expressions for inspection.
pub mod ast;
/// Provides unified error types for parsing, compilation and execution.
///
/// This module defines all errors that can be raised while scanning, parsing,
/// compiling or executing code. Every error carries the source location it
/// refers to.
///
/// # Responsibilities
/// - Defines one error enum per phase (parser, compiler, virtual machine).
/// - Attaches line and column numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, compilation and execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, compiler and virtual
///   machine.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

pub use interpreter::lexer::tokenize;

/// Parses source text into one tree per top-level statement.
///
/// # Errors
/// Returns a `ParseError` for the first lexical or grammar error.
///
/// # Examples
/// ```
/// use olang::parse;
///
/// let nodes = parse("var x = 1\nx = x + 2 * 3").unwrap();
/// assert_eq!(nodes.len(), 2);
/// assert_eq!(nodes[1].to_string(), "(= x (+ x (* 2 3)))");
/// ```
pub fn parse(source: &str) -> Result<Vec<ast::Node>, ParseError> {
    let mut scanner = Scanner::new(source);
    let nodes = parse_program(&mut scanner)?;
    debug!(statements = nodes.len(), "source parsed");
    Ok(nodes)
}

/// Runs source text and returns the final value.
///
/// The source is parsed, compiled and executed. The result is the value
/// left on top of the operand stack, which is the value of the last
/// statement that produced one, or `None` when no statement did.
///
/// # Errors
/// Returns an error if parsing, compilation or execution fails.
///
/// # Examples
/// ```
/// use olang::run;
///
/// // The last statement's value is the result.
/// assert_eq!(run("var x = 1\nx = x + 1").unwrap(), Some(2.0));
///
/// // A bare declaration produces no value.
/// assert_eq!(run("var y").unwrap(), None);
///
/// // Reading an undeclared variable is an error.
/// assert!(run("z + 1").is_err());
/// ```
pub fn run(source: &str) -> Result<Option<f64>, Box<dyn std::error::Error>> {
    let nodes = parse(source)?;
    let program = compile(&nodes)?;
    let result = Vm::new(&program).execute()?;
    debug!(?result, "run finished");
    Ok(result)
}
