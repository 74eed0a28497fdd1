/// Parser entry points.
///
/// Contains the program loop, the expression entry point and the shared
/// result type.
pub mod core;

/// Unary, primary and postfix expressions.
///
/// Handles prefix signs, literals, identifiers, calls, groupings,
/// declarations, constructors, and the `[..]` and `.` postfixes.
pub mod unary;

/// Binary expressions.
///
/// Builds operator chains left to right and repairs their shape with a
/// right-spine splice so that precedence ends up in the tree structure.
pub mod binary;

/// Scope block parsing.
///
/// Parses `{ ... }` statement lists used as function and loop bodies and as
/// standalone statements.
pub mod block;

/// Statement parsing.
///
/// Dispatches between control-flow statements, function declarations and
/// expression statements, and enforces statement terminators.
pub mod statement;

/// Utility functions for the parser.
///
/// Token expectations, identifier parsing, comma-separated lists, the
/// nesting limit and error construction.
pub mod utils;
