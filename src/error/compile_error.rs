#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while compiling the AST to bytecode.
pub enum CompileError {
    /// The construct parses but has no bytecode lowering.
    Unsupported {
        /// A short name of the construct, such as `if statement`.
        construct: &'static str,
        /// The source line of the construct.
        line:      usize,
        /// The source column of the construct.
        column:    usize,
    },
    /// Tried to read or assign a variable that was never declared.
    UndeclaredVariable {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Tried to declare a variable whose name is already taken.
    Redeclaration {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The left-hand side of `=` is neither a declaration nor a variable.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A numeric literal could not be converted to a number.
    InvalidNumber {
        /// The literal text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported { construct,
                                line,
                                column, } => write!(f,
                                                    "Error on line {line}, column {column}: Unsupported operation: {construct} cannot be compiled yet."),

            Self::UndeclaredVariable { name, line, column } => write!(f,
                                                                      "Error on line {line}, column {column}: Unknown variable '{name}'."),

            Self::Redeclaration { name, line, column } => write!(f,
                                                                 "Error on line {line}, column {column}: Variable '{name}' is already declared."),

            Self::InvalidAssignmentTarget { line, column } => write!(f,
                                                                     "Error on line {line}, column {column}: Invalid assignment target."),

            Self::InvalidNumber { text, line, column } => {
                write!(f, "Error on line {line}, column {column}: Invalid number '{text}'.")
            },
        }
    }
}

impl std::error::Error for CompileError {}
