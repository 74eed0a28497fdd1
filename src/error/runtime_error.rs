#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while the virtual machine executes a
/// program.
pub enum RuntimeError {
    /// An instruction tried to pop from an empty operand stack.
    StackUnderflow {
        /// Index of the instruction that underflowed.
        instruction: usize,
    },
    /// A declared variable was read before anything was stored in it.
    UninitializedLocal {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StackUnderflow { instruction } => {
                write!(f, "Error at instruction {instruction}: Operand stack underflow.")
            },
            Self::UninitializedLocal { name, line, column } => write!(f,
                                                                      "Error on line {line}, column {column}: Variable '{name}' is read before it is assigned."),
        }
    }
}

impl std::error::Error for RuntimeError {}
