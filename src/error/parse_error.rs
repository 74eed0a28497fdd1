#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during scanning or parsing.
pub enum ParseError {
    /// Found a token that does not fit the grammar at this position.
    UnexpectedToken {
        /// The text of the token encountered.
        token:    String,
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A statement was followed by another token on the same line without a
    /// `;` between them.
    ExpectedTerminator {
        /// The token found after the statement.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The line of the opening quote.
        line:   usize,
        /// The column of the opening quote.
        column: usize,
    },
    /// A `/*` comment was opened but never closed.
    UnterminatedComment {
        /// The line of the opening `/*`.
        line:   usize,
        /// The column of the opening `/*`.
        column: usize,
    },
    /// Parentheses, blocks, signs or postfix accesses are nested deeper than
    /// the parser allows.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:  usize,
        /// The source line where the limit was exceeded.
        line:   usize,
        /// The source column where the limit was exceeded.
        column: usize,
    },
    /// The scanner found a character that starts no token.
    UnrecognizedCharacter {
        /// The offending text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Returns the `(line, column)` the error points at.
    ///
    /// ## Example
    /// ```
    /// use olang::error::ParseError;
    ///
    /// let err = ParseError::UnterminatedString { line: 2, column: 7 };
    /// assert_eq!(err.location(), (2, 7));
    /// ```
    #[must_use]
    pub const fn location(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedToken { line, column, .. }
            | Self::UnexpectedEndOfInput { line, column, .. }
            | Self::ExpectedTerminator { line, column, .. }
            | Self::UnterminatedString { line, column }
            | Self::UnterminatedComment { line, column }
            | Self::NestingTooDeep { line, column, .. }
            | Self::UnrecognizedCharacter { line, column, .. } => (*line, *column),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token,
                                    expected,
                                    line,
                                    column, } => write!(f,
                                                        "Error on line {line}, column {column}: Unexpected token '{token}', expected {expected}."),

            Self::UnexpectedEndOfInput { expected, line, column } => write!(f,
                                                                            "Error on line {line}, column {column}: Unexpected end of input, expected {expected}."),

            Self::ExpectedTerminator { token, line, column } => write!(f,
                                                                       "Error on line {line}, column {column}: Expected ';' or a line break before '{token}'."),

            Self::UnterminatedString { line, column } => {
                write!(f, "Error on line {line}, column {column}: Unterminated string literal.")
            },

            Self::UnterminatedComment { line, column } => {
                write!(f, "Error on line {line}, column {column}: Unterminated block comment.")
            },

            Self::NestingTooDeep { limit, line, column } => write!(f,
                                                                  "Error on line {line}, column {column}: Expression nested more than {limit} levels deep."),

            Self::UnrecognizedCharacter { text, line, column } => {
                write!(f, "Error on line {line}, column {column}: Unrecognized input '{text}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
