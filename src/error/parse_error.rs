#[derive(Debug)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of what the parser expected.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The last source line seen, or 0 when unknown.
        line: usize,
    },
    /// Found extra tokens after a complete program.
    UnexpectedTrailingTokens {
        /// The first extra token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f, "Parse error on line {line}: expected {expected}, found {found}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Parse error on line {line}: unexpected end of input.")
            },

            Self::UnexpectedTrailingTokens { found, line } => write!(f,
                                                                     "Parse error on line {line}: extra tokens after expression: {found}."),
        }
    }
}

impl std::error::Error for ParseError {}
