#[derive(Debug)]
/// Represents all errors that can occur during lexical analysis.
pub enum LexError {
    /// Found a character that cannot start any token.
    UnrecognizedCharacter {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the string starts.
        line: usize,
    },
    /// An integer literal does not fit into a 64-bit integer.
    IntegerTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter { text, line } => {
                write!(f, "Lexical error on line {line}: unrecognized character '{text}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Lexical error on line {line}: unterminated string literal.")
            },
            Self::IntegerTooLarge { line } => {
                write!(f, "Lexical error on line {line}: integer literal is too large.")
            },
        }
    }
}

impl std::error::Error for LexError {}
