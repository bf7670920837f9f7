/// Lexical errors.
///
/// Defines all error types that can occur while scanning source text into
/// tokens, such as unrecognized characters or unterminated string literals.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while parsing the token stream
/// into an abstract syntax tree: unexpected tokens, premature end of input,
/// and trailing tokens after a complete program.
pub mod parse_error;
/// Normalization errors.
///
/// Contains the error types raised when an abstract syntax tree has a shape
/// that the standardizing rewrites cannot handle.
pub mod normalize_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised by the CSE machine during
/// execution: unbound identifiers, type mismatches, division by zero,
/// tuple indexing faults, and arity mismatches.
pub mod eval_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
pub use normalize_error::NormalizeError;
pub use parse_error::ParseError;
