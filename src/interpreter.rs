/// The lexer module tokenizes RPAL source for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a meaningful language element: keywords,
/// identifiers, literals, operators, and punctuation. This is the first
/// stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input character stream into `(token, line)` pairs.
/// - Handles integer and string literals (with escape decoding),
///   identifiers, keywords, and the operator symbols.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that mirrors the source structure. It implements the
/// language's twenty-three productions by recursive descent with a single
/// token of lookahead.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting errors with location info.
/// - Preserves the surface forms (`let`, `where`, `within`, `and`, ...)
///   for standardization.
pub mod parser;
/// The normalizer rewrites the AST into its standardized form.
///
/// Standardization reduces every surface binding construct to the core
/// grammar of `lambda`, `gamma`, `->`, `tau`, `=` and `<Y*>` through local
/// bottom-up rewrites, leaving a tree the CSE machine can flatten and
/// execute.
pub mod normalizer;
/// The machine module executes standardized trees.
///
/// The CSE (Control-Stack-Environment) machine flattens the standardized
/// tree into indexed control structures and runs them under lexical
/// environments, applying the thirteen transition rules until the control
/// is exhausted.
///
/// # Responsibilities
/// - Flattens lambda bodies and conditional branches into a structure
///   table.
/// - Evaluates applications, recursion via the fixed-point combinator,
///   tuples, conditionals, operators, and the built-in functions.
/// - Reports runtime errors such as unbound identifiers or division by
///   zero.
pub mod machine;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all values the machine manipulates: integers,
/// strings, truth values, tuples, `dummy`, closures, recursion points,
/// and built-in functions, together with conversion helpers and display
/// forms.
pub mod value;
