//! # myrpal
//!
//! myrpal is a compiler and evaluator for RPAL, an applicative,
//! lexically-scoped functional language with recursive bindings, tuples,
//! and higher-order functions. Source text is tokenized, parsed into an
//! abstract syntax tree, standardized into a small core grammar, and
//! executed on a CSE (Control-Stack-Environment) machine.

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
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    lexer::tokenize,
    machine::{control::flatten, core::Machine},
    normalizer::normalize,
    parser::core::parse,
    value::Value,
};

/// Defines the structure of parsed and standardized code.
///
/// This module declares the `AstNode` tree and related types that
/// represent source structure, along with the dot-indented printer used by
/// the `-ast` and `-sast` output modes.
///
/// # Responsibilities
/// - Defines the node labels for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Renders trees in their printable form.
pub mod ast;
/// Provides one error type per pipeline stage.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, standardizing, or evaluating a program. Each stage has its own
/// enum carrying the details of the failure and, where available, the
/// source line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line numbers and messages for context.
/// - Integrates with the standard error traits for reporting.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together the lexer, parser, normalizer, value model,
/// and CSE machine to provide the complete pipeline from source text to
/// result.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for each stage of the pipeline.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// The outcome of evaluating a program.
#[derive(Debug)]
pub struct Evaluation {
    /// Everything the program emitted through `Print`, in program order.
    pub printed: String,
    /// The program's final value.
    pub value:   Value,
}

/// Lexes and parses a program, returning its abstract syntax tree.
///
/// # Errors
/// Returns an error if lexing or parsing fails.
///
/// # Examples
/// ```
/// use myrpal::parse_source;
///
/// let ast = parse_source("let x = 1 in x").unwrap();
/// assert_eq!(ast.dot_lines().first().map(String::as_str), Some("let"));
/// ```
pub fn parse_source(source: &str) -> Result<ast::AstNode, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let root = parse(&tokens)?;
    Ok(root)
}

/// Lexes, parses and standardizes a program, returning its standardized
/// tree.
///
/// # Errors
/// Returns an error if lexing, parsing or standardization fails.
pub fn standardize_source(source: &str) -> Result<ast::AstNode, Box<dyn std::error::Error>> {
    let root = parse_source(source)?;
    let standardized = normalize(root)?;
    Ok(standardized)
}

/// Runs a program through the full pipeline and returns its output.
///
/// The returned [`Evaluation`] carries both the text emitted by `Print`
/// during execution and the program's final value; the caller decides
/// which of the two to show.
///
/// # Errors
/// Returns an error if any stage of the pipeline fails, or if any runtime
/// error occurs.
///
/// # Examples
/// ```
/// use myrpal::evaluate;
///
/// // A plain expression: nothing is printed, the value is the result.
/// let result = evaluate("let x = 5 in x + 3").unwrap();
/// assert_eq!(result.value.to_string(), "8");
/// assert!(result.printed.is_empty());
///
/// // An unbound identifier is an evaluation error.
/// assert!(evaluate("let y = x + 1 in y").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Evaluation, Box<dyn std::error::Error>> {
    let standardized = standardize_source(source)?;
    let table = flatten(&standardized)?;

    let machine = Machine::new(table);
    let (printed, value) = machine.run()?;

    Ok(Evaluation { printed, value })
}
