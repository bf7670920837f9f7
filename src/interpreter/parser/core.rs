use std::iter::Peekable;

use crate::{
    ast::AstNode,
    error::ParseError,
    interpreter::{lexer::Token, parser::expression::parse_expression},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program from a token stream.
///
/// A program is a single expression; anything left over after it is a parse
/// error. This is the only entry point the pipeline uses.
///
/// # Parameters
/// - `tokens`: The `(token, line)` pairs produced by the lexer.
///
/// # Returns
/// The root node of the abstract syntax tree.
///
/// # Errors
/// Returns a `ParseError` when the token stream is empty, malformed, or has
/// trailing tokens after a complete expression.
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<AstNode> {
    let mut iter = tokens.iter().peekable();

    let root = parse_expression(&mut iter)?;

    if let Some((tok, line)) = iter.peek() {
        return Err(ParseError::UnexpectedTrailingTokens { found: format!("{tok:?}"),
                                                          line:  *line, });
    }

    Ok(root)
}

/// Consumes the next token, requiring it to equal `token`.
///
/// Returns the line of the consumed token so callers can attach it to the
/// node they are building.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    token: &Token,
                                                    expected: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == token => Ok(*line),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                              found:    format!("{tok:?}"),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, requiring an identifier, and returns its name
/// and line.
pub(in crate::interpreter::parser) fn expect_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => Ok((name.clone(), *line)),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                              found:    format!("{tok:?}"),
                                              line:     *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
