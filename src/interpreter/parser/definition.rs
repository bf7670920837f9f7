use std::iter::Peekable;

use crate::{
    ast::{AstNode, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, expect, expect_identifier},
            expression::parse_expression,
        },
    },
};

/// Parses a definition (`D` in the grammar).
///
/// `D -> Da 'within' D | Da`
pub fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_and_definition(tokens)?;

    if let Some((Token::Within, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_definition(tokens)?;
        return Ok(AstNode::branch(NodeKind::Within, vec![left, right], line));
    }

    Ok(left)
}

/// Parses simultaneous definitions (`Da` in the grammar).
///
/// `Da -> Dr ('and' Dr)+ => 'and' | Dr`
fn parse_and_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut definitions = vec![parse_rec_definition(tokens)?];

    while let Some((Token::And, _)) = tokens.peek() {
        tokens.next();
        definitions.push(parse_rec_definition(tokens)?);
    }

    if definitions.len() > 1 {
        let line = definitions[0].line;
        return Ok(AstNode::branch(NodeKind::And, definitions, line));
    }

    Ok(definitions.remove(0))
}

/// Parses a possibly recursive definition (`Dr` in the grammar).
///
/// `Dr -> 'rec' Db => 'rec' | Db`
pub fn parse_rec_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Rec, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let definition = parse_basic_definition(tokens)?;
        return Ok(AstNode::branch(NodeKind::Rec, vec![definition], line));
    }

    parse_basic_definition(tokens)
}

/// Parses a basic definition (`Db` in the grammar).
///
/// ```text
/// Db -> Vl '=' E                 => '='
///    -> <identifier> Vb+ '=' E   => 'function_form'
///    -> '(' D ')'
/// ```
///
/// An identifier followed by another identifier or `(` starts a function
/// form; otherwise the identifier begins a variable list. One token of
/// lookahead decides, with a cloned iterator as the checkpoint so the
/// variable-list path can re-read the first identifier.
fn parse_basic_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();

            let definition = parse_definition(tokens)?;
            expect(tokens, &Token::RParen, "')' after the definition")?;
            Ok(definition)
        },

        Some((Token::Identifier(name), line)) => {
            let name = name.clone();
            let line = *line;
            let checkpoint = tokens.clone();
            tokens.next();

            if matches!(tokens.peek(), Some((Token::Identifier(_) | Token::LParen, _))) {
                // Function form: the name, one or more bindings, then '='.
                let mut children = vec![AstNode::leaf(NodeKind::Identifier(name), line)];
                while matches!(tokens.peek(), Some((Token::Identifier(_) | Token::LParen, _))) {
                    children.push(parse_binding(tokens)?);
                }

                expect(tokens, &Token::Equals, "'=' in the function definition")?;
                children.push(parse_expression(tokens)?);

                return Ok(AstNode::branch(NodeKind::FunctionForm, children, line));
            }

            *tokens = checkpoint;
            let names = parse_variable_list(tokens)?;

            expect(tokens, &Token::Equals, "'=' in the definition")?;
            let value = parse_expression(tokens)?;

            Ok(AstNode::branch(NodeKind::Equal, vec![names, value], line))
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "a definition".to_string(),
                                              found:    format!("{tok:?}"),
                                              line:     *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a variable binding (`Vb` in the grammar): a plain identifier, a
/// parenthesized variable list, or the empty parameter list `()`.
pub fn parse_binding<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => {
            Ok(AstNode::leaf(NodeKind::Identifier(name.clone()), *line))
        },

        Some((Token::LParen, line)) => {
            if let Some((Token::RParen, _)) = tokens.peek() {
                tokens.next();
                return Ok(AstNode::leaf(NodeKind::EmptyParams, *line));
            }

            let list = parse_variable_list(tokens)?;
            expect(tokens, &Token::RParen, "')' after the variable list")?;
            Ok(list)
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "a variable binding".to_string(),
                                              found:    format!("{tok:?}"),
                                              line:     *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a variable list (`Vl` in the grammar).
///
/// A single identifier stays a leaf; two or more become a `,` node with one
/// identifier child per name.
fn parse_variable_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (first, line) = expect_identifier(tokens)?;
    let mut names = vec![AstNode::leaf(NodeKind::Identifier(first), line)];

    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();

        let (name, name_line) = expect_identifier(tokens)?;
        names.push(AstNode::leaf(NodeKind::Identifier(name), name_line));
    }

    if names.len() > 1 {
        return Ok(AstNode::branch(NodeKind::Comma, names, line));
    }

    Ok(names.remove(0))
}
