use std::iter::Peekable;

use crate::{
    ast::{AstNode, BinaryOperator, NodeKind, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, expect, expect_identifier},
            definition::{parse_binding, parse_definition, parse_rec_definition},
        },
    },
};

/// Parses an expression (`E` in the grammar).
///
/// ```text
/// E -> 'let' D 'in' E   => 'let'
///   -> 'fn' Vb+ '.' E   => 'lambda'
///   -> Ew
/// ```
///
/// This is the entry point for expression parsing; everything below `let`
/// and `fn` descends through the precedence hierarchy starting at `where`.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Let, line)) => {
            let line = *line;
            tokens.next();

            let definition = parse_definition(tokens)?;
            expect(tokens, &Token::In, "'in' after the definition")?;
            let body = parse_expression(tokens)?;

            Ok(AstNode::branch(NodeKind::Let, vec![definition, body], line))
        },

        Some((Token::Fn, line)) => {
            let line = *line;
            tokens.next();

            let mut children = vec![parse_binding(tokens)?];
            while matches!(tokens.peek(), Some((Token::Identifier(_) | Token::LParen, _))) {
                children.push(parse_binding(tokens)?);
            }

            expect(tokens, &Token::Dot, "'.' after the parameters")?;
            children.push(parse_expression(tokens)?);

            Ok(AstNode::branch(NodeKind::Lambda, children, line))
        },

        _ => parse_where(tokens),
    }
}

/// Parses a where-expression (`Ew` in the grammar).
///
/// `Ew -> T ('where' Dr)? => 'where'`
fn parse_where<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let term = parse_tuple(tokens)?;

    if let Some((Token::Where, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let definition = parse_rec_definition(tokens)?;
        return Ok(AstNode::branch(NodeKind::Where, vec![term, definition], line));
    }

    Ok(term)
}

/// Parses a tuple expression (`T` in the grammar).
///
/// `T -> Ta (',' Ta)* => 'tau'` when two or more elements are present;
/// a single element passes through unchanged.
fn parse_tuple<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut elements = vec![parse_aug(tokens)?];

    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        elements.push(parse_aug(tokens)?);
    }

    if elements.len() > 1 {
        let line = elements[0].line;
        return Ok(AstNode::branch(NodeKind::Tau, elements, line));
    }

    Ok(elements.remove(0))
}

/// Parses an augmentation expression (`Ta` in the grammar).
///
/// `Ta -> Ta 'aug' Tc | Tc`, left-associative.
fn parse_aug<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_conditional(tokens)?;

    while let Some((Token::Aug, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_conditional(tokens)?;
        left = AstNode::branch(NodeKind::Binary(BinaryOperator::Aug), vec![left, right], line);
    }

    Ok(left)
}

/// Parses a conditional expression (`Tc` in the grammar).
///
/// `Tc -> B '->' Tc '|' Tc | B`, right-associative in both branches.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_or(tokens)?;

    if let Some((Token::Arrow, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let then_branch = parse_conditional(tokens)?;
        expect(tokens, &Token::Pipe, "'|' between the conditional branches")?;
        let else_branch = parse_conditional(tokens)?;

        return Ok(AstNode::branch(NodeKind::Conditional,
                                  vec![condition, then_branch, else_branch],
                                  line));
    }

    Ok(condition)
}

/// Parses a boolean expression (`B` in the grammar).
///
/// `B -> B 'or' Bt | Bt`, left-associative.
fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_and(tokens)?;

    while let Some((Token::Or, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_and(tokens)?;
        left = AstNode::branch(NodeKind::Binary(BinaryOperator::Or), vec![left, right], line);
    }

    Ok(left)
}

/// Parses a boolean term (`Bt` in the grammar).
///
/// `Bt -> Bt '&' Bs | Bs`, left-associative.
fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_not(tokens)?;

    while let Some((Token::Ampersand, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_not(tokens)?;
        left = AstNode::branch(NodeKind::Binary(BinaryOperator::Amp), vec![left, right], line);
    }

    Ok(left)
}

/// Parses a boolean factor (`Bs` in the grammar).
///
/// `Bs -> 'not' Bp | Bp`
fn parse_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let operand = parse_comparison(tokens)?;
        return Ok(AstNode::branch(NodeKind::Unary(UnaryOperator::Not), vec![operand], line));
    }

    parse_comparison(tokens)
}

/// Parses a comparison (`Bp` in the grammar).
///
/// A single, non-associative comparison between two arithmetic expressions.
/// Both keyword (`gr`, `ge`, `ls`, `le`) and symbolic (`>`, `>=`, `<`, `<=`)
/// spellings are accepted and normalized to the keyword operator.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_comparison(token)
    {
        let line = *line;
        tokens.next();

        let right = parse_additive(tokens)?;
        return Ok(AstNode::branch(NodeKind::Binary(op), vec![left, right], line));
    }

    Ok(left)
}

/// Parses an arithmetic expression (`A` in the grammar).
///
/// Handles the optional leading unary `+`/`-` (the `-` becomes `neg`) and
/// the left-associative additive chain.
fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = match tokens.peek() {
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_multiplicative(tokens)?
        },
        Some((Token::Minus, line)) => {
            let line = *line;
            tokens.next();

            let operand = parse_multiplicative(tokens)?;
            AstNode::branch(NodeKind::Unary(UnaryOperator::Neg), vec![operand], line)
        },
        _ => parse_multiplicative(tokens)?,
    };

    loop {
        let op = match tokens.peek() {
            Some((Token::Plus, _)) => BinaryOperator::Plus,
            Some((Token::Minus, _)) => BinaryOperator::Minus,
            _ => break,
        };
        let line = match tokens.next() {
            Some((_, line)) => *line,
            None => break,
        };

        let right = parse_multiplicative(tokens)?;
        left = AstNode::branch(NodeKind::Binary(op), vec![left, right], line);
    }

    Ok(left)
}

/// Parses an arithmetic term (`At` in the grammar).
///
/// `At -> At ('*' | '/') Af | Af`, left-associative.
fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_power(tokens)?;

    loop {
        let op = match tokens.peek() {
            Some((Token::Star, _)) => BinaryOperator::Times,
            Some((Token::Slash, _)) => BinaryOperator::Divide,
            _ => break,
        };
        let line = match tokens.next() {
            Some((_, line)) => *line,
            None => break,
        };

        let right = parse_power(tokens)?;
        left = AstNode::branch(NodeKind::Binary(op), vec![left, right], line);
    }

    Ok(left)
}

/// Parses an exponentiation (`Af` in the grammar).
///
/// `Af -> Ap '**' Af | Ap`; the recursion on the right operand makes the
/// operator right-associative.
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_infix(tokens)?;

    if let Some((Token::StarStar, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_power(tokens)?;
        return Ok(AstNode::branch(NodeKind::Binary(BinaryOperator::Power),
                                  vec![left, right],
                                  line));
    }

    Ok(left)
}

/// Parses infix operator application (`Ap` in the grammar).
///
/// `Ap -> Ap '@' <identifier> R | R`, left-associative. The identifier
/// names the function applied to both operands.
fn parse_infix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_application(tokens)?;

    while let Some((Token::At, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let (name, name_line) = expect_identifier(tokens)?;
        let id = AstNode::leaf(NodeKind::Identifier(name), name_line);
        let right = parse_application(tokens)?;

        left = AstNode::branch(NodeKind::At, vec![left, id, right], line);
    }

    Ok(left)
}

/// Parses function application by juxtaposition (`R` in the grammar).
///
/// `R -> R Rn | Rn => 'gamma'`, left-associative. An application continues
/// as long as the next token can begin an operand.
fn parse_application<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_operand(tokens)?;

    while let Some((token, _)) = tokens.peek()
          && starts_operand(token)
    {
        let right = parse_operand(tokens)?;
        let line = left.line;
        left = AstNode::branch(NodeKind::Gamma, vec![left, right], line);
    }

    Ok(left)
}

/// Parses an operand (`Rn` in the grammar): an identifier, a literal, or a
/// parenthesized expression.
fn parse_operand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => {
            Ok(AstNode::leaf(NodeKind::Identifier(name.clone()), *line))
        },
        Some((Token::Integer(value), line)) => Ok(AstNode::leaf(NodeKind::Integer(*value), *line)),
        Some((Token::StringLiteral(text), line)) => {
            Ok(AstNode::leaf(NodeKind::Str(text.clone()), *line))
        },
        Some((Token::True, line)) => Ok(AstNode::leaf(NodeKind::True, *line)),
        Some((Token::False, line)) => Ok(AstNode::leaf(NodeKind::False, *line)),
        Some((Token::Nil, line)) => Ok(AstNode::leaf(NodeKind::Nil, *line)),
        Some((Token::Dummy, line)) => Ok(AstNode::leaf(NodeKind::Dummy, *line)),
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')' after the expression")?;
            Ok(expr)
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { expected: "an identifier, a literal or '('".to_string(),
                                              found:    format!("{tok:?}"),
                                              line:     *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Returns `true` when `token` can begin an operand, which is what makes a
/// juxtaposed application continue.
const fn starts_operand(token: &Token) -> bool {
    matches!(token,
             Token::Identifier(_)
             | Token::Integer(_)
             | Token::StringLiteral(_)
             | Token::True
             | Token::False
             | Token::Nil
             | Token::Dummy
             | Token::LParen)
}

/// Maps a token to its comparison operator, folding the symbolic spellings
/// into the keyword forms.
const fn token_to_comparison(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Gr | Token::Greater => Some(BinaryOperator::Gr),
        Token::Ge | Token::GreaterEqual => Some(BinaryOperator::Ge),
        Token::Ls | Token::Less => Some(BinaryOperator::Ls),
        Token::Le | Token::LessEqual => Some(BinaryOperator::Le),
        Token::Eq => Some(BinaryOperator::Eq),
        Token::Ne => Some(BinaryOperator::Ne),
        _ => None,
    }
}
