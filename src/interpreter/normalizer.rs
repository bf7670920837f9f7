use crate::{
    ast::{AstNode, NodeKind},
    error::NormalizeError,
};

pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Rewrites an abstract syntax tree into its standardized form.
///
/// The rewrites are local and applied bottom-up: children are standardized
/// first, then the node itself. Each surface construct reduces to the core
/// grammar of `lambda`, `gamma`, `->`, `tau`, `=` and `<Y*>`:
///
/// - `let (= (X, P), E)`      becomes `gamma (lambda (X, E), P)`
/// - `where (E, D)`           swaps into let shape and reuses that rule
/// - `function_form`          curries into `= (F, lambda (V1, ... E))`
/// - multi-parameter `lambda` curries into nested single-parameter lambdas
/// - `within`                 becomes `= (X2, gamma (lambda (X1, E2), E1))`
/// - `and`                    becomes `= (, (X1..Xn), tau (E1..En))`
/// - `rec (= (X, E))`         becomes `= (X, gamma (<Y*>, lambda (X, E)))`
/// - `@ (E1, N, E2)`          becomes `gamma (gamma (N, E1), E2)`
///
/// Operators and leaves pass through unchanged.
///
/// # Errors
/// Returns a [`NormalizeError`] when a construct does not have the shape
/// its rewrite relies on, e.g. a `rec` wrapping something other than an
/// `=` definition.
///
/// # Example
/// ```
/// use myrpal::{interpreter::normalizer::normalize, parse_source};
///
/// let ast = parse_source("let x = 1 in x").unwrap();
/// let st = normalize(ast).unwrap();
///
/// assert_eq!(st.dot_lines(),
///            ["gamma", ".lambda", "..<ID:x>", "..<ID:x>", ".<INT:1>"]);
/// ```
pub fn normalize(node: AstNode) -> NormalizeResult<AstNode> {
    let AstNode { kind, children, line } = node;

    let children = children.into_iter()
                           .map(normalize)
                           .collect::<Result<Vec<_>, _>>()?;

    match kind {
        NodeKind::Let => rewrite_let(children, line),
        NodeKind::Where => rewrite_where(children, line),
        NodeKind::FunctionForm => rewrite_function_form(children, line),
        NodeKind::Lambda => Ok(curry_lambda(children, line)),
        NodeKind::Within => rewrite_within(children, line),
        NodeKind::And => rewrite_and(children, line),
        NodeKind::Rec => rewrite_rec(children, line),
        NodeKind::At => Ok(rewrite_at(children, line)),
        kind => Ok(AstNode::branch(kind, children, line)),
    }
}

/// `let (= (X, P), E)` -> `gamma (lambda (X, E), P)`
fn rewrite_let(children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    let Ok([definition, body]) = <[AstNode; 2]>::try_from(children) else {
        return Err(NormalizeError::MalformedLet { found: "wrong number of children".to_string() });
    };

    let (name, value) =
        split_equal(definition).map_err(|found| NormalizeError::MalformedLet { found })?;

    let lambda = AstNode::branch(NodeKind::Lambda, vec![name, body], line);
    Ok(AstNode::branch(NodeKind::Gamma, vec![lambda, value], line))
}

/// `where (E, D)` swaps its children into let shape and reuses the let
/// rewrite.
fn rewrite_where(children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    let Ok([body, definition]) = <[AstNode; 2]>::try_from(children) else {
        return Err(NormalizeError::MalformedLet { found: "wrong number of children".to_string() });
    };

    rewrite_let(vec![definition, body], line)
}

/// `function_form (F, V1..Vn, E)` -> `= (F, lambda (V1, ... lambda (Vn, E)))`
fn rewrite_function_form(mut children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    if children.len() < 3 {
        return Err(NormalizeError::MalformedFunctionForm { found: children.len() });
    }

    let name = children.remove(0);
    let lambda = curry_lambda(children, line);

    Ok(AstNode::branch(NodeKind::Equal, vec![name, lambda], line))
}

/// Curries `lambda (V1..Vn, E)` into nested single-parameter lambdas.
///
/// A lambda that already has one parameter is rebuilt unchanged.
fn curry_lambda(children: Vec<AstNode>, line: usize) -> AstNode {
    if children.len() <= 2 {
        return AstNode::branch(NodeKind::Lambda, children, line);
    }

    let mut iter = children.into_iter().rev();
    let mut result = match iter.next() {
        Some(body) => body,
        None => return AstNode::branch(NodeKind::Lambda, Vec::new(), line),
    };

    for param in iter {
        result = AstNode::branch(NodeKind::Lambda, vec![param, result], line);
    }

    result
}

/// `within (= (X1, E1), = (X2, E2))` ->
/// `= (X2, gamma (lambda (X1, E2), E1))`
fn rewrite_within(children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    let Ok([outer, inner]) = <[AstNode; 2]>::try_from(children) else {
        return Err(NormalizeError::MalformedWithin { found: "wrong number of children".to_string() });
    };

    let (x1, e1) = split_equal(outer).map_err(|found| NormalizeError::MalformedWithin { found })?;
    let (x2, e2) = split_equal(inner).map_err(|found| NormalizeError::MalformedWithin { found })?;

    let lambda = AstNode::branch(NodeKind::Lambda, vec![x1, e2], line);
    let gamma = AstNode::branch(NodeKind::Gamma, vec![lambda, e1], line);

    Ok(AstNode::branch(NodeKind::Equal, vec![x2, gamma], line))
}

/// `and (= (X1, E1), .., = (Xn, En))` -> `= (, (X1..Xn), tau (E1..En))`
///
/// The comma node keeps the bound names together so they later bind
/// pointwise against the tuple the `tau` builds.
fn rewrite_and(children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    let mut names = Vec::with_capacity(children.len());
    let mut values = Vec::with_capacity(children.len());

    for definition in children {
        let (name, value) =
            split_equal(definition).map_err(|found| NormalizeError::MalformedAnd { found })?;
        names.push(name);
        values.push(value);
    }

    let comma = AstNode::branch(NodeKind::Comma, names, line);
    let tau = AstNode::branch(NodeKind::Tau, values, line);

    Ok(AstNode::branch(NodeKind::Equal, vec![comma, tau], line))
}

/// `rec (= (X, E))` -> `= (X, gamma (<Y*>, lambda (X, E)))`
fn rewrite_rec(children: Vec<AstNode>, line: usize) -> NormalizeResult<AstNode> {
    let Ok([definition]) = <[AstNode; 1]>::try_from(children) else {
        return Err(NormalizeError::MalformedRec { found: "wrong number of children".to_string() });
    };

    let (name, value) =
        split_equal(definition).map_err(|found| NormalizeError::MalformedRec { found })?;

    let rebound = name.clone();
    let lambda = AstNode::branch(NodeKind::Lambda, vec![name, value], line);
    let ystar = AstNode::leaf(NodeKind::Ystar, line);
    let gamma = AstNode::branch(NodeKind::Gamma, vec![ystar, lambda], line);

    Ok(AstNode::branch(NodeKind::Equal, vec![rebound, gamma], line))
}

/// `@ (E1, N, E2)` -> `gamma (gamma (N, E1), E2)`
///
/// The parser guarantees three children, so this rewrite cannot fail; a
/// malformed `@` would already have been rejected as a syntax error.
fn rewrite_at(mut children: Vec<AstNode>, line: usize) -> AstNode {
    if children.len() != 3 {
        return AstNode::branch(NodeKind::At, children, line);
    }

    let e2 = children.remove(2);
    let name = children.remove(1);
    let e1 = children.remove(0);

    let inner = AstNode::branch(NodeKind::Gamma, vec![name, e1], line);
    AstNode::branch(NodeKind::Gamma, vec![inner, e2], line)
}

/// Splits an `=` node into its name and value, or reports the label that
/// was found instead.
fn split_equal(node: AstNode) -> Result<(AstNode, AstNode), String> {
    if node.kind != NodeKind::Equal || node.children.len() != 2 {
        return Err(node.kind.label());
    }

    let mut children = node.children;
    let value = children.remove(1);
    let name = children.remove(0);

    Ok((name, value))
}
