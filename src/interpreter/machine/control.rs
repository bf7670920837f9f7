use std::rc::Rc;

use crate::{
    ast::{AstNode, BinaryOperator, NodeKind, UnaryOperator},
    error::EvalError,
    interpreter::value::EvalResult,
};

/// One element of a control structure.
///
/// Control items are what the machine consumes, right end first. Literals
/// and identifiers push values; the structural items drive the transition
/// rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlItem {
    /// An integer literal.
    Integer(i64),
    /// A string literal.
    Str(String),
    /// A truth-value literal.
    Bool(bool),
    /// The `nil` literal (empty tuple).
    Nil,
    /// The `dummy` literal.
    Dummy,
    /// The fixed-point combinator.
    Ystar,
    /// An identifier to resolve in the current environment.
    Identifier(String),
    /// A lambda marker: the body's structure index and the bound names.
    Lambda {
        /// Index of the body's control structure.
        index:  usize,
        /// The bound-variable names; empty for a `()` parameter.
        params: Rc<Vec<String>>,
    },
    /// Function application.
    Gamma,
    /// Conditional branch selection; preceded in the structure by the two
    /// branch references.
    Beta,
    /// Tuple construction from the top `n` stack values.
    Tau(usize),
    /// A reference to another control structure, spliced in when reached.
    Delta(usize),
    /// A binary operator.
    Binary(BinaryOperator),
    /// A unary operator.
    Unary(UnaryOperator),
    /// An environment exit marker, pushed at application time.
    Env(usize),
}

/// The indexed table of flattened control structures. Structure 0 is the
/// program's root.
#[derive(Debug)]
pub struct ControlStructures {
    /// The structures, indexed by the delta number the items refer to.
    pub structures: Vec<Vec<ControlItem>>,
}

/// Flattens a standardized tree into its control-structure table.
///
/// Flattening is pre-order. Each lambda's body and each conditional branch
/// is hoisted into a structure of its own; a conditional becomes
/// `[delta-then, delta-else, beta, condition...]` so that the condition is
/// consumed first and `beta` then discards the losing branch.
///
/// # Errors
/// Returns an [`EvalError`] if a surface-syntax label survived into the
/// tree, which means the input was never standardized.
pub fn flatten(root: &AstNode) -> EvalResult<ControlStructures> {
    let mut table = ControlStructures { structures: Vec::new() };
    table.add_structure(root)?;
    Ok(table)
}

impl ControlStructures {
    /// Flattens `node` into a fresh structure and returns its index.
    fn add_structure(&mut self, node: &AstNode) -> EvalResult<usize> {
        let index = self.structures.len();
        self.structures.push(Vec::new());

        let mut items = Vec::new();
        self.emit(node, &mut items)?;
        self.structures[index] = items;

        Ok(index)
    }

    /// Emits `node` and its descendants onto `items` in pre-order.
    fn emit(&mut self, node: &AstNode, items: &mut Vec<ControlItem>) -> EvalResult<()> {
        match &node.kind {
            NodeKind::Lambda if node.children.len() == 2 => {
                let params = bound_names(&node.children[0])?;
                let index = self.add_structure(&node.children[1])?;

                items.push(ControlItem::Lambda { index,
                                                 params: Rc::new(params) });
            },

            NodeKind::Conditional if node.children.len() == 3 => {
                let then_index = self.add_structure(&node.children[1])?;
                let else_index = self.add_structure(&node.children[2])?;

                items.push(ControlItem::Delta(then_index));
                items.push(ControlItem::Delta(else_index));
                items.push(ControlItem::Beta);
                self.emit(&node.children[0], items)?;
            },

            _ => {
                items.push(leaf_item(node)?);
                for child in &node.children {
                    self.emit(child, items)?;
                }
            },
        }

        Ok(())
    }
}

/// Maps a non-hoisted node to its control item.
fn leaf_item(node: &AstNode) -> EvalResult<ControlItem> {
    match &node.kind {
        NodeKind::Gamma => Ok(ControlItem::Gamma),
        NodeKind::Tau => Ok(ControlItem::Tau(node.children.len())),
        NodeKind::Binary(op) => Ok(ControlItem::Binary(*op)),
        NodeKind::Unary(op) => Ok(ControlItem::Unary(*op)),
        NodeKind::Identifier(name) => Ok(ControlItem::Identifier(name.clone())),
        NodeKind::Integer(value) => Ok(ControlItem::Integer(*value)),
        NodeKind::Str(text) => Ok(ControlItem::Str(text.clone())),
        NodeKind::True => Ok(ControlItem::Bool(true)),
        NodeKind::False => Ok(ControlItem::Bool(false)),
        NodeKind::Nil => Ok(ControlItem::Nil),
        NodeKind::Dummy => Ok(ControlItem::Dummy),
        NodeKind::Ystar => Ok(ControlItem::Ystar),

        other => Err(EvalError::UnstandardizedNode { label: other.label() }),
    }
}

/// Extracts the bound-variable names from a lambda's binding child: a
/// single identifier, a comma list of identifiers, or the empty parameter
/// list.
fn bound_names(binding: &AstNode) -> EvalResult<Vec<String>> {
    match &binding.kind {
        NodeKind::Identifier(name) => Ok(vec![name.clone()]),
        NodeKind::EmptyParams => Ok(Vec::new()),
        NodeKind::Comma => {
            let mut names = Vec::with_capacity(binding.children.len());
            for child in &binding.children {
                match &child.kind {
                    NodeKind::Identifier(name) => names.push(name.clone()),
                    other => {
                        return Err(EvalError::UnstandardizedNode { label: other.label() });
                    },
                }
            }
            Ok(names)
        },

        other => Err(EvalError::UnstandardizedNode { label: other.label() }),
    }
}
