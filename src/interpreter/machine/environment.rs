use std::collections::HashMap;

use crate::{
    error::EvalError,
    interpreter::value::{Builtin, EvalResult, Value},
};

/// A single environment frame: its bindings and a link to the enclosing
/// frame. Frames are installed at construction and never mutated.
#[derive(Debug)]
struct Frame {
    parent:   Option<usize>,
    bindings: HashMap<String, Value>,
}

/// The environment tree, stored as an arena indexed by creation order.
///
/// Index 0 is the primitive environment holding the built-in functions; it
/// has no parent. Every other frame is created by a lambda application and
/// links to the closure's defining environment. Name resolution walks the
/// parent chain, so the cost of a lookup is the lexical nesting depth of
/// the reference.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates the environment tree with the primitive environment at
    /// index 0.
    #[must_use]
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        for builtin in Builtin::ALL {
            bindings.insert(builtin.name().to_string(), Value::Builtin(builtin));
        }

        Self { frames: vec![Frame { parent: None,
                                    bindings }] }
    }

    /// Adds a frame below `parent` with the given bindings and returns its
    /// index.
    pub fn push_frame(&mut self, parent: usize, bindings: HashMap<String, Value>) -> usize {
        let index = self.frames.len();
        self.frames.push(Frame { parent: Some(parent),
                                 bindings });
        index
    }

    /// Resolves `name` starting at the frame `index`, walking parent links
    /// until a binding is found.
    ///
    /// # Errors
    /// Returns [`EvalError::UnboundIdentifier`] when no enclosing frame
    /// binds the name.
    pub fn lookup(&self, index: usize, name: &str) -> EvalResult<Value> {
        let mut current = Some(index);

        while let Some(frame_index) = current {
            let frame = &self.frames[frame_index];
            if let Some(value) = frame.bindings.get(name) {
                return Ok(value.clone());
            }
            current = frame.parent;
        }

        Err(EvalError::UnboundIdentifier { name: name.to_string() })
    }
}
