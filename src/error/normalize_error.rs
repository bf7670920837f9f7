#[derive(Debug)]
/// Represents all errors that can occur while standardizing a syntax tree.
///
/// The parser only produces well-shaped trees, so these errors surface when
/// a tree constructed by other means violates the shapes the rewrite rules
/// rely on.
pub enum NormalizeError {
    /// A `let` whose definition did not standardize to an `=` binding.
    MalformedLet {
        /// The label actually found in the definition position.
        found: String,
    },
    /// A `within` whose sides are not both `=` bindings.
    MalformedWithin {
        /// The label actually found.
        found: String,
    },
    /// An `and` with a child that is not an `=` binding.
    MalformedAnd {
        /// The label actually found.
        found: String,
    },
    /// A `rec` wrapping something other than an `=` binding.
    MalformedRec {
        /// The label actually found.
        found: String,
    },
    /// A `function_form` without a name, parameters, and a body.
    MalformedFunctionForm {
        /// The number of children found.
        found: usize,
    },
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLet { found } => write!(f,
                                                   "Normalization error: 'let' needs an '=' definition, found '{found}'."),

            Self::MalformedWithin { found } => write!(f,
                                                      "Normalization error: 'within' needs '=' definitions on both sides, found '{found}'."),

            Self::MalformedAnd { found } => write!(f,
                                                   "Normalization error: 'and' joins '=' definitions, found '{found}'."),

            Self::MalformedRec { found } => write!(f,
                                                   "Normalization error: 'rec' must wrap an '=' definition, found '{found}'."),

            Self::MalformedFunctionForm { found } => write!(f,
                                                            "Normalization error: function form needs a name, parameters and a body, found {found} children."),
        }
    }
}

impl std::error::Error for NormalizeError {}
