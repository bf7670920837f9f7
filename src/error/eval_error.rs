#[derive(Debug)]
/// Represents all errors that can be raised by the CSE machine.
pub enum EvalError {
    /// An identifier had no binding in any enclosing environment.
    UnboundIdentifier {
        /// The name of the identifier.
        name: String,
    },
    /// Tried to apply a value that is not a function or tuple.
    ApplyNonFunction {
        /// A description of the value found in operator position.
        found: String,
    },
    /// A value had a type the operation cannot work with.
    TypeMismatch {
        /// The operation or built-in that was applied.
        operation: String,
        /// The kind of operand the operation needs.
        expected:  String,
        /// A description of the operand actually found.
        found:     String,
    },
    /// Tuple selection with an index outside `1..=length`.
    TupleIndexOutOfRange {
        /// The requested 1-based index.
        index:  i64,
        /// The length of the tuple.
        length: usize,
    },
    /// A tuple of bindings did not match the parameter list.
    BindingArityMismatch {
        /// The number of parameters to bind.
        expected: usize,
        /// The number of values supplied.
        found:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed.
    Overflow {
        /// The operation that overflowed.
        operation: String,
    },
    /// A built-in or operator received a value it cannot accept.
    InvalidArgument {
        /// The operation that was applied.
        operation: String,
        /// Details about why the argument is invalid.
        details:   String,
    },
    /// A surface-syntax label survived into the standardized tree.
    UnstandardizedNode {
        /// The offending label.
        label: String,
    },
    /// The machine's stack or control was exhausted mid-rule.
    StackUnderflow,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundIdentifier { name } => {
                write!(f, "Evaluation error: identifier '{name}' is not defined.")
            },
            Self::ApplyNonFunction { found } => {
                write!(f, "Evaluation error: cannot apply a {found} as a function.")
            },
            Self::TypeMismatch { operation,
                                 expected,
                                 found, } => write!(f,
                                                    "Evaluation error: '{operation}' expects {expected}, found {found}."),

            Self::TupleIndexOutOfRange { index, length } => write!(f,
                                                                   "Evaluation error: tuple index {index} is out of range for a tuple of {length} elements."),

            Self::BindingArityMismatch { expected, found } => write!(f,
                                                                     "Evaluation error: expected a tuple of {expected} values to bind, found {found}."),

            Self::DivisionByZero => write!(f, "Evaluation error: division by zero."),
            Self::Overflow { operation } => {
                write!(f, "Evaluation error: integer overflow in '{operation}'.")
            },
            Self::InvalidArgument { operation, details } => {
                write!(f, "Evaluation error: invalid argument to '{operation}': {details}.")
            },
            Self::UnstandardizedNode { label } => write!(f,
                                                         "Evaluation error: unstandardized node '{label}' reached the machine."),

            Self::StackUnderflow => {
                write!(f, "Evaluation error: machine stack exhausted mid-rule.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
