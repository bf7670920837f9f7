use std::rc::Rc;

use crate::error::EvalError;

/// Result type used by the CSE machine.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Represents a runtime value of the CSE machine.
///
/// This enum models everything that can live on the machine's stack, be
/// bound in an environment, or be produced as the result of a program.
/// The empty tuple doubles as the `nil` literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A string (escape sequences already decoded).
    Str(String),
    /// A truth value.
    Bool(bool),
    /// An ordered tuple of values; the empty tuple is `nil`.
    Tuple(Rc<Vec<Self>>),
    /// The `dummy` literal.
    Dummy,
    /// The fixed-point combinator awaiting its lambda.
    Ystar,
    /// A lambda closure over its defining environment.
    Closure(Closure),
    /// A closure marked as a recursion point; applying it unrolls the
    /// fixed point one step.
    Eta(Closure),
    /// A built-in function.
    Builtin(Builtin),
    /// A curried built-in holding its first argument (`Conc s1`).
    Partial(Builtin, Box<Self>),
}

/// A lambda closure: the bound parameter names, the index of the control
/// structure holding the body, and the environment the lambda was created
/// in.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    /// The bound-variable names, in binding order. Empty for a `()`
    /// parameter.
    pub params: Rc<Vec<String>>,
    /// Index of the body's control structure.
    pub body:   usize,
    /// Index of the defining environment.
    pub env:    usize,
}

/// The built-in functions of the primitive environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Builtin {
    /// Emits a value's display form to the output.
    Print,
    /// First character of a string.
    Stem,
    /// All but the first character of a string.
    Stern,
    /// Curried string concatenation.
    Conc,
    /// Number of elements in a tuple.
    Order,
    /// Tests for the empty tuple or empty string.
    Null,
    /// Integer type predicate.
    IsInteger,
    /// String type predicate.
    IsString,
    /// Truth-value type predicate.
    IsTruthValue,
    /// Function type predicate.
    IsFunction,
    /// Dummy type predicate.
    IsDummy,
    /// Tuple type predicate.
    IsTuple,
    /// Integer to string conversion.
    ItoS,
    /// Integer negation.
    Neg,
}

impl Builtin {
    /// Every built-in, in the order they are installed into the primitive
    /// environment.
    pub const ALL: [Self; 14] = [Self::Print,
                                 Self::Stem,
                                 Self::Stern,
                                 Self::Conc,
                                 Self::Order,
                                 Self::Null,
                                 Self::IsInteger,
                                 Self::IsString,
                                 Self::IsTruthValue,
                                 Self::IsFunction,
                                 Self::IsDummy,
                                 Self::IsTuple,
                                 Self::ItoS,
                                 Self::Neg];

    /// The name a program uses to refer to this built-in.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::Stem => "Stem",
            Self::Stern => "Stern",
            Self::Conc => "Conc",
            Self::Order => "Order",
            Self::Null => "Null",
            Self::IsInteger => "Isinteger",
            Self::IsString => "Isstring",
            Self::IsTruthValue => "Istruthvalue",
            Self::IsFunction => "Isfunction",
            Self::IsDummy => "Isdummy",
            Self::IsTuple => "Istuple",
            Self::ItoS => "ItoS",
            Self::Neg => "Neg",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Tuple(Rc::new(v))
    }
}

impl Value {
    /// The empty tuple, which is what `nil` evaluates to.
    #[must_use]
    pub fn nil() -> Self {
        Self::Tuple(Rc::new(Vec::new()))
    }

    /// Converts the value to an `i64`, or reports what `operation` found
    /// instead.
    pub fn as_integer(&self, operation: &str) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(type_mismatch(operation, "an integer", other)),
        }
    }

    /// Converts the value to a string slice, or reports what `operation`
    /// found instead.
    pub fn as_string(&self, operation: &str) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(type_mismatch(operation, "a string", other)),
        }
    }

    /// Converts the value to a `bool`, or reports what `operation` found
    /// instead.
    pub fn as_bool(&self, operation: &str) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(type_mismatch(operation, "a truth value", other)),
        }
    }

    /// Borrows the value's tuple elements, or reports what `operation`
    /// found instead.
    pub fn as_tuple(&self, operation: &str) -> EvalResult<&[Self]> {
        match self {
            Self::Tuple(items) => Ok(items),
            other => Err(type_mismatch(operation, "a tuple", other)),
        }
    }

    /// Returns `true` if the value is [`Integer`](Self::Integer).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Str`](Self::Str).
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Str(..))
    }

    /// Returns `true` if the value is a function: a closure, a recursion
    /// point, or a (possibly partially applied) built-in.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self,
                 Self::Closure(..) | Self::Eta(..) | Self::Builtin(..) | Self::Partial(..))
    }

    /// A short description of the value's type, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(..) => "integer",
            Self::Str(..) => "string",
            Self::Bool(..) => "truth value",
            Self::Tuple(..) => "tuple",
            Self::Dummy => "dummy",
            Self::Ystar => "fixed-point combinator",
            Self::Closure(..) => "lambda closure",
            Self::Eta(..) => "eta closure",
            Self::Builtin(..) => "built-in function",
            Self::Partial(..) => "partial application",
        }
    }

    /// Renders a tuple for `-pretty` output: a comma-separated list, sorted
    /// numerically when all elements are integers and lexically when all
    /// are strings. Mixed tuples keep their order; non-tuples render as
    /// usual.
    #[must_use]
    pub fn pretty(&self) -> String {
        let Self::Tuple(items) = self else {
            return self.to_string();
        };
        if items.is_empty() {
            return self.to_string();
        }

        let integers = items.iter()
                            .map(|value| match value {
                                Self::Integer(n) => Some(*n),
                                _ => None,
                            })
                            .collect::<Option<Vec<_>>>();
        if let Some(mut numbers) = integers {
            numbers.sort_unstable();
            return numbers.iter()
                          .map(ToString::to_string)
                          .collect::<Vec<_>>()
                          .join(", ");
        }

        let strings = items.iter()
                           .map(|value| match value {
                               Self::Str(s) => Some(s.as_str()),
                               _ => None,
                           })
                           .collect::<Option<Vec<_>>>();
        if let Some(mut texts) = strings {
            texts.sort_unstable();
            return texts.join(", ");
        }

        items.iter()
             .map(ToString::to_string)
             .collect::<Vec<_>>()
             .join(", ")
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Tuple(items) if items.is_empty() => write!(f, "nil"),
            Self::Tuple(items) => {
                write!(f, "(")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, ")")
            },
            Self::Dummy => write!(f, "dummy"),
            Self::Ystar => write!(f, "Y*"),
            Self::Closure(closure) => {
                write!(f, "[lambda closure: {}: {}]", closure.params.join(","), closure.body)
            },
            Self::Eta(closure) => {
                write!(f, "[eta closure: {}: {}]", closure.params.join(","), closure.body)
            },
            Self::Builtin(builtin) => write!(f, "{}", builtin.name()),
            Self::Partial(builtin, first) => write!(f, "{} {first}", builtin.name()),
        }
    }
}

fn type_mismatch(operation: &str, expected: &str, found: &Value) -> EvalError {
    EvalError::TypeMismatch { operation: operation.to_string(),
                              expected:  expected.to_string(),
                              found:     found.type_name().to_string(), }
}
