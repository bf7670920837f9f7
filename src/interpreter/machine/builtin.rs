use crate::{
    error::EvalError,
    interpreter::value::{Builtin, EvalResult, Value},
};

/// Applies a built-in function to its (first) argument.
///
/// Most built-ins complete in one application. `Conc` is curried: the
/// first application captures the left string in a partial value, and the
/// second application (see [`apply_partial`]) produces the concatenation.
///
/// `Print` appends the argument's display form to `output` with no
/// trailing newline and returns `dummy`.
///
/// # Errors
/// Returns an [`EvalError`] when the argument has the wrong type, or when
/// `Stem`/`Stern` are applied to the empty string.
pub fn apply(output: &mut String, builtin: Builtin, argument: &Value) -> EvalResult<Value> {
    match builtin {
        Builtin::Print => {
            output.push_str(&argument.to_string());
            Ok(Value::Dummy)
        },

        Builtin::Stem => {
            let text = argument.as_string("Stem")?;
            match text.chars().next() {
                Some(first) => Ok(Value::Str(first.to_string())),
                None => Err(empty_string("Stem")),
            }
        },

        Builtin::Stern => {
            let text = argument.as_string("Stern")?;
            let mut chars = text.chars();
            match chars.next() {
                Some(_) => Ok(Value::Str(chars.as_str().to_string())),
                None => Err(empty_string("Stern")),
            }
        },

        Builtin::Conc => {
            let first = argument.as_string("Conc")?;
            Ok(Value::Partial(Builtin::Conc, Box::new(Value::Str(first.to_string()))))
        },

        Builtin::Order => {
            let items = argument.as_tuple("Order")?;
            let length = i64::try_from(items.len()).map_err(|_| EvalError::Overflow { operation: "Order".to_string() })?;
            Ok(Value::Integer(length))
        },

        Builtin::Null => match argument {
            Value::Tuple(items) => Ok(Value::Bool(items.is_empty())),
            Value::Str(text) => Ok(Value::Bool(text.is_empty())),
            other => Err(EvalError::TypeMismatch { operation: "Null".to_string(),
                                                   expected:  "a tuple or a string".to_string(),
                                                   found:     other.type_name().to_string(), }),
        },

        Builtin::IsInteger => Ok(Value::Bool(argument.is_integer())),
        Builtin::IsString => Ok(Value::Bool(argument.is_string())),
        Builtin::IsTruthValue => Ok(Value::Bool(matches!(argument, Value::Bool(_)))),
        Builtin::IsFunction => Ok(Value::Bool(argument.is_function())),
        Builtin::IsDummy => Ok(Value::Bool(matches!(argument, Value::Dummy))),
        Builtin::IsTuple => Ok(Value::Bool(matches!(argument, Value::Tuple(_)))),

        Builtin::ItoS => {
            let value = argument.as_integer("ItoS")?;
            Ok(Value::Str(value.to_string()))
        },

        Builtin::Neg => {
            argument.as_integer("Neg")?
                    .checked_neg()
                    .map(Value::Integer)
                    .ok_or(EvalError::Overflow { operation: "Neg".to_string() })
        },
    }
}

/// Completes a curried built-in with its second argument.
pub fn apply_partial(builtin: Builtin, first: &Value, second: &Value) -> EvalResult<Value> {
    match builtin {
        Builtin::Conc => {
            let left = first.as_string("Conc")?;
            let right = second.as_string("Conc")?;
            Ok(Value::Str(format!("{left}{right}")))
        },

        other => Err(EvalError::InvalidArgument { operation: other.name().to_string(),
                                                  details:   "not a curried built-in".to_string(), }),
    }
}

fn empty_string(operation: &str) -> EvalError {
    EvalError::InvalidArgument { operation: operation.to_string(),
                                 details:   "the string is empty".to_string(), }
}
