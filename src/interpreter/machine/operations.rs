use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::EvalError,
    interpreter::value::{EvalResult, Value},
};

/// Applies a binary operator to two operands.
///
/// `left` is the operand that was written first in the source. Arithmetic
/// and the ordering comparisons work on integers only; `eq`/`ne` compare
/// two integers, two strings, or two truth values; `or`/`&` are eager on
/// truth values; `aug` copies the left tuple and appends the right operand
/// as one new final element.
///
/// # Errors
/// Returns an [`EvalError`] on operand type mismatches, division by zero,
/// a negative exponent, or integer overflow.
pub fn binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let name = op.to_string();

    match op {
        BinaryOperator::Plus => {
            let (a, b) = integer_operands(&name, left, right)?;
            a.checked_add(b).map(Value::Integer).ok_or(EvalError::Overflow { operation: name })
        },
        BinaryOperator::Minus => {
            let (a, b) = integer_operands(&name, left, right)?;
            a.checked_sub(b).map(Value::Integer).ok_or(EvalError::Overflow { operation: name })
        },
        BinaryOperator::Times => {
            let (a, b) = integer_operands(&name, left, right)?;
            a.checked_mul(b).map(Value::Integer).ok_or(EvalError::Overflow { operation: name })
        },
        BinaryOperator::Divide => {
            let (a, b) = integer_operands(&name, left, right)?;
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_div(b).map(Value::Integer).ok_or(EvalError::Overflow { operation: name })
        },
        BinaryOperator::Power => {
            let (a, b) = integer_operands(&name, left, right)?;
            power(a, b)
        },

        BinaryOperator::Or => Ok(Value::Bool(left.as_bool(&name)? || right.as_bool(&name)?)),
        BinaryOperator::Amp => Ok(Value::Bool(left.as_bool(&name)? && right.as_bool(&name)?)),

        BinaryOperator::Gr => comparison(&name, left, right, |a, b| a > b),
        BinaryOperator::Ge => comparison(&name, left, right, |a, b| a >= b),
        BinaryOperator::Ls => comparison(&name, left, right, |a, b| a < b),
        BinaryOperator::Le => comparison(&name, left, right, |a, b| a <= b),

        BinaryOperator::Eq => Ok(Value::Bool(equal(&name, left, right)?)),
        BinaryOperator::Ne => Ok(Value::Bool(!equal(&name, left, right)?)),

        BinaryOperator::Aug => {
            let mut items = left.as_tuple(&name)?.to_vec();
            items.push(right.clone());
            Ok(Value::Tuple(Rc::new(items)))
        },
    }
}

/// Applies a unary operator to one operand.
pub fn unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Neg => {
            operand.as_integer("neg")?
                   .checked_neg()
                   .map(Value::Integer)
                   .ok_or(EvalError::Overflow { operation: "neg".to_string() })
        },
        UnaryOperator::Not => Ok(Value::Bool(!operand.as_bool("not")?)),
    }
}

/// Checked integer exponentiation. The exponent must be non-negative.
fn power(base: i64, exponent: i64) -> EvalResult<Value> {
    let exponent =
        u32::try_from(exponent).map_err(|_| EvalError::InvalidArgument {
            operation: "**".to_string(),
            details:   format!("exponent {exponent} must fit a non-negative machine integer"),
        })?;

    base.checked_pow(exponent)
        .map(Value::Integer)
        .ok_or(EvalError::Overflow { operation: "**".to_string() })
}

/// Applies an ordering comparison to two integer operands.
fn comparison(name: &str,
              left: &Value,
              right: &Value,
              relation: impl Fn(i64, i64) -> bool)
              -> EvalResult<Value> {
    let (a, b) = integer_operands(name, left, right)?;
    Ok(Value::Bool(relation(a, b)))
}

/// Equality across the comparable value types; the operands must share one
/// type.
fn equal(name: &str, left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),

        _ => Err(EvalError::TypeMismatch { operation: name.to_string(),
                                           expected:  "two integers, two strings or two truth values".to_string(),
                                           found:     format!("{} and {}",
                                                              left.type_name(),
                                                              right.type_name()), }),
    }
}

/// Extracts two integer operands for an arithmetic or ordering operation.
fn integer_operands(name: &str, left: &Value, right: &Value) -> EvalResult<(i64, i64)> {
    Ok((left.as_integer(name)?, right.as_integer(name)?))
}
