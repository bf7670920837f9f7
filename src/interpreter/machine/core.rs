use std::collections::HashMap;

use crate::{
    error::EvalError,
    interpreter::{
        machine::{
            builtin,
            control::{ControlItem, ControlStructures},
            environment::Environment,
            operations,
        },
        value::{Closure, EvalResult, Value},
    },
};

/// One entry on the machine's stack: a value, or the exit marker of an
/// environment that is still live above it.
#[derive(Debug)]
enum StackItem {
    Value(Value),
    Marker(usize),
}

/// The Control-Stack-Environment machine.
///
/// Holds the flattened control-structure table, the live control sequence
/// and stack (both with their top at the right end), the environment
/// arena, and the output accumulated by `Print`.
///
/// The machine starts with control `[env-exit 0, delta 0]` and the
/// primitive environment's marker on the stack; it runs until the control
/// is exhausted and the single remaining stack value is the program's
/// result.
#[derive(Debug)]
pub struct Machine {
    structures:  Vec<Vec<ControlItem>>,
    control:     Vec<ControlItem>,
    stack:       Vec<StackItem>,
    environment: Environment,
    current:     usize,
    output:      String,
}

impl Machine {
    /// Creates a machine ready to execute the given control structures.
    #[must_use]
    pub fn new(table: ControlStructures) -> Self {
        Self { structures:  table.structures,
               control:     vec![ControlItem::Env(0), ControlItem::Delta(0)],
               stack:       vec![StackItem::Marker(0)],
               environment: Environment::new(),
               current:     0,
               output:      String::new(), }
    }

    /// Runs the machine to completion.
    ///
    /// # Returns
    /// The text emitted by `Print` and the program's final value.
    ///
    /// # Errors
    /// Returns the first [`EvalError`] raised by any transition rule.
    pub fn run(mut self) -> EvalResult<(String, Value)> {
        while let Some(item) = self.control.pop() {
            match item {
                ControlItem::Integer(n) => self.push(Value::Integer(n)),
                ControlItem::Str(s) => self.push(Value::Str(s)),
                ControlItem::Bool(b) => self.push(Value::Bool(b)),
                ControlItem::Nil => self.push(Value::nil()),
                ControlItem::Dummy => self.push(Value::Dummy),
                ControlItem::Ystar => self.push(Value::Ystar),

                ControlItem::Identifier(name) => {
                    let value = self.environment.lookup(self.current, &name)?;
                    self.push(value);
                },

                ControlItem::Lambda { index, params } => {
                    self.push(Value::Closure(Closure { params,
                                                       body: index,
                                                       env: self.current }));
                },

                ControlItem::Gamma => self.apply()?,

                ControlItem::Delta(index) => {
                    let body = self.structures[index].clone();
                    self.control.extend(body);
                },

                ControlItem::Beta => self.select_branch()?,

                ControlItem::Tau(arity) => {
                    let mut items = Vec::with_capacity(arity);
                    for _ in 0..arity {
                        items.push(self.pop_value()?);
                    }
                    self.push(Value::from(items));
                },

                ControlItem::Binary(op) => {
                    let left = self.pop_value()?;
                    let right = self.pop_value()?;
                    self.push(operations::binary(op, &left, &right)?);
                },

                ControlItem::Unary(op) => {
                    let operand = self.pop_value()?;
                    self.push(operations::unary(op, &operand)?);
                },

                ControlItem::Env(_) => self.exit_environment()?,
            }
        }

        let result = self.pop_value()?;
        Ok((self.output, result))
    }

    /// Applies whatever sits on top of the stack to the value below it
    /// (rules 4 through 8).
    fn apply(&mut self) -> EvalResult<()> {
        let rator = self.pop_value()?;

        match rator {
            Value::Closure(closure) => self.apply_closure(&closure),

            // Y* consumes the lambda closure below it and becomes the
            // recursion point.
            Value::Ystar => {
                let operand = self.pop_value()?;
                match operand {
                    Value::Closure(closure) => {
                        self.push(Value::Eta(closure));
                        Ok(())
                    },
                    other => {
                        Err(EvalError::TypeMismatch { operation: "Y*".to_string(),
                                                      expected:  "a lambda closure".to_string(),
                                                      found:     other.type_name().to_string(), })
                    },
                }
            },

            // Applying the recursion point unrolls the fixed point one
            // step: apply the underlying lambda to the eta itself, then
            // apply the result to the original argument.
            Value::Eta(closure) => {
                self.control.push(ControlItem::Gamma);
                self.control.push(ControlItem::Gamma);
                self.push(Value::Eta(closure.clone()));
                self.push(Value::Closure(closure));
                Ok(())
            },

            // A tuple applied to an integer selects 1-based.
            Value::Tuple(items) => {
                let index = self.pop_value()?.as_integer("tuple selection")?;
                let position = usize::try_from(index).ok().filter(|p| (1..=items.len()).contains(p));

                match position {
                    Some(p) => {
                        self.push(items[p - 1].clone());
                        Ok(())
                    },
                    None => {
                        Err(EvalError::TupleIndexOutOfRange { index,
                                                              length: items.len() })
                    },
                }
            },

            Value::Builtin(function) => {
                let argument = self.pop_value()?;
                let result = builtin::apply(&mut self.output, function, &argument)?;
                self.push(result);
                Ok(())
            },

            Value::Partial(function, first) => {
                let second = self.pop_value()?;
                let result = builtin::apply_partial(function, &first, &second)?;
                self.push(result);
                Ok(())
            },

            other => Err(EvalError::ApplyNonFunction { found: other.type_name().to_string() }),
        }
    }

    /// Applies a lambda closure: binds the argument, creates the new
    /// environment, and schedules the body with its exit marker (rule 4).
    fn apply_closure(&mut self, closure: &Closure) -> EvalResult<()> {
        let argument = self.pop_value()?;

        let mut bindings = HashMap::new();
        match closure.params.len() {
            // A '()' parameter consumes and discards its argument.
            0 => {},
            1 => {
                bindings.insert(closure.params[0].clone(), argument);
            },
            arity => {
                let items = argument.as_tuple("parameter binding")?;
                if items.len() != arity {
                    return Err(EvalError::BindingArityMismatch { expected: arity,
                                                                 found:    items.len(), });
                }
                for (name, value) in closure.params.iter().zip(items) {
                    bindings.insert(name.clone(), value.clone());
                }
            },
        }

        let index = self.environment.push_frame(closure.env, bindings);
        self.control.push(ControlItem::Env(index));
        self.control.push(ControlItem::Delta(closure.body));
        self.stack.push(StackItem::Marker(index));
        self.current = index;

        Ok(())
    }

    /// Rule 11: the condition's truth value picks one of the two branch
    /// structures sitting at the end of the control and discards the
    /// other.
    fn select_branch(&mut self) -> EvalResult<()> {
        let condition = self.pop_value()?.as_bool("->")?;

        let len = self.control.len();
        if len < 2 {
            return Err(EvalError::StackUnderflow);
        }

        if condition {
            self.control.remove(len - 1);
        } else {
            self.control.remove(len - 2);
        }

        Ok(())
    }

    /// Rule 13: an environment exit marker restores the environment that
    /// was current before the application, keeping the body's result on
    /// top of the stack.
    fn exit_environment(&mut self) -> EvalResult<()> {
        let result = self.pop_value()?;

        match self.stack.pop() {
            Some(StackItem::Marker(_)) => {},
            _ => return Err(EvalError::StackUnderflow),
        }

        self.stack.push(StackItem::Value(result));

        self.current = self.stack
                           .iter()
                           .rev()
                           .find_map(|item| match item {
                               StackItem::Marker(index) => Some(*index),
                               StackItem::Value(_) => None,
                           })
                           .unwrap_or(0);

        Ok(())
    }

    fn push(&mut self, value: Value) {
        self.stack.push(StackItem::Value(value));
    }

    fn pop_value(&mut self) -> EvalResult<Value> {
        match self.stack.pop() {
            Some(StackItem::Value(value)) => Ok(value),
            _ => Err(EvalError::StackUnderflow),
        }
    }
}
