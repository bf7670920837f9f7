/// Parser entry point and shared token helpers.
///
/// Contains the `parse` function that drives the grammar, the `ParseResult`
/// alias, and small utilities for consuming expected tokens.
pub mod core;

/// Expression productions.
///
/// Implements the expression side of the grammar: `let`/`fn` expressions,
/// `where`, tuples, conditionals, the boolean and arithmetic precedence
/// chain, infix `@` application, and function application by juxtaposition.
pub mod expression;

/// Definition productions.
///
/// Implements the definition side of the grammar: `within`, simultaneous
/// `and` definitions, `rec`, basic `=` and function-form definitions, and
/// variable bindings and lists.
pub mod definition;
