/// Control-structure construction.
///
/// Flattens a standardized tree into the indexed table of control
/// structures the machine executes, hoisting lambda bodies and conditional
/// branches into their own structures.
pub mod control;

/// Environment tree.
///
/// An arena of frozen frames with parent links, rooted at the primitive
/// environment that holds the built-in functions.
pub mod environment;

/// The machine's execution loop.
///
/// Implements the thirteen transition rules over the control, the stack,
/// and the current environment.
pub mod core;

/// Operator semantics.
///
/// Implements the binary and unary operators on runtime values, with
/// checked integer arithmetic.
pub mod operations;

/// Built-in functions.
///
/// Implements the primitive environment's functions, including the curried
/// two-step `Conc`.
pub mod builtin;
