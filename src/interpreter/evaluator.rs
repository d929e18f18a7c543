/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic
/// and concatenation, comparisons, equality and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the prefix operations: numeric negation, numeric identity and
/// logical NOT.
pub mod unary;

/// Core evaluation logic and evaluator state.
///
/// Contains the `Evaluator` itself, the expression and statement dispatch,
/// statement lists, the output buffer and the termination flag.
pub mod core;

/// The name-binding store.
///
/// One outer scope plus a stack of block scopes, holding mutable variables
/// and immutable constants.
pub mod scope;

/// The control-flow signal carried alongside every statement result.
///
/// `break`, `continue` and `return` travel upward as data rather than as
/// errors; loops and function calls consume the signals addressed to them.
pub mod control;

/// Statement evaluation.
///
/// Blocks, `if`, declarations, assignments and the `return`, `break` and
/// `continue` statements.
pub mod statement;

/// Evaluation of `for` statements.
///
/// Supports the infinite, conditional and range loop forms, manages the loop
/// variable and honours `break N` and `continue N`.
pub mod for_loop;

/// Array indexing.
///
/// Reading `a[i]` and writing `a[i] = v`, including nested targets such as
/// `a[i][j] = v`.
pub mod index;

/// Evaluation of `import` statements.
///
/// Loads another source file and merges its functions and variables into
/// the importing evaluator.
pub mod import;

/// Function evaluation.
///
/// Resolves calls across imported namespaces, the standard library and user
/// functions, checks arguments and return values, and runs user functions.
pub mod function;
