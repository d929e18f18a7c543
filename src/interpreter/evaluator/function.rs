/// Call resolution and argument checking.
///
/// Looks a call up across imported namespaces, the standard library and
/// global user functions, expands spread arguments and validates them
/// against the callee's arity class.
pub mod core;

/// The standard-library function table.
///
/// Declares the `Host` capability trait, the metadata every library function
/// carries and the `Registry` that maps a namespace and name to a handler.
pub mod registry;

/// Invocation of user-declared functions.
///
/// Binds parameters in a fresh scope, runs the body and checks how many
/// values it returned against the declaration.
pub mod user;
