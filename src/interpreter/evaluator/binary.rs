/// Arithmetic operators and concatenation.
///
/// `+ - * / % **` on numbers, plus `+` on strings and arrays.
pub mod arithmetic;

/// Ordering and equality operators.
///
/// `< <= > >=` compare numbers; `== !=` compare values of any type.
pub mod comparison;

/// Dispatch for every binary operator.
pub mod core;

/// Logical operators on booleans.
pub mod logic;
