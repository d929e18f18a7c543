use crate::interpreter::{evaluator::function::registry::FunctionInfo, value::core::Value};

/// `printf`-style format directives.
///
/// Renders `%v %s %d %g %f %.Nf %t %q %%` against a list of values and
/// reports missing or surplus arguments inline.
pub mod format;

/// The global package: `printf`, `sprintf`, `dump` and `exit`.
pub mod global;

/// The `math` package.
///
/// Rounding, trigonometry, logarithms, `min`/`max`, `pow` and `mod` over
/// numbers.
pub mod math;

/// The `strings` package.
///
/// Searching, slicing, splitting, replacing, trimming and case conversion.
/// Lengths and positions count bytes.
pub mod strings;

/// The `arrays` package.
///
/// Functions never mutate their argument; each returns a new array.
pub mod arrays;

/// The `errors` package.
pub mod errors;

/// The `os` package: environment variables.
pub mod os;

/// The `time` package: the clock and sleeping.
pub mod time;

/// The `io` package: files and directories.
///
/// Failures are reported as error values, never as runtime errors.
pub mod io;

/// Every package table, in registration order.
#[must_use]
pub fn packages() -> [&'static [FunctionInfo]; 8] {
    [global::FUNCTIONS,
     math::FUNCTIONS,
     strings::FUNCTIONS,
     arrays::FUNCTIONS,
     errors::FUNCTIONS,
     os::FUNCTIONS,
     time::FUNCTIONS,
     io::FUNCTIONS]
}

/// Builds `(value, null)`, the result of a fallible function that succeeded.
pub(crate) fn success(value: Value) -> Value {
    Value::tuple(vec![value, Value::Null])
}

/// Builds `(value, error)`, the result of a fallible function that failed.
pub(crate) fn failure(value: Value, message: impl Into<String>) -> Value {
    Value::tuple(vec![value, Value::error(message)])
}
