use thiserror::Error;

use crate::error::ScriptError;

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tried to read or assign a name bound in no scope.
    #[error("Error on line {line}: undefined identifier: '{name}'")]
    UndefinedIdentifier {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is not declared anywhere.
    #[error("Error on line {line}: undefined function: '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Qualified a call with a namespace that is neither imported nor a
    /// standard package.
    #[error("Error on line {line}: undefined namespace: '{name}'")]
    UndefinedNamespace {
        /// The namespace.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a constant binding.
    #[error("Error on line {line}: cannot re-assign value to constant: '{name}'")]
    ReassignmentToConstant {
        /// The constant's name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operand had the wrong data type for the operation.
    #[error("Error on line {line}: type error: expected {expected}, but got {found}")]
    TypeExpected {
        /// The data type the operation needs.
        expected: String,
        /// The data type (or expression) that was supplied.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A declared type disagreed with a value's data type.
    #[error("Error on line {line}: expected {expected}, got {found}")]
    TypeMismatch {
        /// The declared type.
        expected: String,
        /// The data type of the value.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `+` applied to operands that cannot be joined.
    #[error("Error on line {line}: cannot concatenate {left} and {right}")]
    CannotConcat {
        /// Data type of the left operand.
        left:  String,
        /// Data type of the right operand.
        right: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: division by zero")]
    DivByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted modulo by zero.
    #[error("Error on line {line}: modulo by zero")]
    ModByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator was applied to a type it has no meaning for.
    #[error("Error on line {line}: unknown operator: '{operator}'")]
    UnknownOperator {
        /// The operator symbol.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to read or write an array element outside the array.
    #[error("Error on line {line}: array index out of bounds: '{index}'")]
    ArrayIndexOutOfBounds {
        /// Source text of the index expression.
        index: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A call received the wrong number of arguments: not exactly the
    /// parameter count, or fewer than a variadic function's fixed prefix.
    #[error("Error on line {line}: '{name}()' expects {expected} argument(s), but got {found}")]
    FunctionNumArgs {
        /// The function name.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The supplied argument count.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument's data type did not match the declared parameter type.
    #[error("Error on line {line}: '{name}()' expects argument {position} to be '{expected}', but got '{found}'")]
    FunctionArgType {
        /// The function name.
        name:     String,
        /// 1-indexed argument position.
        position: usize,
        /// The declared parameter type.
        expected: String,
        /// The data type of the supplied argument.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function returned a different number of values than it declares.
    #[error("Error on line {line}: '{name}()' expects to return {expected} value(s), but returned {found}")]
    FunctionReturnCount {
        /// The function name.
        name:     String,
        /// The declared return count.
        expected: usize,
        /// The number of values actually returned.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An assignment target that is neither an identifier nor an index.
    #[error("Error on line {line}: invalid assignment target: '{target}'")]
    InvalidAssignmentTarget {
        /// Source text of the rejected target.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// An imported file failed at some stage.
    #[error("Error on line {line}: failed to import '{path}': {source}")]
    Import {
        /// The path as written in the import statement.
        path:   String,
        /// The failure, tagged with its stage.
        source: Box<ScriptError>,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Flushing the output buffer to the sink failed.
    #[error("Error on line {line}: failed to write output: {source}")]
    Output {
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Returns the line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedIdentifier { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::UndefinedNamespace { line, .. }
            | Self::ReassignmentToConstant { line, .. }
            | Self::TypeExpected { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::CannotConcat { line, .. }
            | Self::DivByZero { line }
            | Self::ModByZero { line }
            | Self::UnknownOperator { line, .. }
            | Self::ArrayIndexOutOfBounds { line, .. }
            | Self::FunctionNumArgs { line, .. }
            | Self::FunctionArgType { line, .. }
            | Self::FunctionReturnCount { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::Import { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }
}
