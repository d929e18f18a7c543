use thiserror::Error;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: unexpected token: '{token}'")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: unexpected end of expression")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An opening parenthesis `(` was expected but not found.
    #[error("Error on line {line}: expected '(', but got: '{found}'")]
    ExpectedOpenParen {
        /// What was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: expected ')', but got: '{found}'")]
    ExpectedClosingParen {
        /// What was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error on line {line}: expected ']', but got: '{found}'")]
    ExpectedClosingBracket {
        /// What was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Some other specific token was expected but not found.
    #[error("Error on line {line}: expected {expected}, but got: '{found}'")]
    Expected {
        /// Description of the expected token.
        expected: String,
        /// What was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A type annotation named no known type.
    #[error("Error on line {line}: invalid data type: '{name}'")]
    InvalidDataType {
        /// The annotation text.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `const` declaration had no initializer.
    #[error("Error on line {line}: constant declaration '{name}' must have a value")]
    ConstantWithoutValue {
        /// The constant's name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break 0` or a negative count.
    #[error("Error on line {line}: break count must be greater than 0")]
    BreakCountLessThanOne {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `continue 0` or a negative count.
    #[error("Error on line {line}: continue count must be greater than 0")]
    ContinueCountLessThanOne {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `=` or `op=` is neither an identifier nor an index.
    #[error("Error on line {line}: invalid assignment target: '{target}'")]
    InvalidAssignmentTarget {
        /// Source text of the rejected target.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `for` header that matches none of the loop forms.
    #[error("Error on line {line}: invalid for statement: '{details}'")]
    InvalidForStatement {
        /// What was wrong with the header.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// Returns the line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedOpenParen { line, .. }
            | Self::ExpectedClosingParen { line, .. }
            | Self::ExpectedClosingBracket { line, .. }
            | Self::Expected { line, .. }
            | Self::InvalidDataType { line, .. }
            | Self::ConstantWithoutValue { line, .. }
            | Self::BreakCountLessThanOne { line }
            | Self::ContinueCountLessThanOne { line }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::InvalidForStatement { line, .. } => *line,
        }
    }
}
