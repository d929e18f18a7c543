use thiserror::Error;

/// The reason a token could not be produced.
///
/// This is the error type the lexer itself reports. The public [`LexError`]
/// pairs it with the offending text and line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[default]
    UnexpectedCharacter,
    /// A number literal such as `1__000`.
    ConsecutiveUnderscores,
    /// A number literal ending in a separator, such as `10_`.
    TrailingCharacter,
    /// A number literal that does not fit an `f64`.
    InvalidNumber,
    /// A string literal missing its closing quote.
    UnterminatedString,
}

/// Represents all errors that can occur during lexing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Found a character that cannot start any token.
    #[error("Error on line {line}: unexpected character: '{text}'")]
    UnexpectedCharacter {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number literal contained `__`.
    #[error("Error on line {line}: multiple consecutive underscores in number: '{text}'")]
    ConsecutiveUnderscores {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number literal ended with a separator.
    #[error("Error on line {line}: trailing character in number: '{text}'")]
    TrailingCharacter {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number literal could not be converted.
    #[error("Error on line {line}: invalid number: '{text}'")]
    InvalidNumber {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was never closed.
    #[error("Error on line {line}: unterminated string literal")]
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl LexError {
    /// Builds the public error from the lexer's error kind.
    #[must_use]
    pub fn from_kind(kind: LexErrorKind, text: &str, line: usize) -> Self {
        let text = text.to_string();
        match kind {
            LexErrorKind::UnexpectedCharacter => Self::UnexpectedCharacter { text, line },
            LexErrorKind::ConsecutiveUnderscores => Self::ConsecutiveUnderscores { text, line },
            LexErrorKind::TrailingCharacter => Self::TrailingCharacter { text, line },
            LexErrorKind::InvalidNumber => Self::InvalidNumber { text, line },
            LexErrorKind::UnterminatedString => Self::UnterminatedString { line },
        }
    }

    /// Returns the line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::ConsecutiveUnderscores { line, .. }
            | Self::TrailingCharacter { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnterminatedString { line } => *line,
        }
    }
}
