use std::fmt;

use thiserror::Error;

use crate::error::{LexError, ParseError, RuntimeError};

/// The pipeline stage a [`ScriptError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the source file.
    Read,
    /// Turning source text into tokens.
    Tokenize,
    /// Building the syntax tree.
    Parse,
    /// Running the program.
    Evaluate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Tokenize => "tokenize",
            Self::Parse => "parse",
            Self::Evaluate => "evaluate",
        };
        f.write_str(name)
    }
}

/// Represents a failure of a whole script run, tagged with its stage.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The source file could not be read.
    #[error("read: failed to read '{path}': {source}")]
    Read {
        /// The path that was requested.
        path:   String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The source could not be tokenized.
    #[error("tokenize: {0}")]
    Tokenize(#[from] LexError),
    /// The tokens could not be parsed.
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error("evaluate: {0}")]
    Evaluate(#[from] RuntimeError),
}

impl ScriptError {
    /// Returns the stage that produced this error.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Read { .. } => Stage::Read,
            Self::Tokenize(_) => Stage::Tokenize,
            Self::Parse(_) => Stage::Parse,
            Self::Evaluate(_) => Stage::Evaluate,
        }
    }
}
