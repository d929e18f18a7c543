//! # dlite
//!
//! dlite is a tree-walking interpreter for DLite, a small statically annotated
//! scripting language written in Rust.
//! It tokenizes, parses and evaluates programs with typed variables and
//! constants, multi-value functions, loops with labelled-depth `break` and
//! `continue`, file imports and a standard library of string, array, math,
//! file and environment helpers.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing_subscriber::EnvFilter;

use crate::{
    ast::Statement,
    error::ScriptError,
    interpreter::{
        evaluator::core::Evaluator, lexer::tokenize, parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders expressions back to source-like text for diagnostics.
pub mod ast;
/// Provides unified error types for every stage of a run.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing or evaluating code, and the `ScriptError` that tags them with the
/// stage they came from. Every error carries the source line it refers to.
///
/// # Responsibilities
/// - Defines one error enum per stage (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Wraps failures of imported files with their path and stage.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the standard library to provide a complete runtime
/// for DLite programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion.
///
/// Script numbers are `f64`; this module converts them to indices, offsets
/// and exit statuses without scattering casts through the interpreter.
pub mod util;

/// Tokenizes and parses `source` into a program.
///
/// # Example
/// ```
/// let program = dlite::parse("var x number = 1\nprintf(\"%g\", x)").unwrap();
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Vec<Statement>, ScriptError> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// The result of running a whole program.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The value of the last statement that ran.
    pub value:     Value,
    /// The code passed to `exit(...)`, if the program called it.
    pub exit_code: Option<u8>,
    /// Output that was captured in memory rather than written to a sink.
    pub output:    String,
}

/// A program ready to run.
///
/// Without a sink, output is captured and returned in [`Outcome::output`].
/// With one, output is written to it after every top-level statement.
///
/// # Example
/// ```
/// use dlite::Script;
///
/// let outcome = Script::new("printf(\"%s!\", \"hi\")\nexit(3)").run().unwrap();
///
/// assert_eq!(outcome.output, "hi!");
/// assert_eq!(outcome.exit_code, Some(3));
/// ```
pub struct Script<'src> {
    source: &'src str,
    path:   Option<PathBuf>,
    sink:   Option<Box<dyn Write>>,
}

impl<'src> Script<'src> {
    /// Creates a script from source text.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { source,
               path: None,
               sink: None }
    }

    /// Sets the file the source came from. Relative imports resolve against
    /// its directory.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Writes output to `sink` instead of capturing it.
    #[must_use]
    pub fn sink(mut self, sink: Box<dyn Write>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Tokenizes, parses and evaluates the script.
    ///
    /// # Errors
    /// Returns the first error of whichever stage failed. Calling `exit` is
    /// not an error; its code is reported in the outcome.
    pub fn run(self) -> Result<Outcome, ScriptError> {
        let program = parse(self.source)?;

        let mut evaluator = Evaluator::new();
        if let Some(sink) = self.sink {
            evaluator = evaluator.with_sink(sink);
        }
        if let Some(path) = self.path {
            evaluator.set_current_file(path);
        }

        let result = evaluator.evaluate(&program)?;

        Ok(Outcome { value:     result.value,
                     exit_code: evaluator.exit_code(),
                     output:    evaluator.take_output(), })
    }
}

/// Runs `source` with output captured in memory.
///
/// # Examples
/// ```
/// use dlite::get_result;
///
/// let outcome = get_result("var x number = 2\nx += 2\nprintf(\"%g\", x)").unwrap();
/// assert_eq!(outcome.output, "4");
///
/// // 'y' is not defined.
/// assert!(get_result("var x number = y + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Outcome, ScriptError> {
    Script::new(source).run()
}

/// Reads and runs the file at `path`, writing output to stdout.
pub fn run_file(path: &Path) -> Result<Outcome, ScriptError> {
    let source = fs::read_to_string(path).map_err(|source| {
                                             ScriptError::Read { path: path.display().to_string(),
                                                                 source }
                                         })?;

    Script::new(&source).path(path)
                        .sink(Box::new(io::stdout()))
                        .run()
}

/// Installs a stderr log subscriber.
///
/// Logging stays off unless `RUST_LOG` is set or `verbose` is `true`, in
/// which case the crate logs at `debug`.
pub fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("dlite=debug"),
        Err(_) => return,
    };

    // A subscriber may already be installed by an embedding program.
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .try_init();
}
