/// Lexing errors.
///
/// Raised while turning source text into tokens: unexpected characters,
/// malformed number literals and unterminated strings.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens. Parse errors include unexpected tokens, missing delimiters,
/// malformed declarations and invalid assignment targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and execution.
/// Runtime errors include things like division by zero, type mismatches,
/// undefined names, call-shape violations and failed imports.
pub mod runtime_error;
/// Whole-program errors.
///
/// Wraps the per-stage errors with the stage that produced them, so a caller
/// running a complete script gets a single error type.
pub mod script_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use script_error::{ScriptError, Stage};
