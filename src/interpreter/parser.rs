/// Entry points of the parser.
///
/// Parses whole programs and single expressions, and defines the
/// `ParseResult` alias shared by every parsing routine.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Handles negation, identity and logical not, literals, identifiers,
/// qualified names, calls with spread arguments, grouping, array literals and
/// indexing.
pub mod unary;

/// Binary operator parsing.
///
/// One function per precedence level, from logical OR down to the
/// right-associative power operator.
pub mod binary;

/// Statement lists, blocks and the compound statements built from them.
///
/// Parses newline-separated statement lists, `{ ... }` blocks, `if`/`else`
/// chains and every form of `for` loop.
pub mod block;

/// Shared parsing helpers.
///
/// Token expectation, newline skipping, identifiers, type annotations and
/// comma-separated lists.
pub mod utils;

/// Statement parsing.
///
/// Declarations, functions, assignments, `return`, `break`, `continue` and
/// `import`.
pub mod statement;
