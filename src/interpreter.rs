/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the statement tree, evaluates expressions, manages
/// lexical scopes and function tables, resolves calls against user functions
/// and the standard library, runs imports and collects program output.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, constants, functions, loops and imports.
/// - Reports runtime errors such as division by zero or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, keywords, operators, delimiters and newlines. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source line.
/// - Resolves escape sequences in string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the statements of a program. Newlines separate statements; expressions use
/// precedence climbing.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Supports declarations, control flow, functions, imports and calls.
pub mod parser;
/// The standard library: one function table per package.
///
/// Every package is a static table of descriptors built by the
/// `stdlib_functions!` macro. The tables are collected into the registry the
/// evaluator resolves calls against.
pub mod stdlib;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program computes with: null, numbers,
/// strings, bools, arrays, tuples, function references and error values, and
/// the declared types variables and parameters are checked against.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversion, truthiness, equality and printing.
/// - Names data types and checks values against declared types.
pub mod value;
