use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, block::parse_statements},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is a sequence of statements separated by one or more newlines.
/// Errors raised at the end of input report the line of the last token.
///
/// # Parameters
/// - `tokens`: The `(Token, line)` pairs produced by the lexer.
///
/// # Returns
/// The top-level statements in source order.
///
/// # Example
/// ```
/// use dlite::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("var x number = 1\n\nx += 2\n").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Vec<Statement>> {
    let last_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut iter = tokens.iter().peekable();

    let program = parse_statements(&mut iter, None).map_err(|err| match err {
                                                       ParseError::UnexpectedEndOfInput { line: 0 } => {
                                                           ParseError::UnexpectedEndOfInput { line: last_line }
                                                       },
                                                       other => other,
                                                   })?;

    tracing::trace!(statements = program.len(), "parsed program");

    Ok(program)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn statements_need_a_separator() {
        let tokens = tokenize("var a number = 1 var b number = 2").unwrap();

        assert!(matches!(parse_program(&tokens),
                         Err(ParseError::UnexpectedToken { ref token, line: 1 }) if token == "var"));
    }

    #[test]
    fn end_of_input_reports_the_last_line() {
        let tokens = tokenize("var a number = 1\nprintf(a,").unwrap();

        assert_eq!(parse_program(&tokens),
                   Err(ParseError::UnexpectedEndOfInput { line: 2 }));
    }

    #[test]
    fn empty_programs_parse() {
        assert_eq!(parse_program(&tokenize("\n\n// nothing\n").unwrap()), Ok(Vec::new()));
    }
}
