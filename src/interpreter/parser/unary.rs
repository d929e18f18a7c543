use std::iter::Peekable;

use crate::{
    ast::{Expr, Literal, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier, peek_line, skip_newlines},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric identity)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix indexing via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "!") unary
///            | primary postfix*
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => Some(UnaryOperator::Negate),
        Some((Token::Plus, _)) => Some(UnaryOperator::Plus),
        Some((Token::Bang, _)) => Some(UnaryOperator::Not),
        _ => None,
    };

    if let Some(op) = op
       && let Some((_, line)) = tokens.next()
    {
        let expr = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  line: *line });
    }

    let primary = parse_primary(tokens)?;
    parse_postfix(tokens, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - number, string and boolean literals and `null`
/// - identifiers, qualified identifiers such as `math.PI`
/// - function calls, plain or qualified
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Number(_) | Token::String(_) | Token::Bool(_) | Token::Null, _) => {
            parse_literal(tokens)
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (token, line) => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                           line:  *line, }),
    }
}

/// Parses chained array indexing, `expr[i][j]`.
///
/// Grammar:
/// ```text
///     postfix := primary ("[" expression "]")*
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((Token::LBracket, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let index = parse_expression(tokens)?;
        expect(tokens, &Token::RBracket)?;

        node = Expr::Index { array: Box::new(node),
                             index: Box::new(index),
                             line };
    }

    Ok(node)
}

fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let (value, line) = match tokens.next() {
        Some((Token::Number(n), line)) => (Literal::Number(*n), line),
        Some((Token::String(s), line)) => (Literal::String(s.clone()), line),
        Some((Token::Bool(b), line)) => (Literal::Bool(*b), line),
        Some((Token::Null, line)) => (Literal::Null, line),
        Some((token, line)) => {
            return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    Ok(Expr::Literal { value, line: *line })
}

/// Parses a parenthesized expression. Newlines are allowed inside.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    skip_newlines(tokens);

    let expr = parse_expression(tokens)?;

    skip_newlines(tokens);
    expect(tokens, &Token::RParen)?;

    Ok(expr)
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements may be spread over several lines and a trailing comma is
/// accepted. An empty array `[]` is accepted.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBracket)?;
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;

    Ok(Expr::ArrayLiteral { elements, line })
}

/// Parses an identifier, a qualified identifier, or a function call.
///
/// Supported forms:
///
/// - `name`
/// - `ns.name`
/// - `name(arg1, arg2, ...)`
/// - `ns.name(arg1, arg2, ...)`
///
/// A qualified read keeps the dotted name; imported variables are stored
/// under it.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a `.` is not followed by an identifier,
/// - call arguments fail to parse,
/// - the closing `)` is missing.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let first = parse_identifier(tokens)?;

    let (namespace, name) = if let Some((Token::Dot, _)) = tokens.peek() {
        tokens.next();
        (first, parse_identifier(tokens)?)
    } else {
        (String::new(), first)
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_argument, &Token::RParen)?;
        return Ok(Expr::FunctionCall { namespace,
                                       name,
                                       arguments,
                                       line });
    }

    let name = if namespace.is_empty() { name } else { format!("{namespace}.{name}") };
    Ok(Expr::Identifier { name, line })
}

/// Parses one call argument: an expression or a `...expr` spread.
fn parse_argument<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Ellipsis, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_expression(tokens)?;
        return Ok(Expr::Spread { expr: Box::new(expr),
                                 line });
    }

    parse_expression(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Expr> {
        let tokens = tokenize(source).unwrap();
        parse_unary(&mut tokens.iter().peekable())
    }

    #[test]
    fn qualified_calls_keep_their_namespace() {
        let expr = parse("math.max(1, ...pair)").unwrap();

        let Expr::FunctionCall { namespace,
                                 name,
                                 arguments,
                                 .. } = expr
        else {
            panic!("expected a call");
        };
        assert_eq!(namespace, "math");
        assert_eq!(name, "max");
        assert!(matches!(arguments[1], Expr::Spread { .. }));
    }

    #[test]
    fn qualified_reads_are_dotted_identifiers() {
        assert_eq!(parse("lib.counter").unwrap(),
                   Expr::Identifier { name: "lib.counter".into(),
                                      line: 1, });
    }

    #[test]
    fn indexing_chains() {
        assert_eq!(parse("grid[1][0]").unwrap().to_string(), "grid[1][0]");
    }

    #[test]
    fn array_literals_span_lines() {
        assert_eq!(parse("[\n  1,\n  \"a\",\n]").unwrap().to_string(), "[1, \"a\"]");
    }

    #[test]
    fn spread_outside_a_call_is_rejected() {
        assert!(matches!(parse("...xs"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse("(1"), Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
