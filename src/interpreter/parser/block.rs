use std::iter::Peekable;

use crate::{
    ast::{Expr, ForKind, ForLoop, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_statement,
            utils::{expect, peek_line, skip_newlines},
        },
    },
};

/// Parses statements until `closing` (or the end of input when `closing` is
/// `None`).
///
/// Statements are separated by newlines. Blank lines are skipped. A
/// statement followed by anything other than a newline, the closing token or
/// the end of input is an error.
pub(in crate::interpreter::parser) fn parse_statements<'a, I>(tokens: &mut Peekable<I>,
                                                              closing: Option<&Token>)
                                                              -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        match tokens.peek().copied() {
            None if closing.is_none() => break,
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
            Some((token, _)) if Some(token) == closing => {
                tokens.next();
                break;
            },
            Some(_) => {},
        }

        statements.push(parse_statement(tokens)?);

        match tokens.peek() {
            None | Some((Token::NewLine, _)) => {},
            Some((token, _)) if Some(token) == closing => {},
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                         line:  *line, });
            },
        }
    }

    Ok(statements)
}

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements separated by newlines. The
/// braces may share a line with a single statement: `{ total += i }`.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// A [`Statement::Block`] containing all parsed statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBrace)?;
    let statements = parse_statements(tokens, Some(&Token::RBrace))?;

    Ok(Statement::Block { statements, line })
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> { ... }
///     else if <condition> { ... }
///     else { ... }
/// ```
/// The `else` may start a new line after the closing brace.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// A [`Statement::If`] node representing the full conditional.
///
/// # Errors
/// - `Expected` if a branch does not start with `{`, or `else` is followed by
///   neither `if` nor `{`.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If)?;
    let condition = parse_expression(tokens)?;
    let then_branch = parse_block(tokens)?;

    let mut lookahead = tokens.clone();
    skip_newlines(&mut lookahead);

    let else_branch = if let Some((Token::Else, _)) = lookahead.peek() {
        lookahead.next();
        *tokens = lookahead;

        match tokens.peek() {
            Some((Token::If, _)) => Some(Box::new(parse_if(tokens)?)),
            Some((Token::LBrace, _)) => Some(Box::new(parse_block(tokens)?)),
            Some((token, line)) => {
                return Err(ParseError::Expected { expected: "'if' or '{' after else".to_string(),
                                                  found:    token.to_string(),
                                                  line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch: Box::new(then_branch),
                       else_branch,
                       line })
}

/// Parses a `for` statement.
///
/// Supported forms:
///
/// - `for { ... }`
/// - `for <condition> { ... }`
/// - `for var i <op> <expr> { ... }`
/// - `for var i from <expr> to <expr> { ... }`
/// - `for var i to <expr> { ... }`
/// - `for from <expr> to <expr> { ... }` and `for to <expr> { ... }`
///
/// With `var`, the header is parsed as an expression starting at the loop
/// variable; a bare variable followed by `from` or `to` selects the range
/// form.
///
/// # Errors
/// Returns [`ParseError::InvalidForStatement`] if:
/// - `var` is not followed by an identifier,
/// - `from` is not followed by `to`,
/// - a range names something other than the bare loop variable.
pub fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::For)?;

    let kind = match tokens.peek() {
        Some((Token::LBrace, _)) => ForKind::Infinite,
        Some((Token::From | Token::To, _)) => parse_range(tokens, None, line)?,
        Some((Token::Var, _)) => {
            tokens.next();
            parse_declared_header(tokens, line)?
        },
        _ => ForKind::Conditional { variable:  None,
                                    condition: parse_expression(tokens)?, },
    };

    let body = parse_block(tokens)?;

    Ok(Statement::For(ForLoop { kind,
                                body: Box::new(body),
                                line }))
}

fn parse_declared_header<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<ForKind>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), _)) = tokens.peek() else {
        return Err(ParseError::InvalidForStatement { details: "expected a loop variable after 'var'".to_string(),
                                                     line });
    };
    let name = name.clone();

    let header = parse_expression(tokens)?;

    if let Some((Token::From | Token::To, _)) = tokens.peek() {
        if !matches!(&header, Expr::Identifier { name: found, .. } if *found == name) {
            return Err(ParseError::InvalidForStatement { details: format!("a range needs a bare loop variable, found '{header}'"),
                                                         line });
        }
        return parse_range(tokens, Some(name), line);
    }

    Ok(ForKind::Conditional { variable:  Some(name),
                              condition: header, })
}

/// Parses `from <expr> to <expr>` or `to <expr>`.
fn parse_range<'a, I>(tokens: &mut Peekable<I>,
                      variable: Option<String>,
                      line: usize)
                      -> ParseResult<ForKind>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let from = if let Some((Token::From, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    if tokens.next_if(|(token, _)| *token == Token::To).is_none() {
        return Err(ParseError::InvalidForStatement { details: format!("expected 'to' on line {}",
                                                                      peek_line(tokens).max(line)),
                                                     line });
    }

    let to = parse_expression(tokens)?;

    Ok(ForKind::Range { variable, from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source).unwrap();
        parse_statement(&mut tokens.iter().peekable())
    }

    fn kind(source: &str) -> ForKind {
        match parse(source).unwrap() {
            Statement::For(for_loop) => for_loop.kind,
            other => panic!("expected a for loop, got {other:?}"),
        }
    }

    #[test]
    fn for_headers_select_their_form() {
        assert_eq!(kind("for { }"), ForKind::Infinite);
        assert!(matches!(kind("for var i from 1 to 3 { }"),
                         ForKind::Range { variable: Some(ref v), from: Some(_), .. } if v == "i"));
        assert!(matches!(kind("for var i to 3 { }"), ForKind::Range { from: None, .. }));
        assert!(matches!(kind("for var i < 3 { }"),
                         ForKind::Conditional { variable: Some(_), .. }));
        assert!(matches!(kind("for x > 0 { }"), ForKind::Conditional { variable: None, .. }));
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        assert!(matches!(parse("for var i from 1 { }"),
                         Err(ParseError::InvalidForStatement { .. })));
        assert!(matches!(parse("for var 3 < i { }"),
                         Err(ParseError::InvalidForStatement { .. })));
    }

    #[test]
    fn else_may_follow_on_the_next_line() {
        let statement = parse("if a {\n  b()\n}\nelse if c { d() } else { e() }").unwrap();

        let Statement::If { else_branch: Some(else_branch), .. } = statement else {
            panic!("expected an else branch");
        };
        assert!(matches!(*else_branch, Statement::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn blocks_may_hold_one_statement_on_a_line() {
        let Statement::Block { statements, .. } = parse("{ total += i }").unwrap() else {
            panic!("expected a block");
        };
        assert_eq!(statements.len(), 1);
    }
}
