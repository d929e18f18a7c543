use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, FunctionDeclaration, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_for, parse_if, parse_statements},
            core::{ParseResult, parse_expression},
            utils::{
                consume, expect, parse_comma_separated, parse_identifier, parse_type, peek_line,
            },
        },
        value::data_type::DeclaredType,
    },
    util::num::f64_to_index,
};

/// Parses a single statement.
///
/// The leading keyword selects the construct:
/// - `var` and `const` declarations,
/// - `func` declarations,
/// - `if`, `for` and bare `{ ... }` blocks,
/// - `return`, `break` and `continue`,
/// - `import`.
///
/// Anything else is parsed as an expression, which becomes an assignment when
/// followed by `=` or a compound operator such as `+=`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of the statement.
///
/// # Returns
/// The parsed statement. The caller checks what follows it.
///
/// # Errors
/// Returns a `ParseError` for malformed declarations, a `const` without an
/// initializer, loop counts below one, or an assignment to something that is
/// neither a variable nor an index.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Var => parse_variable(tokens, line),
        Token::Const => parse_constant(tokens, line),
        Token::Func => parse_function(tokens, line),
        Token::If => parse_if(tokens),
        Token::For => parse_for(tokens),
        Token::LBrace => parse_block(tokens),
        Token::Return => parse_return(tokens, line),
        Token::Break | Token::Continue => parse_loop_jump(tokens, line),
        Token::Import => parse_import(tokens, line),
        _ => parse_expression_statement(tokens, line),
    }
}

/// `var NAME TYPE [= expr]`
fn parse_variable<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Var)?;
    let name = parse_identifier(tokens)?;
    let declared = parse_type(tokens)?;

    let value = if consume(tokens, &Token::Assign) { Some(parse_expression(tokens)?) } else { None };

    Ok(Statement::VariableDeclaration { name,
                                        declared,
                                        value,
                                        line })
}

/// `const NAME TYPE = expr`
fn parse_constant<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Const)?;
    let name = parse_identifier(tokens)?;
    let declared = parse_type(tokens)?;

    if !consume(tokens, &Token::Assign) {
        return Err(ParseError::ConstantWithoutValue { name, line });
    }
    let value = parse_expression(tokens)?;

    Ok(Statement::ConstantDeclaration { name,
                                        declared,
                                        value,
                                        line })
}

/// Parses a function declaration.
///
/// Grammar:
/// ```text
///     function := "func" identifier "(" params ")" returns? block
///     params   := (identifier type ("," identifier type)*)?
///     returns  := type ("," type)* | "(" type ("," type)* ")"
/// ```
fn parse_function<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Func)?;
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;

    let return_types = parse_return_types(tokens)?;

    expect(tokens, &Token::LBrace)?;
    let body = parse_statements(tokens, Some(&Token::RBrace))?;

    Ok(Statement::Function(Rc::new(FunctionDeclaration { name,
                                                         params,
                                                         return_types,
                                                         body,
                                                         line })))
}

fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    let declared = parse_type(tokens)?;

    Ok(Parameter { name, declared })
}

fn parse_return_types<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<DeclaredType>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LBrace, _)) => Ok(Vec::new()),
        Some((Token::LParen, _)) => {
            tokens.next();
            parse_comma_separated(tokens, parse_type, &Token::RParen)
        },
        _ => {
            let mut types = vec![parse_type(tokens)?];
            while consume(tokens, &Token::Comma) {
                types.push(parse_type(tokens)?);
            }
            Ok(types)
        },
    }
}

/// `return [expr ("," expr)*]`
///
/// A `return` at the end of a line or block returns nothing.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Return)?;

    let mut values = Vec::new();
    if !matches!(tokens.peek(), None | Some((Token::NewLine | Token::RBrace, _))) {
        values.push(parse_expression(tokens)?);
        while consume(tokens, &Token::Comma) {
            values.push(parse_expression(tokens)?);
        }
    }

    Ok(Statement::Return { values, line })
}

/// `break [N]` and `continue [N]`, where `N` is a whole number of at least
/// one.
fn parse_loop_jump<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let is_break = matches!(tokens.next(), Some((Token::Break, _)));

    let count = match tokens.peek() {
        Some((Token::Number(n), _)) => {
            let n = *n;
            tokens.next();
            f64_to_index(n).filter(|count| *count >= 1 && n.fract() == 0.0)
        },
        _ => Some(1),
    };

    match (count, is_break) {
        (Some(count), true) => Ok(Statement::Break { count, line }),
        (Some(count), false) => Ok(Statement::Continue { count, line }),
        (None, true) => Err(ParseError::BreakCountLessThanOne { line }),
        (None, false) => Err(ParseError::ContinueCountLessThanOne { line }),
    }
}

/// `import "path" [as ALIAS]`
fn parse_import<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Import)?;

    let path = match tokens.next() {
        Some((Token::String(path), _)) => path.clone(),
        Some((token, line)) => {
            return Err(ParseError::Expected { expected: "import path string".to_string(),
                                              found:    token.to_string(),
                                              line:     *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let alias = if consume(tokens, &Token::As) { Some(parse_identifier(tokens)?) } else { None };

    Ok(Statement::Import { path, alias, line })
}

/// Maps a compound assignment token to the operator it applies.
const fn compound_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Sub),
        Token::StarAssign => Some(BinaryOperator::Mul),
        Token::SlashAssign => Some(BinaryOperator::Div),
        Token::PercentAssign => Some(BinaryOperator::Mod),
        Token::PowAssign => Some(BinaryOperator::Pow),
        _ => None,
    }
}

fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;

    let op = match tokens.peek() {
        Some((Token::Assign, _)) => None,
        Some((token, _)) if compound_operator(token).is_some() => compound_operator(token),
        _ => return Ok(Statement::Expression { expr, line }),
    };

    if !expr.is_assignable() {
        return Err(ParseError::InvalidAssignmentTarget { target: expr.to_string(),
                                                         line:   peek_line(tokens), });
    }

    tokens.next();
    let value = parse_expression(tokens)?;

    Ok(match op {
        Some(op) => Statement::CompoundAssignment { target: expr,
                                                    op,
                                                    value,
                                                    line },
        None => Statement::Assignment { target: expr,
                                        value,
                                        line },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize, value::data_type::DataType};

    fn parse(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source).unwrap();
        parse_statement(&mut tokens.iter().peekable())
    }

    #[test]
    fn function_declarations_collect_params_and_returns() {
        let Statement::Function(decl) =
            parse("func divide(a number, b number) (number, error) {\n  return a / b, null\n}").unwrap()
        else {
            panic!("expected a function");
        };

        assert_eq!(decl.name, "divide");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.return_types,
                   vec![DeclaredType::Exact(DataType::Number), DeclaredType::Exact(DataType::Error)]);
        assert!(matches!(&decl.body[0], Statement::Return { values, .. } if values.len() == 2));
    }

    #[test]
    fn unparenthesised_return_lists_are_accepted() {
        let Statement::Function(decl) = parse("func pair() number, string { return 1, \"a\" }").unwrap() else {
            panic!("expected a function");
        };

        assert_eq!(decl.return_types.len(), 2);
    }

    #[test]
    fn constants_need_a_value() {
        assert_eq!(parse("const limit number"),
                   Err(ParseError::ConstantWithoutValue { name: "limit".into(),
                                                          line: 1, }));
    }

    #[test]
    fn loop_counts_must_be_positive_integers() {
        assert_eq!(parse("break 2"), Ok(Statement::Break { count: 2, line: 1 }));
        assert_eq!(parse("break 0"), Err(ParseError::BreakCountLessThanOne { line: 1 }));
        assert_eq!(parse("continue 1.5"), Err(ParseError::ContinueCountLessThanOne { line: 1 }));
    }

    #[test]
    fn compound_assignment_keeps_its_operator() {
        assert!(matches!(parse("grid[0] **= 2"),
                         Ok(Statement::CompoundAssignment { op: BinaryOperator::Pow, .. })));
    }

    #[test]
    fn literals_cannot_be_assigned() {
        assert!(matches!(parse("1 = 2"), Err(ParseError::InvalidAssignmentTarget { .. })));
    }

    #[test]
    fn imports_take_an_optional_alias() {
        assert_eq!(parse("import \"lib/util.dl\" as util"),
                   Ok(Statement::Import { path:  "lib/util.dl".into(),
                                          alias: Some("util".into()),
                                          line:  1, }));
    }
}
