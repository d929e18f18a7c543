use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::ParseResult,
        value::data_type::{DataType, DeclaredType},
    },
};

/// Skips any number of newline tokens.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while tokens.next_if(|(token, _)| *token == Token::NewLine).is_some() {}
}

/// Returns the line of the next token, or `0` at the end of input.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, line)| *line)
}

/// Consumes the next token if it equals `expected`.
pub(in crate::interpreter::parser) fn consume<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.next_if(|(token, _)| token == expected).is_some()
}

/// Consumes `expected` or fails with an error naming it.
///
/// `(`, `)` and `]` have dedicated error variants; every other token is
/// reported through [`ParseError::Expected`].
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token, line)) if token == expected => Ok(*line),
        Some((token, line)) => Err(mismatch(expected, token.to_string(), *line)),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

fn mismatch(expected: &Token, found: String, line: usize) -> ParseError {
    match expected {
        Token::LParen => ParseError::ExpectedOpenParen { found, line },
        Token::RParen => ParseError::ExpectedClosingParen { found, line },
        Token::RBracket => ParseError::ExpectedClosingBracket { found, line },
        other => ParseError::Expected { expected: format!("'{other}'"),
                                        found,
                                        line },
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call arguments, parameter lists
/// and parenthesised return types. Newlines may appear anywhere between
/// items and a trailing comma before the closing token is accepted. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an item is followed by something other than `,` or the closing token,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();

    loop {
        skip_newlines(tokens);
        if consume(tokens, closing) {
            break;
        }

        items.push(parse_item(tokens)?);
        skip_newlines(tokens);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((token, _)) if token == closing => break,
            Some((token, line)) => return Err(mismatch(closing, token.to_string(), *line)),
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, line)) => Err(ParseError::Expected { expected: "identifier".to_string(),
                                                          found:    token.to_string(),
                                                          line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a type annotation.
///
/// Grammar: `type := "[" "]" type | "null" | identifier`
///
/// # Errors
/// Returns [`ParseError::InvalidDataType`] for a name that is not a type.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<DeclaredType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::LBracket, _)) => {
            expect(tokens, &Token::RBracket)?;
            Ok(DeclaredType::ArrayOf(Box::new(parse_type(tokens)?)))
        },
        Some((Token::Null, _)) => Ok(DeclaredType::Exact(DataType::Null)),
        Some((Token::Identifier(name), line)) => {
            DeclaredType::from_name(name).ok_or_else(|| ParseError::InvalidDataType { name: name.clone(),
                                                                                      line: *line, })
        },
        Some((token, line)) => Err(ParseError::InvalidDataType { name: token.to_string(),
                                                                 line: *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn types_nest_array_prefixes() {
        let tokens = tokenize("[][]number").unwrap();
        let declared = parse_type(&mut tokens.iter().peekable()).unwrap();

        assert_eq!(declared.to_string(), "[][]number");
    }

    #[test]
    fn unknown_type_names_are_rejected() {
        let tokens = tokenize("numbr").unwrap();
        let err = parse_type(&mut tokens.iter().peekable()).unwrap_err();

        assert_eq!(err,
                   ParseError::InvalidDataType { name: "numbr".into(),
                                                 line: 1, });
    }

    #[test]
    fn lists_allow_newlines_and_a_trailing_comma() {
        let tokens = tokenize("a,\n b,\n)").unwrap();
        let names = parse_comma_separated(&mut tokens.iter().peekable(),
                                          parse_identifier,
                                          &Token::RParen).unwrap();

        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
