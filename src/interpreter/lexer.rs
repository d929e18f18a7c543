use logos::Logos;

use crate::error::{LexError, lex_error::LexErrorKind};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `1_000` or `2.1e-10`.
    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Double-quoted string literals with escapes resolved.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string, allow_greedy = true)]
    String(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// `var`
    #[token("var")]
    Var,
    /// `const`
    #[token("const")]
    Const,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `from`
    #[token("from")]
    From,
    /// `to`
    #[token("to")]
    To,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `import`
    #[token("import")]
    Import,
    /// `as`
    #[token("as")]
    As,
    /// Identifier tokens; names such as `x`, `printf` or `number`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `**=`
    #[token("**=")]
    PowAssign,
    /// `**`
    #[token("**")]
    StarStar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Assign,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `.`
    #[token(".")]
    Dot,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,

    /// Line breaks; statement separators.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::String(s) => return write!(f, "{s:?}"),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::Identifier(name) => return f.write_str(name),
            Self::Null => "null",
            Self::Var => "var",
            Self::Const => "const",
            Self::Func => "func",
            Self::Return => "return",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::From => "from",
            Self::To => "to",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Import => "import",
            Self::As => "as",
            Self::Comment | Self::MultiLineComment => "comment",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::PowAssign => "**=",
            Self::StarStar => "**",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Assign => "=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Ellipsis => "...",
            Self::Dot => ".",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        };
        f.write_str(text)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Automatically increments as newlines are processed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes a complete source string.
///
/// Produces `(Token, line)` pairs in source order. Skipped input (whitespace
/// and comments) produces nothing.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
///
/// # Example
/// ```
/// use dlite::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("var x number = 1_000").unwrap();
///
/// assert_eq!(tokens[0], (Token::Var, 1));
/// assert_eq!(tokens[4], (Token::Number(1000.0), 1));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(kind) => return Err(LexError::from_kind(kind, lexer.slice(), lexer.extras.line)),
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized source");

    Ok(tokens)
}

/// Parses a number literal, validating its digit separators.
///
/// # Returns
/// - `Ok(f64)`: The parsed value.
/// - `Err(LexErrorKind)`: For `__`, a separator next to `.` or at the end, or
///   an unparsable literal.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<f64, LexErrorKind> {
    let slice = lex.slice();

    if slice.contains("__") {
        return Err(LexErrorKind::ConsecutiveUnderscores);
    }
    if slice.ends_with('_') || slice.contains("_.") || slice.contains("._") {
        return Err(LexErrorKind::TrailingCharacter);
    }

    slice.replace('_', "")
         .parse()
         .map_err(|_| LexErrorKind::InvalidNumber)
}

/// Resolves the escapes of a terminated string literal.
///
/// `\n \t \r \0 \b \f \v \" \\` are translated; any other escaped character
/// is kept as-is.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();

    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some(other) => out.push(other),
            None => {},
        }
    }

    out
}

fn unterminated_string(_: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("var variable for format"),
                   vec![Token::Var,
                        Token::Identifier("variable".into()),
                        Token::For,
                        Token::Identifier("format".into())]);
    }

    #[test]
    fn operators_use_longest_match() {
        assert_eq!(kinds("** **= * ... . && ||"),
                   vec![Token::StarStar,
                        Token::PowAssign,
                        Token::Star,
                        Token::Ellipsis,
                        Token::Dot,
                        Token::AndAnd,
                        Token::OrOr]);
    }

    #[test]
    fn string_escapes_are_resolved() {
        assert_eq!(kinds(r#""a\tb\n\"q\"\\\x""#),
                   vec![Token::String("a\tb\n\"q\"\\x".into())]);
    }

    #[test]
    fn numbers_accept_separators_and_exponents() {
        assert_eq!(kinds("1_000 2.5 1e3 0.1_5"),
                   vec![Token::Number(1000.0),
                        Token::Number(2.5),
                        Token::Number(1000.0),
                        Token::Number(0.15)]);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(matches!(tokenize("1__0"), Err(LexError::ConsecutiveUnderscores { .. })));
        assert!(matches!(tokenize("10_"), Err(LexError::TrailingCharacter { .. })));
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("a // note\n/* one\ntwo */ b").unwrap();
        assert_eq!(tokens.last(), Some(&(Token::Identifier("b".into()), 3)));
    }

    #[test]
    fn unterminated_strings_and_stray_characters_fail() {
        assert!(matches!(tokenize("\"open"), Err(LexError::UnterminatedString { line: 1 })));
        assert!(matches!(tokenize("a $ b"),
                         Err(LexError::UnexpectedCharacter { ref text, .. }) if text == "$"));
    }
}
