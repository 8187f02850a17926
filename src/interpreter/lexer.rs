use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::value::core::Instant,
    util::calendar::{DateTimeError, format_date_time, parse_date_time},
};

/// Represents a lexical token in an expression.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Whitespace between tokens is skipped.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum Token {
    /// Date-time literal tokens, such as `2016-02-29T00:00:00.000Z`.
    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z",
            parse_instant)]
    DateTime(Instant),
    /// Double literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_double)]
    Double(f64),
    /// Long literal tokens, such as `42L` or `42l`.
    ///
    /// The value is kept wider than `i64` so `-9223372036854775808L` can be
    /// range checked after its sign is applied by the parser.
    #[regex(r"[0-9]+[lL]", parse_long)]
    Long(i128),
    /// Integer literal tokens, such as `42`.
    ///
    /// The value is kept as `i64`; whether it fits an int is decided by the
    /// parser.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, such as `"Sarah"`, with escapes resolved.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// Identifier tokens; the segments of a variable name such as `person` in
    /// `person.age`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `.`
    #[token(".")]
    Dot,
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
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
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
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// Spaces, tabs, feeds and line breaks.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Errors produced while tokenizing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// Text that starts no token.
    #[default]
    UnrecognizedInput,
    /// A numeric literal that does not fit a 64 bit integer.
    LiteralTooLarge,
    /// A date-time literal that fails calendar validation.
    InvalidDateTime(DateTimeError),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateTime(instant) => f.write_str(&format_date_time(instant)),
            Self::Double(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}L"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Identifier(name) => f.write_str(name),
            Self::Dot => f.write_str("."),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::EqualEqual => f.write_str("=="),
            Self::BangEqual => f.write_str("!="),
            Self::LessEqual => f.write_str("<="),
            Self::GreaterEqual => f.write_str(">="),
            Self::Less => f.write_str("<"),
            Self::Greater => f.write_str(">"),
            Self::DoubleAmpersand => f.write_str("&&"),
            Self::DoublePipe => f.write_str("||"),
            Self::Ignored => Ok(()),
        }
    }
}

/// Tokenizes `source`, pairing every token with its starting byte offset.
///
/// # Errors
/// - `InvalidToken` for text that starts no token.
/// - `LiteralTooLarge` for integer literals beyond 64 bits.
/// - `InvalidDateTime` for date-time literals that fail calendar validation.
///
/// # Example
/// ```
/// use tyexpr::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("age >= 19L").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("age".to_string()), 0),
///                 (Token::GreaterEqual, 4),
///                 (Token::Long(19), 7)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, offset)),
            Err(LexError::UnrecognizedInput) => {
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      offset });
            },
            Err(LexError::LiteralTooLarge) => {
                return Err(ParseError::LiteralTooLarge { literal: lexer.slice().to_string(),
                                                         offset });
            },
            Err(LexError::InvalidDateTime(reason)) => {
                return Err(ParseError::InvalidDateTime { literal: lexer.slice().to_string(),
                                                         reason,
                                                         offset });
            },
        }
    }

    Ok(tokens)
}

/// Validates a date-time literal against the calendar.
fn parse_instant(lex: &logos::Lexer<Token>) -> Result<Instant, LexError> {
    parse_date_time(lex.slice()).map_err(LexError::InvalidDateTime)
}

/// Parses a double literal from the current token slice.
fn parse_double(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a long literal, dropping its `L` suffix.
fn parse_long(lex: &logos::Lexer<Token>) -> Result<i128, LexError> {
    let slice = lex.slice();
    slice[..slice.len() - 1].parse().map_err(|_| LexError::LiteralTooLarge)
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::LiteralTooLarge)
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes of a string literal and resolves its escapes.
///
/// Supported escapes are `\"`, `\\`, `\n`, `\t` and `\r`.
fn parse_string(lex: &logos::Lexer<Token>) -> Result<String, LexError> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            _ => return Err(LexError::UnrecognizedInput),
        }
    }

    Ok(value)
}
