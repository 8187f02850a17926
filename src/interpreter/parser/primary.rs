use crate::{
    ast::{BooleanExpression, Expression},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_additive, parse_logical},
            core::{ParseResult, TokenStream},
            utils::{end_of_input, expect_token, parse_dotted_name, unexpected},
        },
        value::{
            core::{Instant, Primitive},
            numeric::{Numeric, Orderable},
        },
    },
};

/// A numeric type the grammar can parse expressions of.
///
/// Each implementation picks the literal form of its type, so parsing an int
/// expression never accepts `5L` or `2.5`.
pub trait NumericOperand: Numeric {
    /// Describes what a factor of this type may start with.
    const EXPECTED: &'static str;

    /// Reads `token` as a literal of this type, negated if `negative`.
    ///
    /// # Returns
    /// `None` if the token is not this type's literal form, otherwise the
    /// value or `LiteralTooLarge` reported at `offset`.
    fn literal(token: &Token, negative: bool, offset: usize) -> Option<ParseResult<Self>>;
}

impl NumericOperand for i32 {
    const EXPECTED: &'static str = "an int literal, a variable or '('";

    fn literal(token: &Token, negative: bool, offset: usize) -> Option<ParseResult<Self>> {
        let Token::Integer(value) = token else {
            return None;
        };
        let value = if negative { -value } else { *value };
        Some(Self::try_from(value).map_err(|_| too_large(token, negative, offset)))
    }
}

impl NumericOperand for i64 {
    const EXPECTED: &'static str = "a long literal, a variable or '('";

    fn literal(token: &Token, negative: bool, offset: usize) -> Option<ParseResult<Self>> {
        let Token::Long(value) = token else {
            return None;
        };
        let value = if negative { -value } else { *value };
        Some(Self::try_from(value).map_err(|_| too_large(token, negative, offset)))
    }
}

impl NumericOperand for f64 {
    const EXPECTED: &'static str = "a double literal, a variable or '('";

    fn literal(token: &Token, negative: bool, _: usize) -> Option<ParseResult<Self>> {
        match token {
            Token::Double(value) => Some(Ok(if negative { -value } else { *value })),
            _ => None,
        }
    }
}

fn too_large(token: &Token, negative: bool, offset: usize) -> ParseError {
    let sign = if negative { "-" } else { "" };
    ParseError::LiteralTooLarge { literal: format!("{sign}{token}"),
                                  offset }
}

/// An orderable type the grammar can parse relational operands of.
pub trait ComparableOperand: Orderable {
    /// Parses one side of a relational expression of this type.
    ///
    /// # Errors
    /// Returns a `ParseError` if the next tokens do not form an operand of
    /// this type.
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>>;
}

impl ComparableOperand for String {
    /// A string literal or a variable.
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>> {
        match tokens.peek() {
            Some(Token::Str(value)) => {
                tokens.next();
                Ok(Expression::constant(value.clone()))
            },
            Some(Token::Identifier(_)) => parse_variable(tokens),
            Some(token) => Err(unexpected(token, "a string literal or a variable", tokens.offset())),
            None => Err(end_of_input("a string literal or a variable", tokens.offset())),
        }
    }
}

impl ComparableOperand for Instant {
    /// A date-time literal or a variable.
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>> {
        match tokens.peek() {
            Some(Token::DateTime(value)) => {
                tokens.next();
                Ok(Expression::constant(*value))
            },
            Some(Token::Identifier(_)) => parse_variable(tokens),
            Some(token) => {
                Err(unexpected(token, "a date-time literal or a variable", tokens.offset()))
            },
            None => Err(end_of_input("a date-time literal or a variable", tokens.offset())),
        }
    }
}

impl ComparableOperand for i32 {
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>> {
        parse_additive(tokens)
    }
}

impl ComparableOperand for i64 {
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>> {
        parse_additive(tokens)
    }
}

impl ComparableOperand for f64 {
    fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<Self>> {
        parse_additive(tokens)
    }
}

/// Parses a factor, the tightest-binding numeric form.
///
/// Grammar:
/// ```text
///     factor := "(" additive ")"
///             | name
///             | "-"? literal
/// ```
/// where `literal` is the literal form of `T`.
///
/// # Errors
/// - `UnexpectedToken` if the factor starts with anything else, or `-` is not
///   followed by a literal.
/// - `LiteralTooLarge` for an int literal outside the `i32` range or a long
///   literal outside the `i64` range, reported at the `-` if there is one.
/// - Errors from the parenthesized expression or the variable name.
pub fn parse_factor<T: NumericOperand>(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<T>> {
    match tokens.peek() {
        Some(Token::LParen) => parse_parenthesized(tokens, parse_additive::<T>),
        Some(Token::Identifier(_)) => parse_variable(tokens),
        Some(Token::Minus) => {
            let offset = tokens.offset();
            tokens.next();
            parse_literal(tokens, true, offset)
        },
        _ => {
            let offset = tokens.offset();
            parse_literal(tokens, false, offset)
        },
    }
}

fn parse_literal<T: NumericOperand>(tokens: &mut TokenStream<'_>,
                                    negative: bool,
                                    start: usize)
                                    -> ParseResult<Expression<T>> {
    match tokens.next() {
        Some((token, offset)) => match T::literal(token, negative, start) {
            Some(value) => value.map(Expression::constant),
            None => Err(unexpected(token, T::EXPECTED, *offset)),
        },
        None => Err(end_of_input(T::EXPECTED, tokens.offset())),
    }
}

/// Parses `"(" inner ")"`.
///
/// # Errors
/// Reports a missing parenthesis or propagates the error of `inner`.
pub fn parse_parenthesized<'a, T>(tokens: &mut TokenStream<'a>,
                                  inner: impl FnOnce(&mut TokenStream<'a>) -> ParseResult<T>)
                                  -> ParseResult<T> {
    expect_token(tokens, &Token::LParen)?;
    let value = inner(tokens)?;
    expect_token(tokens, &Token::RParen)?;
    Ok(value)
}

/// Parses `"(" boolean ")"`.
///
/// # Errors
/// Reports a missing parenthesis or propagates the inner error.
pub fn parse_parenthesized_boolean(tokens: &mut TokenStream<'_>) -> ParseResult<BooleanExpression> {
    parse_parenthesized(tokens, parse_logical)
}

/// Parses `true` or `false`.
///
/// # Errors
/// `UnexpectedToken` or `UnexpectedEndOfInput` for anything else.
pub fn parse_boolean_literal(tokens: &mut TokenStream<'_>) -> ParseResult<BooleanExpression> {
    match tokens.next() {
        Some((Token::Bool(value), _)) => Ok(Expression::constant(*value)),
        Some((token, offset)) => Err(unexpected(token, "'true' or 'false'", *offset)),
        None => Err(end_of_input("'true' or 'false'", tokens.offset())),
    }
}

/// Parses a dotted variable name as a variable of type `T`.
///
/// The type is fixed by the caller; whether the context holds a value of
/// that type is only known when the expression is resolved.
///
/// # Errors
/// Returns a `ParseError` if the tokens do not form a dotted name.
pub fn parse_variable<T: Primitive>(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<T>> {
    parse_dotted_name(tokens).map(Expression::Variable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn factor<T: NumericOperand>(source: &str) -> ParseResult<Expression<T>> {
        let tokens = tokenize(source)?;
        let mut stream = TokenStream::new(&tokens, source.len());
        parse_factor(&mut stream)
    }

    #[test]
    fn factors_only_accept_their_own_literal() {
        assert_eq!(factor::<i32>("5"), Ok(Expression::constant(5)));
        assert_eq!(factor::<i64>("5L"), Ok(Expression::constant(5)));
        assert_eq!(factor::<f64>("5.0"), Ok(Expression::constant(5.0)));

        assert!(factor::<i32>("5L").is_err());
        assert!(factor::<i64>("5").is_err());
        assert!(factor::<f64>("5").is_err());
    }

    #[test]
    fn minus_negates_a_literal() {
        assert_eq!(factor::<i32>("-2147483648"), Ok(Expression::constant(i32::MIN)));
        assert_eq!(factor::<f64>("- 2.5"), Ok(Expression::constant(-2.5)));
        assert!(matches!(factor::<i32>("-x"),
                         Err(ParseError::UnexpectedToken { offset: 1, .. })));
    }

    #[test]
    fn int_literals_must_fit() {
        assert_eq!(factor::<i32>("2147483648"),
                   Err(ParseError::LiteralTooLarge { literal: "2147483648".to_string(),
                                                     offset:  0, }));
        assert_eq!(factor::<i32>("-2147483649"),
                   Err(ParseError::LiteralTooLarge { literal: "-2147483649".to_string(),
                                                     offset:  0, }));
    }

    #[test]
    fn long_literals_must_fit() {
        assert_eq!(factor::<i64>("-9223372036854775808L"), Ok(Expression::constant(i64::MIN)));
        assert_eq!(factor::<i64>("9223372036854775808L"),
                   Err(ParseError::LiteralTooLarge { literal: "9223372036854775808L".to_string(),
                                                     offset:  0, }));
        assert_eq!(factor::<i64>("-9223372036854775809L"),
                   Err(ParseError::LiteralTooLarge { literal: "-9223372036854775809L".to_string(),
                                                     offset:  0, }));
    }

    #[test]
    fn variables_keep_their_dotted_name() {
        assert_eq!(factor::<i64>("person.age"), Ok(Expression::variable("person.age")));
    }
}
