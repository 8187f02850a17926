use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, TokenStream},
    },
};

/// A grammar rule that can be tried as one of several alternatives.
pub(in crate::interpreter::parser) type Rule<'a, T> = fn(&mut TokenStream<'a>) -> ParseResult<T>;

/// Builds the error for a token the grammar does not allow here.
pub(in crate::interpreter::parser) fn unexpected(token: &Token,
                                                 expected: &str,
                                                 offset: usize)
                                                 -> ParseError {
    ParseError::UnexpectedToken { token: token.to_string(),
                                  expected: expected.to_string(),
                                  offset }
}

/// Builds the error for input that ends where `expected` was required.
pub(in crate::interpreter::parser) fn end_of_input(expected: &str, offset: usize) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                       offset }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Errors
/// - `UnexpectedToken` if another token follows.
/// - `UnexpectedEndOfInput` if the input ends.
pub(in crate::interpreter::parser) fn expect_token(tokens: &mut TokenStream<'_>,
                                                   expected: &Token)
                                                   -> ParseResult<()> {
    let description = format!("'{expected}'");
    match tokens.next() {
        Some((token, _)) if token == expected => Ok(()),
        Some((token, offset)) => Err(unexpected(token, &description, *offset)),
        None => Err(end_of_input(&description, tokens.offset())),
    }
}

/// Parses a dotted variable name such as `person.address.city`.
///
/// Grammar: `name := identifier ("." identifier)*`
///
/// # Returns
/// The segments joined by `.`, whatever whitespace separated them.
///
/// # Errors
/// Returns a `ParseError` if the name does not start with an identifier or a
/// `.` is not followed by one.
pub(in crate::interpreter::parser) fn parse_dotted_name(tokens: &mut TokenStream<'_>)
                                                        -> ParseResult<String> {
    let mut name = parse_identifier(tokens)?;
    loop {
        if let Some(Token::Dot) = tokens.peek() {
            tokens.next();
            name.push('.');
            name.push_str(&parse_identifier(tokens)?);
            continue;
        }
        break;
    }
    Ok(name)
}

fn parse_identifier(tokens: &mut TokenStream<'_>) -> ParseResult<String> {
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, offset)) => Err(unexpected(token, "an identifier", *offset)),
        None => Err(end_of_input("an identifier", tokens.offset())),
    }
}

/// Tries each rule in order and keeps the first that succeeds.
///
/// Every rule starts from the same position; tokens are consumed only by the
/// successful one. When all fail, the error carries the furthest offset any
/// of them reached and one trace line per failure, labelled with the rule's
/// name. Traces of nested alternatives are flattened as `outer > inner`.
///
/// # Errors
/// `NoMatchingAlternative` when no rule matches.
pub(in crate::interpreter::parser) fn parse_alternatives<'a, T>(
    tokens: &mut TokenStream<'a>,
    alternatives: &[(&str, Rule<'a, T>)])
    -> ParseResult<T> {
    let mut furthest = tokens.offset();
    let mut trace = Vec::with_capacity(alternatives.len());

    for (label, rule) in alternatives {
        let mut attempt = *tokens;
        match rule(&mut attempt) {
            Ok(value) => {
                *tokens = attempt;
                return Ok(value);
            },
            Err(error) => {
                tracing::trace!(label, offset = error.offset(), "alternative failed");
                furthest = furthest.max(error.offset());
                record_failure(&mut trace, label, error);
            },
        }
    }

    Err(ParseError::NoMatchingAlternative { offset: furthest,
                                            trace })
}

fn record_failure(trace: &mut Vec<String>, label: &str, error: ParseError) {
    match error {
        ParseError::NoMatchingAlternative { trace: nested, .. } => {
            trace.extend(nested.into_iter().map(|line| format!("{label} > {line}")));
        },
        error => trace.push(format!("{label}: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn literal_one(tokens: &mut TokenStream<'_>) -> ParseResult<i64> {
        match tokens.next() {
            Some((Token::Integer(1), _)) => Ok(1),
            Some((token, offset)) => Err(unexpected(token, "1", *offset)),
            None => Err(end_of_input("1", tokens.offset())),
        }
    }

    fn one_then_two(tokens: &mut TokenStream<'_>) -> ParseResult<i64> {
        literal_one(tokens)?;
        match tokens.next() {
            Some((Token::Integer(2), _)) => Ok(12),
            Some((token, offset)) => Err(unexpected(token, "2", *offset)),
            None => Err(end_of_input("2", tokens.offset())),
        }
    }

    #[test]
    fn dotted_names_join_segments() {
        let tokens = tokenize("a . b.c + 1").unwrap();
        let mut stream = TokenStream::new(&tokens, 11);

        assert_eq!(parse_dotted_name(&mut stream), Ok("a.b.c".to_string()));
        assert_eq!(stream.peek(), Some(&Token::Plus));
    }

    #[test]
    fn dangling_dot_is_an_error() {
        let tokens = tokenize("a.").unwrap();
        let mut stream = TokenStream::new(&tokens, 2);

        assert!(matches!(parse_dotted_name(&mut stream),
                         Err(ParseError::UnexpectedEndOfInput { offset: 2, .. })));
    }

    #[test]
    fn failed_alternatives_consume_nothing() {
        let tokens = tokenize("1 3").unwrap();
        let mut stream = TokenStream::new(&tokens, 3);
        let alternatives: [(&str, Rule<'_, i64>); 2] = [("pair", one_then_two), ("single", literal_one)];

        assert_eq!(parse_alternatives(&mut stream, &alternatives), Ok(1));
        assert_eq!(stream.peek(), Some(&Token::Integer(3)));
    }

    #[test]
    fn reports_the_furthest_failure() {
        let tokens = tokenize("1 3").unwrap();
        let mut stream = TokenStream::new(&tokens, 3);
        let alternatives: [(&str, Rule<'_, i64>); 1] = [("pair", one_then_two)];
        let nested: [(&str, Rule<'_, i64>); 1] = [("inner", |tokens| {
                                                      let alternatives: [(&str, Rule<'_, i64>); 1] =
                                                          [("pair", one_then_two)];
                                                      parse_alternatives(tokens, &alternatives)
                                                  })];

        let error = parse_alternatives(&mut stream, &alternatives).unwrap_err();
        assert_eq!(error.offset(), 2);
        assert_eq!(error.trace().len(), 1);
        assert!(error.trace()[0].starts_with("pair: "));

        let error = parse_alternatives(&mut stream, &nested).unwrap_err();
        assert!(error.trace()[0].starts_with("inner > pair: "));
        assert_eq!(stream.offset(), 0);
    }
}
