use crate::{
    error::ParseError,
    interpreter::lexer::{Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Limits applied while parsing.
///
/// ## Example
/// ```
/// use tyexpr::{ParseConfig, ParseError, parse_int_expression_with_config};
///
/// let config = ParseConfig::default().with_max_nesting_depth(2);
///
/// assert!(parse_int_expression_with_config("((1))", &config).is_ok());
/// assert!(matches!(parse_int_expression_with_config("(((1)))", &config),
///                  Err(ParseError::NestingTooDeep { max: 2, offset: 2 })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// How deep parentheses may nest.
    pub max_nesting_depth: usize,
}

impl ParseConfig {
    /// The nesting limit used by the plain `parse_*_expression` functions.
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH }
    }
}

/// A cursor over a tokenized source.
///
/// The cursor is `Copy`: a grammar rule that may fail after consuming
/// tokens runs on a copy, and the copy is written back only on success.
/// Once every token is consumed, [`offset`](TokenStream::offset) reports the
/// end of the source, so errors at the end of input still carry a position.
#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a> {
    tokens:   &'a [(Token, usize)],
    position: usize,
    end:      usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor at the first token; `end` is the source length.
    #[must_use]
    pub const fn new(tokens: &'a [(Token, usize)], end: usize) -> Self {
        Self { tokens,
               position: 0,
               end }
    }

    /// Gets the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position).map(|(token, _)| token)
    }

    /// Gets the byte offset of the next token, or the end of the source.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .map_or(self.end, |(_, offset)| *offset)
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = &'a (Token, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.tokens.get(self.position)?;
        self.position += 1;
        Some(item)
    }
}

/// Parses a whole source text with one grammar rule.
///
/// Tokenizes `source`, checks parenthesis nesting against `config`, runs
/// `rule`, and rejects any tokens the rule left unconsumed.
///
/// # Errors
/// - Lexical errors from [`tokenize`].
/// - `NestingTooDeep` if parentheses nest deeper than allowed.
/// - Whatever `rule` reports.
/// - `UnexpectedTrailingTokens` if the rule matched only a prefix.
pub fn parse_source<T>(source: &str,
                       config: &ParseConfig,
                       rule: impl FnOnce(&mut TokenStream<'_>) -> ParseResult<T>)
                       -> ParseResult<T> {
    let tokens = tokenize(source)?;
    validate_nesting_depth(&tokens, config.max_nesting_depth)?;

    let mut stream = TokenStream::new(&tokens, source.len());
    let expression = rule(&mut stream)?;

    if let Some((token, offset)) = stream.next() {
        tracing::debug!(offset, %token, "input continues after the expression");
        return Err(ParseError::UnexpectedTrailingTokens { token:  token.to_string(),
                                                          offset: *offset, });
    }

    Ok(expression)
}

/// Checks that parentheses never nest deeper than `max`.
///
/// Runs before the grammar so recursion depth stays bounded. Balance is left
/// to the grammar.
fn validate_nesting_depth(tokens: &[(Token, usize)], max: usize) -> ParseResult<()> {
    let mut depth = 0usize;
    for (token, offset) in tokens {
        match token {
            Token::LParen => {
                depth += 1;
                if depth > max {
                    tracing::debug!(max, offset, "parentheses nest too deep");
                    return Err(ParseError::NestingTooDeep { max,
                                                            offset: *offset });
                }
            },
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reports_end_offset_when_exhausted() {
        let tokens = tokenize("a + 1").unwrap();
        let mut stream = TokenStream::new(&tokens, 5);

        assert_eq!(stream.offset(), 0);
        stream.next();
        stream.next();
        assert_eq!(stream.offset(), 4);
        stream.next();
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.offset(), 5);
    }

    #[test]
    fn copies_advance_independently() {
        let tokens = tokenize("1 2").unwrap();
        let mut stream = TokenStream::new(&tokens, 3);
        let mut attempt = stream;

        attempt.next();
        assert_eq!(attempt.peek(), Some(&Token::Integer(2)));
        assert_eq!(stream.peek(), Some(&Token::Integer(1)));
        stream = attempt;
        assert_eq!(stream.offset(), 2);
    }

    #[test]
    fn nesting_is_counted_not_balanced() {
        let tokens = tokenize("(()(").unwrap();

        assert_eq!(validate_nesting_depth(&tokens, 2), Ok(()));
        assert_eq!(validate_nesting_depth(&tokens, 1),
                   Err(ParseError::NestingTooDeep { max: 1, offset: 1 }));
    }
}
