use crate::util::calendar::DateTimeError;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the byte offset in the source text where the
/// failure was detected.
pub enum ParseError {
    /// Text that does not start any token.
    InvalidToken {
        /// The unrecognized text.
        token:  String,
        /// Byte offset of the text.
        offset: usize,
    },
    /// A date-time literal that is not a valid calendar instant.
    InvalidDateTime {
        /// The literal as written.
        literal: String,
        /// Which field was out of range.
        reason:  DateTimeError,
        /// Byte offset of the literal.
        offset:  usize,
    },
    /// A numeric literal too large for the type it was parsed as.
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// Byte offset of the literal.
        offset:  usize,
    },
    /// Found a token that the grammar does not allow here.
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// What the grammar would have accepted.
        expected: String,
        /// Byte offset of the token.
        offset:   usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// What the grammar would have accepted.
        expected: String,
        /// Byte offset of the end of input.
        offset:   usize,
    },
    /// Found extra tokens after a complete expression.
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
    /// None of the grammar alternatives matched.
    NoMatchingAlternative {
        /// The furthest offset any alternative reached before failing.
        offset: usize,
        /// One line per attempted alternative describing why it failed.
        trace:  Vec<String>,
    },
    /// Parentheses nest deeper than the configured limit.
    NestingTooDeep {
        /// The configured limit.
        max:    usize,
        /// Byte offset of the parenthesis that exceeded it.
        offset: usize,
    },
}

impl ParseError {
    /// Gets the byte offset where parsing failed.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::parse_int_expression;
    ///
    /// let error = parse_int_expression("1 + * 2").unwrap_err();
    /// assert_eq!(error.offset(), 4);
    /// ```
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::InvalidToken { offset, .. }
            | Self::InvalidDateTime { offset, .. }
            | Self::LiteralTooLarge { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset, .. }
            | Self::UnexpectedTrailingTokens { offset, .. }
            | Self::NoMatchingAlternative { offset, .. }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }

    /// The attempted grammar alternatives, if several were tried.
    #[must_use]
    pub fn trace(&self) -> &[String] {
        match self {
            Self::NoMatchingAlternative { trace, .. } => trace,
            _ => &[],
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken { token, offset } => {
                write!(f, "Error at offset {offset}: Unrecognized input '{token}'.")
            },

            Self::InvalidDateTime { literal,
                                    reason,
                                    offset, } => write!(f,
                                                        "Error at offset {offset}: Invalid date-time literal '{literal}': {reason}."),

            Self::LiteralTooLarge { literal, offset } => {
                write!(f, "Error at offset {offset}: Literal {literal} is too large.")
            },

            Self::UnexpectedToken { token,
                                    expected,
                                    offset, } => write!(f,
                                                        "Error at offset {offset}: Unexpected token '{token}', expected {expected}."),

            Self::UnexpectedEndOfInput { expected, offset } => write!(f,
                                                                      "Error at offset {offset}: Unexpected end of input, expected {expected}."),

            Self::UnexpectedTrailingTokens { token, offset } => write!(f,
                                                                       "Error at offset {offset}: Extra tokens after expression, starting with '{token}'."),

            Self::NoMatchingAlternative { offset, trace } => {
                write!(f, "Error at offset {offset}: No alternative matched.")?;
                for line in trace {
                    write!(f, "\n  {line}")?;
                }
                Ok(())
            },

            Self::NestingTooDeep { max, offset } => write!(f,
                                                           "Error at offset {offset}: Parentheses nest deeper than {max} levels."),
        }
    }
}

impl std::error::Error for ParseError {}
