use crate::{
    ast::{
        ArithmeticOperator, BooleanExpression, Expression, LogicalOperator, RelationalOperator,
    },
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            primary::{
                ComparableOperand, NumericOperand, parse_boolean_literal, parse_factor,
                parse_parenthesized_boolean, parse_variable,
            },
            utils::{Rule, end_of_input, parse_alternatives, unexpected},
        },
        value::core::Instant,
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with offsets.
///
/// # Returns
/// An arithmetic tree of type `T`.
pub fn parse_additive<T: NumericOperand>(tokens: &mut TokenStream<'_>) -> ParseResult<Expression<T>> {
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Plus | ArithmeticOperator::Minus)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expression::arithmetic(op, left, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with offsets.
///
/// # Returns
/// An arithmetic tree combining factors.
pub fn parse_multiplicative<T: NumericOperand>(tokens: &mut TokenStream<'_>)
                                               -> ParseResult<Expression<T>> {
    let mut left = parse_factor(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Times | ArithmeticOperator::Div)
        {
            tokens.next();
            let right = parse_factor(tokens)?;
            left = Expression::arithmetic(op, left, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses a comparison of two operands of type `T`.
///
/// The rule is: `comparison := operand ("==" | "!=" | "<=" | ">=" | "<" | ">")
/// operand`
///
/// # Errors
/// Fails if either operand is not of type `T` or no relational operator
/// separates them.
pub fn parse_comparison<T: ComparableOperand>(tokens: &mut TokenStream<'_>)
                                              -> ParseResult<BooleanExpression> {
    let left = T::parse_operand(tokens)?;

    let op = match tokens.next() {
        Some((token, offset)) => token_to_relational_operator(token).ok_or_else(|| {
                                     unexpected(token, "a relational operator", *offset)
                                 })?,
        None => return Err(end_of_input("a relational operator", tokens.offset())),
    };

    let right = T::parse_operand(tokens)?;
    Ok(Expression::relational(op, left, right))
}

/// Parses a relational expression of whichever operand type matches first.
///
/// Operand types are tried in the order string, date-time, int, long,
/// double. Two bare variables therefore always compare as strings.
///
/// # Errors
/// `NoMatchingAlternative` with one trace line per operand type.
pub fn parse_relational(tokens: &mut TokenStream<'_>) -> ParseResult<BooleanExpression> {
    let alternatives: [(&str, Rule<'_, BooleanExpression>); 5] =
        [("string", parse_comparison::<String>),
         ("date-time", parse_comparison::<Instant>),
         ("int", parse_comparison::<i32>),
         ("long", parse_comparison::<i64>),
         ("double", parse_comparison::<f64>)];

    parse_alternatives(tokens, &alternatives)
}

/// Parses one operand of `&&` or `||`.
///
/// The rule is:
/// ```text
///     boolean_term := relational
///                   | "(" logical ")"
///                   | "true" | "false"
///                   | name
/// ```
/// Relational expressions are tried before parenthesized ones so that
/// `(a) > 1` compares the parenthesized int instead of reading `(a)` as a
/// boolean variable.
///
/// # Errors
/// `NoMatchingAlternative` when no form matches.
pub fn parse_boolean_term(tokens: &mut TokenStream<'_>) -> ParseResult<BooleanExpression> {
    let alternatives: [(&str, Rule<'_, BooleanExpression>); 4] =
        [("comparison", parse_relational),
         ("parenthesized", parse_parenthesized_boolean),
         ("boolean literal", parse_boolean_literal),
         ("boolean variable", parse_variable::<bool>)];

    parse_alternatives(tokens, &alternatives)
}

/// Parses `&&` and `||` chains.
///
/// Both operators bind equally and fold left to right, so
/// `a || b && c` is `(a || b) && c`.
///
/// The rule is: `logical := boolean_term (("&&" | "||") boolean_term)*`
///
/// # Parameters
/// - `tokens`: Token stream with offsets.
///
/// # Returns
/// A boolean expression tree.
pub fn parse_logical(tokens: &mut TokenStream<'_>) -> ParseResult<BooleanExpression> {
    let mut left = parse_boolean_term(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_logical_operator(token)
        {
            tokens.next();
            let right = parse_boolean_term(tokens)?;
            left = Expression::logical(op, left, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to an arithmetic operator, if it is one.
#[must_use]
pub const fn token_to_arithmetic_operator(token: &Token) -> Option<ArithmeticOperator> {
    match token {
        Token::Plus => Some(ArithmeticOperator::Plus),
        Token::Minus => Some(ArithmeticOperator::Minus),
        Token::Star => Some(ArithmeticOperator::Times),
        Token::Slash => Some(ArithmeticOperator::Div),
        _ => None,
    }
}

/// Maps a token to a relational operator, if it is one.
#[must_use]
pub const fn token_to_relational_operator(token: &Token) -> Option<RelationalOperator> {
    match token {
        Token::EqualEqual => Some(RelationalOperator::Equals),
        Token::BangEqual => Some(RelationalOperator::NotEquals),
        Token::Less => Some(RelationalOperator::LessThan),
        Token::LessEqual => Some(RelationalOperator::LessEqualsThan),
        Token::Greater => Some(RelationalOperator::GreaterThan),
        Token::GreaterEqual => Some(RelationalOperator::GreaterEqualsThan),
        _ => None,
    }
}

/// Maps a token to a logical operator, if it is one.
#[must_use]
pub const fn token_to_logical_operator(token: &Token) -> Option<LogicalOperator> {
    match token {
        Token::DoubleAmpersand => Some(LogicalOperator::And),
        Token::DoublePipe => Some(LogicalOperator::Or),
        _ => None,
    }
}
