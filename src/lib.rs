//! # tyexpr
//!
//! tyexpr parses typed expressions written as text and evaluates them against
//! host-supplied variables. It covers int, long and double arithmetic,
//! comparisons of strings, date-times and numbers, and `&&`/`||` chains, such
//! as `age > 19 && salary > 40000L`.
//!
//! Every expression has a result type fixed when it is parsed. Operands of an
//! operator always share one type; there is no implicit conversion.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::parser::{
    binary::{parse_additive, parse_logical},
    core::parse_source,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the typed `Expression` tree and its operation nodes.
/// Trees are built by the parser or by the construction API (constructors and
/// `std::ops` operators) and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines arithmetic, relational and logical nodes and their operators.
/// - Ties the allowed node kind of each expression to its result type.
/// - Renders trees back to parseable text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating expressions, with the byte offset of parse failures and the
/// variable name of evaluation failures.
///
/// # Responsibilities
/// - Defines `ParseError` and `EvalError`.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates lexing, parsing, evaluation and variable lookup.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator, values and contexts.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities.
///
/// # Responsibilities
/// - Validates and formats date-time literals.
pub mod util;

pub use crate::{
    ast::{
        ArithmeticOperator, BooleanExpression, DoubleExpression, Expression, InstantExpression,
        IntExpression, LogicalOperator, LongExpression, RelationalOperator, StringExpression,
    },
    error::{EvalError, ParseError},
    interpreter::{
        context::{Context, EmptyContext, MapContext},
        parser::core::ParseConfig,
        value::core::{Instant, Value, ValueType},
    },
};

/// Parses a boolean expression.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete boolean expression.
///
/// # Examples
/// ```
/// use tyexpr::{MapContext, parse_boolean_expression};
///
/// let rule = parse_boolean_expression("age >= 19").unwrap();
///
/// assert_eq!(rule.resolve(&MapContext::new().with("age", 19)), Ok(true));
/// assert_eq!(rule.resolve(&MapContext::new().with("age", 18)), Ok(false));
///
/// // Operands of a comparison must share a type.
/// assert!(parse_boolean_expression("name == 19").is_ok());
/// assert!(parse_boolean_expression("\"Sarah\" == 19").is_err());
/// ```
pub fn parse_boolean_expression(text: &str) -> Result<BooleanExpression, ParseError> {
    parse_boolean_expression_with_config(text, &ParseConfig::default())
}

/// Parses an int expression.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete int expression.
///
/// # Examples
/// ```
/// use tyexpr::parse_int_expression;
///
/// let expr = parse_int_expression("4+1*2").unwrap();
///
/// assert_eq!(expr.to_string(), "(4 + (1 * 2))");
/// assert_eq!(expr.evaluate(), Ok(6));
/// ```
pub fn parse_int_expression(text: &str) -> Result<IntExpression, ParseError> {
    parse_int_expression_with_config(text, &ParseConfig::default())
}

/// Parses a long expression; literals carry the `L` suffix.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete long expression.
///
/// # Examples
/// ```
/// use tyexpr::parse_long_expression;
///
/// assert_eq!(parse_long_expression("3000000000L * 2L").unwrap().evaluate(),
///            Ok(6_000_000_000));
/// assert!(parse_long_expression("3000000000 * 2").is_err());
/// ```
pub fn parse_long_expression(text: &str) -> Result<LongExpression, ParseError> {
    parse_long_expression_with_config(text, &ParseConfig::default())
}

/// Parses a double expression; literals need a fractional part.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete double expression.
///
/// # Examples
/// ```
/// use tyexpr::parse_double_expression;
///
/// assert_eq!(parse_double_expression("7.0 / 2.0").unwrap().evaluate(), Ok(3.5));
/// assert!(parse_double_expression("7 / 2").is_err());
/// ```
pub fn parse_double_expression(text: &str) -> Result<DoubleExpression, ParseError> {
    parse_double_expression_with_config(text, &ParseConfig::default())
}

/// Parses a boolean expression with explicit limits.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete boolean expression or
/// exceeds the limits of `config`.
#[tracing::instrument(level = "debug", skip(config))]
pub fn parse_boolean_expression_with_config(text: &str,
                                            config: &ParseConfig)
                                            -> Result<BooleanExpression, ParseError> {
    parse_source(text, config, parse_logical)
}

/// Parses an int expression with explicit limits.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete int expression or
/// exceeds the limits of `config`.
#[tracing::instrument(level = "debug", skip(config))]
pub fn parse_int_expression_with_config(text: &str,
                                        config: &ParseConfig)
                                        -> Result<IntExpression, ParseError> {
    parse_source(text, config, parse_additive::<i32>)
}

/// Parses a long expression with explicit limits.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete long expression or
/// exceeds the limits of `config`.
#[tracing::instrument(level = "debug", skip(config))]
pub fn parse_long_expression_with_config(text: &str,
                                         config: &ParseConfig)
                                         -> Result<LongExpression, ParseError> {
    parse_source(text, config, parse_additive::<i64>)
}

/// Parses a double expression with explicit limits.
///
/// # Errors
/// Returns a [`ParseError`] if `text` is not a complete double expression or
/// exceeds the limits of `config`.
#[tracing::instrument(level = "debug", skip(config))]
pub fn parse_double_expression_with_config(text: &str,
                                           config: &ParseConfig)
                                           -> Result<DoubleExpression, ParseError> {
    parse_source(text, config, parse_additive::<f64>)
}
