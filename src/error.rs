/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of an
/// expression. Parse errors include syntax mistakes, unexpected tokens,
/// invalid literals and dates, and operands whose types do not agree.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while resolving an expression
/// against a context, such as variables missing from the context or integer
/// overflow.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
