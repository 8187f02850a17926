/// Binary operator parsing.
///
/// Implements the precedence levels of the grammar: additive and
/// multiplicative arithmetic, relational comparisons, and logical chains.
pub mod binary;

/// Core parsing infrastructure.
///
/// Holds the token cursor, parse configuration, and the entry point that runs
/// a grammar rule over a whole source text.
pub mod core;

/// Primary expression parsing.
///
/// Factors, literals, variables, parenthesized expressions, and the
/// per-type operand traits.
pub mod primary;

/// Shared parsing helpers.
///
/// Dotted names, expected tokens, error construction, and ordered
/// alternatives with backtracking.
pub mod utils;
