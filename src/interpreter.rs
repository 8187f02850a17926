/// The context module defines where variable values come from.
///
/// A context maps names to values or to nested contexts. The evaluator walks
/// it to resolve dotted variable names.
///
/// # Responsibilities
/// - Declares the `Context` trait hosts implement over their own data.
/// - Provides `EmptyContext` and the map-backed `MapContext`.
pub mod context;
/// The evaluator module computes the value of expression trees.
///
/// # Responsibilities
/// - Resolves constants, variables and operation nodes against a context.
/// - Applies checked integer arithmetic and real double arithmetic.
/// - Short-circuits `&&` and `||`.
/// - Reports missing variables, type mismatches, division by zero and
///   overflow.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each
/// corresponding to a literal, an identifier, or an operator, paired with its
/// byte offset.
///
/// # Responsibilities
/// - Distinguishes int, long, double, string, boolean and date-time literals.
/// - Validates date-time literals against the calendar.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds typed expression trees from tokens.
///
/// # Responsibilities
/// - Implements the precedence-climbing grammar for each result type.
/// - Selects literal forms per numeric type at compile time.
/// - Tries relational operand types in order and reports a trace when none
///   matches.
pub mod parser;
/// The value module defines the leaf types expressions produce.
///
/// # Responsibilities
/// - Defines the `Value` enum stored in contexts and its type tags.
/// - Ties Rust types to leaf types through the `Primitive` trait.
/// - Implements per-type arithmetic and ordering.
pub mod value;
