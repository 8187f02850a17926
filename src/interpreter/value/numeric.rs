use crate::{
    ast::{Arithmetic, ArithmeticOperator, Comparison, Relational},
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Instant, Primitive, ValueType},
    },
};

/// A leaf type with `+ - * /`: `i32`, `i64` and `f64`.
pub trait Numeric: Primitive<Node = Arithmetic<Self>> + Copy + PartialOrd {
    /// Applies an arithmetic operator to two operands of this type.
    ///
    /// # Errors
    /// Integer types report division by zero and overflow. Doubles never fail.
    fn apply(op: ArithmeticOperator, left: Self, right: Self) -> EvalResult<Self>;
}

/// A leaf type with a total order usable in relational expressions.
pub trait Orderable: Primitive + PartialOrd {
    /// Wraps a relation between two expressions of this type into the closed
    /// set of comparisons a boolean expression can hold.
    fn into_comparison(relation: Relational<Self>) -> Comparison;
}

impl Numeric for i32 {
    /// Checked integer arithmetic; division truncates toward zero.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{
    ///     ArithmeticOperator, EvalError, ValueType, interpreter::value::numeric::Numeric,
    /// };
    ///
    /// assert_eq!(i32::apply(ArithmeticOperator::Div, -7, 2), Ok(-3));
    /// assert_eq!(i32::apply(ArithmeticOperator::Div, 1, 0),
    ///            Err(EvalError::DivisionByZero { value_type: ValueType::Int }));
    /// ```
    fn apply(op: ArithmeticOperator, left: Self, right: Self) -> EvalResult<Self> {
        let result = match op {
            ArithmeticOperator::Plus => left.checked_add(right),
            ArithmeticOperator::Minus => left.checked_sub(right),
            ArithmeticOperator::Times => left.checked_mul(right),
            ArithmeticOperator::Div => left.checked_div(right),
        };
        integer_result(op, Self::TYPE, right == 0, result)
    }
}

impl Numeric for i64 {
    fn apply(op: ArithmeticOperator, left: Self, right: Self) -> EvalResult<Self> {
        let result = match op {
            ArithmeticOperator::Plus => left.checked_add(right),
            ArithmeticOperator::Minus => left.checked_sub(right),
            ArithmeticOperator::Times => left.checked_mul(right),
            ArithmeticOperator::Div => left.checked_div(right),
        };
        integer_result(op, Self::TYPE, right == 0, result)
    }
}

impl Numeric for f64 {
    fn apply(op: ArithmeticOperator, left: Self, right: Self) -> EvalResult<Self> {
        Ok(match op {
               ArithmeticOperator::Plus => left + right,
               ArithmeticOperator::Minus => left - right,
               ArithmeticOperator::Times => left * right,
               ArithmeticOperator::Div => left / right,
           })
    }
}

/// Turns a checked integer result into an evaluation result.
///
/// A missing result is a division by zero when dividing by zero, and an
/// overflow otherwise (including `MIN / -1`).
fn integer_result<T>(op: ArithmeticOperator,
                     value_type: ValueType,
                     divisor_is_zero: bool,
                     result: Option<T>)
                     -> EvalResult<T> {
    match result {
        Some(value) => Ok(value),
        None if op == ArithmeticOperator::Div && divisor_is_zero => {
            Err(EvalError::DivisionByZero { value_type })
        },
        None => Err(EvalError::Overflow { op, value_type }),
    }
}

impl Orderable for String {
    fn into_comparison(relation: Relational<Self>) -> Comparison {
        Comparison::String(relation)
    }
}

impl Orderable for Instant {
    fn into_comparison(relation: Relational<Self>) -> Comparison {
        Comparison::Instant(relation)
    }
}

impl Orderable for i32 {
    fn into_comparison(relation: Relational<Self>) -> Comparison {
        Comparison::Int(relation)
    }
}

impl Orderable for i64 {
    fn into_comparison(relation: Relational<Self>) -> Comparison {
        Comparison::Long(relation)
    }
}

impl Orderable for f64 {
    fn into_comparison(relation: Relational<Self>) -> Comparison {
        Comparison::Double(relation)
    }
}
