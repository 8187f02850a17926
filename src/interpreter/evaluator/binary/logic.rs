use crate::{
    ast::{Logical, LogicalOperator, Predicate},
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Resolve},
    },
};

impl Resolve for Logical {
    type Output = bool;

    /// Evaluates `&&` and `||` with short-circuiting.
    ///
    /// The right operand is resolved only when the left one does not decide
    /// the result, so `false && x` and `true || x` succeed even when `x` is
    /// missing from the context.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{EmptyContext, parse_boolean_expression};
    ///
    /// let guarded = parse_boolean_expression("false && missing > 1").unwrap();
    /// assert_eq!(guarded.resolve(&EmptyContext), Ok(false));
    ///
    /// let unguarded = parse_boolean_expression("true && missing > 1").unwrap();
    /// assert!(unguarded.resolve(&EmptyContext).is_err());
    /// ```
    fn resolve(&self, context: &dyn Context) -> EvalResult<bool> {
        let left = self.left.resolve(context)?;

        match self.op {
            LogicalOperator::And if !left => Ok(false),
            LogicalOperator::Or if left => Ok(true),
            LogicalOperator::And | LogicalOperator::Or => self.right.resolve(context),
        }
    }
}

impl Resolve for Predicate {
    type Output = bool;

    fn resolve(&self, context: &dyn Context) -> EvalResult<bool> {
        match self {
            Self::Relational(comparison) => comparison.resolve(context),
            Self::Logical(logical) => logical.resolve(context),
        }
    }
}
