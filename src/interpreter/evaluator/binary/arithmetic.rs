use crate::{
    ast::Arithmetic,
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Resolve},
        value::numeric::Numeric,
    },
};

impl<T: Numeric> Resolve for Arithmetic<T> {
    type Output = T;

    /// Evaluates an arithmetic node.
    ///
    /// Both operands are resolved left to right, then the operator is applied
    /// with the rules of `T`: checked integer arithmetic for ints and longs,
    /// where division truncates toward zero, and real arithmetic for doubles.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{DoubleExpression, Expression, IntExpression};
    ///
    /// let ints: IntExpression = Expression::constant(20) / Expression::constant(10);
    /// let doubles: DoubleExpression = Expression::constant(7.0) / Expression::constant(2.0);
    ///
    /// assert_eq!(ints.evaluate(), Ok(2));
    /// assert_eq!(doubles.evaluate(), Ok(3.5));
    /// ```
    fn resolve(&self, context: &dyn Context) -> EvalResult<T> {
        let left = self.left.resolve(context)?;
        let right = self.right.resolve(context)?;

        T::apply(self.op, left, right)
    }
}
