use crate::{
    ast::{Comparison, Relational, RelationalOperator},
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Resolve},
        value::numeric::Orderable,
    },
};

/// Applies a relational operator to two resolved operands.
///
/// `Equals` and `NotEquals` use value equality; the others use the type's
/// order: lexicographic for strings, chronological for instants, numeric
/// for numbers.
///
/// ## Example
/// ```
/// use tyexpr::{RelationalOperator, interpreter::evaluator::binary::comparison::compare};
///
/// assert!(compare(RelationalOperator::LessThan, &"Adam", &"Eve"));
/// assert!(compare(RelationalOperator::GreaterEqualsThan, &19, &19));
/// assert!(!compare(RelationalOperator::NotEquals, &2.5, &2.5));
/// ```
pub fn compare<T: PartialOrd + ?Sized>(op: RelationalOperator, left: &T, right: &T) -> bool {
    match op {
        RelationalOperator::Equals => left == right,
        RelationalOperator::NotEquals => left != right,
        RelationalOperator::LessThan => left < right,
        RelationalOperator::LessEqualsThan => left <= right,
        RelationalOperator::GreaterThan => left > right,
        RelationalOperator::GreaterEqualsThan => left >= right,
    }
}

impl<T: Orderable> Resolve for Relational<T> {
    type Output = bool;

    fn resolve(&self, context: &dyn Context) -> EvalResult<bool> {
        let left = self.left.resolve(context)?;
        let right = self.right.resolve(context)?;

        Ok(compare(self.op, &left, &right))
    }
}

impl Resolve for Comparison {
    type Output = bool;

    fn resolve(&self, context: &dyn Context) -> EvalResult<bool> {
        match self {
            Self::String(relation) => relation.resolve(context),
            Self::Instant(relation) => relation.resolve(context),
            Self::Int(relation) => relation.resolve(context),
            Self::Long(relation) => relation.resolve(context),
            Self::Double(relation) => relation.resolve(context),
        }
    }
}
