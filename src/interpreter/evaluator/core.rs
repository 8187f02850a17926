use crate::{
    ast::{Expression, NoOperation},
    error::EvalError,
    interpreter::{
        context::{Context, EmptyContext},
        value::core::Primitive,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// A node that computes a value from a context.
///
/// Implemented by every operation node; [`Expression::resolve`] dispatches
/// to it for operations and handles constants and variables itself.
pub trait Resolve {
    /// The type of the computed value.
    type Output;

    /// Computes the node's value, looking variables up in `context`.
    ///
    /// # Errors
    /// Propagates the first [`EvalError`] raised by any sub-expression.
    fn resolve(&self, context: &dyn Context) -> EvalResult<Self::Output>;
}

impl<T: Primitive> Expression<T> {
    /// Computes the value of the expression.
    ///
    /// Constants ignore the context. Variables are looked up through it, and
    /// operations resolve their operands first. The tree itself is never
    /// modified, so one tree may be resolved against many contexts.
    ///
    /// # Errors
    /// - `VariableNotFound` if a variable path is missing from the context.
    /// - `TypeMismatch` if the context holds a value of another type.
    /// - `DivisionByZero` or `Overflow` from int and long arithmetic.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{MapContext, parse_boolean_expression};
    ///
    /// let rule = parse_boolean_expression("age > 19 && salary > 40000").unwrap();
    /// let context = MapContext::new().with("age", 25).with("salary", 50_000);
    ///
    /// assert_eq!(rule.resolve(&context), Ok(true));
    /// ```
    pub fn resolve(&self, context: &dyn Context) -> EvalResult<T> {
        match self {
            Self::Constant(value) => Ok(value.clone()),
            Self::Variable(name) => resolve_variable(name, context),
            Self::Operation(node) => node.resolve(context),
        }
    }

    /// Computes the value of an expression that references no variables.
    ///
    /// # Errors
    /// Fails with `VariableNotFound` if the expression holds any variable,
    /// and with the arithmetic errors of [`Expression::resolve`].
    ///
    /// ## Example
    /// ```
    /// use tyexpr::parse_int_expression;
    ///
    /// let expr = parse_int_expression("3*((1+2)*(5+1))").unwrap();
    /// assert_eq!(expr.evaluate(), Ok(54));
    /// ```
    pub fn evaluate(&self) -> EvalResult<T> {
        self.resolve(&EmptyContext)
    }
}

/// Looks a dotted variable name up in `context`.
///
/// Every segment but the last names a nested context; the last names the
/// attribute read from the innermost one.
///
/// # Errors
/// - `VariableNotFound` naming the first segment without a binding.
/// - `TypeMismatch` if the attribute holds a value of another type than `T`.
///
/// ## Example
/// ```
/// use tyexpr::{EvalError, MapContext, interpreter::evaluator::core::resolve_variable};
///
/// let context = MapContext::new().with_nested("a",
///                                             MapContext::new().with_nested("b",
///                                                                           MapContext::new().with("c", 5)));
///
/// assert_eq!(resolve_variable::<i32>("a.b.c", &context), Ok(5));
/// assert_eq!(resolve_variable::<i32>("a.x.c", &context),
///            Err(EvalError::VariableNotFound { name:    "a.x.c".to_string(),
///                                              missing: "x".to_string(), }));
/// ```
pub fn resolve_variable<T: Primitive>(name: &str, context: &dyn Context) -> EvalResult<T> {
    tracing::trace!(name, "resolving variable");

    let (path, attribute) = match name.rsplit_once('.') {
        Some((path, attribute)) => (Some(path), attribute),
        None => (None, name),
    };

    let mut scope = context;
    for segment in path.into_iter().flat_map(|path| path.split('.')) {
        scope = scope.nested(segment)
                     .ok_or_else(|| variable_not_found(name, segment))?;
    }

    let value = scope.get(attribute)
                     .ok_or_else(|| variable_not_found(name, attribute))?;

    T::from_value(value).map_err(|value| {
                            let expected = T::TYPE;
                            let found = value.value_type();
                            tracing::debug!(name, %expected, %found, "variable has the wrong type");
                            EvalError::TypeMismatch { name: name.to_string(),
                                                      expected,
                                                      found }
                        })
}

fn variable_not_found(name: &str, missing: &str) -> EvalError {
    tracing::debug!(name, missing, "variable not found");
    EvalError::VariableNotFound { name:    name.to_string(),
                                  missing: missing.to_string(), }
}

impl<T> Resolve for NoOperation<T> {
    type Output = T;

    fn resolve(&self, _: &dyn Context) -> EvalResult<T> {
        self.unreachable()
    }
}
