use crate::{ast::ArithmeticOperator, interpreter::value::core::ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while resolving an expression.
pub enum EvalError {
    /// A variable path could not be followed through the context.
    VariableNotFound {
        /// The full dotted name of the variable.
        name:    String,
        /// The path segment or attribute that had no binding.
        missing: String,
    },
    /// The context holds a value of another type than the variable's.
    TypeMismatch {
        /// The full dotted name of the variable.
        name:     String,
        /// The type the expression required.
        expected: ValueType,
        /// The type found in the context.
        found:    ValueType,
    },
    /// Attempted integer division by zero.
    DivisionByZero {
        /// The integer type being divided.
        value_type: ValueType,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The operator that overflowed.
        op:         ArithmeticOperator,
        /// The integer type being computed.
        value_type: ValueType,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableNotFound { name, missing } if name == missing => {
                write!(f, "Variable '{name}' not found.")
            },
            Self::VariableNotFound { name, missing } => {
                write!(f, "Variable '{name}' not found: nothing is bound to '{missing}'.")
            },
            Self::TypeMismatch { name,
                                 expected,
                                 found, } => write!(f,
                                                    "Variable '{name}' holds a {found} value where a {expected} is required."),
            Self::DivisionByZero { value_type } => {
                write!(f, "Division by zero in {value_type} arithmetic.")
            },
            Self::Overflow { op, value_type } => {
                write!(f, "{value_type} overflow while computing '{op}'.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
