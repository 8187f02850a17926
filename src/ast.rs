use std::{convert::Infallible, fmt, marker::PhantomData};

use crate::interpreter::value::{
    core::{Instant, Primitive},
    numeric::{Numeric, Orderable},
};

/// An expression tree producing a value of type `T`.
///
/// Trees are immutable once built, either by the parser or directly through
/// the constructors and operators below. The operation a node may hold is
/// fixed by `T`: arithmetic for numbers, relational and logical predicates
/// for booleans, none for strings and instants.
///
/// ## Example
/// ```
/// use tyexpr::{Expression, IntExpression};
///
/// let sum: IntExpression = Expression::constant(10) + Expression::constant(5);
///
/// assert_eq!(sum.evaluate(), Ok(15));
/// assert_eq!(sum.to_string(), "(10 + 5)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<T: Primitive> {
    /// A literal value.
    Constant(T),
    /// A variable referenced by its dotted name, such as `person.age`.
    Variable(String),
    /// An operation over sub-expressions.
    Operation(Box<T::Node>),
}

/// An `i32` expression.
pub type IntExpression = Expression<i32>;
/// An `i64` expression.
pub type LongExpression = Expression<i64>;
/// An `f64` expression.
pub type DoubleExpression = Expression<f64>;
/// A `String` expression.
pub type StringExpression = Expression<String>;
/// An [`Instant`] expression.
pub type InstantExpression = Expression<Instant>;
/// A `bool` expression.
pub type BooleanExpression = Expression<bool>;

/// An arithmetic node: `left op right`, all of the same numeric type.
#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic<T: Numeric> {
    /// The operator.
    pub op:    ArithmeticOperator,
    /// Left operand.
    pub left:  Expression<T>,
    /// Right operand.
    pub right: Expression<T>,
}

/// A relational node comparing two expressions of the same orderable type.
#[derive(Debug, Clone, PartialEq)]
pub struct Relational<T: Orderable> {
    /// The operator.
    pub op:    RelationalOperator,
    /// Left operand.
    pub left:  Expression<T>,
    /// Right operand.
    pub right: Expression<T>,
}

/// A relational node for each orderable type.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Lexicographic string comparison.
    String(Relational<String>),
    /// Chronological comparison.
    Instant(Relational<Instant>),
    /// `i32` comparison.
    Int(Relational<i32>),
    /// `i64` comparison.
    Long(Relational<i64>),
    /// `f64` comparison.
    Double(Relational<f64>),
}

/// A logical node over two boolean expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    /// The operator.
    pub op:    LogicalOperator,
    /// Left operand.
    pub left:  BooleanExpression,
    /// Right operand.
    pub right: BooleanExpression,
}

/// The operation node of boolean expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A comparison of two same-typed operands.
    Relational(Comparison),
    /// `&&` or `||` over two boolean operands.
    Logical(Logical),
}

/// The operation node of types without operators, strings and instants.
///
/// It cannot be constructed, so expressions of these types are always a
/// constant or a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct NoOperation<T>(Infallible, PhantomData<T>);

impl<T> NoOperation<T> {
    /// Proves a value of this type cannot exist.
    pub fn unreachable<R>(&self) -> R {
        let never = self.0;
        match never {}
    }
}

/// Represents an arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOperator {
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Times,
    /// Division (`/`)
    Div,
}

/// Represents a relational operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationalOperator {
    /// Equal to (`==`)
    Equals,
    /// Not equal to (`!=`)
    NotEquals,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqualsThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqualsThan,
}

/// Represents a logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl<T: Primitive> Expression<T> {
    /// Creates a constant expression.
    #[must_use]
    pub const fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Creates a variable expression from a dotted name.
    ///
    /// The name is not validated; a name the parser would reject simply never
    /// resolves.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }
}

impl<T: Primitive> From<T> for Expression<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl<T: Numeric> Expression<T> {
    /// Creates an arithmetic node.
    #[must_use]
    pub fn arithmetic(op: ArithmeticOperator, left: Self, right: Self) -> Self {
        Self::Operation(Box::new(Arithmetic { op, left, right }))
    }
}

impl<T: Orderable> Expression<T> {
    /// Creates a relational node comparing `left` and `right`.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{Expression, MapContext, RelationalOperator};
    ///
    /// let adult = Expression::relational(RelationalOperator::GreaterEqualsThan,
    ///                                    Expression::variable("age"),
    ///                                    Expression::constant(19));
    /// let context = MapContext::new().with("age", 19);
    ///
    /// assert_eq!(adult.resolve(&context), Ok(true));
    /// ```
    #[must_use]
    pub fn relational(op: RelationalOperator, left: Self, right: Self) -> BooleanExpression {
        let comparison = T::into_comparison(Relational { op, left, right });
        Expression::Operation(Box::new(Predicate::Relational(comparison)))
    }

    /// `self == right`
    #[must_use]
    pub fn equals(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::Equals, self, right)
    }

    /// `self != right`
    #[must_use]
    pub fn not_equals(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::NotEquals, self, right)
    }

    /// `self < right`
    #[must_use]
    pub fn less_than(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::LessThan, self, right)
    }

    /// `self <= right`
    #[must_use]
    pub fn less_equals(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::LessEqualsThan, self, right)
    }

    /// `self > right`
    #[must_use]
    pub fn greater_than(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::GreaterThan, self, right)
    }

    /// `self >= right`
    #[must_use]
    pub fn greater_equals(self, right: Self) -> BooleanExpression {
        Self::relational(RelationalOperator::GreaterEqualsThan, self, right)
    }
}

impl BooleanExpression {
    /// Creates a logical node.
    #[must_use]
    pub fn logical(op: LogicalOperator, left: Self, right: Self) -> Self {
        Self::Operation(Box::new(Predicate::Logical(Logical { op, left, right })))
    }

    /// `self && right`
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        Self::logical(LogicalOperator::And, self, right)
    }

    /// `self || right`
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        Self::logical(LogicalOperator::Or, self, right)
    }
}

impl<T: Numeric> std::ops::Add for Expression<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::arithmetic(ArithmeticOperator::Plus, self, rhs)
    }
}

impl<T: Numeric> std::ops::Sub for Expression<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::arithmetic(ArithmeticOperator::Minus, self, rhs)
    }
}

impl<T: Numeric> std::ops::Mul for Expression<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::arithmetic(ArithmeticOperator::Times, self, rhs)
    }
}

impl<T: Numeric> std::ops::Div for Expression<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::arithmetic(ArithmeticOperator::Div, self, rhs)
    }
}

/// `a & b` builds `a && b`.
impl std::ops::BitAnd for BooleanExpression {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

/// `a | b` builds `a || b`.
impl std::ops::BitOr for BooleanExpression {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl<T: Primitive> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => value.fmt_literal(f),
            Self::Variable(name) => f.write_str(name),
            Self::Operation(node) => write!(f, "{node}"),
        }
    }
}

impl<T: Numeric> fmt::Display for Arithmetic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

impl<T: Orderable> fmt::Display for Relational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(relation) => write!(f, "{relation}"),
            Self::Instant(relation) => write!(f, "{relation}"),
            Self::Int(relation) => write!(f, "{relation}"),
            Self::Long(relation) => write!(f, "{relation}"),
            Self::Double(relation) => write!(f, "{relation}"),
        }
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relational(comparison) => write!(f, "{comparison}"),
            Self::Logical(logical) => write!(f, "{logical}"),
        }
    }
}

impl<T> fmt::Display for NoOperation<T> {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.unreachable()
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessEqualsThan => "<=",
            Self::GreaterThan => ">",
            Self::GreaterEqualsThan => ">=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{operator}")
    }
}
