use std::{convert::Infallible, fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    ast::{Arithmetic, NoOperation, Predicate},
    interpreter::{evaluator::core::Resolve, lexer::{Token, tokenize}},
    util::calendar::format_date_time,
};

/// A point in time, in UTC.
pub type Instant = DateTime<Utc>;

/// Represents a value stored in a context.
///
/// Contexts are dynamically typed: a variable of any leaf type looks up a
/// `Value`, which is converted back with [`Primitive::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 32 bit integer.
    Int(i32),
    /// A 64 bit integer.
    Long(i64),
    /// A double precision floating-point number.
    Double(f64),
    /// A string.
    Str(String),
    /// A point in time.
    Instant(Instant),
    /// A boolean.
    Bool(bool),
}

/// The leaf types an expression can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f64`
    Double,
    /// `String`
    String,
    /// [`Instant`]
    Instant,
    /// `bool`
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::String => "String",
            Self::Instant => "Instant",
            Self::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

/// A Rust type usable as the result type of an [`Expression`].
///
/// Each leaf type fixes which operation node its expressions may hold:
/// arithmetic for numbers, relational and logical predicates for booleans,
/// and none for strings and instants.
///
/// [`Expression`]: crate::ast::Expression
pub trait Primitive: Clone + fmt::Debug + PartialEq + Into<Value> {
    /// The operation node of expressions producing this type.
    type Node: Resolve<Output = Self> + fmt::Display + fmt::Debug + Clone + PartialEq;

    /// The type tag of this type.
    const TYPE: ValueType;

    /// Converts a context value back to this type, handing the value back if
    /// it holds another type.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// Writes this value as a literal the parser accepts.
    ///
    /// Holds for every value except non-finite doubles: `inf`, `-inf` and
    /// `NaN` have no literal form.
    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Primitive for i32 {
    type Node = Arithmetic<Self>;

    const TYPE: ValueType = ValueType::Int;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => Ok(v),
            other => Err(other),
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Primitive for i64 {
    type Node = Arithmetic<Self>;

    const TYPE: ValueType = ValueType::Long;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Long(v) => Ok(v),
            other => Err(other),
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}L")
    }
}

impl Primitive for f64 {
    type Node = Arithmetic<Self>;

    const TYPE: ValueType = ValueType::Double;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Double(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Non-finite values print as `inf`, `-inf` or `NaN`, which do not parse
    /// back as constants.
    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string();
        if text.contains('.') || !self.is_finite() {
            f.write_str(&text)
        } else {
            write!(f, "{text}.0")
        }
    }
}

impl Primitive for String {
    type Node = NoOperation<Self>;

    const TYPE: ValueType = ValueType::String;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(v) => Ok(v),
            other => Err(other),
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                '\r' => f.write_str("\\r")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

impl Primitive for Instant {
    type Node = NoOperation<Self>;

    const TYPE: ValueType = ValueType::Instant;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Instant(v) => Ok(v),
            other => Err(other),
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date_time(self))
    }
}

impl Primitive for bool {
    type Node = Predicate;

    const TYPE: ValueType = ValueType::Boolean;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(other),
        }
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Value {
    /// Gets the type tag of the held value.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{Value, ValueType};
    ///
    /// assert_eq!(Value::from(19).value_type(), ValueType::Int);
    /// assert_eq!(Value::from("Sarah").value_type(), ValueType::String);
    /// ```
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Double(_) => ValueType::Double,
            Self::Str(_) => ValueType::String,
            Self::Instant(_) => ValueType::Instant,
            Self::Bool(_) => ValueType::Boolean,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Instant> for Value {
    fn from(v: Instant) -> Self {
        Self::Instant(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => v.fmt_literal(f),
            Self::Long(v) => v.fmt_literal(f),
            Self::Double(v) => v.fmt_literal(f),
            Self::Str(v) => v.fmt_literal(f),
            Self::Instant(v) => v.fmt_literal(f),
            Self::Bool(v) => v.fmt_literal(f),
        }
    }
}

impl FromStr for Value {
    type Err = Infallible;

    /// Reads a value written as a single literal.
    ///
    /// Int literals that do not fit an `i32` become longs. A leading `-`
    /// negates a numeric literal. Anything that is not exactly one literal is
    /// taken verbatim as a string.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::Value;
    ///
    /// assert_eq!("19".parse::<Value>(), Ok(Value::Int(19)));
    /// assert_eq!("-2.5".parse::<Value>(), Ok(Value::Double(-2.5)));
    /// assert_eq!("40000L".parse::<Value>(), Ok(Value::Long(40_000)));
    /// assert_eq!("\"a b\"".parse::<Value>(), Ok(Value::Str("a b".to_string())));
    /// assert_eq!("Sarah Connor".parse::<Value>(),
    ///            Ok(Value::Str("Sarah Connor".to_string())));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Ok(tokens) = tokenize(s) else {
            return Ok(Self::Str(s.to_string()));
        };

        let value = match tokens.as_slice() {
            [(Token::Integer(v), _)] => Some(integer_value(*v)),
            [(Token::Long(v), _)] => i64::try_from(*v).ok().map(Self::Long),
            [(Token::Double(v), _)] => Some(Self::Double(*v)),
            [(Token::Str(v), _)] => Some(Self::Str(v.clone())),
            [(Token::DateTime(v), _)] => Some(Self::Instant(*v)),
            [(Token::Bool(v), _)] => Some(Self::Bool(*v)),
            [(Token::Minus, _), (Token::Integer(v), _)] => Some(integer_value(-*v)),
            [(Token::Minus, _), (Token::Long(v), _)] => i64::try_from(-*v).ok().map(Self::Long),
            [(Token::Minus, _), (Token::Double(v), _)] => Some(Self::Double(-*v)),
            _ => None,
        };

        Ok(value.unwrap_or_else(|| Self::Str(s.to_string())))
    }
}

/// Narrows an integer literal to an int when it fits.
fn integer_value(v: i64) -> Value {
    i32::try_from(v).map_or(Value::Long(v), Value::Int)
}
