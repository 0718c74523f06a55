//! Runtime value types for field comparison.
//!
//! [`Value`] is what an accessor hands back for a record field; [`Scalar`] is
//! the owned counterpart stored inside criteria. Both share one comparison
//! routine so that a criterion written with an `i64` constant can be checked
//! against a `u8` field, a decimal range against an integer field, and so on.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use sift::{Number, Value};
///
/// struct Person {
///     first_name: String,
///     favorite_number: i32,
/// }
///
/// fn accessor<'a>(person: &'a Person, field: &str) -> Value<'a> {
///     match field {
///         "first_name" => Value::String(&person.first_name),
///         "favorite_number" => Value::Number(Number::from(person.favorite_number)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Integer or floating point value.
    Number(Number),
    /// Arbitrary-precision decimal value.
    Decimal(Decimal),
    /// Single Unicode scalar value.
    Char(char),
    /// Boolean value.
    Bool(bool),
    /// The field exists but holds no value (e.g. an empty `Option`).
    Null,
    /// The record has no such field.
    None,
}

/// Broad comparison class of a value.
///
/// Values of the same kind can be compared; values of different kinds never
/// constrain each other. Integers, floats and decimals share one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Strings.
    Text,
    /// Integers, floats and decimals.
    Numeric,
    /// Single characters.
    Char,
    /// Booleans.
    Bool,
}

impl ValueKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Numeric => "numeric",
            ValueKind::Char => "char",
            ValueKind::Bool => "bool",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Value<'a> {
    /// Returns `true` if the record has no such field.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if the field exists but is empty.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the comparison class, or `None` for [`Value::Null`] and
    /// [`Value::None`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::String(_) => Some(ValueKind::Text),
            Value::Number(_) | Value::Decimal(_) => Some(ValueKind::Numeric),
            Value::Char(_) => Some(ValueKind::Char),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Null | Value::None => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the decimal value, if present.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the character value, if present.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Compares two values.
    ///
    /// Returns `None` when the values are of different kinds, when either is
    /// `Null`/`None`, or when a float comparison involves `NaN`.
    pub fn compare(&self, other: &Value<'_>) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => a.compare(*b),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::Number(n), Value::Decimal(d)) => n.compare_decimal(*d),
            (Value::Decimal(d), Value::Number(n)) => n.compare_decimal(*d).map(Ordering::reverse),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Signed and unsigned integers compare exactly; anything involving a float
/// is compared as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // A negative signed value is below every unsigned one.
            (Number::I64(a), Number::U64(b)) => Some(match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            }),
            (Number::U64(a), Number::I64(b)) => Some(match u64::try_from(b) {
                Ok(b) => a.cmp(&b),
                Err(_) => Ordering::Greater,
            }),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Compares this number against a decimal.
    ///
    /// Integers are widened to `Decimal` exactly; floats compare against the
    /// decimal's nearest `f64`.
    pub fn compare_decimal(self, other: Decimal) -> Option<Ordering> {
        match self {
            Number::I64(n) => Some(Decimal::from(n).cmp(&other)),
            Number::U64(n) => Some(Decimal::from(n).cmp(&other)),
            Number::F64(n) => n.partial_cmp(&other.to_f64()?),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Owned value stored in a criterion.
///
/// Unlike [`Value`], which borrows from the record, `Scalar` owns its data so
/// it can live inside a [`Criteria`](crate::Criteria) set.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value.
    String(String),
    /// Integer or floating point value.
    Number(Number),
    /// Arbitrary-precision decimal value.
    Decimal(Decimal),
    /// Single Unicode scalar value.
    Char(char),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Borrows this scalar as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::String(s) => Value::String(s),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Decimal(d) => Value::Decimal(*d),
            Scalar::Char(c) => Value::Char(*c),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }

    /// Returns the comparison class of this scalar.
    pub fn kind(&self) -> ValueKind {
        match self {
            Scalar::String(_) => ValueKind::Text,
            Scalar::Number(_) | Scalar::Decimal(_) => ValueKind::Numeric,
            Scalar::Char(_) => ValueKind::Char,
            Scalar::Bool(_) => ValueKind::Bool,
        }
    }

    /// Returns `true` if a field holding `value` can be compared with this
    /// scalar.
    pub fn accepts(&self, value: &Value<'_>) -> bool {
        value.kind() == Some(self.kind())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => n.fmt(f),
            Scalar::Decimal(d) => d.fmt(f),
            Scalar::Char(c) => write!(f, "{}", c),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl From<Decimal> for Scalar {
    fn from(d: Decimal) -> Self {
        Scalar::Decimal(d)
    }
}

impl From<char> for Scalar {
    fn from(c: char) -> Self {
        Scalar::Char(c)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

macro_rules! scalar_from_number {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )+
    };
}

scalar_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
