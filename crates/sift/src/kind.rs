//! Runtime names for range element types.
//!
//! Generic code picks the element type at compile time (`Range::<u8>::parse`).
//! Criteria read from configuration only know the type by name, so
//! [`ScalarKind`] maps names to parsers and reports
//! [`SiftError::UnsupportedType`] for names it does not know.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, SiftError};
use crate::range::Range;
use crate::traits::RangeValue;
use crate::value::Scalar;

/// Element type of a range chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`, NaN refused.
    F32,
    /// `f64`, NaN refused.
    F64,
    /// [`rust_decimal::Decimal`], plain or scientific notation.
    Decimal,
    /// A single `char`.
    Char,
    /// Any text; compared lexicographically.
    String,
}

impl ScalarKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [ScalarKind; 15] = [
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::Isize,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::Usize,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::Decimal,
        ScalarKind::Char,
        ScalarKind::String,
    ];

    /// Returns the name this kind is looked up by.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
        }
    }

    /// Parses interval notation with bounds of this kind.
    pub fn parse_range(self, text: &str) -> Result<Range<Scalar>> {
        match self {
            ScalarKind::I8 => typed::<i8>(text),
            ScalarKind::I16 => typed::<i16>(text),
            ScalarKind::I32 => typed::<i32>(text),
            ScalarKind::I64 => typed::<i64>(text),
            ScalarKind::Isize => typed::<isize>(text),
            ScalarKind::U8 => typed::<u8>(text),
            ScalarKind::U16 => typed::<u16>(text),
            ScalarKind::U32 => typed::<u32>(text),
            ScalarKind::U64 => typed::<u64>(text),
            ScalarKind::Usize => typed::<usize>(text),
            ScalarKind::F32 => typed::<f32>(text),
            ScalarKind::F64 => typed::<f64>(text),
            ScalarKind::Decimal => typed::<Decimal>(text),
            ScalarKind::Char => typed::<char>(text),
            ScalarKind::String => typed::<String>(text),
        }
    }

    /// Parses one value of this kind.
    ///
    /// Surrounding whitespace is trimmed except for `char` and `string`,
    /// whose text is taken as is.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use sift::{Scalar, ScalarKind};
    ///
    /// assert_eq!(ScalarKind::Decimal.parse_scalar("4.5").unwrap(), Scalar::Decimal(Decimal::new(45, 1)));
    /// assert_eq!(ScalarKind::Char.parse_scalar(" ").unwrap(), Scalar::Char(' '));
    /// assert!(ScalarKind::U8.parse_scalar("300").unwrap_err().is_literal());
    /// ```
    pub fn parse_scalar(self, text: &str) -> Result<Scalar> {
        match self {
            ScalarKind::I8 => scalar::<i8>(text.trim()),
            ScalarKind::I16 => scalar::<i16>(text.trim()),
            ScalarKind::I32 => scalar::<i32>(text.trim()),
            ScalarKind::I64 => scalar::<i64>(text.trim()),
            ScalarKind::Isize => scalar::<isize>(text.trim()),
            ScalarKind::U8 => scalar::<u8>(text.trim()),
            ScalarKind::U16 => scalar::<u16>(text.trim()),
            ScalarKind::U32 => scalar::<u32>(text.trim()),
            ScalarKind::U64 => scalar::<u64>(text.trim()),
            ScalarKind::Usize => scalar::<usize>(text.trim()),
            ScalarKind::F32 => scalar::<f32>(text.trim()),
            ScalarKind::F64 => scalar::<f64>(text.trim()),
            ScalarKind::Decimal => scalar::<Decimal>(text.trim()),
            ScalarKind::Char => scalar::<char>(text),
            ScalarKind::String => scalar::<String>(text),
        }
    }
}

fn scalar<T>(text: &str) -> Result<Scalar>
where
    T: RangeValue + Into<Scalar>,
{
    T::parse_text(text)
        .map(Into::into)
        .map_err(|reason| SiftError::Literal {
            input: text.to_string(),
            type_name: T::TYPE_NAME.to_string(),
            reason,
        })
}

fn typed<T>(text: &str) -> Result<Range<Scalar>>
where
    T: RangeValue + Into<Scalar>,
{
    Ok(Range::<T>::parse(text)?.map(Into::into))
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        ScalarKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| SiftError::UnsupportedType {
                type_name: name.to_string(),
            })
    }
}

impl TryFrom<String> for ScalarKind {
    type Error = SiftError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Value};

    #[test]
    fn names_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(kind.as_str().parse::<ScalarKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn unknown_name_is_unsupported() {
        let err = "uuid".parse::<ScalarKind>().unwrap_err();
        assert_eq!(
            err,
            SiftError::UnsupportedType {
                type_name: "uuid".to_string()
            }
        );

        // Names are exact.
        assert!("I32".parse::<ScalarKind>().is_err());
        assert!("".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn parse_range_widens_to_scalars() {
        let range = ScalarKind::U8.parse_range("[5,5]").unwrap();
        assert_eq!(range, Range::closed(Scalar::from(5u8), Scalar::from(5u8)));
        assert!(range.contains_value(&Value::Number(Number::I64(5))));
    }

    #[test]
    fn parse_range_respects_kind_limits() {
        assert!(ScalarKind::U8.parse_range("[0,256]").unwrap_err().is_format());
        assert!(ScalarKind::I32.parse_range("[4.5,5]").unwrap_err().is_format());
        assert!(ScalarKind::F32.parse_range("[4.5,5]").is_ok());
    }

    #[test]
    fn parse_scalar_keeps_kind() {
        assert_eq!(
            ScalarKind::Decimal.parse_scalar(" 5 ").unwrap(),
            Scalar::Decimal(Decimal::from(5))
        );
        assert_eq!(ScalarKind::Char.parse_scalar("a").unwrap(), Scalar::Char('a'));
        assert_eq!(ScalarKind::I64.parse_scalar("-3").unwrap(), Scalar::from(-3i64));
        assert_eq!(ScalarKind::String.parse_scalar(" x ").unwrap(), Scalar::from(" x "));

        let err = ScalarKind::Char.parse_scalar("ab").unwrap_err();
        assert!(err.is_literal());
        assert!(err.to_string().contains("invalid char literal 'ab'"));
        assert!(ScalarKind::F64.parse_scalar("NaN").unwrap_err().is_literal());
    }

    #[test]
    fn decimal_and_char_kinds() {
        let decimal = ScalarKind::Decimal.parse_range("[4.5,5]").unwrap();
        assert_eq!(decimal.min_value, Some(Scalar::Decimal(Decimal::new(45, 1))));

        let letters = ScalarKind::Char.parse_range("[a,b)").unwrap();
        assert!(letters.contains_value(&Value::Char('a')));
        assert!(!letters.contains_value(&Value::Char('b')));
    }
}
