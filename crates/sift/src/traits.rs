//! Traits connecting caller types to the range engine and the record filter.
//!
//! - [`RangeValue`]: element types a [`Range`](crate::Range) can be parsed
//!   into and compared over.
//! - [`AsValue`]: field types that can be viewed as a [`Value`].
//! - [`Record`]: types whose fields can be looked up by name. Usually derived
//!   with `#[derive(Record)]` from `sift-macros`.

use std::borrow::Cow;
use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::value::{Number, Scalar, Value};

/// An ordered type with a canonical text form.
///
/// This is the single interface the range engine needs: a way to read a
/// bound literal and a comparison. `compare` returns `None` for values that
/// are not ordered against each other (a `NaN`), which containment treats as
/// "outside".
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use sift::{Range, RangeValue};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Version(u32, u32);
///
/// impl RangeValue for Version {
///     const TYPE_NAME: &'static str = "version";
///
///     fn parse_text(text: &str) -> Result<Self, String> {
///         let (major, minor) = text.split_once('.').ok_or("expected MAJOR.MINOR")?;
///         let major = major.parse().map_err(|_| "bad major")?;
///         let minor = minor.parse().map_err(|_| "bad minor")?;
///         Ok(Version(major, minor))
///     }
///
///     fn compare(&self, other: &Self) -> Option<Ordering> {
///         Some((self.0, self.1).cmp(&(other.0, other.1)))
///     }
/// }
///
/// let supported: Range<Version> = Range::parse("[1.2,2.0)").unwrap();
/// assert!(supported.contains(&Version(1, 9)));
/// assert!(!supported.contains(&Version(2, 0)));
/// ```
pub trait RangeValue: Sized {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    /// Parses a bound literal. Surrounding whitespace has already been
    /// removed.
    fn parse_text(text: &str) -> std::result::Result<Self, String>;

    /// Compares two values of this type.
    fn compare(&self, other: &Self) -> Option<Ordering>;
}

macro_rules! range_value_int {
    ($($t:ty),+) => {
        $(
            impl RangeValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn parse_text(text: &str) -> std::result::Result<Self, String> {
                    text.parse::<$t>().map_err(|e| e.to_string())
                }

                fn compare(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )+
    };
}

range_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! range_value_float {
    ($($t:ty),+) => {
        $(
            impl RangeValue for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn parse_text(text: &str) -> std::result::Result<Self, String> {
                    let value = text.parse::<$t>().map_err(|e| e.to_string())?;
                    if value.is_nan() {
                        return Err("NaN cannot bound a range".to_string());
                    }
                    Ok(value)
                }

                fn compare(&self, other: &Self) -> Option<Ordering> {
                    self.partial_cmp(other)
                }
            }
        )+
    };
}

range_value_float!(f32, f64);

impl RangeValue for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|e| e.to_string())
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl RangeValue for char {
    const TYPE_NAME: &'static str = "char";

    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(format!(
                "expected a single character, found {}",
                text.chars().count()
            )),
        }
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl RangeValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        Ok(text.to_string())
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Types that can be viewed as a field [`Value`].
///
/// Implemented for strings, primitive numbers up to 64 bits, `Decimal`,
/// `char`, `bool` and `Option<T>` (where `None` becomes [`Value::Null`]).
/// The `Record` derive calls this for every non-skipped field.
pub trait AsValue {
    /// Returns the field value for comparison.
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for Decimal {
    fn as_value(&self) -> Value<'_> {
        Value::Decimal(*self)
    }
}

impl AsValue for char {
    fn as_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for Number {
    fn as_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl AsValue for Scalar {
    fn as_value(&self) -> Value<'_> {
        Scalar::as_value(self)
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::Null,
        }
    }
}

macro_rules! as_value_number {
    ($($t:ty),+) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )+
    };
}

as_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Types whose fields can be looked up by name.
///
/// This trait is typically derived using `#[derive(Record)]` from the
/// `sift-macros` crate, but can also be implemented manually.
///
/// # Manual Implementation
///
/// ```
/// use sift::{Number, Record, Value};
///
/// struct Person {
///     first_name: String,
///     favorite_number: i32,
/// }
///
/// impl Record for Person {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "first_name" => Value::String(&self.first_name),
///             "favorite_number" => Value::Number(Number::from(self.favorite_number)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] if the record has no
    /// field by that name. Names are matched exactly and case-sensitively.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for
    /// [`Criteria::filter`](crate::Criteria::filter).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_parse_and_compare() {
        assert_eq!(i32::parse_text("-5"), Ok(-5));
        assert_eq!(u8::parse_text("255"), Ok(255));
        assert!(u8::parse_text("256").is_err());
        assert!(u16::parse_text("-1").is_err());
        assert!(i64::parse_text("4.5").is_err());
        assert_eq!(5i128.compare(&6), Some(Ordering::Less));
        assert_eq!(<u32 as RangeValue>::TYPE_NAME, "u32");
    }

    #[test]
    fn floats_reject_nan_bounds() {
        assert_eq!(f64::parse_text("4.5"), Ok(4.5));
        assert_eq!(f32::parse_text("5"), Ok(5.0));
        assert!(f64::parse_text("NaN").is_err());
        assert!(f32::parse_text("abc").is_err());
        assert_eq!(f64::NAN.compare(&1.0), None);
    }

    #[test]
    fn decimals_parse_plain_and_scientific() {
        assert_eq!(Decimal::parse_text("4.5"), Ok(Decimal::new(45, 1)));
        assert_eq!(Decimal::parse_text("1e2"), Ok(Decimal::from(100)));
        assert!(Decimal::parse_text("four").is_err());
    }

    #[test]
    fn chars_need_exactly_one_scalar() {
        assert_eq!(char::parse_text("a"), Ok('a'));
        assert_eq!(char::parse_text("é"), Ok('é'));
        assert!(char::parse_text("ab").is_err());
        assert!(char::parse_text("").is_err());
        assert_eq!('a'.compare(&'b'), Some(Ordering::Less));
    }

    #[test]
    fn as_value_for_fields() {
        assert_eq!("John".to_string().as_value(), Value::String("John"));
        assert_eq!(5i32.as_value(), Value::Number(Number::I64(5)));
        assert_eq!(5u16.as_value(), Value::Number(Number::U64(5)));
        assert_eq!('a'.as_value(), Value::Char('a'));
        assert_eq!(Some(2.5f32).as_value(), Value::Number(Number::F64(2.5)));
        assert_eq!(None::<i32>.as_value(), Value::Null);
        assert_eq!(Cow::Borrowed("x").as_value(), Value::String("x"));
    }

    struct Person {
        first_name: String,
        favorite_number: i32,
    }

    impl Record for Person {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "first_name" => self.first_name.as_value(),
                "favorite_number" => self.favorite_number.as_value(),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn record_manual_impl() {
        let person = Person {
            first_name: "John".to_string(),
            favorite_number: 5,
        };

        assert_eq!(person.field_value("first_name"), Value::String("John"));
        assert_eq!(
            Person::accessor(&person, "favorite_number"),
            Value::Number(Number::I64(5))
        );
        assert_eq!(person.field_value("First_Name"), Value::None);
    }
}
