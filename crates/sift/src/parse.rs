//! Interval notation parser.
//!
//! ```text
//! range  = open lower? "," upper? close
//! open   = "[" | "("            ; inclusive | exclusive minimum
//! close  = "]" | ")"            ; inclusive | exclusive maximum
//! lower  = "-∞" | <literal of T>
//! upper  = "+∞" | <literal of T>
//! ```
//!
//! Whitespace around every token is ignored. An empty or infinite bound
//! leaves that side unbounded whatever its delimiter says.
//!
//! There is no quoting or escaping. A bound cannot contain `,`, and since
//! whitespace is trimmed a bound consisting only of whitespace reads as
//! empty: `[ ,a]` is `(-∞,a]`, not a range starting at the space character.
//! Such ranges can still be built with the [`Range`] constructors, but
//! [`Range::has_text_form`] reports that they have no text form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SiftError};
use crate::kind::ScalarKind;
use crate::range::Range;
use crate::traits::RangeValue;
use crate::value::Scalar;

pub(crate) const NEG_INFINITY: &str = "-∞";
pub(crate) const POS_INFINITY: &str = "+∞";

static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\[(])\s*([^,]*?)\s*,\s*([^,]*?)\s*([\])])$")
        .expect("range grammar pattern is valid")
});

/// Parses interval notation into a typed [`Range`].
///
/// # Examples
///
/// ```
/// use sift::{parse, Range};
///
/// let exact: Range<i32> = parse("[5,5]").unwrap();
/// assert!(exact.contains(&5));
///
/// // Empty bounds and infinity sentinels are interchangeable.
/// assert_eq!(parse::<i32>("(,5]").unwrap(), parse::<i32>("(-∞,5]").unwrap());
/// assert_eq!(parse::<i32>("(5,]").unwrap(), parse::<i32>("(5,+∞)").unwrap());
///
/// let letters: Range<char> = parse("[a,b)").unwrap();
/// assert!(letters.contains(&'a') && !letters.contains(&'b'));
///
/// assert!(parse::<u8>("[1,300]").is_err());
/// assert!(parse::<i32>("1..5").is_err());
/// ```
///
/// # Errors
///
/// Returns [`SiftError::Format`] if the text does not follow the grammar or
/// a bound is not a valid literal of `T`.
pub fn parse<T: RangeValue>(text: &str) -> Result<Range<T>> {
    let input = text.trim();
    let caps = RANGE_PATTERN.captures(input).ok_or_else(|| {
        log::debug!("rejected range text {:?}: does not match interval grammar", text);
        SiftError::format(text, "expected interval notation like '[min,max)'")
    })?;

    let is_min_inclusive = &caps[1] == "[";
    let is_max_inclusive = &caps[4] == "]";
    let min_value = parse_bound::<T>(text, &caps[2], NEG_INFINITY)?;
    let max_value = parse_bound::<T>(text, &caps[3], POS_INFINITY)?;

    Ok(Range {
        min_value,
        max_value,
        is_min_inclusive,
        is_max_inclusive,
    })
}

fn parse_bound<T: RangeValue>(input: &str, token: &str, infinity: &str) -> Result<Option<T>> {
    if token.is_empty() || token == infinity {
        return Ok(None);
    }

    T::parse_text(token).map(Some).map_err(|reason| {
        log::debug!(
            "rejected range text {:?}: bound {:?} is not a valid {}",
            input,
            token,
            T::TYPE_NAME
        );
        SiftError::format(
            input,
            format!("bound '{}' is not a valid {}: {}", token, T::TYPE_NAME, reason),
        )
    })
}

/// Returns `true` if `text` reads back as itself when used as a bound.
pub(crate) fn is_plain_bound(text: &str) -> bool {
    !text.is_empty()
        && text.trim() == text
        && !text.contains(',')
        && text != NEG_INFINITY
        && text != POS_INFINITY
}

/// Parses interval notation with bounds of a kind chosen at runtime.
///
/// ```
/// use sift::{parse_as, Number, ScalarKind, Value};
///
/// let range = parse_as(ScalarKind::U8, "[5,5]").unwrap();
/// assert!(range.contains_value(&Value::Number(Number::I64(5))));
/// ```
pub fn parse_as(kind: ScalarKind, text: &str) -> Result<Range<Scalar>> {
    kind.parse_range(text)
}

/// Parses interval notation with bounds of the named kind (`"i32"`,
/// `"decimal"`, `"char"`, ...).
///
/// # Errors
///
/// Returns [`SiftError::UnsupportedType`] for an unknown type name, or
/// [`SiftError::Format`] as [`parse`] does.
pub fn parse_named(type_name: &str, text: &str) -> Result<Range<Scalar>> {
    parse_as(type_name.parse()?, text)
}
