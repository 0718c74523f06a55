//! Typed intervals with independent bound inclusivity.
//!
//! A [`Range`] has an optional lower and upper bound, each either inclusive
//! or exclusive. A missing bound means the range is unbounded on that side;
//! the inclusivity flag of a missing bound is ignored.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use crate::error::{Result, SiftError};
use crate::parse::is_plain_bound;
use crate::traits::RangeValue;
use crate::value::{Scalar, Value};

/// An interval over an ordered type.
///
/// Ranges can be written out field by field, built with the constructors
/// below, converted from the `std::ops` range types, or parsed from interval
/// notation:
///
/// ```
/// use sift::Range;
///
/// let explicit = Range {
///     min_value: Some(5),
///     max_value: Some(5),
///     is_min_inclusive: true,
///     is_max_inclusive: true,
/// };
/// assert_eq!(explicit, Range::closed(5, 5));
/// assert_eq!(explicit, Range::parse("[5,5]").unwrap());
///
/// let up_to_five: Range<i32> = "(-∞, 5]".parse().unwrap();
/// assert!(up_to_five.contains(&-100));
/// assert!(!up_to_five.contains(&6));
/// ```
///
/// Nothing checks that `min_value <= max_value`: an inverted range is legal
/// and contains nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range<T> {
    /// Lower bound, or `None` for no lower limit.
    pub min_value: Option<T>,
    /// Upper bound, or `None` for no upper limit.
    pub max_value: Option<T>,
    /// Whether a value equal to `min_value` is inside the range.
    pub is_min_inclusive: bool,
    /// Whether a value equal to `max_value` is inside the range.
    pub is_max_inclusive: bool,
}

impl<T> Range<T> {
    /// Creates a range from its four parts.
    pub fn new(
        min_value: Option<T>,
        max_value: Option<T>,
        is_min_inclusive: bool,
        is_max_inclusive: bool,
    ) -> Self {
        Range {
            min_value,
            max_value,
            is_min_inclusive,
            is_max_inclusive,
        }
    }

    /// `(-∞,+∞)`: contains everything.
    pub fn unbounded() -> Self {
        Range::new(None, None, false, false)
    }

    /// `[min,max]`
    pub fn closed(min: T, max: T) -> Self {
        Range::new(Some(min), Some(max), true, true)
    }

    /// `(min,max)`
    pub fn open(min: T, max: T) -> Self {
        Range::new(Some(min), Some(max), false, false)
    }

    /// `[min,max)`
    pub fn closed_open(min: T, max: T) -> Self {
        Range::new(Some(min), Some(max), true, false)
    }

    /// `(min,max]`
    pub fn open_closed(min: T, max: T) -> Self {
        Range::new(Some(min), Some(max), false, true)
    }

    /// `[min,+∞)`
    pub fn at_least(min: T) -> Self {
        Range::new(Some(min), None, true, false)
    }

    /// `(min,+∞)`
    pub fn greater_than(min: T) -> Self {
        Range::new(Some(min), None, false, false)
    }

    /// `(-∞,max]`
    pub fn at_most(max: T) -> Self {
        Range::new(None, Some(max), false, true)
    }

    /// `(-∞,max)`
    pub fn less_than(max: T) -> Self {
        Range::new(None, Some(max), false, false)
    }

    /// Returns `true` if neither side has a bound.
    pub fn is_unbounded(&self) -> bool {
        self.min_value.is_none() && self.max_value.is_none()
    }

    /// Converts the bound values, keeping inclusivity.
    pub fn map<U, F>(self, mut f: F) -> Range<U>
    where
        F: FnMut(T) -> U,
    {
        Range {
            min_value: self.min_value.map(&mut f),
            max_value: self.max_value.map(&mut f),
            is_min_inclusive: self.is_min_inclusive,
            is_max_inclusive: self.is_max_inclusive,
        }
    }

    /// Tests containment with a caller-supplied comparison.
    ///
    /// `compare` receives each present bound and returns how the tested value
    /// orders relative to it. A `None` ordering counts as outside the range.
    /// With no bounds present `compare` is never called and the result is
    /// `true`.
    pub fn contains_by<F>(&self, mut compare: F) -> bool
    where
        F: FnMut(&T) -> Option<Ordering>,
    {
        if let Some(min) = &self.min_value {
            match compare(min) {
                Some(Ordering::Greater) => {}
                Some(Ordering::Equal) if self.is_min_inclusive => {}
                _ => return false,
            }
        }

        if let Some(max) = &self.max_value {
            match compare(max) {
                Some(Ordering::Less) => {}
                Some(Ordering::Equal) if self.is_max_inclusive => {}
                _ => return false,
            }
        }

        true
    }
}

impl<T: RangeValue> Range<T> {
    /// Parses interval notation such as `[5,5]`, `(,5]` or `(5,+∞)`.
    ///
    /// See [`parse`](crate::parse()) for the grammar.
    pub fn parse(text: &str) -> Result<Self> {
        crate::parse::parse(text)
    }

    /// Returns `true` if `value` lies within this range.
    pub fn contains(&self, value: &T) -> bool {
        self.contains_by(|bound| value.compare(bound))
    }

    /// Returns `true` if no value can lie within this range: the bounds are
    /// inverted, or equal without both being inclusive.
    ///
    /// The check is order-theoretic: `(4,5)` over integers is not reported
    /// empty even though no integer lies strictly between 4 and 5.
    pub fn is_empty(&self) -> bool {
        match (&self.min_value, &self.max_value) {
            (Some(min), Some(max)) => !lower_meets_upper(
                min,
                self.is_min_inclusive,
                max,
                self.is_max_inclusive,
            ),
            _ => false,
        }
    }

    /// Returns `true` if the two ranges share at least one point.
    pub fn overlaps(&self, other: &Range<T>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let self_below_other = match (&self.min_value, &other.max_value) {
            (Some(lo), Some(hi)) => {
                lower_meets_upper(lo, self.is_min_inclusive, hi, other.is_max_inclusive)
            }
            _ => true,
        };
        let other_below_self = match (&other.min_value, &self.max_value) {
            (Some(lo), Some(hi)) => {
                lower_meets_upper(lo, other.is_min_inclusive, hi, self.is_max_inclusive)
            }
            _ => true,
        };

        self_below_other && other_below_self
    }
}

fn lower_meets_upper<T: RangeValue>(
    lower: &T,
    lower_inclusive: bool,
    upper: &T,
    upper_inclusive: bool,
) -> bool {
    match lower.compare(upper) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => lower_inclusive && upper_inclusive,
        _ => false,
    }
}

impl<T: fmt::Display> Range<T> {
    /// Returns `true` if every bound's text can appear in interval notation:
    /// non-empty, free of `,`, without leading or trailing whitespace and not
    /// an infinity sentinel.
    ///
    /// ```
    /// use sift::Range;
    ///
    /// assert!(Range::closed("a".to_string(), "z".to_string()).has_text_form());
    /// assert!(!Range::closed("a,b".to_string(), "z".to_string()).has_text_form());
    /// assert!(!Range::at_most(' ').has_text_form());
    /// ```
    pub fn has_text_form(&self) -> bool {
        [&self.min_value, &self.max_value]
            .into_iter()
            .flatten()
            .all(|bound| is_plain_bound(&bound.to_string()))
    }
}

impl Range<Scalar> {
    /// Returns `true` if a field value lies within this range.
    ///
    /// Bounds are compared with [`Value::compare`], so a range of `u8`
    /// bounds can test an `i64` field. A value of another kind, `Null` or
    /// `None` is outside every bounded range.
    pub fn contains_value(&self, value: &Value<'_>) -> bool {
        self.contains_by(|bound| value.compare(&bound.as_value()))
    }
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Range::unbounded()
    }
}

impl<T: RangeValue> FromStr for Range<T> {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        Range::parse(s)
    }
}

/// Renders canonical interval notation. Unbounded sides use the infinity
/// sentinels.
///
/// The grammar has no quoting, so the output only parses back into an
/// equivalent range when [`Range::has_text_form`] holds. Every numeric, char
/// and decimal range built from text does; a `String` bound containing `,`
/// or edge whitespace does not.
impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min_value {
            Some(min) if self.is_min_inclusive => write!(f, "[{}", min)?,
            Some(min) => write!(f, "({}", min)?,
            None => f.write_str("(-∞")?,
        }
        f.write_str(",")?;
        match &self.max_value {
            Some(max) if self.is_max_inclusive => write!(f, "{}]", max),
            Some(max) => write!(f, "{})", max),
            None => f.write_str("+∞)"),
        }
    }
}

/// Exposes the bounds to std APIs such as `BTreeMap::range`.
///
/// `BTreeMap::range` panics on empty ranges, so check
/// [`Range::is_empty`] first when the range comes from user input.
impl<T> RangeBounds<T> for Range<T> {
    fn start_bound(&self) -> Bound<&T> {
        match &self.min_value {
            Some(min) if self.is_min_inclusive => Bound::Included(min),
            Some(min) => Bound::Excluded(min),
            None => Bound::Unbounded,
        }
    }

    fn end_bound(&self) -> Bound<&T> {
        match &self.max_value {
            Some(max) if self.is_max_inclusive => Bound::Included(max),
            Some(max) => Bound::Excluded(max),
            None => Bound::Unbounded,
        }
    }
}

impl<T> From<std::ops::Range<T>> for Range<T> {
    fn from(r: std::ops::Range<T>) -> Self {
        Range::closed_open(r.start, r.end)
    }
}

impl<T> From<std::ops::RangeInclusive<T>> for Range<T> {
    fn from(r: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = r.into_inner();
        Range::closed(start, end)
    }
}

impl<T> From<std::ops::RangeFrom<T>> for Range<T> {
    fn from(r: std::ops::RangeFrom<T>) -> Self {
        Range::at_least(r.start)
    }
}

impl<T> From<std::ops::RangeTo<T>> for Range<T> {
    fn from(r: std::ops::RangeTo<T>) -> Self {
        Range::less_than(r.end)
    }
}

impl<T> From<std::ops::RangeToInclusive<T>> for Range<T> {
    fn from(r: std::ops::RangeToInclusive<T>) -> Self {
        Range::at_most(r.end)
    }
}

impl<T> From<std::ops::RangeFull> for Range<T> {
    fn from(_: std::ops::RangeFull) -> Self {
        Range::unbounded()
    }
}
