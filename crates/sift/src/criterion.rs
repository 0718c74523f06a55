//! Criterion types for record filtering.
//!
//! A [`Criterion`] pairs a field name with one of three payloads: a constant
//! the field must equal, a collection the field must belong to, or a range
//! the field must fall within.

use std::cmp::Ordering;

use crate::range::Range;
use crate::value::{Scalar, Value};

/// A single named filter condition.
///
/// # Example
///
/// ```
/// use sift::{Criterion, CriterionValue, Range, Scalar};
///
/// let by_name = Criterion::new("first_name", "John");
/// assert!(matches!(by_name.value, CriterionValue::Constant(Scalar::String(_))));
///
/// let by_number = Criterion::new("favorite_number", Range::<i32>::parse("[5,5]").unwrap());
/// assert!(matches!(by_number.value, CriterionValue::Range(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// The field name, matched exactly and case-sensitively.
    pub field: String,
    /// What the field is compared against.
    pub value: CriterionValue,
}

/// Result of evaluating one criterion against one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The field satisfies the criterion.
    Match,
    /// The field fails the criterion; the record is excluded.
    Reject,
    /// The criterion does not constrain this record.
    Skip(SkipReason),
}

impl Outcome {
    /// Returns `true` unless the record must be excluded.
    pub fn admits(self) -> bool {
        !matches!(self, Outcome::Reject)
    }
}

/// Why a criterion did not constrain a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has no field with this name.
    UnknownField,
    /// The field's type cannot be compared with the criterion's payload.
    TypeMismatch,
    /// The criterion is a collection with no elements.
    EmptyCollection,
}

impl SkipReason {
    /// Returns a short description for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::UnknownField => "unknown field",
            SkipReason::TypeMismatch => "type mismatch",
            SkipReason::EmptyCollection => "empty collection",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Criterion {
    /// Creates a new criterion.
    pub fn new(field: impl Into<String>, value: impl Into<CriterionValue>) -> Self {
        Criterion {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluates this criterion against a field value.
    ///
    /// Unknown fields, incompatible types and empty collections yield
    /// [`Outcome::Skip`]; they never exclude a record.
    pub fn evaluate(&self, field_value: &Value<'_>) -> Outcome {
        if field_value.is_none() {
            return Outcome::Skip(SkipReason::UnknownField);
        }

        match &self.value {
            CriterionValue::Constant(constant) => self.eval_constant(field_value, constant),
            CriterionValue::Collection(items) => self.eval_collection(field_value, items),
            CriterionValue::Range(range) => self.eval_range(field_value, range),
        }
    }

    /// Returns `true` if a record with this field value is admitted.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        let outcome = self.evaluate(field_value);
        if let Outcome::Skip(reason) = outcome {
            log::trace!("criterion on '{}' skipped: {}", self.field, reason);
        }
        outcome.admits()
    }

    fn eval_constant(&self, field: &Value<'_>, constant: &Scalar) -> Outcome {
        if field.is_null() {
            return Outcome::Reject;
        }
        if !constant.accepts(field) {
            return Outcome::Skip(SkipReason::TypeMismatch);
        }
        verdict(equals(field, constant))
    }

    fn eval_collection(&self, field: &Value<'_>, items: &[Scalar]) -> Outcome {
        if items.is_empty() {
            return Outcome::Skip(SkipReason::EmptyCollection);
        }
        if field.is_null() {
            return Outcome::Reject;
        }

        let mut comparable = items.iter().filter(|item| item.accepts(field)).peekable();
        if comparable.peek().is_none() {
            return Outcome::Skip(SkipReason::TypeMismatch);
        }
        verdict(comparable.any(|item| equals(field, item)))
    }

    fn eval_range(&self, field: &Value<'_>, range: &Range<Scalar>) -> Outcome {
        if field.is_null() {
            return Outcome::Reject;
        }

        let bounds_comparable = [&range.min_value, &range.max_value]
            .into_iter()
            .flatten()
            .all(|bound| bound.accepts(field));
        if !bounds_comparable {
            return Outcome::Skip(SkipReason::TypeMismatch);
        }
        verdict(range.contains_value(field))
    }
}

fn equals(field: &Value<'_>, scalar: &Scalar) -> bool {
    field.compare(&scalar.as_value()) == Some(Ordering::Equal)
}

fn verdict(matched: bool) -> Outcome {
    if matched {
        Outcome::Match
    } else {
        Outcome::Reject
    }
}

/// Payload of a criterion.
///
/// Conversions pick the kind from the shape of the Rust value: scalars
/// become `Constant`, vectors, slices and arrays become `Collection`, and
/// [`Range`]s become `Range`.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    /// The field must equal this value.
    Constant(Scalar),
    /// The field must equal one of these values. Empty means unconstrained.
    Collection(Vec<Scalar>),
    /// The field must lie within this range.
    Range(Range<Scalar>),
}

impl From<Scalar> for CriterionValue {
    fn from(s: Scalar) -> Self {
        CriterionValue::Constant(s)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for CriterionValue {
    fn from(items: Vec<T>) -> Self {
        CriterionValue::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for CriterionValue {
    fn from(items: [T; N]) -> Self {
        CriterionValue::Collection(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Clone> From<&[T]> for CriterionValue {
    fn from(items: &[T]) -> Self {
        CriterionValue::Collection(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>> From<Range<T>> for CriterionValue {
    fn from(range: Range<T>) -> Self {
        CriterionValue::Range(range.map(Into::into))
    }
}

macro_rules! criterion_constant {
    ($($t:ty),+) => {
        $(
            impl From<$t> for CriterionValue {
                fn from(v: $t) -> Self {
                    CriterionValue::Constant(Scalar::from(v))
                }
            }
        )+
    };
}

criterion_constant!(
    String,
    &str,
    rust_decimal::Decimal,
    char,
    bool,
    crate::value::Number,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64
);
