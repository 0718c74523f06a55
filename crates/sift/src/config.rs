//! Serde support: criteria documents and range text.
//!
//! A criteria document maps field names to entries whose shape picks the
//! criterion kind:
//!
//! ```json
//! {
//!   "first_name": "John",
//!   "last_name": ["Doe", "Smith"],
//!   "favorite_letter": { "value": "a", "type": "char" },
//!   "favorite_number": { "range": "[5,5]", "type": "i32" }
//! }
//! ```
//!
//! - a scalar (string, number, boolean) is a constant;
//! - an object with `value` and `type` is a constant read as the named
//!   [`ScalarKind`](crate::ScalarKind);
//! - an array of either is a collection;
//! - an object with `range` and `type` is a range whose bounds are parsed as
//!   the named kind.
//!
//! Decimals, chars and non-finite floats have no native form in JSON or YAML,
//! so they are always written in the `{ "value", "type" }` form and read back
//! with their kind intact.
//!
//! [`Range<T>`](crate::Range) on its own serializes as its interval text, and
//! refuses to serialize when [`Range::has_text_form`](crate::Range::has_text_form)
//! does not hold.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::criterion::{Criterion, CriterionValue};
use crate::kind::ScalarKind;
use crate::parse::parse_named;
use crate::range::Range;
use crate::traits::RangeValue;
use crate::value::{Number, Scalar, ValueKind};

const TAGGED_FIELDS: &[&str] = &["value", "type"];

// ============================================================================
// Range
// ============================================================================

impl<T: fmt::Display> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.has_text_form() {
            return Err(ser::Error::custom(format_args!(
                "range {} has a bound interval notation cannot express",
                self
            )));
        }
        serializer.collect_str(self)
    }
}

impl<'de, T: RangeValue> Deserialize<'de> for Range<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RangeVisitor(PhantomData))
    }
}

struct RangeVisitor<T>(PhantomData<T>);

impl<'de, T: RangeValue> Visitor<'de> for RangeVisitor<T> {
    type Value = Range<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a range of {} in interval notation", T::TYPE_NAME)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Range::parse(v).map_err(E::custom)
    }
}

// ============================================================================
// Scalar
// ============================================================================

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Number(Number::I64(n)) => serializer.serialize_i64(*n),
            Scalar::Number(Number::U64(n)) => serializer.serialize_u64(*n),
            Scalar::Number(Number::F64(n)) if n.is_finite() => serializer.serialize_f64(*n),
            Scalar::Number(Number::F64(n)) => {
                serialize_tagged(serializer, &n.to_string(), ScalarKind::F64)
            }
            Scalar::Decimal(d) => serialize_tagged(serializer, &d.to_string(), ScalarKind::Decimal),
            Scalar::Char(c) => serialize_tagged(serializer, &c.to_string(), ScalarKind::Char),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

fn serialize_tagged<S: Serializer>(
    serializer: S,
    value: &str,
    kind: ScalarKind,
) -> Result<S::Ok, S::Error> {
    let mut tagged = serializer.serialize_struct("Scalar", 2)?;
    tagged.serialize_field("value", value)?;
    tagged.serialize_field("type", kind.as_str())?;
    tagged.end()
}

fn parse_tagged(kind: &str, value: &Scalar) -> crate::error::Result<Scalar> {
    kind.parse::<ScalarKind>()?.parse_scalar(&value.to_string())
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or { value, type } object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Number::I64(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Number::U64(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Number(Number::F64(v)))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Scalar, E> {
        Ok(Scalar::Char(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::String(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scalar, A::Error> {
        let mut value: Option<Scalar> = None;
        let mut kind: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "value" => value = Some(map.next_value()?),
                "type" => kind = Some(map.next_value()?),
                other => return Err(de::Error::unknown_field(other, TAGGED_FIELDS)),
            }
        }
        let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
        let kind = kind.ok_or_else(|| de::Error::missing_field("type"))?;
        parse_tagged(&kind, &value).map_err(de::Error::custom)
    }
}

// ============================================================================
// Criteria
// ============================================================================

// Arrays are tried first: untagged struct variants also accept a sequence
// of their field values.
#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Collection(Vec<Scalar>),
    Range {
        range: String,
        #[serde(rename = "type")]
        kind: String,
    },
    Tagged {
        value: Scalar,
        #[serde(rename = "type")]
        kind: String,
    },
    Constant(Scalar),
}

impl Entry {
    fn into_value(self) -> crate::error::Result<CriterionValue> {
        Ok(match self {
            Entry::Range { range, kind } => CriterionValue::Range(parse_named(&kind, &range)?),
            Entry::Tagged { value, kind } => CriterionValue::Constant(parse_tagged(&kind, &value)?),
            Entry::Collection(items) => CriterionValue::Collection(items),
            Entry::Constant(value) => CriterionValue::Constant(value),
        })
    }
}

impl<'de> Deserialize<'de> for Criteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CriteriaVisitor)
    }
}

struct CriteriaVisitor;

impl<'de> Visitor<'de> for CriteriaVisitor {
    type Value = Criteria;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to constants, collections or ranges")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Criteria, A::Error> {
        let mut criteria = Criteria::new();
        while let Some((field, entry)) = map.next_entry::<String, Entry>()? {
            let value = entry.into_value().map_err(|err| {
                de::Error::custom(format_args!("criterion '{}': {}", field, err))
            })?;
            criteria = criteria.push(Criterion { field, value });
        }
        Ok(criteria)
    }
}

impl Serialize for Criteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for criterion in self.criteria() {
            match &criterion.value {
                CriterionValue::Constant(value) => map.serialize_entry(&criterion.field, value)?,
                CriterionValue::Collection(items) => {
                    map.serialize_entry(&criterion.field, items)?
                }
                CriterionValue::Range(range) => {
                    let kind = range_kind(range).map_err(|reason| {
                        ser::Error::custom(format_args!(
                            "criterion '{}': {}",
                            criterion.field, reason
                        ))
                    })?;
                    map.serialize_entry(&criterion.field, &RangeEntry { range, kind })?
                }
            }
        }
        map.end()
    }
}

struct RangeEntry<'r> {
    range: &'r Range<Scalar>,
    kind: ScalarKind,
}

impl Serialize for RangeEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("RangeEntry", 2)?;
        entry.serialize_field("range", self.range)?;
        entry.serialize_field("type", self.kind.as_str())?;
        entry.end()
    }
}

/// Picks the first kind under which the range's text parses back to bounds
/// equal to the originals.
fn range_kind(range: &Range<Scalar>) -> Result<ScalarKind, String> {
    if !range.has_text_form() {
        return Err(format!(
            "range {} has a bound interval notation cannot express",
            range
        ));
    }

    let text = range.to_string();
    candidate_kinds(range)?
        .into_iter()
        .find(|kind| reads_back(*kind, &text, range))
        .ok_or_else(|| format!("no range type can hold the bounds of {}", text))
}

fn candidate_kinds(range: &Range<Scalar>) -> Result<Vec<ScalarKind>, String> {
    let bounds: Vec<&Scalar> = [&range.min_value, &range.max_value]
        .into_iter()
        .flatten()
        .collect();

    let kind = match bounds.as_slice() {
        // An unbounded range parses the same under any kind.
        [] => return Ok(vec![ScalarKind::I64]),
        [first, rest @ ..] => {
            let kind = first.kind();
            if let Some(other) = rest.iter().find(|b| b.kind() != kind) {
                return Err(format!("range mixes {} and {} bounds", kind, other.kind()));
            }
            kind
        }
    };

    let any_float = bounds
        .iter()
        .any(|b| matches!(b, Scalar::Number(Number::F64(_))));
    let any_decimal = bounds.iter().any(|b| matches!(b, Scalar::Decimal(_)));

    Ok(match kind {
        ValueKind::Text => vec![ScalarKind::String],
        ValueKind::Char => vec![ScalarKind::Char],
        ValueKind::Bool => return Err("boolean ranges have no text form".to_string()),
        ValueKind::Numeric => match (any_float, any_decimal) {
            (true, true) => vec![ScalarKind::Decimal, ScalarKind::F64],
            (true, false) => vec![ScalarKind::F64],
            (false, true) => vec![ScalarKind::Decimal],
            (false, false) => vec![ScalarKind::I64, ScalarKind::U64, ScalarKind::Decimal],
        },
    })
}

fn reads_back(kind: ScalarKind, text: &str, range: &Range<Scalar>) -> bool {
    let Ok(parsed) = kind.parse_range(text) else {
        return false;
    };
    same_bound(&parsed.min_value, &range.min_value) && same_bound(&parsed.max_value, &range.max_value)
}

fn same_bound(a: &Option<Scalar>, b: &Option<Scalar>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.as_value().compare(&b.as_value()) == Some(Ordering::Equal),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn range_kind_follows_bound_values() {
        let mixed = Range::closed(Scalar::from(-1i64), Scalar::from(5u64));
        assert_eq!(range_kind(&mixed), Ok(ScalarKind::I64));

        let unsigned = Range::closed(Scalar::from(0u64), Scalar::from(u64::MAX));
        assert_eq!(range_kind(&unsigned), Ok(ScalarKind::U64));

        let float = Range::closed(Scalar::from(1u8), Scalar::from(2.5f64));
        assert_eq!(range_kind(&float), Ok(ScalarKind::F64));

        let letters = Range::closed_open(Scalar::from('a'), Scalar::from('b'));
        assert_eq!(range_kind(&letters), Ok(ScalarKind::Char));

        assert_eq!(range_kind(&Range::unbounded()), Ok(ScalarKind::I64));
    }

    #[test]
    fn range_kind_widens_past_i64() {
        let wide = Range::closed(Scalar::from(-1i64), Scalar::from(u64::MAX));
        assert_eq!(range_kind(&wide), Ok(ScalarKind::Decimal));
    }

    #[test]
    fn range_kind_falls_back_to_float_for_huge_bounds() {
        let huge = Range::closed(Scalar::Decimal(Decimal::ONE), Scalar::from(1e300f64));
        assert_eq!(range_kind(&huge), Ok(ScalarKind::F64));

        let infinite = Range::closed(Scalar::Decimal(Decimal::ONE), Scalar::from(f64::INFINITY));
        assert_eq!(range_kind(&infinite), Ok(ScalarKind::F64));

        let small = Range::closed(Scalar::Decimal(Decimal::ONE), Scalar::from(2.5f64));
        assert_eq!(range_kind(&small), Ok(ScalarKind::Decimal));
    }

    #[test]
    fn range_kind_rejects_unrepresentable_bounds() {
        assert!(range_kind(&Range::at_least(Scalar::Bool(true))).is_err());
        assert!(range_kind(&Range::closed(Scalar::from('a'), Scalar::from(1i32))).is_err());
        assert!(range_kind(&Range::closed(Scalar::from("a,b"), Scalar::from("z"))).is_err());
        assert!(range_kind(&Range::at_most(Scalar::from(' '))).is_err());
    }

    #[test]
    fn tagged_scalars() {
        assert_eq!(
            parse_tagged("decimal", &Scalar::from("4.5")),
            Ok(Scalar::Decimal(Decimal::new(45, 1)))
        );
        assert_eq!(parse_tagged("char", &Scalar::from("a")), Ok(Scalar::Char('a')));
        assert_eq!(parse_tagged("u8", &Scalar::from(5u64)), Ok(Scalar::from(5u8)));
        assert!(parse_tagged("uuid", &Scalar::from("a"))
            .unwrap_err()
            .is_unsupported_type());
        assert!(parse_tagged("char", &Scalar::from("ab")).unwrap_err().is_literal());
    }
}
