//! Sift - Interval parsing and permissive filtering for in-memory records.
//!
//! Sift has two halves:
//!
//! - A range engine that parses interval notation (`[5,5]`, `(,5]`,
//!   `[1,+∞)`) into typed [`Range`] values and tests containment.
//! - A record filter that keeps the records of a collection which satisfy a
//!   set of [`Criteria`], each criterion being a constant, a collection of
//!   accepted values or a range.
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{Criteria, Number, Range, Value};
//!
//! struct Person {
//!     first_name: String,
//!     favorite_number: i32,
//!     favorite_letter: char,
//! }
//!
//! fn accessor<'a>(person: &'a Person, field: &str) -> Value<'a> {
//!     match field {
//!         "first_name" => Value::String(&person.first_name),
//!         "favorite_number" => Value::Number(Number::from(person.favorite_number)),
//!         "favorite_letter" => Value::Char(person.favorite_letter),
//!         _ => Value::None,
//!     }
//! }
//!
//! let people = vec![
//!     Person { first_name: "John".into(), favorite_number: 5, favorite_letter: 'a' },
//!     Person { first_name: "Tim".into(), favorite_number: 10, favorite_letter: 'b' },
//! ];
//!
//! let criteria = Criteria::new()
//!     .range("favorite_number", Range::<u8>::parse("[5,5]").unwrap())
//!     .collection("favorite_letter", ['a', 'c'])
//!     .build();
//!
//! let found: Vec<&Person> = criteria.filter(&people, accessor).collect();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].first_name, "John");
//! ```
//!
//! # Filter Semantics
//!
//! A record is kept when no criterion rejects it:
//!
//! ```text
//! keep = ∀ criterion: outcome(criterion, record) ∈ { Match, Skip }
//! ```
//!
//! A criterion is skipped, and so constrains nothing, when:
//!
//! - the record has no field by that name;
//! - the field's type cannot be compared with the criterion's values;
//! - the criterion is an empty collection.
//!
//! Otherwise a constant must equal the field, a collection must contain it and
//! a range must contain it. Fields and criteria of different numeric widths
//! compare by value, so a `u8` range filters an `i32` field.
//!
//! # Range Notation
//!
//! | Text | Meaning |
//! |------|---------|
//! | `[a,b]` | a ≤ x ≤ b |
//! | `(a,b)` | a < x < b |
//! | `[a,b)` | a ≤ x < b |
//! | `(,b]` or `(-∞,b]` | x ≤ b |
//! | `[a,)` or `[a,+∞)` | x ≥ a |
//! | `(,)` | any x |
//!
//! Bounds are parsed as the range's element type. With [`parse_named`] the
//! type is chosen by name at runtime, which is how configuration files
//! describe ranges (see the `config` module docs on [`Criteria`]'s serde
//! support).

mod config;
mod criteria;
mod criterion;
mod error;
mod kind;
mod parse;
mod range;
mod traits;
mod value;

// Re-export public API
pub use criteria::{Accessor, Criteria, FilterExt, Filtered};
pub use criterion::{Criterion, CriterionValue, Outcome, SkipReason};
pub use error::{Result, SiftError};
pub use kind::ScalarKind;
pub use parse::{parse, parse_as, parse_named};
pub use range::Range;
pub use traits::{AsValue, RangeValue, Record};
pub use value::{Number, Scalar, Value, ValueKind};

#[cfg(feature = "derive")]
pub use sift_macros::Record;
