//! Proc macros for Sift.
//!
//! - [`Record`] - Generate field access for filtering from a struct's fields
//!
//! Use through the `derive` feature of `sift`, which re-exports the macro
//! next to the trait of the same name.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for structs with named fields.
///
/// Every field is exposed under its own name through `sift::AsValue`, so
/// field types must implement that trait (strings, primitive numbers,
/// `Decimal`, `char`, `bool` and `Option`s of those).
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field; criteria naming it are skipped |
/// | `rename = "..."` | Use a custom name in criteria |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Person::FIRST_NAME`)
/// 2. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use sift::{Criteria, Record, Range};
///
/// #[derive(Record)]
/// struct Person {
///     first_name: String,
///     favorite_number: i32,
///
///     #[record(rename = "letter")]
///     favorite_letter: char,
///
///     #[record(skip)]
///     notes: Vec<String>,
/// }
///
/// let people = vec![
///     Person { first_name: "John".into(), favorite_number: 5, favorite_letter: 'a', notes: vec![] },
///     Person { first_name: "Tim".into(), favorite_number: 10, favorite_letter: 'b', notes: vec![] },
/// ];
///
/// let criteria = Criteria::new()
///     .range(Person::FAVORITE_NUMBER, Range::at_most(5u8))
///     .constant(Person::LETTER, 'a')
///     .build();
///
/// let found: Vec<&Person> = criteria.filter(&people, Person::accessor).collect();
/// assert_eq!(found.len(), 1);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
