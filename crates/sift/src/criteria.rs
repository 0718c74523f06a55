//! Criteria builder and executor.
//!
//! [`Criteria`] collects [`Criterion`]s with AND semantics and runs them
//! over collections. Filtering is lazy: [`Criteria::filter`] returns an
//! iterator that tests records as they are pulled.

use crate::criterion::{Criterion, CriterionValue, Outcome};
use crate::range::Range;
use crate::traits::Record;
use crate::value::{Scalar, Value};

/// Accessor function type produced by [`Record::accessor`].
pub type Accessor<T> = for<'b> fn(&'b T, &str) -> Value<'b>;

/// A set of criteria combined with AND.
///
/// A record is admitted when every criterion that constrains it matches.
/// Criteria on unknown fields, on fields of an incompatible type, or holding
/// an empty collection do not constrain anything.
///
/// # Example
///
/// ```
/// use sift::{Criteria, Number, Range, Value};
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
///
/// let people = vec![
///     Person { first_name: "John".into(), favorite_number: 5 },
///     Person { first_name: "Tim".into(), favorite_number: 10 },
/// ];
///
/// let criteria = Criteria::new()
///     .range("favorite_number", Range::<i32>::parse("[5,5]").unwrap())
///     .build();
///
/// let names: Vec<_> = criteria
///     .filter(&people, accessor)
///     .map(|p| p.first_name.as_str())
///     .collect();
/// assert_eq!(names, ["John"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    /// Creates an empty set, which admits every record.
    pub fn new() -> Self {
        Criteria::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Adds a criterion whose kind follows from the value's shape.
    pub fn with(mut self, field: &str, value: impl Into<CriterionValue>) -> Self {
        self.criteria.push(Criterion::new(field, value));
        self
    }

    /// Adds a criterion the field must equal.
    pub fn constant(self, field: &str, value: impl Into<Scalar>) -> Self {
        self.with(field, CriterionValue::Constant(value.into()))
    }

    /// Adds a criterion the field must be a member of.
    ///
    /// An empty collection leaves the field unconstrained.
    pub fn collection<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        let set: Vec<Scalar> = values.into_iter().map(Into::into).collect();
        self.with(field, CriterionValue::Collection(set))
    }

    /// Adds a criterion the field must fall within.
    pub fn range<T: Into<Scalar>>(self, field: &str, range: Range<T>) -> Self {
        self.with(field, range)
    }

    /// Adds a prebuilt criterion.
    pub fn push(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Finalizes the set.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the criteria in insertion order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns the number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns `true` if there are no criteria (matches everything).
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record satisfies every constraining criterion.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(&accessor(item, &criterion.field)))
    }

    /// Evaluates every criterion against a record, in order.
    ///
    /// Unlike [`Criteria::matches`] this does not stop at the first rejection,
    /// which makes it useful for explaining why a record was excluded.
    pub fn explain<T, F>(&self, item: &T, accessor: F) -> Vec<(&str, Outcome)>
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.criteria
            .iter()
            .map(|criterion| {
                let outcome = criterion.evaluate(&accessor(item, &criterion.field));
                (criterion.field.as_str(), outcome)
            })
            .collect()
    }

    /// Lazily filters records, preserving their order.
    ///
    /// Nothing is evaluated until the returned iterator is advanced, and
    /// every call starts over from the source.
    pub fn filter<'a, T, I, F>(&self, items: I, accessor: F) -> Filtered<'_, I::IntoIter, F>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        Filtered {
            criteria: self,
            items: items.into_iter(),
            accessor,
        }
    }

    /// Filters and clones matching records.
    pub fn filter_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter(items, accessor).cloned().collect()
    }

    /// Filters a vector in place, keeping only matching records.
    pub fn filter_mut<T, F>(&self, items: &mut Vec<T>, accessor: F)
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.retain(|item| self.matches(item, &accessor));
    }

    /// Counts the number of matching records.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter(items, accessor).count()
    }

    /// Returns `true` if any record matches.
    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().any(|item| self.matches(item, &accessor))
    }

    /// Returns `true` if all records match.
    pub fn all<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().all(|item| self.matches(item, &accessor))
    }

    /// Finds the first matching record.
    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        items.iter().find(|item| self.matches(*item, &accessor))
    }

    /// Finds the first matching record and returns its index.
    pub fn position<T, F>(&self, items: &[T], accessor: F) -> Option<usize>
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().position(|item| self.matches(item, &accessor))
    }
}

impl FromIterator<Criterion> for Criteria {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Criteria {
            criteria: iter.into_iter().collect(),
        }
    }
}

impl Extend<Criterion> for Criteria {
    fn extend<I: IntoIterator<Item = Criterion>>(&mut self, iter: I) {
        self.criteria.extend(iter);
    }
}

impl IntoIterator for Criteria {
    type Item = Criterion;
    type IntoIter = std::vec::IntoIter<Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.into_iter()
    }
}

impl<'c> IntoIterator for &'c Criteria {
    type Item = &'c Criterion;
    type IntoIter = std::slice::Iter<'c, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}

/// Lazy iterator over the records admitted by a [`Criteria`] set.
///
/// Created by [`Criteria::filter`] and [`FilterExt::filter_by`].
#[derive(Debug, Clone)]
pub struct Filtered<'c, I, F> {
    criteria: &'c Criteria,
    items: I,
    accessor: F,
}

impl<'c, 'a, T, I, F> Iterator for Filtered<'c, I, F>
where
    T: 'a,
    I: Iterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let criteria = self.criteria;
        let accessor = &self.accessor;
        self.items.find(|item| criteria.matches(*item, accessor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

/// Filtering adapter for iterators over [`Record`] types.
///
/// ```
/// use sift::{Criteria, FilterExt, Record, Value};
///
/// struct Tag(String);
///
/// impl Record for Tag {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.0),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let tags = vec![Tag("rust".into()), Tag("go".into())];
/// let criteria = Criteria::new().collection("name", ["rust", "zig"]).build();
///
/// assert_eq!(tags.iter().filter_by(&criteria).count(), 1);
/// ```
pub trait FilterExt<'a, T>: Iterator<Item = &'a T> + Sized
where
    T: Record + 'a,
{
    /// Lazily keeps the records admitted by `criteria`.
    fn filter_by(self, criteria: &Criteria) -> Filtered<'_, Self, Accessor<T>> {
        Filtered {
            criteria,
            items: self,
            accessor: T::accessor,
        }
    }
}

impl<'a, T, I> FilterExt<'a, T> for I
where
    T: Record + 'a,
    I: Iterator<Item = &'a T>,
{
}
