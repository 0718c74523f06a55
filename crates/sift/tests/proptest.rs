//! Property-based tests for sift using proptest.

use proptest::prelude::*;
use sift::{parse, Criteria, Number, Range, Value};

// ============================================================================
// Test helpers
// ============================================================================

fn number_accessor<'a>(n: &'a i64, field: &str) -> Value<'a> {
    match field {
        "value" => Value::Number(Number::I64(*n)),
        _ => Value::None,
    }
}

fn range_strategy() -> impl Strategy<Value = Range<i64>> {
    (
        prop::option::of(-1000i64..1000),
        prop::option::of(-1000i64..1000),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(min, max, min_inc, max_inc)| Range::new(min, max, min_inc, max_inc))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Moving a bound outward never rejects a value that was accepted.
    #[test]
    fn widening_is_monotonic(
        range in range_strategy(),
        value in -1200i64..1200,
        widen in 0i64..100,
    ) {
        let wider = Range::new(
            range.min_value.map(|m| m - widen),
            range.max_value.map(|m| m + widen),
            range.is_min_inclusive || widen > 0,
            range.is_max_inclusive || widen > 0,
        );
        if range.contains(&value) {
            prop_assert!(wider.contains(&value));
        }
    }

    /// Dropping a bound never rejects a value that was accepted.
    #[test]
    fn removing_a_bound_is_monotonic(range in range_strategy(), value in -1200i64..1200) {
        let no_min = Range::new(None, range.max_value, false, range.is_max_inclusive);
        let no_max = Range::new(range.min_value, None, range.is_min_inclusive, false);
        if range.contains(&value) {
            prop_assert!(no_min.contains(&value));
            prop_assert!(no_max.contains(&value));
        }
    }

    /// Display then parse preserves containment.
    #[test]
    fn display_round_trip_preserves_containment(
        range in range_strategy(),
        value in -1200i64..1200,
    ) {
        let reparsed: Range<i64> = parse(&range.to_string()).unwrap();
        prop_assert_eq!(reparsed.contains(&value), range.contains(&value));
    }

    /// Containment agrees with the definition on explicit bounds.
    #[test]
    fn containment_matches_bounds(range in range_strategy(), value in -1200i64..1200) {
        let above_min = match range.min_value {
            None => true,
            Some(min) if range.is_min_inclusive => value >= min,
            Some(min) => value > min,
        };
        let below_max = match range.max_value {
            None => true,
            Some(max) if range.is_max_inclusive => value <= max,
            Some(max) => value < max,
        };
        prop_assert_eq!(range.contains(&value), above_min && below_max);
    }

    /// Filtering yields an order-preserving subsequence of the input.
    #[test]
    fn filter_preserves_order(
        items in prop::collection::vec(-1200i64..1200, 0..100),
        range in range_strategy(),
    ) {
        let criteria = Criteria::new().range("value", range.clone()).build();
        let results: Vec<i64> = criteria.filter(&items, number_accessor).copied().collect();
        let expected: Vec<i64> = items.iter().copied().filter(|n| range.contains(n)).collect();
        prop_assert_eq!(results, expected);
    }

    /// Criteria that constrain nothing return the input unchanged.
    #[test]
    fn unconstraining_criteria_return_everything(
        items in prop::collection::vec(any::<i64>(), 0..100),
    ) {
        let criteria = Criteria::new()
            .collection("value", Vec::<i64>::new())
            .constant("missing", 1i64)
            .constant("value", "text")
            .build();
        let results = criteria.filter_cloned(&items, number_accessor);
        prop_assert_eq!(results, items);
    }

    /// Count agrees with the lazy filter.
    #[test]
    fn count_equals_filter_len(
        items in prop::collection::vec(any::<i64>(), 0..100),
        threshold in any::<i64>(),
    ) {
        let criteria = Criteria::new()
            .range("value", Range::greater_than(threshold))
            .build();
        prop_assert_eq!(
            criteria.count(&items, number_accessor),
            criteria.filter(&items, number_accessor).count()
        );
    }

    /// Every integer survives being parsed as an exact range.
    #[test]
    fn exact_range_contains_only_itself(n in any::<i64>(), other in any::<i64>()) {
        let range: Range<i64> = parse(&format!("[{},{}]", n, n)).unwrap();
        prop_assert!(range.contains(&n));
        prop_assert_eq!(range.contains(&other), other == n);
    }
}
