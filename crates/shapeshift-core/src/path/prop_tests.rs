//! Property-based tests for path evaluation
//!
//! These tests verify that evaluation never panics, that positional and
//! named access agree on string-keyed maps, and that out-of-range indices
//! are reported as not found.

use super::*;
use crate::proptest_strategies::{path_expression_strategy, string_keyed_map_strategy, value_strategy};
use proptest::prelude::*;

proptest! {
    /// Property: evaluation returns a result for any value and expression
    #[test]
    fn prop_evaluate_never_panics(
        value in value_strategy(),
        expression in path_expression_strategy(),
    ) {
        let _ = evaluate(&value, &expression, PathOptions::default());
        let _ = evaluate(&value, &expression, PathOption::IgnoreCase);
    }

    /// Property: the n-th sorted key and the key's name address the same value
    #[test]
    fn prop_positional_matches_named(map in string_keyed_map_strategy()) {
        let mut keys: Vec<String> = map
            .entries
            .iter()
            .filter_map(|(k, _)| k.as_str().map(str::to_string))
            .collect();
        keys.sort();
        let data = Value::Map(map);

        for (position, key) in keys.iter().enumerate() {
            let by_position = evaluate(&data, &position.to_string(), PathOptions::default()).unwrap();
            let by_name = evaluate(&data, key, PathOptions::default()).unwrap();
            prop_assert!(by_position.is_some());
            prop_assert_eq!(by_position, by_name);
        }
    }

    /// Property: indices outside a sequence are not found, never errors
    #[test]
    fn prop_out_of_range_index_not_found(
        items in proptest::collection::vec("[a-z]{1,5}", 0..8),
        offset in 0usize..20,
    ) {
        let data = Value::list(items.iter().map(String::as_str));
        let past_end = (items.len() + offset).to_string();
        prop_assert_eq!(evaluate(&data, &past_end, PathOptions::default()), Ok(None));
        let negative = format!("-{}", offset + 1);
        prop_assert_eq!(evaluate(&data, &negative, PathOptions::default()), Ok(None));
    }

    /// Property: the empty expression is the identity
    #[test]
    fn prop_empty_expression_is_identity(value in value_strategy()) {
        prop_assert_eq!(evaluate(&value, "", PathOptions::default()), Ok(Some(&value)));
    }
}
