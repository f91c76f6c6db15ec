//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but valid value trees and path expressions for property testing.

#![cfg(test)]

use crate::value::{MapValue, SequenceValue, StructValue, Type, Value};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

/// Strategy for generating identifiers that never parse as integers
pub fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}"
}

/// Strategy for generating map keys, identifiers or free text
pub fn map_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![identifier_strategy(), free_text_segment_strategy()]
}

/// Strategy for generating scalar values of every width
///
/// Floats are finite so generated values compare equal to themselves.
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<i8>().prop_map(Value::Int8),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        any::<u64>().prop_map(Value::Uint),
        any::<u8>().prop_map(Value::Uint8),
        any::<u16>().prop_map(Value::Uint16),
        any::<u32>().prop_map(Value::Uint32),
        any::<u64>().prop_map(Value::Uint64),
        (-1.0e6f32..1.0e6).prop_map(Value::Float32),
        (-1.0e12f64..1.0e12).prop_map(Value::Float64),
        "\\PC{0,12}".prop_map(Value::String),
    ]
}

/// Strategy for generating leaf values, nil included
pub fn leaf_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Nil),
        6 => scalar_value_strategy(),
    ]
}

/// Strategy for generating arbitrary value trees
///
/// Maps are `map[string]any`, sequences are `[]any`, and struct field names
/// are unique ignoring case.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_value_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Value::list),
            btree_map(map_key_strategy(), inner.clone(), 0..6).prop_map(|entries| {
                let mut map = MapValue::new(Type::String, Type::Any);
                for (key, value) in entries {
                    map.insert(Value::String(key), value);
                }
                Value::Map(map)
            }),
            btree_map("[a-z][a-z0-9]{0,6}", inner.clone(), 0..5).prop_map(|fields| {
                Value::Struct(StructValue {
                    name: "Generated".to_string(),
                    fields: fields.into_iter().collect(),
                })
            }),
            inner.prop_map(|value| Value::pointer_to(value)),
        ]
    })
}

/// Strategy for generating `map[string]any` maps with identifier keys
pub fn string_keyed_map_strategy() -> impl Strategy<Value = MapValue> {
    btree_map(identifier_strategy(), scalar_value_strategy(), 0..10).prop_map(|entries| {
        let mut map = MapValue::new(Type::String, Type::Any);
        for (key, value) in entries {
            map.insert(Value::String(key), value);
        }
        map
    })
}

/// Strategy for generating flat structs with scalar fields
///
/// Field names are lowercase and unique, so case-insensitive matching finds
/// exactly one field for each name.
pub fn flat_struct_strategy() -> impl Strategy<Value = StructValue> {
    btree_map("[a-z][a-z0-9]{0,8}", scalar_value_strategy(), 0..8).prop_map(|fields| {
        StructValue {
            name: "Record".to_string(),
            fields: fields.into_iter().collect(),
        }
    })
}

/// Strategy for generating slices of a single scalar type
pub fn typed_sequence_strategy() -> impl Strategy<Value = SequenceValue> {
    prop_oneof![
        vec(any::<i32>(), 0..10)
            .prop_map(|items| SequenceValue::from_items(Type::Int32, items)),
        vec(any::<u8>(), 0..10).prop_map(|items| SequenceValue::from_items(Type::Uint8, items)),
        vec("[a-z]{0,5}", 0..10)
            .prop_map(|items| SequenceValue::from_items(Type::String, items)),
    ]
}

/// Strategy for generating segments of arbitrary printable text
///
/// Segments never contain `.` or whitespace, and often start like an integer
/// literal so multi-byte characters land right after a sign or base prefix.
pub fn free_text_segment_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "0", "0x", "0o", "0b", "-", "+", "1"]),
        "[^.\\s]{1,6}",
    )
        .prop_map(|(head, tail)| format!("{}{}", head, tail))
}

/// Strategy for generating path expressions
///
/// Mixes names, decimal and prefixed indices, negative numbers, non-ASCII
/// text and empty segments.
pub fn path_expression_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        identifier_strategy(),
        free_text_segment_strategy(),
        (0u32..20).prop_map(|i| i.to_string()),
        (-5i32..0).prop_map(|i| i.to_string()),
        (0u32..16).prop_map(|i| format!("0x{:x}", i)),
        Just(String::new()),
    ];
    vec(segment, 0..6).prop_map(|segments| segments.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_strategies_generate_valid_data() {
        let mut runner = TestRunner::default();

        let map = string_keyed_map_strategy()
            .new_tree(&mut runner)
            .unwrap()
            .current();
        assert!(map.entries.iter().all(|(k, _)| k.as_str().is_some()));

        let record = flat_struct_strategy().new_tree(&mut runner).unwrap().current();
        assert!(record.fields.iter().all(|(_, v)| v.type_of().is_scalar()));

        let expression = path_expression_strategy()
            .new_tree(&mut runner)
            .unwrap()
            .current();
        assert!(!expression.contains(' '));
    }
}
