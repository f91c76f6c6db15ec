//! Tests for path expression evaluation
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::*;
use crate::value::{MapValue, StructValue, Type};
use serde_json::json;

fn user_map() -> Value {
    Value::from(json!({
        "Name": "Joe",
        "UserID": 10,
        "Roles": ["Admin", "User"]
    }))
}

fn user_struct() -> Value {
    Value::Struct(
        StructValue::new("User")
            .field("Name", "Joe")
            .field("Age", 30i64)
            .field("Roles", Value::list(["Admin", "User"]))
            .field("Manager", Value::null_pointer(Type::String)),
    )
}

fn none() -> PathOptions {
    PathOptions::default()
}

#[test]
fn test_empty_expression_returns_container() {
    let data = user_map();
    assert_eq!(evaluate(&data, "", none()).unwrap(), Some(&data));

    let scalar = Value::from("plain");
    assert_eq!(evaluate(&scalar, "", none()).unwrap(), Some(&scalar));
}

#[test]
fn test_scenario_lookups() {
    let data = user_map();
    assert_eq!(evaluate(&data, "Roles.0", none()).unwrap(), Some(&Value::from("Admin")));
    assert_eq!(evaluate(&data, "UserID", none()).unwrap(), Some(&Value::Int64(10)));
    assert_eq!(evaluate(&data, "Details.Surname", none()).unwrap(), None);
}

#[test]
fn test_double_dots_are_ignored() {
    let data = user_map();
    assert_eq!(
        evaluate(&data, "Roles..1", none()).unwrap(),
        Some(&Value::from("User"))
    );
}

#[test]
fn test_missing_key_is_not_found_not_error() {
    let data = user_map();
    assert_eq!(evaluate(&data, "Missing", none()), Ok(None));
}

#[test]
fn test_step_into_scalar_is_error() {
    let data = Value::from("plain");
    let err = evaluate(&data, "Missing", none()).unwrap_err();
    assert_eq!(err.remaining(), "Missing");

    let data = user_map();
    let err = evaluate(&data, "Name.First.Initial", none()).unwrap_err();
    match err {
        PathError::ShapeMismatch { found, remaining } => {
            assert_eq!(found, "string");
            assert_eq!(remaining, "First.Initial");
        }
    }
}

#[test]
fn test_step_into_nil_is_error() {
    let data = Value::from(json!({"Details": null}));
    assert!(evaluate(&data, "Details.Surname", none()).is_err());

    let data = user_struct();
    assert!(evaluate(&data, "Manager.Name", none()).is_err());
}

#[test]
fn test_case_sensitivity() {
    let data = Value::from(json!({"Name": "Joe"}));
    assert_eq!(evaluate(&data, "name", none()).unwrap(), None);
    assert_eq!(
        evaluate(&data, "name", PathOption::IgnoreCase).unwrap(),
        Some(&Value::from("Joe"))
    );
}

#[test]
fn test_map_positional_uses_sorted_string_keys() {
    let data = Value::from(json!({"b": 2, "c": 3, "a": 1}));
    assert_eq!(evaluate(&data, "0", none()).unwrap(), Some(&Value::Int64(1)));
    assert_eq!(evaluate(&data, "2", none()).unwrap(), Some(&Value::Int64(3)));
    assert_eq!(evaluate(&data, "3", none()).unwrap(), None);
    assert_eq!(evaluate(&data, "-1", none()).unwrap(), None);
}

#[test]
fn test_map_positional_skips_non_string_keys() {
    let map = MapValue::new(Type::Any, Type::Any)
        .with(5i64, "five")
        .with("z", "zed")
        .with("a", "ay");
    let data = Value::Map(map);
    assert_eq!(evaluate(&data, "0", none()).unwrap(), Some(&Value::from("ay")));
    assert_eq!(evaluate(&data, "1", none()).unwrap(), Some(&Value::from("zed")));
    assert_eq!(evaluate(&data, "2", none()).unwrap(), None);
}

#[test]
fn test_map_name_matches_scalar_key_text() {
    let map = MapValue::new(Type::Bool, Type::String)
        .with(true, "yes")
        .with(false, "no");
    let data = Value::Map(map);
    assert_eq!(evaluate(&data, "true", none()).unwrap(), Some(&Value::from("yes")));
    assert_eq!(
        evaluate(&data, "FALSE", PathOption::IgnoreCase).unwrap(),
        Some(&Value::from("no"))
    );
}

#[test]
fn test_struct_name_lookup() {
    let data = user_struct();
    assert_eq!(evaluate(&data, "Age", none()).unwrap(), Some(&Value::Int64(30)));
    assert_eq!(evaluate(&data, "age", none()).unwrap(), None);
    assert_eq!(
        evaluate(&data, "age", PathOption::IgnoreCase).unwrap(),
        Some(&Value::Int64(30))
    );
    assert_eq!(evaluate(&data, "Roles.1", none()).unwrap(), Some(&Value::from("User")));
}

#[test]
fn test_struct_positional_uses_sorted_field_names() {
    // Sorted: Age, Manager, Name, Roles
    let data = user_struct();
    assert_eq!(evaluate(&data, "0", none()).unwrap(), Some(&Value::Int64(30)));
    assert_eq!(evaluate(&data, "2", none()).unwrap(), Some(&Value::from("Joe")));
    assert_eq!(evaluate(&data, "4", none()).unwrap(), None);
}

#[test]
fn test_struct_scan_runs_last_to_first() {
    let data = Value::Struct(
        StructValue::new("Dup")
            .field("ID", "first")
            .field("Id", "second"),
    );
    assert_eq!(
        evaluate(&data, "id", PathOption::IgnoreCase).unwrap(),
        Some(&Value::from("second"))
    );
    assert_eq!(evaluate(&data, "ID", none()).unwrap(), Some(&Value::from("first")));
}

#[test]
fn test_sequence_indices() {
    let data = user_map();
    assert_eq!(evaluate(&data, "Roles.1", none()).unwrap(), Some(&Value::from("User")));
    assert_eq!(evaluate(&data, "Roles.-1", none()).unwrap(), None);
    assert_eq!(evaluate(&data, "Roles.10", none()).unwrap(), None);
}

#[test]
fn test_sequence_name_scan_matches_element_text() {
    let data = Value::from(json!(["admin", "Admin", "user"]));
    assert_eq!(evaluate(&data, "Admin", none()).unwrap(), Some(&Value::from("Admin")));
    // Scanning from the end: "Admin" is met before "admin"
    assert_eq!(
        evaluate(&data, "ADMIN", PathOption::IgnoreCase).unwrap(),
        Some(&Value::from("Admin"))
    );
    assert_eq!(evaluate(&data, "guest", none()).unwrap(), None);
}

#[test]
fn test_sequence_name_scan_skips_containers() {
    let data = Value::from(json!([{"a": 1}, "a"]));
    assert_eq!(evaluate(&data, "a", none()).unwrap(), Some(&Value::from("a")));
}

#[test]
fn test_pointers_are_followed() {
    let data = Value::pointer_to(Value::pointer_to(user_struct()));
    assert_eq!(evaluate(&data, "Name", none()).unwrap(), Some(&Value::from("Joe")));
}

#[test]
fn test_exists() {
    let data = user_map();
    assert!(exists(&data, "Roles.0", none()).unwrap());
    assert!(!exists(&data, "Roles.2", none()).unwrap());
    assert!(exists(&data, "Name.X", none()).is_err());
}

#[test]
fn test_options_combine() {
    let options = PathOption::IgnoreCase | PathOption::IgnoreError;
    assert!(options.ignore_case);
    assert!(options.ignore_error);
    assert!(!options.contains(PathOption::IgnoreNotFound));

    let options: PathOptions = [PathOption::IgnoreNotFound].into_iter().collect();
    assert!(options.ignore_not_found);
    assert!(!options.ignore_case);
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: PathOptions = serde_json::from_value(json!({"ignore_case": true})).unwrap();
    assert_eq!(options, PathOptions::from(PathOption::IgnoreCase));
}

#[test]
fn test_must_evaluate_returns_found_value() {
    let data = user_map();
    assert_eq!(must_evaluate(&data, "Name", none()), &Value::from("Joe"));
}

#[test]
#[should_panic(expected = "unable to find `Missing`")]
fn test_must_evaluate_panics_when_not_found() {
    let data = user_map();
    must_evaluate(&data, "Missing", none());
}

#[test]
#[should_panic(expected = "unable to evaluate `Name.First`")]
fn test_must_evaluate_panics_on_error() {
    let data = user_map();
    must_evaluate(&data, "Name.First", none());
}

#[test]
fn test_must_evaluate_ignore_flags_yield_nil() {
    let data = user_map();
    assert_eq!(must_evaluate(&data, "Missing", PathOption::IgnoreNotFound), &Value::Nil);
    assert_eq!(must_evaluate(&data, "Name.First", PathOption::IgnoreError), &Value::Nil);
}

#[test]
fn test_non_ascii_segments_are_names() {
    let data = Value::from(json!({"xé": 1, "0é": "zero", "ñame": "Ann"}));

    let path = Path::parse("xé.0é");
    assert!(path.segments().iter().all(|segment| !segment.is_index()));

    assert_eq!(evaluate(&data, "xé", none()).unwrap(), Some(&Value::Int64(1)));
    assert_eq!(evaluate(&data, "0é", none()).unwrap(), Some(&Value::from("zero")));
    assert_eq!(
        evaluate(&data, "ÑAME", PathOption::IgnoreCase).unwrap(),
        Some(&Value::from("Ann"))
    );
    assert_eq!(evaluate(&data, "yé", none()).unwrap(), None);
}
