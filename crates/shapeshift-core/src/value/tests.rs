//! Tests for the container model and shape classification

use super::*;

fn user() -> Value {
    Value::Struct(
        StructValue::new("User")
            .field("Name", "Joe")
            .field("Roles", Value::list(["Admin", "User"])),
    )
}

#[test]
fn test_shape_of_terminals() {
    assert_eq!(Value::Nil.shape(), Shape::Nil);
    assert_eq!(Value::from("x").shape(), Shape::Scalar);
    assert_eq!(Value::Float32(1.0).shape(), Shape::Scalar);
    assert_eq!(Value::Map(MapValue::new(Type::String, Type::Any)).shape(), Shape::Map);
    assert_eq!(user().shape(), Shape::Struct);
    assert_eq!(Value::list([1i64]).shape(), Shape::Sequence);
}

#[test]
fn test_shape_follows_pointers() {
    let nested = Value::pointer_to(Value::pointer_to(user()));
    assert_eq!(nested.shape(), Shape::Struct);
    assert_eq!(nested.elem(), &user());
}

#[test]
fn test_nil_pointer_classifies_as_nil() {
    let ptr = Value::null_pointer(Type::Struct(StructType::new("User")));
    assert_eq!(ptr.shape(), Shape::Nil);
    assert!(matches!(ptr.elem(), Value::Pointer(p) if p.is_null()));

    let through = Value::pointer_to(Value::null_pointer(Type::Int));
    assert_eq!(through.shape(), Shape::Nil);
}

#[test]
fn test_elem_mut_reaches_pointee() {
    let mut ptr = Value::pointer_to(5i32);
    *ptr.elem_mut() = Value::Int32(7);
    assert_eq!(ptr, Value::pointer_to(7i32));
}

#[test]
fn test_pointer_type_comes_from_target() {
    assert_eq!(Value::pointer_to("x").type_of(), Type::pointer(Type::String));
}

#[test]
fn test_map_insert_replaces_existing_key() {
    let mut map = MapValue::new(Type::String, Type::Int64).with("a", 1i64);
    map.insert(Value::from("a"), Value::Int64(2));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::from("a")), Some(&Value::Int64(2)));
}

#[test]
fn test_scalar_string() {
    assert_eq!(Value::Int8(-4).scalar_string().as_deref(), Some("-4"));
    assert_eq!(Value::Bool(true).scalar_string().as_deref(), Some("true"));
    assert_eq!(Value::pointer_to("x").scalar_string().as_deref(), Some("x"));
    assert_eq!(user().scalar_string(), None);
    assert_eq!(Value::Nil.scalar_string(), None);
}

#[test]
fn test_display() {
    assert_eq!(user().to_string(), "{Name:Joe Roles:[Admin User]}");
    let map = MapValue::new(Type::String, Type::Int64).with("a", 1i64);
    assert_eq!(Value::Map(map).to_string(), "map[a:1]");
    assert_eq!(Value::Nil.to_string(), "<nil>");
    assert_eq!(Value::pointer_to(3i64).to_string(), "&3");
}

#[test]
fn test_fold_eq() {
    assert!(fold_eq("UserID", "userid"));
    assert!(fold_eq("ÄRGER", "ärger"));
    assert!(!fold_eq("Name", "Names"));
}
