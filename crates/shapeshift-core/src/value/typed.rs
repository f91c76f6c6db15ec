//! Native Rust types as converter sources and destinations
//!
//! [`Typed`] describes how a Rust type maps onto the container model: which
//! [`Type`] its destination slot has, how to turn an instance into a
//! [`Value`], and how to read one back after conversion.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::{MapValue, PointerValue, SequenceValue, Type, Value};
use crate::convert::ConversionError;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A Rust type with a fixed place in the container model
pub trait Typed: Sized {
    /// The destination type used when converting into `Self`
    fn value_type() -> Type;

    /// Turn an instance into a dynamic value
    fn into_value(self) -> Value;

    /// Read an instance back out of a value of [`Typed::value_type`]
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

fn unexpected<T: Typed>(found: &Value) -> ConversionError {
    ConversionError::UnexpectedValue {
        expected: T::value_type(),
        found: found.type_of(),
    }
}

macro_rules! impl_typed_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Typed for $ty {
                fn value_type() -> Type {
                    Type::$variant
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(unexpected::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_typed_scalar! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
}

impl Typed for isize {
    fn value_type() -> Type {
        Type::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Int(v) => isize::try_from(v).map_err(|_| unexpected::<Self>(&Value::Int(v))),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl Typed for usize {
    fn value_type() -> Type {
        Type::Uint
    }

    fn into_value(self) -> Value {
        Value::Uint(self as u64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Uint(v) => usize::try_from(v).map_err(|_| unexpected::<Self>(&Value::Uint(v))),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

/// The untyped slot: accepts whatever the converter stores
impl Typed for Value {
    fn value_type() -> Type {
        Type::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn value_type() -> Type {
        Type::slice(T::value_type())
    }

    fn into_value(self) -> Value {
        Value::Sequence(SequenceValue {
            elem_type: T::value_type(),
            len: None,
            items: self.into_iter().map(Typed::into_value).collect(),
        })
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Sequence(seq) => seq.items.into_iter().map(T::from_value).collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

/// `Option<T>` maps to a pointer: `None` is the nil pointer
impl<T: Typed> Typed for Option<T> {
    fn value_type() -> Type {
        Type::pointer(T::value_type())
    }

    fn into_value(self) -> Value {
        Value::Pointer(PointerValue {
            pointee: T::value_type(),
            target: self.map(|v| Box::new(v.into_value())),
        })
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Pointer(ptr) => ptr.target.map(|target| T::from_value(*target)).transpose(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

fn map_into_value<K: Typed, V: Typed>(entries: impl Iterator<Item = (K, V)>) -> Value {
    let mut map = MapValue::new(K::value_type(), V::value_type());
    for (key, value) in entries {
        map.insert(key.into_value(), value.into_value());
    }
    Value::Map(map)
}

impl<K, V> Typed for HashMap<K, V>
where
    K: Typed + Eq + Hash,
    V: Typed,
{
    fn value_type() -> Type {
        Type::map(K::value_type(), V::value_type())
    }

    fn into_value(self) -> Value {
        map_into_value(self.into_iter())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Map(map) => map
                .entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Typed + Ord,
    V: Typed,
{
    fn value_type() -> Type {
        Type::map(K::value_type(), V::value_type())
    }

    fn into_value(self) -> Value {
        map_into_value(self.into_iter())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Map(map) => map
                .entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_value_types() {
        assert_eq!(i32::value_type(), Type::Int32);
        assert_eq!(isize::value_type(), Type::Int);
        assert_eq!(usize::value_type(), Type::Uint);
        assert_eq!(String::value_type(), Type::String);
    }

    #[test]
    fn test_container_value_types() {
        assert_eq!(Vec::<u8>::value_type(), Type::slice(Type::Uint8));
        assert_eq!(Option::<i64>::value_type(), Type::pointer(Type::Int64));
        assert_eq!(
            HashMap::<String, Vec<bool>>::value_type(),
            Type::map(Type::String, Type::slice(Type::Bool))
        );
        assert_eq!(Value::value_type(), Type::Any);
    }

    #[test]
    fn test_into_and_from_value() {
        let roles = vec!["Admin".to_string(), "User".to_string()];
        let value = roles.clone().into_value();
        assert_eq!(value.type_of(), Type::slice(Type::String));
        assert_eq!(Vec::<String>::from_value(value).unwrap(), roles);

        let mut scores = BTreeMap::new();
        scores.insert("a".to_string(), 1u16);
        let value = scores.clone().into_value();
        assert_eq!(BTreeMap::<String, u16>::from_value(value).unwrap(), scores);

        assert_eq!(Option::<i8>::from_value(None::<i8>.into_value()).unwrap(), None);
        assert_eq!(Option::<i8>::from_value(Some(4i8).into_value()).unwrap(), Some(4));
    }

    #[test]
    fn test_from_value_rejects_wrong_type() {
        let err = i64::from_value(Value::from("nope")).unwrap_err();
        match err {
            ConversionError::UnexpectedValue { expected, found } => {
                assert_eq!(expected, Type::Int64);
                assert_eq!(found, Type::String);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
