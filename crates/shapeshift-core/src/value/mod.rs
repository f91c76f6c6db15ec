//! Container model shared by the path evaluator and the converter
//!
//! A [`Value`] is a dynamically typed node in an owned value tree: a scalar,
//! a map, a struct, a sequence, a pointer, or [`Value::Nil`]. Classification
//! into a [`Shape`] follows pointers until it reaches a terminal value or a
//! nil pointer, and both the evaluator and the converter go through
//! [`Value::elem`] and [`Value::shape`] so they always agree on what a value
//! is.
//!
//! # Module Organization
//!
//! - [`types`] - Runtime type descriptors and zero values
//! - [`json`] - Bridge from and to `serde_json::Value`
//! - [`typed`] - Bridge from and to native Rust types
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod json;
pub mod typed;
pub mod types;

#[cfg(test)]
mod tests;

pub use typed::Typed;
pub use types::{StructType, Type, SCALAR_TYPES};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value; also the contents of an untyped slot
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(u64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Map(MapValue),
    Struct(StructValue),
    Sequence(SequenceValue),
    Pointer(PointerValue),
}

/// Classification of a value after following pointers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// `Value::Nil` or a nil pointer
    Nil,
    Scalar,
    Map,
    Struct,
    Sequence,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Nil => write!(f, "nil"),
            Shape::Scalar => write!(f, "scalar"),
            Shape::Map => write!(f, "map"),
            Shape::Struct => write!(f, "struct"),
            Shape::Sequence => write!(f, "sequence"),
        }
    }
}

/// Map with typed keys and values
///
/// Entries keep insertion order. Keys are compared with `==`, so inserting a
/// key that is already present replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    pub key_type: Type,
    pub value_type: Type,
    pub entries: Vec<(Value, Value)>,
}

impl MapValue {
    /// Create an empty map
    pub fn new(key_type: Type, value_type: Type) -> Self {
        Self {
            key_type,
            value_type,
            entries: Vec::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up an entry by string key
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, Value::String(s) if s == key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Struct instance with fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field append
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Field by exact name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The layout this instance currently has
    pub fn struct_type(&self) -> StructType {
        StructType {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.type_of()))
                .collect(),
        }
    }
}

/// Slice or fixed-size array
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceValue {
    pub elem_type: Type,
    /// `Some(n)` for an array of length `n`, `None` for a slice
    pub len: Option<usize>,
    pub items: Vec<Value>,
}

impl SequenceValue {
    /// Create an empty slice
    pub fn slice(elem_type: Type) -> Self {
        Self {
            elem_type,
            len: None,
            items: Vec::new(),
        }
    }

    /// Create a slice from items
    pub fn from_items<I, V>(elem_type: Type, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            elem_type,
            len: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Pointer to a value of a known type
#[derive(Debug, Clone, PartialEq)]
pub struct PointerValue {
    pub pointee: Type,
    pub target: Option<Box<Value>>,
}

impl PointerValue {
    /// Nil pointer to `pointee`
    pub fn null(pointee: Type) -> Self {
        Self {
            pointee,
            target: None,
        }
    }

    /// Pointer to `value`; the pointee type is taken from the value
    pub fn to(value: Value) -> Self {
        Self {
            pointee: value.type_of(),
            target: Some(Box::new(value)),
        }
    }

    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }
}

impl Value {
    /// Pointer to `value`
    pub fn pointer_to(value: impl Into<Value>) -> Self {
        Value::Pointer(PointerValue::to(value.into()))
    }

    /// Nil pointer of the given pointee type
    pub fn null_pointer(pointee: Type) -> Self {
        Value::Pointer(PointerValue::null(pointee))
    }

    /// Slice of `[]any` holding the given items
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Sequence(SequenceValue::from_items(Type::Any, items))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Runtime type of this value
    pub fn type_of(&self) -> Type {
        match self {
            Value::Nil => Type::Any,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Int8(_) => Type::Int8,
            Value::Int16(_) => Type::Int16,
            Value::Int32(_) => Type::Int32,
            Value::Int64(_) => Type::Int64,
            Value::Uint(_) => Type::Uint,
            Value::Uint8(_) => Type::Uint8,
            Value::Uint16(_) => Type::Uint16,
            Value::Uint32(_) => Type::Uint32,
            Value::Uint64(_) => Type::Uint64,
            Value::Float32(_) => Type::Float32,
            Value::Float64(_) => Type::Float64,
            Value::String(_) => Type::String,
            Value::Map(map) => Type::map(map.key_type.clone(), map.value_type.clone()),
            Value::Struct(s) => Type::Struct(s.struct_type()),
            Value::Sequence(seq) => match seq.len {
                Some(len) => Type::array(seq.elem_type.clone(), len),
                None => Type::slice(seq.elem_type.clone()),
            },
            Value::Pointer(ptr) => Type::pointer(ptr.pointee.clone()),
        }
    }

    /// Follow pointers down to the terminal value
    ///
    /// Stops at a nil pointer and returns it unchanged.
    pub fn elem(&self) -> &Value {
        let mut current = self;
        while let Value::Pointer(PointerValue {
            target: Some(target),
            ..
        }) = current
        {
            current = target.as_ref();
        }
        current
    }

    /// Mutable counterpart of [`Value::elem`]
    pub fn elem_mut(&mut self) -> &mut Value {
        match self {
            Value::Pointer(PointerValue {
                target: Some(target),
                ..
            }) => target.elem_mut(),
            other => other,
        }
    }

    /// Classify this value after following pointers
    pub fn shape(&self) -> Shape {
        match self.elem() {
            Value::Nil | Value::Pointer(_) => Shape::Nil,
            Value::Map(_) => Shape::Map,
            Value::Struct(_) => Shape::Struct,
            Value::Sequence(_) => Shape::Sequence,
            _ => Shape::Scalar,
        }
    }

    /// Textual form of a scalar, after following pointers
    ///
    /// Returns `None` for nil, maps, structs and sequences.
    pub fn scalar_string(&self) -> Option<String> {
        let value = self.elem();
        match value {
            Value::Nil
            | Value::Pointer(_)
            | Value::Map(_)
            | Value::Struct(_)
            | Value::Sequence(_) => None,
            scalar => Some(scalar.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceValue> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }
}

/// Case-insensitive comparison using Unicode lowercase folding
pub fn fold_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) | Value::Int64(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Uint(v) | Value::Uint64(v) => write!(f, "{}", v),
            Value::Uint8(v) => write!(f, "{}", v),
            Value::Uint16(v) => write!(f, "{}", v),
            Value::Uint32(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Map(map) => {
                write!(f, "map[")?;
                for (i, (key, value)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
            Value::Struct(s) => {
                write!(f, "{{")?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", name, value)?;
                }
                write!(f, "}}")
            }
            Value::Sequence(seq) => {
                write!(f, "[")?;
                for (i, item) in seq.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Pointer(ptr) => match &ptr.target {
                Some(target) => write!(f, "&{}", target),
                None => write!(f, "<nil>"),
            },
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
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
    MapValue => Map,
    StructValue => Struct,
    SequenceValue => Sequence,
    PointerValue => Pointer,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Uint(v as u64)
    }
}
