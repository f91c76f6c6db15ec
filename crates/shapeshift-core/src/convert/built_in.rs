//! Built-in recipes
//!
//! The default registry knows how to convert:
//!
//! - every scalar type into every other scalar type;
//! - strings to and from `[]uint8`, and `[]int32` rune slices to strings,
//!   with invalid UTF-8 and invalid runes decoded as U+FFFD;
//! - nil into a map or struct, producing its zero value;
//! - maps and structs into maps and structs, matching names case-insensitively;
//! - sequences into sequences, element by element.
//!
//! Structural recipes are registered against shapes and work on the values
//! behind any pointers, so `*map[string]int` converts like `map[string]int`.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::engine::ConversionContext;
use super::error::ConversionError;
use super::recipe::Recipe;
use super::scalar;
use crate::value::{fold_eq, MapValue, SequenceValue, Shape, StructValue, Type, Value, SCALAR_TYPES};
use anyhow::{anyhow, bail};
use std::collections::HashMap;

/// All built-in recipes in lookup order
pub fn recipes() -> Vec<Recipe> {
    let mut recipes = Vec::with_capacity(SCALAR_TYPES.len() * SCALAR_TYPES.len() + 10);

    for from in SCALAR_TYPES {
        for to in SCALAR_TYPES {
            recipes.push(Recipe::new(from.clone(), to, scalar_to_scalar));
        }
    }

    recipes.push(Recipe::new(Type::String, Type::slice(Type::Uint8), string_to_bytes));
    recipes.push(Recipe::new(Type::slice(Type::Uint8), Type::String, bytes_to_string));
    recipes.push(Recipe::new(Type::slice(Type::Int32), Type::String, runes_to_string));

    recipes.push(Recipe::new(Shape::Nil, Shape::Map, nil_to_zero));
    recipes.push(Recipe::new(Shape::Nil, Shape::Struct, nil_to_zero));
    recipes.push(Recipe::new(Shape::Map, Shape::Map, map_to_map));
    recipes.push(Recipe::new(Shape::Struct, Shape::Map, struct_to_map));
    recipes.push(Recipe::new(Shape::Map, Shape::Struct, map_to_struct));
    recipes.push(Recipe::new(Shape::Struct, Shape::Struct, struct_to_struct));
    recipes.push(Recipe::new(Shape::Sequence, Shape::Sequence, sequence_to_sequence));

    recipes
}

fn scalar_to_scalar(_: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    scalar::coerce(src, dst)?;
    Ok(())
}

fn string_to_bytes(_: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let Value::String(text) = src else {
        bail!("expected a string, found {}", src.type_of());
    };
    *dst = Value::Sequence(SequenceValue::from_items(Type::Uint8, text.bytes()));
    Ok(())
}

fn bytes_to_string(_: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let Value::Sequence(seq) = src else {
        bail!("expected a byte slice, found {}", src.type_of());
    };
    let bytes = seq
        .items
        .iter()
        .map(|item| match item {
            Value::Uint8(b) => Ok(*b),
            other => Err(anyhow!("byte slice holds {}", other.type_of())),
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;
    *dst = Value::String(String::from_utf8_lossy(&bytes).into_owned());
    Ok(())
}

fn runes_to_string(_: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let Value::Sequence(seq) = src else {
        bail!("expected a rune slice, found {}", src.type_of());
    };
    let mut text = String::with_capacity(seq.items.len());
    for item in &seq.items {
        let Value::Int32(rune) = item else {
            bail!("rune slice holds {}", item.type_of());
        };
        text.push(char::from_u32(*rune as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    *dst = Value::String(text);
    Ok(())
}

fn nil_to_zero(_: &ConversionContext<'_>, _: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let target = dst.elem_mut();
    *target = target.type_of().zero();
    Ok(())
}

fn map_to_map(ctx: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let source = expect_map(src.elem())?;
    let Value::Map(target) = dst.elem_mut() else {
        bail!("destination is not a map");
    };
    let pairs = source.entries.iter().map(|(k, v)| (k.clone(), v));
    fill_map(ctx, target, pairs)
}

fn struct_to_map(ctx: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let source = expect_struct(src.elem())?;
    let Value::Map(target) = dst.elem_mut() else {
        bail!("destination is not a map");
    };
    let pairs = source
        .fields
        .iter()
        .rev()
        .map(|(name, v)| (Value::String(name.clone()), v));
    fill_map(ctx, target, pairs)
}

fn map_to_struct(ctx: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let source = expect_map(src.elem())?;
    let Value::Struct(target) = dst.elem_mut() else {
        bail!("destination is not a struct");
    };
    for (key, value) in &source.entries {
        let mut name = Value::String(String::new());
        ctx.convert(key, &mut name)?;
        let name = name.as_str().unwrap_or_default().to_string();
        assign_field(ctx, target, &name, value)?;
    }
    Ok(())
}

fn struct_to_struct(ctx: &ConversionContext<'_>, src: &Value, dst: &mut Value) -> anyhow::Result<()> {
    let source = expect_struct(src.elem())?;
    let Value::Struct(target) = dst.elem_mut() else {
        bail!("destination is not a struct");
    };
    for (name, value) in &source.fields {
        assign_field(ctx, target, name, value)?;
    }
    Ok(())
}

fn sequence_to_sequence(
    ctx: &ConversionContext<'_>,
    src: &Value,
    dst: &mut Value,
) -> anyhow::Result<()> {
    let Value::Sequence(source) = src.elem() else {
        bail!("expected a sequence, found {}", src.type_of());
    };
    let Value::Sequence(target) = dst.elem_mut() else {
        bail!("destination is not a sequence");
    };

    if let Some(len) = target.len {
        if source.items.len() > len {
            bail!(
                "{} elements do not fit in [{}]{}",
                source.items.len(),
                len,
                target.elem_type
            );
        }
    }

    let mut items = Vec::with_capacity(target.len.unwrap_or(source.items.len()));
    for (i, item) in source.items.iter().enumerate() {
        let mut slot = match target.items.get_mut(i) {
            Some(existing) => std::mem::take(existing),
            None => target.elem_type.zero(),
        };
        ctx.convert(item, &mut slot)?;
        items.push(slot);
    }
    if let Some(len) = target.len {
        items.extend(target.items.drain(..).skip(source.items.len()).take(len));
        while items.len() < len {
            items.push(target.elem_type.zero());
        }
    }
    target.items = items;
    Ok(())
}

/// Rebuild `target` from `pairs`, converting each value into the entry
/// stored under the same key before the rebuild
///
/// String keys are looked up through an index; other keys fall back to a
/// scan. Keys that convert to the same value keep the last value and the
/// first position.
fn fill_map<'a>(
    ctx: &ConversionContext<'_>,
    target: &mut MapValue,
    pairs: impl Iterator<Item = (Value, &'a Value)>,
) -> anyhow::Result<()> {
    let previous = KeyIndex::of(&target.entries);
    let mut rebuilt = MapValue::new(target.key_type.clone(), target.value_type.clone());
    let mut index = KeyIndex::default();

    for (key, value) in pairs {
        let mut new_key = target.key_type.zero();
        ctx.convert(&key, &mut new_key)?;
        let mut new_value = previous
            .position(&target.entries, &new_key)
            .map(|i| target.entries[i].1.clone())
            .unwrap_or_else(|| target.value_type.zero());
        ctx.convert(value, &mut new_value)?;

        match index.position(&rebuilt.entries, &new_key) {
            Some(i) => rebuilt.entries[i].1 = new_value,
            None => {
                index.record(&new_key, rebuilt.entries.len());
                rebuilt.entries.push((new_key, new_value));
            }
        }
    }
    *target = rebuilt;
    Ok(())
}

/// Positions of string keys in a map's entry list
#[derive(Default)]
struct KeyIndex {
    strings: HashMap<String, usize>,
}

impl KeyIndex {
    fn of(entries: &[(Value, Value)]) -> Self {
        let mut index = Self::default();
        for (i, (key, _)) in entries.iter().enumerate() {
            index.record(key, i);
        }
        index
    }

    /// Remember the first position of a string key
    fn record(&mut self, key: &Value, position: usize) {
        if let Value::String(s) = key {
            self.strings.entry(s.clone()).or_insert(position);
        }
    }

    fn position(&self, entries: &[(Value, Value)], key: &Value) -> Option<usize> {
        match key {
            Value::String(s) => self.strings.get(s.as_str()).copied(),
            other => entries.iter().position(|(k, _)| k == other),
        }
    }
}

/// Convert `value` into the first field whose name matches `name` ignoring case
fn assign_field(
    ctx: &ConversionContext<'_>,
    target: &mut StructValue,
    name: &str,
    value: &Value,
) -> anyhow::Result<()> {
    match target.fields.iter_mut().find(|(field, _)| fold_eq(field, name)) {
        Some((_, slot)) => ctx.convert(value, slot)?,
        None if ctx.skip_unknown_fields() => {}
        None => {
            return Err(ConversionError::UnknownField {
                field: name.to_string(),
                target: target.name.clone(),
            }
            .into())
        }
    }
    Ok(())
}

fn expect_map(value: &Value) -> anyhow::Result<&MapValue> {
    value
        .as_map()
        .ok_or_else(|| anyhow!("expected a map, found {}", value.type_of()))
}

fn expect_struct(value: &Value) -> anyhow::Result<&StructValue> {
    value
        .as_struct()
        .ok_or_else(|| anyhow!("expected a struct, found {}", value.type_of()))
}
