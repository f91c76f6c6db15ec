//! Path expression evaluation over value trees
//!
//! A path expression is a dotted list of segments such as `Roles.0` or
//! `Details.Surname`. Evaluation walks the value tree one segment at a time:
//!
//! - on a **map**, an integer segment selects the n-th string key in sorted
//!   order and any other segment is compared against the keys;
//! - on a **struct**, the same rules apply to field names, scanning fields
//!   from the last declared to the first;
//! - on a **sequence**, an integer segment is a direct index and any other
//!   segment selects the last element whose text equals it.
//!
//! Missing keys, fields and indices are reported as `Ok(None)`. Stepping
//! into a scalar or nil is a [`PathError::ShapeMismatch`].
//!
//! # Examples
//!
//! ```
//! use shapeshift_core::path::{evaluate, PathOptions};
//! use shapeshift_core::Value;
//! use serde_json::json;
//!
//! let data = Value::from(json!({"Name": "Joe", "Roles": ["Admin", "User"]}));
//!
//! let role = evaluate(&data, "Roles.0", PathOptions::default()).unwrap();
//! assert_eq!(role, Some(&Value::from("Admin")));
//!
//! let missing = evaluate(&data, "Details.Surname", PathOptions::default()).unwrap();
//! assert_eq!(missing, None);
//! ```
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

#[cfg(test)]
mod prop_tests;
#[cfg(test)]
mod tests;

pub use error::PathError;
pub use parser::{Path, Segment};

use crate::value::{fold_eq, MapValue, SequenceValue, StructValue, Value};
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

static NIL: Value = Value::Nil;

/// A single evaluation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathOption {
    /// Compare names with Unicode case folding
    IgnoreCase,
    /// [`must_evaluate`] yields nil instead of panicking when nothing is found
    IgnoreNotFound,
    /// [`must_evaluate`] yields nil instead of panicking on a shape mismatch
    IgnoreError,
}

/// Set of [`PathOption`] flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub ignore_case: bool,
    pub ignore_not_found: bool,
    pub ignore_error: bool,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag
    pub fn with(mut self, option: PathOption) -> Self {
        match option {
            PathOption::IgnoreCase => self.ignore_case = true,
            PathOption::IgnoreNotFound => self.ignore_not_found = true,
            PathOption::IgnoreError => self.ignore_error = true,
        }
        self
    }

    pub fn contains(&self, option: PathOption) -> bool {
        match option {
            PathOption::IgnoreCase => self.ignore_case,
            PathOption::IgnoreNotFound => self.ignore_not_found,
            PathOption::IgnoreError => self.ignore_error,
        }
    }

    fn names_match(&self, candidate: &str, wanted: &str) -> bool {
        if self.ignore_case {
            fold_eq(candidate, wanted)
        } else {
            candidate == wanted
        }
    }
}

impl From<PathOption> for PathOptions {
    fn from(option: PathOption) -> Self {
        PathOptions::default().with(option)
    }
}

impl FromIterator<PathOption> for PathOptions {
    fn from_iter<I: IntoIterator<Item = PathOption>>(iter: I) -> Self {
        iter.into_iter().fold(PathOptions::default(), PathOptions::with)
    }
}

impl BitOr for PathOption {
    type Output = PathOptions;

    fn bitor(self, rhs: PathOption) -> PathOptions {
        PathOptions::from(self).with(rhs)
    }
}

impl BitOr<PathOption> for PathOptions {
    type Output = PathOptions;

    fn bitor(self, rhs: PathOption) -> PathOptions {
        self.with(rhs)
    }
}

/// Evaluate `expression` against `container`
///
/// Returns `Ok(Some(value))` for the addressed value, `Ok(None)` when a key,
/// field or index along the way does not exist, and an error when a step is
/// attempted on something that is not a map, struct or sequence.
pub fn evaluate<'a>(
    container: &'a Value,
    expression: &str,
    options: impl Into<PathOptions>,
) -> Result<Option<&'a Value>, PathError> {
    evaluate_path(container, &Path::parse(expression), options)
}

/// Evaluate an already parsed path
pub fn evaluate_path<'a>(
    container: &'a Value,
    path: &Path,
    options: impl Into<PathOptions>,
) -> Result<Option<&'a Value>, PathError> {
    walk(container, path.segments(), &options.into())
}

/// Evaluate and panic on anything but a found value
///
/// `IgnoreNotFound` and `IgnoreError` turn the respective panic into a nil
/// result.
pub fn must_evaluate<'a>(
    container: &'a Value,
    expression: &str,
    options: impl Into<PathOptions>,
) -> &'a Value {
    let options = options.into();
    match evaluate(container, expression, options) {
        Ok(Some(value)) => value,
        Ok(None) if options.ignore_not_found => &NIL,
        Ok(None) => panic!("unable to find `{}` in {}", expression, container),
        Err(_) if options.ignore_error => &NIL,
        Err(err) => panic!(
            "unable to evaluate `{}` in {}: {}",
            expression, container, err
        ),
    }
}

/// Whether `expression` addresses an existing value
pub fn exists(
    container: &Value,
    expression: &str,
    options: impl Into<PathOptions>,
) -> Result<bool, PathError> {
    Ok(evaluate(container, expression, options)?.is_some())
}

fn walk<'a>(
    current: &'a Value,
    segments: &[Segment],
    options: &PathOptions,
) -> Result<Option<&'a Value>, PathError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(Some(current));
    };

    let next = match current.elem() {
        Value::Map(map) => map_step(map, segment, options),
        Value::Struct(s) => struct_step(s, segment, options),
        Value::Sequence(seq) => sequence_step(seq, segment, options),
        other => return Err(PathError::shape_mismatch(other, Path::join(segments))),
    };

    match next {
        Some(value) => walk(value, rest, options),
        None => {
            log::trace!("path segment `{}` not found", segment);
            Ok(None)
        }
    }
}

fn position(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}

fn map_step<'a>(map: &'a MapValue, segment: &Segment, options: &PathOptions) -> Option<&'a Value> {
    match segment.index() {
        Some(index) => {
            let mut keyed: Vec<(&str, &Value)> = map
                .entries
                .iter()
                .filter_map(|(key, value)| key.elem().as_str().map(|k| (k, value)))
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(b.0));
            position(index)
                .and_then(|i| keyed.get(i).copied())
                .map(|(_, value)| value)
        }
        None => map
            .entries
            .iter()
            .find(|(key, _)| {
                key.scalar_string()
                    .is_some_and(|k| options.names_match(&k, segment.as_str()))
            })
            .map(|(_, value)| value),
    }
}

fn struct_step<'a>(
    s: &'a StructValue,
    segment: &Segment,
    options: &PathOptions,
) -> Option<&'a Value> {
    match segment.index() {
        Some(index) => {
            let mut fields: Vec<&(String, Value)> = s.fields.iter().rev().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            position(index)
                .and_then(|i| fields.get(i).copied())
                .map(|(_, value)| value)
        }
        None => s
            .fields
            .iter()
            .rev()
            .find(|(name, _)| options.names_match(name, segment.as_str()))
            .map(|(_, value)| value),
    }
}

fn sequence_step<'a>(
    seq: &'a SequenceValue,
    segment: &Segment,
    options: &PathOptions,
) -> Option<&'a Value> {
    match segment.index() {
        Some(index) => position(index).and_then(|i| seq.items.get(i)),
        None => seq.items.iter().rev().find(|item| {
            item.scalar_string()
                .is_some_and(|text| options.names_match(&text, segment.as_str()))
        }),
    }
}
