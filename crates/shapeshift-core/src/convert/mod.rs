//! Recipe-driven value conversion
//!
//! Conversion looks up a recipe for the pair (source, destination) in an
//! ordered registry and runs the first one that matches. Recipes match either
//! an exact type or a generic shape. When nothing matches, the engine follows
//! a pointer on the source side, or allocates and fills the target of a
//! pointer on the destination side, and tries again.
//!
//! # Module Organization
//!
//! - [`engine`] - The converter and its per-call context
//! - [`recipe`] - Recipe and matcher types
//! - [`registry`] - Ordered recipe lookup
//! - [`built_in`] - Recipes every converter starts with
//! - [`scalar`] - Scalar coercion rules
//! - [`builder`] - Fluent converter construction
//! - [`error`] - Conversion errors
//!
//! # Examples
//!
//! ```
//! use shapeshift_core::convert;
//! use shapeshift_core::Value;
//!
//! let mut port = Value::Uint16(0);
//! convert::convert(&Value::from("0x1F90"), &mut port).unwrap();
//! assert_eq!(port, Value::Uint16(8080));
//! ```
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod built_in;
pub mod engine;
pub mod error;
pub mod recipe;
pub mod registry;
pub mod scalar;


pub use builder::ConverterBuilder;
pub use engine::{ConversionContext, ConvertOptions, Converter, ConverterConfig, MergeMode};
pub use error::ConversionError;
pub use recipe::{Recipe, RecipeFn, TypeMatcher};
pub use registry::Registry;
pub use scalar::ScalarError;

use crate::value::{Typed, Value};
use std::sync::OnceLock;

static DEFAULT_CONVERTER: OnceLock<Converter> = OnceLock::new();

/// Process-wide converter with only the built-in recipes
pub fn default_converter() -> &'static Converter {
    DEFAULT_CONVERTER.get_or_init(Converter::new)
}

/// Convert with the default converter
pub fn convert(src: &Value, dst: &mut Value) -> Result<(), ConversionError> {
    default_converter().convert(src, dst)
}

/// Convert with the default converter and per-call overrides
pub fn convert_with(
    src: &Value,
    dst: &mut Value,
    options: &ConvertOptions,
) -> Result<(), ConversionError> {
    default_converter().convert_with(src, dst, options)
}

/// Convert with the default converter and panic on failure
pub fn must_convert(src: &Value, dst: &mut Value) {
    default_converter().must_convert(src, dst)
}

/// Convert into a fresh `T` with the default converter
pub fn convert_to<T: Typed>(src: &Value) -> Result<T, ConversionError> {
    default_converter().convert_to(src)
}
