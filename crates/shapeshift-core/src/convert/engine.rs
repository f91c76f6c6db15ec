//! Conversion engine
//!
//! [`Converter`] owns a recipe registry and its configuration. Each call to
//! [`Converter::convert`] builds a [`ConversionContext`] that carries the
//! per-call options down through nested conversions.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::builder::ConverterBuilder;
use super::error::ConversionError;
use super::recipe::Recipe;
use super::registry::{self, Registry};
use crate::value::{Shape, Type, Typed, Value};
use serde::{Deserialize, Serialize};

/// How a conversion treats what the destination already holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Convert into what the destination already holds: struct fields the
    /// source does not mention keep their values, and map entries and
    /// sequence elements are converted into the existing value at the same
    /// key or index
    #[default]
    IntoExisting,
    /// Start every level from the zero value of its type
    Replace,
}

/// Converter-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Drop source keys and fields that have no matching destination field
    /// instead of failing with [`ConversionError::UnknownField`]
    pub skip_unknown_fields: bool,
    pub merge_mode: MergeMode,
}

/// Per-call overrides
///
/// Unset options fall back to the converter's [`ConverterConfig`]. Extra
/// recipes are consulted before any registered recipe.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    skip_unknown_fields: Option<bool>,
    merge_mode: Option<MergeMode>,
    recipes: Vec<Recipe>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_unknown_fields(mut self, skip: bool) -> Self {
        self.skip_unknown_fields = Some(skip);
        self
    }

    pub fn merge_mode(mut self, mode: MergeMode) -> Self {
        self.merge_mode = Some(mode);
        self
    }

    /// Add a recipe that applies to this call only
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }
}

/// State shared by one top-level conversion and everything nested in it
#[derive(Debug)]
pub struct ConversionContext<'a> {
    registry: &'a Registry,
    extra: &'a [Recipe],
    skip_unknown_fields: bool,
    merge_mode: MergeMode,
}

impl ConversionContext<'_> {
    pub fn skip_unknown_fields(&self) -> bool {
        self.skip_unknown_fields
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.merge_mode
    }

    /// Convert `src` into `dst` with the options of the enclosing call
    ///
    /// Nested conversions work in place, so `dst` may be partially written
    /// when this fails. [`Converter::convert`] runs the whole tree against a
    /// copy and only stores it on success.
    pub fn convert(&self, src: &Value, dst: &mut Value) -> Result<(), ConversionError> {
        if dst.is_nil() {
            *dst = src.clone();
            return Ok(());
        }

        if self.merge_mode == MergeMode::Replace {
            *dst = dst.type_of().zero();
        }

        let src_type = src.type_of();
        let dst_type = dst.type_of();
        let src_side = (&src_type, src.shape());
        let dst_side = (&dst_type, dst.shape());

        if let Some(recipe) = self.lookup(src_side, dst_side) {
            log::trace!("converting {} to {} using {}", src_type, dst_type, recipe);
            return recipe
                .apply(self, src, dst)
                .map_err(|source| ConversionError::ConversionFailed {
                    from: src_type,
                    to: dst_type,
                    source,
                });
        }

        if let Value::Pointer(ptr) = src {
            log::trace!("no recipe for {} to {}, dereferencing source", src_type, dst_type);
            return match &ptr.target {
                Some(target) => self.convert(target, dst),
                None => self.convert(&ptr.pointee.zero(), dst),
            };
        }

        let Value::Pointer(ptr) = dst else {
            return Err(ConversionError::NoRecipeFound {
                from: src_type,
                to: dst_type,
            });
        };
        log::trace!("no recipe for {} to {}, converting into pointee", src_type, dst_type);
        let target = ptr
            .target
            .get_or_insert_with(|| Box::new(ptr.pointee.zero()));
        self.convert(src, target)
    }

    fn lookup(&self, src: (&Type, Shape), dst: (&Type, Shape)) -> Option<&Recipe> {
        registry::find(self.extra, src, dst).or_else(|| self.registry.lookup(src, dst))
    }
}

/// Recipe-driven converter between arbitrary values
///
/// A converter is immutable once built and can be shared between threads.
///
/// # Examples
///
/// ```
/// use shapeshift_core::convert::Converter;
/// use shapeshift_core::{StructValue, Type, Value};
/// use serde_json::json;
///
/// let converter = Converter::new();
/// let source = Value::from(json!({"name": "Joe", "age": "42"}));
/// let mut user = Value::Struct(
///     StructValue::new("User")
///         .field("Name", String::new())
///         .field("Age", 0i64),
/// );
///
/// converter.convert(&source, &mut user).unwrap();
/// assert_eq!(user.as_struct().unwrap().get("Age"), Some(&Value::Int64(42)));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Registry,
    config: ConverterConfig,
}

impl Converter {
    /// Converter with only the built-in recipes
    pub fn new() -> Self {
        Self::with_recipes(Vec::new())
    }

    /// Converter whose custom recipes take precedence over the built-in ones
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self::from_parts(Registry::new(recipes), ConverterConfig::default())
    }

    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub(crate) fn from_parts(registry: Registry, config: ConverterConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `src` into `dst`
    ///
    /// A nil `dst` is replaced by `src` as is. Otherwise the first matching
    /// recipe fills `dst`, following pointers on either side when nothing
    /// matches directly.
    pub fn convert(&self, src: &Value, dst: &mut Value) -> Result<(), ConversionError> {
        self.convert_with(src, dst, &ConvertOptions::default())
    }

    /// Convert with per-call overrides
    pub fn convert_with(
        &self,
        src: &Value,
        dst: &mut Value,
        options: &ConvertOptions,
    ) -> Result<(), ConversionError> {
        let mut staged = dst.clone();
        self.context(options).convert(src, &mut staged)?;
        *dst = staged;
        Ok(())
    }

    /// Convert and panic on failure
    pub fn must_convert(&self, src: &Value, dst: &mut Value) {
        if let Err(err) = self.convert(src, dst) {
            panic!("unable to convert {} into {}: {}", src, dst.type_of(), err);
        }
    }

    /// Convert into the value behind a non-nil pointer
    ///
    /// Fails with [`ConversionError::DestinationNotWritable`] when `dst` is
    /// not a pointer or is a nil pointer.
    pub fn convert_into_pointer(&self, src: &Value, dst: &mut Value) -> Result<(), ConversionError> {
        match dst {
            Value::Pointer(ptr) => match ptr.target.as_mut() {
                Some(target) => self.convert(src, target),
                None => Err(ConversionError::DestinationNotWritable {
                    found: Type::pointer(ptr.pointee.clone()),
                }),
            },
            other => Err(ConversionError::DestinationNotWritable {
                found: other.type_of(),
            }),
        }
    }

    /// Convert into a fresh value of `T` and extract it
    pub fn convert_to<T: Typed>(&self, src: &Value) -> Result<T, ConversionError> {
        let mut dst = T::value_type().zero();
        self.convert(src, &mut dst)?;
        T::from_value(dst)
    }

    fn context<'a>(&'a self, options: &'a ConvertOptions) -> ConversionContext<'a> {
        ConversionContext {
            registry: &self.registry,
            extra: &options.recipes,
            skip_unknown_fields: options
                .skip_unknown_fields
                .unwrap_or(self.config.skip_unknown_fields),
            merge_mode: options.merge_mode.unwrap_or(self.config.merge_mode),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
