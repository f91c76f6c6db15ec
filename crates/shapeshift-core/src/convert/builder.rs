//! Builder for creating converters
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use super::engine::{Converter, ConverterConfig, MergeMode};
use super::recipe::Recipe;
use super::registry::Registry;

/// Builder for [`Converter`]
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    recipes: Vec<Recipe>,
    config: ConverterConfig,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom recipe; earlier recipes win
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Register several custom recipes
    pub fn recipes<I>(mut self, recipes: I) -> Self
    where
        I: IntoIterator<Item = Recipe>,
    {
        self.recipes.extend(recipes);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn skip_unknown_fields(mut self, skip: bool) -> Self {
        self.config.skip_unknown_fields = skip;
        self
    }

    pub fn merge_mode(mut self, mode: MergeMode) -> Self {
        self.config.merge_mode = mode;
        self
    }

    /// Build the converter
    pub fn build(self) -> Converter {
        Converter::from_parts(Registry::new(self.recipes), self.config)
    }
}
