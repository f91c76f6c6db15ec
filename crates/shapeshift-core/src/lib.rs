//! Shapeshift Core - Path evaluation and value conversion for dynamic value trees
//!
//! This crate addresses values inside dynamically typed trees with dotted
//! path expressions and converts values between shapes with an ordered,
//! extensible set of conversion recipes.
//!
//! # Main Components
//!
//! - **Value Model**: Dynamic [`Value`] trees with runtime [`Type`]s and [`Shape`] classification
//! - **Path Evaluation**: Dotted expressions over maps, structs and sequences
//! - **Conversion**: Recipe registry and engine with pointer handling and merge modes
//! - **Decoding**: Path evaluation followed by conversion in one step
//! - **Error Handling**: Module error types using `thiserror`, recipe failures using `anyhow`
//!
//! # Example
//!
//! ```
//! use shapeshift_core::{decode, path, Result, StructValue, Value};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let data = Value::from(json!({
//!         "Name": "Joe",
//!         "UserID": 10,
//!         "Roles": ["Admin", "User"]
//!     }));
//!
//!     let first = path::evaluate(&data, "Roles.0", path::PathOptions::default())?;
//!     assert_eq!(first, Some(&Value::from("Admin")));
//!
//!     let mut user = Value::Struct(
//!         StructValue::new("User")
//!             .field("Name", String::new())
//!             .field("UserID", String::new())
//!             .field("Roles", Value::Nil),
//!     );
//!     decode(&data, "", &mut user)?;
//!     assert_eq!(user.as_struct().unwrap().get("UserID"), Some(&Value::from("10")));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

pub mod convert;
pub mod decode;
pub mod error;
pub mod path;
pub mod value;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use convert::{
    ConversionError, ConvertOptions, Converter, ConverterBuilder, ConverterConfig, MergeMode,
    Recipe, TypeMatcher,
};
pub use decode::{decode, decode_as, decode_json, decode_json_str};
pub use error::{Error, Result};
pub use path::{PathError, PathOption, PathOptions};
pub use value::{
    MapValue, PointerValue, SequenceValue, Shape, StructType, StructValue, Type, Typed, Value,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
