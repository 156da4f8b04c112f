//! Main schemalayer crate providing pluggable field types for a document store schema layer.
//!
//! This crate is the primary entry point for users of the schemalayer framework.
//! It re-exports the field type contract from `schemalayer-core` and the built-in types from
//! `schemalayer-types`.
//!
//! # Features
//!
//! - **Uniform contract** - Every type answers `cast`, `validate` and `apply_update` the same way
//! - **Errors as values** - Validation failures are returned, so many fields can be checked at once
//! - **Typed update operators** - `inc`, `dec`, `mul`, `div`, `mod`, `max`, `min` dispatched per type
//! - **Lazy defaults** - Literal defaults or producers evaluated on every cast
//! - **Open registry** - Build fields from serde specs and register your own types
//!
//! # Quick Start
//!
//! ```ignore
//! use schemalayer::{prelude::*, types::{CuidType, NumberType}};
//! use bson::Bson;
//!
//! let fields: Vec<FieldTypeRef> = vec![
//!     Box::new(CuidType::generated("_id", FieldOptions::required())),
//!     Box::new(NumberType::new("views", FieldOptions::builder().default_value(0).build())),
//! ];
//!
//! // Cast and validate a write, collecting one error per field
//! let errors = fields
//!     .iter()
//!     .filter_map(|field| field.cast_and_validate(Bson::Undefined, None).err())
//!     .collect::<Vec<_>>();
//! assert!(errors.is_empty());
//!
//! // Apply a partial update without knowing the field's type
//! let views = &fields[1];
//! let value = views.apply_update("$inc", &Bson::Int32(41), &Bson::Int32(1), None)?;
//! assert_eq!(value, Bson::Double(42.0));
//! ```
//!
//! # Custom Types
//!
//! Implement [`FieldType`](field::FieldType) on a struct embedding a [`FieldBase`](field::FieldBase)
//! and register it with a [`FieldTypeRegistry`](registry::FieldTypeRegistry):
//!
//! ```ignore
//! use schemalayer::prelude::*;
//!
//! #[derive(Debug)]
//! struct EmailType {
//!     base: FieldBase,
//! }
//!
//! impl FieldType for EmailType {
//!     fn base(&self) -> &FieldBase { &self.base }
//!     fn type_name(&self) -> &'static str { "Email" }
//! }
//!
//! let registry = schemalayer::types::builtin_registry()
//!     .with("email", |name, options| EmailType { base: FieldBase::new(name, options) });
//! ```

pub mod prelude;

pub use schemalayer_core::{error, field, options, registry, update, value};

// Re-export BSON types for convenience
pub use bson;

/// Built-in field type implementations.
pub mod types {
    pub use schemalayer_types::{
        BooleanType, CuidType, DateType, NumberType, StringType, UuidType, builtin_registry,
        cuid::{generate as generate_cuid, is_cuid},
    };
}
