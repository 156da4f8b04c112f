//! Convenient re-exports of commonly used types from schemalayer.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use schemalayer::prelude::*;
//! ```

pub use schemalayer_core::{
    error::{FieldError, FieldResult, ValidationError, ValidationResult},
    field::{FieldBase, FieldType, FieldTypeRef},
    options::{FieldDefault, FieldOptions, FieldOptionsBuilder},
    registry::{FieldSpec, FieldTypeRegistry},
    update::{UpdateFn, UpdateOp},
    value::FieldContext,
};
