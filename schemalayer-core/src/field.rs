//! The field type contract.
//!
//! Every storable kind (numbers, identifiers, strings, dates, ...) implements [`FieldType`] so
//! that generic document code can cast, validate and update a field without knowing its kind.
//!
//! Concrete types embed a [`FieldBase`] and delegate to it first: the base resolves defaults
//! during [`cast`](FieldType::cast) and enforces `required` during
//! [`validate`](FieldType::validate). The type then adds its own coercion and conformance
//! checks on top.
//!
//! # Example
//!
//! ```ignore
//! use schemalayer::prelude::*;
//! use schemalayer::types::NumberType;
//! use bson::Bson;
//!
//! let views = NumberType::new("views", FieldOptions::builder().default_value(0).build());
//!
//! let value = views.cast(Bson::String("41".into()), None);
//! views.validate(&value, None)?;
//!
//! let value = views.apply_update("$inc", &value, &Bson::Int32(1), None)?;
//! assert_eq!(value, Bson::Double(42.0));
//! ```

use bson::Bson;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::{
    error::{FieldError, FieldResult, ValidationError, ValidationResult},
    options::FieldOptions,
    update::{UpdateFn, UpdateOp},
    value::{FieldContext, is_absent},
};

/// State and behavior shared by every field type: the field name and its options.
#[derive(Debug, Clone)]
pub struct FieldBase {
    name: String,
    options: FieldOptions,
}

impl FieldBase {
    /// Creates the base for a field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field options.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Substitutes the configured default for an absent value.
    ///
    /// Present values pass through untouched. An absent value with no default configured is
    /// returned as is, so `null` stays `null` and `undefined` stays `undefined`.
    pub fn cast(&self, value: Bson) -> Bson {
        if !is_absent(&value) {
            return value;
        }

        match &self.options.default {
            Some(default) => {
                trace!(field = %self.name, "resolving default for absent value");
                default.resolve()
            }
            None => value,
        }
    }

    /// Fails with ``"`<name>` is required!"`` when the field is required and the value is absent.
    pub fn validate<'v>(&self, value: &'v Bson) -> ValidationResult<&'v Bson> {
        if self.options.required && is_absent(value) {
            return Err(ValidationError::new(format!("`{}` is required!", self.name)));
        }

        Ok(value)
    }
}

/// The uniform contract implemented by every field type.
///
/// Implementations hold no per-document state; one instance is shared by every document of a
/// schema and may be used from any number of threads at once.
pub trait FieldType: Send + Sync + fmt::Debug {
    /// Returns the embedded base carrying the field name and options.
    fn base(&self) -> &FieldBase;

    /// Returns the name of the type, e.g. `"Number"`.
    fn type_name(&self) -> &'static str;

    /// Returns the field name.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Returns the field options.
    fn options(&self) -> &FieldOptions {
        self.base().options()
    }

    /// Converts raw input into the canonical representation.
    ///
    /// Never fails. Input that cannot be coerced is returned in a form that
    /// [`validate`](FieldType::validate) rejects.
    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        self.base().cast(value)
    }

    /// Checks a value against presence and type rules without modifying it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated rule.
    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        self.base().validate(value)
    }

    /// Looks up the update function registered for `op`, if any.
    fn update_fn(&self, _op: UpdateOp) -> Option<UpdateFn> {
        None
    }

    /// Returns `true` if this type registers `op`.
    fn supports(&self, op: UpdateOp) -> bool {
        self.update_fn(op).is_some()
    }

    /// Casts and then validates, returning the canonical value.
    fn cast_and_validate(&self, value: Bson, ctx: FieldContext<'_>) -> ValidationResult<Bson> {
        let value = self.cast(value, ctx);
        self.validate(&value, ctx)?;
        Ok(value)
    }

    /// Applies the named update operator to the current value.
    ///
    /// `operator` may be given with or without the `$` prefix (`"inc"` or `"$inc"`).
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnsupportedOperator`] if the name is unknown or this type does not
    /// register the operator.
    fn apply_update(
        &self,
        operator: &str,
        current: &Bson,
        update: &Bson,
        ctx: FieldContext<'_>,
    ) -> FieldResult<Bson> {
        let update_fn = operator
            .parse::<UpdateOp>()
            .ok()
            .and_then(|op| self.update_fn(op));

        match update_fn {
            Some(f) => {
                debug!(field = %self.name(), operator, "applying update");
                Ok(f(current, update, ctx))
            }
            None => {
                warn!(
                    field = %self.name(),
                    type_name = self.type_name(),
                    operator,
                    "unsupported update operator"
                );
                Err(FieldError::UnsupportedOperator {
                    field: self.name().to_string(),
                    type_name: self.type_name(),
                    operator: operator.to_string(),
                })
            }
        }
    }
}

/// A boxed, type-erased field type.
pub type FieldTypeRef = Box<dyn FieldType>;
