//! String field type.

use bson::Bson;
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::FieldOptions,
    value::{FieldContext, display, is_absent},
};

/// A string field.
///
/// Scalars (numbers, booleans, dates, object ids) are rendered to their string form on cast.
/// Arrays and embedded documents are left alone and fail validation.
#[derive(Debug, Clone)]
pub struct StringType {
    base: FieldBase,
}

impl StringType {
    /// Creates a string field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }
}

impl FieldType for StringType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        match self.base.cast(value) {
            Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
            value @ (Bson::Int32(_)
            | Bson::Int64(_)
            | Bson::Double(_)
            | Bson::Boolean(_)
            | Bson::DateTime(_)) => Bson::String(display(&value)),
            value => value,
        }
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) || matches!(value, Bson::String(_)) {
            return Ok(value);
        }

        Err(ValidationError::new(format!(
            "`{}` is not a string!",
            display(value)
        )))
    }
}
