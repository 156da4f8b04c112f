//! Boolean field type.

use bson::Bson;
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::FieldOptions,
    value::{FieldContext, as_f64, display, is_absent},
};

/// A boolean field.
///
/// On cast, `"false"`, `"0"`, `""`, `0` and NaN become `false`; every other present value
/// becomes `true`.
#[derive(Debug, Clone)]
pub struct BooleanType {
    base: FieldBase,
}

impl BooleanType {
    /// Creates a boolean field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }
}

impl FieldType for BooleanType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "Boolean"
    }

    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        match self.base.cast(value) {
            value @ (Bson::Null | Bson::Undefined | Bson::Boolean(_)) => value,
            Bson::String(s) => Bson::Boolean(!matches!(s.as_str(), "false" | "0" | "")),
            other => match as_f64(&other) {
                Some(v) => Bson::Boolean(v != 0.0 && !v.is_nan()),
                None => Bson::Boolean(true),
            },
        }
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) || matches!(value, Bson::Boolean(_)) {
            return Ok(value);
        }

        Err(ValidationError::new(format!(
            "`{}` is not a boolean!",
            display(value)
        )))
    }
}
