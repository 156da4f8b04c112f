//! UUID field type.

use bson::{Bson, spec::BinarySubtype};
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::{FieldDefault, FieldOptions},
    value::{FieldContext, display, is_absent},
};
use uuid::Uuid;

/// A UUID identifier field stored in its hyphenated, lowercase string form.
///
/// Cast normalizes any parseable UUID string (simple, braced or URN form) and BSON UUID
/// binaries. Unparseable strings are kept as they are and fail validation.
#[derive(Debug, Clone)]
pub struct UuidType {
    base: FieldBase,
}

impl UuidType {
    /// Creates a UUID field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }

    /// Creates a UUID field whose absent values are filled with a random (v4) UUID.
    ///
    /// Any default in `options` is replaced.
    pub fn generated(name: impl Into<String>, options: FieldOptions) -> Self {
        let options = FieldOptions {
            default: Some(FieldDefault::producer(|| {
                Bson::String(Uuid::new_v4().hyphenated().to_string())
            })),
            ..options
        };
        Self::new(name, options)
    }
}

impl FieldType for UuidType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "UUID"
    }

    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        let value = self.base.cast(value);
        let parsed = match &value {
            Bson::String(s) => Uuid::parse_str(s.trim()).ok(),
            Bson::Binary(binary) if binary.subtype == BinarySubtype::Uuid => {
                Uuid::from_slice(&binary.bytes).ok()
            }
            _ => None,
        };

        parsed
            .map(|uuid| Bson::String(uuid.hyphenated().to_string()))
            .unwrap_or(value)
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) {
            return Ok(value);
        }

        match value {
            Bson::String(s) if Uuid::parse_str(s).is_ok() => Ok(value),
            _ => Err(ValidationError::new(format!(
                "`{}` is not a valid UUID",
                display(value)
            ))),
        }
    }
}
