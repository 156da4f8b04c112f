//! Error types and result types for field type operations.
//!
//! Two channels exist. [`ValidationError`] is the data channel: it is returned as a value from
//! [`FieldType::validate`](crate::field::FieldType::validate) so that a schema layer can collect
//! one error per field without aborting. [`FieldError`] is the structural channel for
//! misconfigured updates and field specs.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// A field value violated a type, format or presence rule.
///
/// The message is meant for humans and embeds the offending value or field name,
/// e.g. ``"`abc` is not a number!"`` or ``"`title` is required!"``.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Returns the human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Represents all structural errors that can occur when working with field types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A value failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// The update names an operator that the field's type does not register.
    #[error("Unsupported update operator `{operator}` for field `{field}` of type {type_name}")]
    UnsupportedOperator {
        /// The field the update was addressed to.
        field: String,
        /// The type name of the field, e.g. `"Number"`.
        type_name: &'static str,
        /// The operator name exactly as requested.
        operator: String,
    },
    /// No constructor is registered for the requested type name.
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),
    /// A field spec could not be decoded.
    #[error("Invalid field spec: {0}")]
    InvalidSpec(String),
}

/// A specialized `Result` type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A specialized `Result` type for structural field type operations.
pub type FieldResult<T> = Result<T, FieldError>;

impl From<SerdeJsonError> for FieldError {
    fn from(err: SerdeJsonError) -> Self {
        FieldError::InvalidSpec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_message() {
        let err = ValidationError::new("`foo` is not a valid CUID");
        assert_eq!(err.to_string(), "`foo` is not a valid CUID");
        assert_eq!(err.message(), "`foo` is not a valid CUID");
    }

    #[test]
    fn test_validation_error_converts_into_field_error() {
        let err: FieldError = ValidationError::new("`x` is not a number!").into();
        assert_eq!(err, FieldError::Validation(ValidationError::new("`x` is not a number!")));
    }

    #[test]
    fn test_unsupported_operator_message() {
        let err = FieldError::UnsupportedOperator {
            field: "id".into(),
            type_name: "CUID",
            operator: "inc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported update operator `inc` for field `id` of type CUID"
        );
    }

    #[test]
    fn test_serde_json_error_is_invalid_spec() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FieldError::from(err), FieldError::InvalidSpec(_)));
    }
}
