//! Construction of field types by name.
//!
//! A schema layer typically reads field declarations from configuration. [`FieldSpec`] is the
//! serde representation of one declaration and [`FieldTypeRegistry`] maps its `type` to a
//! constructor, so the set of types stays open: registering a new kind is one call.
//!
//! ```ignore
//! use schemalayer::prelude::*;
//!
//! let registry = schemalayer::types::builtin_registry();
//! let spec = FieldSpec::from_json(serde_json::json!({
//!     "type": "number",
//!     "required": true,
//!     "default": 0
//! }))?;
//!
//! let field = registry.build("views", &spec)?;
//! assert_eq!(field.type_name(), "Number");
//! ```

use bson::Bson;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

use crate::{
    error::{FieldError, FieldResult},
    field::{FieldType, FieldTypeRef},
    options::{FieldDefault, FieldOptions},
};

/// Declarative description of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Registered type name, e.g. `"number"` or `"cuid"`. Matched case-insensitively.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether an absent value fails validation.
    #[serde(default)]
    pub required: bool,
    /// Literal default substituted for an absent value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Bson>,
}

impl FieldSpec {
    /// Creates an optional spec with no default.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            required: false,
            default: None,
        }
    }

    /// Decodes a spec from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpec`] if the value does not describe a field.
    pub fn from_json(value: serde_json::Value) -> FieldResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the [`FieldOptions`] described by this spec.
    pub fn options(&self) -> FieldOptions {
        FieldOptions::builder()
            .required(self.required)
            .with_default(self.default.clone().map(FieldDefault::Value))
            .build()
    }
}

/// Creates a field type from a field name and options.
pub type FieldTypeConstructor = Arc<dyn Fn(String, FieldOptions) -> FieldTypeRef + Send + Sync>;

/// Maps type names to field type constructors.
#[derive(Clone, Default)]
pub struct FieldTypeRegistry {
    constructors: HashMap<String, FieldTypeConstructor>,
}

impl FieldTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor under `type_name`, replacing any previous registration.
    pub fn register<F, T>(&mut self, type_name: &str, constructor: F) -> &mut Self
    where
        F: Fn(String, FieldOptions) -> T + Send + Sync + 'static,
        T: FieldType + 'static,
    {
        debug!(type_name, "registering field type");
        self.constructors.insert(
            type_name.to_ascii_lowercase(),
            Arc::new(move |name: String, options: FieldOptions| {
                Box::new(constructor(name, options)) as FieldTypeRef
            }),
        );
        self
    }

    /// Registers a constructor and returns the registry, for chained construction.
    pub fn with<F, T>(mut self, type_name: &str, constructor: F) -> Self
    where
        F: Fn(String, FieldOptions) -> T + Send + Sync + 'static,
        T: FieldType + 'static,
    {
        self.register(type_name, constructor);
        self
    }

    /// Returns `true` if a constructor is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(&type_name.to_ascii_lowercase())
    }

    /// Returns the registered type names in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names = self.constructors.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Builds the field `name` as described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownFieldType`] if `spec.type_name` is not registered.
    pub fn build(&self, name: impl Into<String>, spec: &FieldSpec) -> FieldResult<FieldTypeRef> {
        let constructor = self
            .constructors
            .get(&spec.type_name.to_ascii_lowercase())
            .ok_or_else(|| FieldError::UnknownFieldType(spec.type_name.clone()))?;

        Ok(constructor(name.into(), spec.options()))
    }

    /// Decodes a JSON spec and builds the field `name` from it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpec`] or [`FieldError::UnknownFieldType`].
    pub fn build_from_json(
        &self,
        name: impl Into<String>,
        spec: serde_json::Value,
    ) -> FieldResult<FieldTypeRef> {
        self.build(name, &FieldSpec::from_json(spec)?)
    }
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
