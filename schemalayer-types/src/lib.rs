//! Built-in field types for schemalayer.
//!
//! Each type implements [`FieldType`](schemalayer_core::field::FieldType) by embedding a
//! [`FieldBase`](schemalayer_core::field::FieldBase) and layering its own coercion, validation
//! and update operators on top.
//!
//! | type | canonical value | update operators |
//! |---|---|---|
//! | [`NumberType`] | `Int32`, `Int64`, `Double` | inc, dec, mul, div, mod, max, min |
//! | [`CuidType`] | CUID string | none |
//! | [`StringType`] | `String` | none |
//! | [`BooleanType`] | `Boolean` | none |
//! | [`DateType`] | `DateTime` | inc, dec (milliseconds) |
//! | [`UuidType`] | hyphenated UUID string | none |
//!
//! # Quick Start
//!
//! ```ignore
//! use schemalayer_core::{field::FieldType, options::FieldOptions};
//! use schemalayer_types::NumberType;
//! use bson::Bson;
//!
//! let price = NumberType::new("price", FieldOptions::required());
//!
//! let value = price.cast(Bson::String("9.5".into()), None);
//! assert!(price.validate(&value, None).is_ok());
//! ```

#[allow(unused_extern_crates)]
extern crate self as schemalayer_types;

pub mod boolean;
pub mod cuid;
pub mod date;
pub mod number;
pub mod string;
pub mod uuid;

use schemalayer_core::registry::FieldTypeRegistry;

pub use crate::{
    boolean::BooleanType, cuid::CuidType, date::DateType, number::NumberType,
    string::StringType, uuid::UuidType,
};

/// Returns a registry with every built-in type registered under its lowercase name.
pub fn builtin_registry() -> FieldTypeRegistry {
    FieldTypeRegistry::new()
        .with("number", |name, options| NumberType::new(name, options))
        .with("cuid", |name, options| CuidType::new(name, options))
        .with("string", |name, options| StringType::new(name, options))
        .with("boolean", |name, options| BooleanType::new(name, options))
        .with("date", |name, options| DateType::new(name, options))
        .with("uuid", |name, options| UuidType::new(name, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;
    use schemalayer_core::field::FieldType;
    use serde_json::json;

    #[test]
    fn test_builtin_registry_names() {
        assert_eq!(
            builtin_registry().type_names(),
            vec!["boolean", "cuid", "date", "number", "string", "uuid"]
        );
    }

    #[test]
    fn test_builtin_registry_builds_each_type() {
        let registry = builtin_registry();
        for (type_name, expected) in [
            ("number", "Number"),
            ("CUID", "CUID"),
            ("string", "String"),
            ("boolean", "Boolean"),
            ("date", "Date"),
            ("uuid", "UUID"),
        ] {
            let field = registry
                .build_from_json("field", json!({ "type": type_name }))
                .unwrap();
            assert_eq!(field.type_name(), expected);
        }
    }

    #[test]
    fn test_spec_default_flows_into_cast() {
        let field = builtin_registry()
            .build_from_json("views", json!({ "type": "number", "default": 3 }))
            .unwrap();
        let value = field.cast(Bson::Null, None);
        assert_eq!(schemalayer_core::value::as_f64(&value), Some(3.0));
    }
}
