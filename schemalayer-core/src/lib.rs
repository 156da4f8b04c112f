//! The field type contract of a JSON document store's schema layer.
//!
//! This crate is the core of the schemalayer project and provides:
//!
//! - **Field type contract** ([`field`]) - The [`FieldType`](field::FieldType) trait and the shared [`FieldBase`](field::FieldBase)
//! - **Update operators** ([`update`]) - Enumerated partial-update operators and their dispatch signature
//! - **Field options** ([`options`]) - Required flags and literal or lazily produced defaults
//! - **Type registry** ([`registry`]) - Serde field specs and name-to-constructor lookup
//! - **Value helpers** ([`value`]) - Absence checks, numeric coercion and message rendering
//! - **Error handling** ([`error`]) - Validation errors and structural errors
//!
//! Concrete types live in `schemalayer-types`.
//!
//! # Example
//!
//! ```ignore
//! use schemalayer_core::{field::{FieldBase, FieldType}, options::FieldOptions};
//!
//! #[derive(Debug)]
//! pub struct AnyType {
//!     base: FieldBase,
//! }
//!
//! impl FieldType for AnyType {
//!     fn base(&self) -> &FieldBase {
//!         &self.base
//!     }
//!
//!     fn type_name(&self) -> &'static str {
//!         "Any"
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as schemalayer_core;

pub mod error;
pub mod field;
pub mod options;
pub mod registry;
pub mod update;
pub mod value;
