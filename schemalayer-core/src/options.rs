//! Per-field configuration: presence rules and default values.

use bson::Bson;
use std::{fmt, sync::Arc};

/// A zero-argument function producing a default value on demand.
pub type DefaultProducer = Arc<dyn Fn() -> Bson + Send + Sync>;

/// The default applied when a field is cast from an absent value.
///
/// A [`FieldDefault::Producer`] is invoked on every cast and never memoized, so it can
/// yield dynamic values such as the current time or a freshly generated identifier.
#[derive(Clone)]
pub enum FieldDefault {
    /// A literal value, cloned on every cast.
    Value(Bson),
    /// A deferred producer, invoked on every cast.
    Producer(DefaultProducer),
}

impl FieldDefault {
    /// Creates a default from a producer function.
    pub fn producer(f: impl Fn() -> Bson + Send + Sync + 'static) -> Self {
        FieldDefault::Producer(Arc::new(f))
    }

    /// Resolves the default to a concrete value.
    pub fn resolve(&self) -> Bson {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Configuration shared by every field type.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Whether an absent value fails validation.
    pub required: bool,
    /// The value substituted for an absent value at cast time.
    pub default: Option<FieldDefault>,
}

impl FieldOptions {
    /// Creates a new builder for constructing field options.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let options = FieldOptions::builder()
    ///     .required(true)
    ///     .default_value(0)
    ///     .build();
    /// ```
    pub fn builder() -> FieldOptionsBuilder {
        FieldOptionsBuilder::new()
    }

    /// Shorthand for options with only `required` set.
    pub fn required() -> Self {
        Self { required: true, default: None }
    }
}

/// Builder for constructing [`FieldOptions`] instances.
pub struct FieldOptionsBuilder {
    required: bool,
    default: Option<FieldDefault>,
}

impl FieldOptionsBuilder {
    /// Creates a new builder with `required = false` and no default.
    pub fn new() -> Self {
        Self { required: false, default: None }
    }

    /// Sets whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets a literal default value.
    pub fn default_value(mut self, value: impl Into<Bson>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Sets a default producer, evaluated lazily on every cast.
    pub fn default_with(mut self, f: impl Fn() -> Bson + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::producer(f));
        self
    }

    /// Sets the default from an already constructed [`FieldDefault`].
    pub fn with_default(mut self, default: Option<FieldDefault>) -> Self {
        self.default = default;
        self
    }

    /// Builds and returns the [`FieldOptions`].
    pub fn build(self) -> FieldOptions {
        FieldOptions {
            required: self.required,
            default: self.default,
        }
    }
}

impl Default for FieldOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn test_builder_defaults() {
        let options = FieldOptions::builder().build();
        assert!(!options.required);
        assert!(options.default.is_none());
    }

    #[test]
    fn test_literal_default_resolves_to_clone() {
        let options = FieldOptions::builder().default_value("guest").build();
        let default = options.default.expect("default configured");
        assert_eq!(default.resolve(), Bson::String("guest".into()));
        assert_eq!(default.resolve(), Bson::String("guest".into()));
    }

    #[test]
    fn test_producer_default_is_not_memoized() {
        let counter = Arc::new(AtomicI32::new(0));
        let c = counter.clone();
        let options = FieldOptions::builder()
            .default_with(move || Bson::Int32(c.fetch_add(1, Ordering::SeqCst)))
            .build();
        let default = options.default.expect("default configured");

        assert_eq!(default.resolve(), Bson::Int32(0));
        assert_eq!(default.resolve(), Bson::Int32(1));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_hides_producer() {
        let default = FieldDefault::producer(|| Bson::Null);
        assert_eq!(format!("{:?}", default), "Producer(..)");
    }
}
