//! Traits implemented by `#[derive(Attributable)]`.
//!
//! [`SchemaDeclaration`] ties a Rust type to a registry [`TypeName`] and knows
//! how to declare it. [`Attributable`] exposes the record behind a value, and
//! [`FromRecord`] lets the default constructor wrap a freshly built record.

use serde_json::Value;

use crate::{Record, SchemaRegistry, SchemaResult, TypeDescriptor, TypeName};

/// A Rust type (or unit-struct trait) with a schema in the registry.
pub trait SchemaDeclaration {
    /// Registry identity of the type.
    const TYPE_NAME: &'static str;

    /// Registry identity as a [`TypeName`].
    #[must_use]
    fn type_name() -> TypeName {
        TypeName::new(Self::TYPE_NAME)
    }

    /// Hierarchy metadata: supertype and mixed-in traits.
    fn descriptor() -> TypeDescriptor;

    /// Declare the type, and every type it depends on, in `registry`.
    ///
    /// # Errors
    ///
    /// Propagates registry errors such as an invalid specialisation target.
    fn declare(registry: &SchemaRegistry) -> SchemaResult<()>;

    /// Declare the type unless `registry` already knows it.
    ///
    /// # Errors
    ///
    /// As for [`SchemaDeclaration::declare`].
    fn ensure_declared(registry: &SchemaRegistry) -> SchemaResult<()> {
        if registry.is_declared(Self::TYPE_NAME) {
            Ok(())
        } else {
            Self::declare(registry)
        }
    }
}

/// A value backed by a [`Record`].
pub trait Attributable: SchemaDeclaration {
    /// The record holding this value's attributes.
    fn record(&self) -> &Record;

    /// Validate `values` and fill defaults using the global registry.
    ///
    /// Intended for hand-written constructors that compute extra state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::UnknownAttributes`] for keys outside the
    /// schema.
    fn initialize_attributes<I, K>(values: I) -> SchemaResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::initialize_attributes_in(SchemaRegistry::global(), values)
    }

    /// Validate `values` and fill defaults against the schema of this type
    /// in `registry`, composed at call time.
    ///
    /// # Errors
    ///
    /// As for [`Attributable::initialize_attributes`].
    fn initialize_attributes_in<I, K>(registry: &SchemaRegistry, values: I) -> SchemaResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::ensure_declared(registry)?;
        registry.initialize_attributes(Self::TYPE_NAME, values)
    }
}

/// A value that can be built directly from a validated record.
pub trait FromRecord: Attributable + Sized {
    /// Wrap `record`.
    fn from_record(record: Record) -> Self;

    /// Construct a value with the operations installed in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::UnknownAttributes`] for keys outside the
    /// schema.
    fn construct_in<I, K>(registry: &SchemaRegistry, values: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::ensure_declared(registry)?;
        registry
            .construct(Self::TYPE_NAME, values)
            .map(Self::from_record)
    }
}
