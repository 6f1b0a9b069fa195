//! Error types produced while declaring schemas and constructing records.

mod constructors;
mod types;

pub use types::SchemaError;
