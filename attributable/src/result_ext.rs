//! Extensions for mapping errors to `SchemaResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(SchemaError::…(e)))`
//! patterns when converting external error types into the crate's
//! `SchemaResult<T>` alias (`Result<T, Arc<SchemaError>>`).
//!
//! # Examples
//!
//! ```
//! use attributable::{SchemaError, SchemaResult, SchemaResultExt};
//!
//! fn reject() -> SchemaResult<()> {
//!     Err(SchemaError::unknown_attributes("User".into(), vec!["x".into()])).into_schema()
//! }
//! assert!(reject().is_err());
//! ```

use std::sync::Arc;

use crate::SchemaError;

/// Result alias used throughout the crate.
pub type SchemaResult<T> = Result<T, Arc<SchemaError>>;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<SchemaError>`
/// into a `SchemaResult<T>`.
pub trait SchemaResultExt<T, E> {
    /// Convert `Result<T, E>` into `SchemaResult<T>` using `Into<SchemaError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<SchemaError>`.
    fn into_schema(self) -> SchemaResult<T>;
}

impl<T, E> SchemaResultExt<T, E> for Result<T, E>
where
    E: Into<SchemaError>,
{
    fn into_schema(self) -> SchemaResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
