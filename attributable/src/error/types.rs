//! Primary error enum for schema declaration and record construction.

use thiserror::Error;

use crate::TypeName;

/// Errors raised by the schema registry and the synthesised constructors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Values were supplied for names that are not part of the schema.
    #[error("Unknown attributes: {}", .keys.join(", "))]
    UnknownAttributes {
        /// Type whose constructor rejected the values.
        type_name: TypeName,
        /// Offending keys in the order the caller supplied them.
        keys: Vec<String>,
    },

    /// `specialise` was called with a target that declares no attributes.
    #[error(
        "specialisation requires a type that declares attributes: \
         '{type_name}' cannot specialise '{target}'"
    )]
    InvalidSpecialisationTarget {
        /// Type that attempted the specialisation.
        type_name: TypeName,
        /// Target lacking a registered schema.
        target: TypeName,
    },

    /// Records were requested for a type without any schema.
    #[error("'{type_name}' does not declare attributes")]
    NotSchemaBearing {
        /// Type that was looked up.
        type_name: TypeName,
    },

    /// Schema sources refer back to the type being composed.
    #[error("cyclic schema composition detected: {cycle}")]
    CyclicComposition {
        /// Chain of types participating in the cycle.
        cycle: String,
    },

    /// Error reading a schema manifest from disk.
    #[error("Schema manifest error in '{path}': {source}")]
    Manifest {
        /// Path of the manifest that failed to load.
        path: camino::Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a schema manifest document.
    #[error("Failed to parse schema manifest: {source}")]
    ManifestParse {
        /// Underlying parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
