//! Schema declarations loaded from TOML manifests.
//!
//! A manifest lists types in `[[types]]` tables:
//!
//! ```toml
//! [[types]]
//! name = "User"
//! attributes = ["id", "forename"]
//! defaults = { surname = "Bloggs" }
//!
//! [[types]]
//! name = "SuperUser"
//! specialises = "User"
//! attributes = ["password"]
//! defaults = { active = true }
//! ```
//!
//! Applying a manifest describes every type first, then declares them in
//! document order, so a specialisation target must appear before the types
//! that specialise it.

use std::sync::Arc;

use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    RecordType, SchemaError, SchemaRegistry, SchemaResult, SchemaResultExt, TypeDescriptor,
};

/// Parsed manifest document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaManifest {
    /// Types in document order.
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

/// Declaration of one type or trait.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeManifest {
    /// Registry identity.
    pub name: String,
    /// Direct supertype.
    #[serde(default)]
    pub extends: Option<String>,
    /// Mixed-in traits, first-mixed first.
    #[serde(default)]
    pub mixes: Vec<String>,
    /// Specialisation target.
    #[serde(default)]
    pub specialises: Option<String>,
    /// Attributes declared without defaults.
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Attributes declared with defaults.
    #[serde(default)]
    pub defaults: Map<String, Value>,
}

impl TypeManifest {
    /// Hierarchy metadata described by this entry.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new(self.name.as_str());
        if let Some(supertype) = &self.extends {
            descriptor = descriptor.with_supertype(supertype.as_str());
        }
        self.mixes
            .iter()
            .fold(descriptor, |acc, name| acc.with_trait(name.as_str()))
    }
}

impl SchemaManifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ManifestParse`] for malformed documents or
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        toml::from_str(text).into_schema()
    }

    /// Describe and declare every type in `registry`.
    ///
    /// Returns the operations installed for each type, in document order.
    ///
    /// # Errors
    ///
    /// Stops at the first registry error, e.g. a specialisation target that
    /// has not been declared yet. Types applied before the failure stay
    /// declared.
    pub fn apply(&self, registry: &SchemaRegistry) -> SchemaResult<Vec<Arc<RecordType>>> {
        for entry in &self.types {
            registry.describe(entry.descriptor())?;
        }
        let mut installed = Vec::with_capacity(self.types.len());
        for entry in &self.types {
            let mut record_type = registry.declare(
                entry.name.as_str(),
                entry.attributes.iter().cloned(),
                entry.defaults.clone(),
            )?;
            if let Some(target) = &entry.specialises {
                record_type = registry.specialise(entry.name.as_str(), target.as_str())?;
            }
            installed.push(record_type);
        }
        tracing::debug!(types = installed.len(), "applied schema manifest");
        Ok(installed)
    }
}

/// Read and parse the manifest at `path`.
///
/// # Errors
///
/// Returns [`SchemaError::Manifest`] when the file cannot be read and
/// [`SchemaError::ManifestParse`] when it is malformed.
pub fn load_manifest(path: &Utf8Path) -> SchemaResult<SchemaManifest> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        Arc::new(SchemaError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    })?;
    SchemaManifest::from_toml_str(&text)
}
