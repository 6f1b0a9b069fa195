//! Operations synthesised for a type from its effective schema.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{Record, Schema, SchemaError, SchemaResult, TypeName};

/// The constructor, accessors, and identity installed for one type.
///
/// A `RecordType` captures the effective schema at the moment it was
/// synthesised. Later declarations install a fresh `RecordType`; existing
/// handles keep constructing against their snapshot.
///
/// # Examples
///
/// ```
/// use attributable::{RecordType, Schema};
/// use serde_json::json;
///
/// let user = RecordType::synthesise(
///     "User".into(),
///     Schema::from_declaration(["id", "forename"], [("surname", json!("Bloggs"))]),
/// );
/// let john = user.construct([("forename", json!("John"))])?;
/// assert_eq!(john.value("id"), &json!(null));
/// assert_eq!(john.value("surname"), &json!("Bloggs"));
/// # Ok::<_, std::sync::Arc<attributable::SchemaError>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RecordType {
    type_name: TypeName,
    schema: Arc<Schema>,
}

impl RecordType {
    /// Synthesise the operations for `type_name` from `schema`.
    #[must_use]
    pub fn synthesise(type_name: TypeName, schema: Schema) -> Self {
        Self {
            type_name,
            schema: Arc::new(schema),
        }
    }

    /// Concrete type constructed by this record type.
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Effective schema the operations were synthesised from.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Names of the generated read accessors, in schema order.
    pub fn accessor_names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Whether a read accessor exists for `name`.
    #[must_use]
    pub fn has_accessor(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// Validate `values` and build a record with defaults filled in.
    ///
    /// Supplied values override schema defaults; attributes without a default
    /// that are not supplied are `null`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownAttributes`] listing every supplied key
    /// that is not part of the schema, in the order supplied. No record is
    /// produced in that case.
    pub fn construct<I, K>(&self, values: I) -> SchemaResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let supplied: Map<String, Value> = values
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        let unknown: Vec<String> = supplied
            .keys()
            .filter(|name| !self.schema.contains(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(Arc::new(SchemaError::unknown_attributes(
                self.type_name.clone(),
                unknown,
            )));
        }

        let mut attributes: Map<String, Value> = self
            .schema
            .iter()
            .map(|attribute| (attribute.name().to_owned(), attribute.resolved_default()))
            .collect();
        for (name, value) in supplied {
            attributes.insert(name, value);
        }
        Ok(Record::new(self.type_name.clone(), attributes))
    }
}

#[cfg(test)]
mod tests;
