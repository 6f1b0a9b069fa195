//! Convenience constructors for `SchemaError`.

use std::sync::Arc;

use super::SchemaError;
use crate::TypeName;

impl SchemaError {
    /// Construct an unknown-attributes error for `type_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attributable::SchemaError;
    /// let err = SchemaError::unknown_attributes("User".into(), vec!["password".into()]);
    /// assert_eq!(err.to_string(), "Unknown attributes: password");
    /// ```
    #[must_use]
    pub const fn unknown_attributes(type_name: TypeName, keys: Vec<String>) -> Self {
        Self::UnknownAttributes { type_name, keys }
    }

    /// Construct an invalid specialisation error wrapped in an [`Arc`].
    #[must_use]
    pub fn invalid_specialisation_arc(type_name: TypeName, target: TypeName) -> Arc<Self> {
        Arc::new(Self::InvalidSpecialisationTarget { type_name, target })
    }

    /// Construct a not-schema-bearing error wrapped in an [`Arc`].
    #[must_use]
    pub fn not_schema_bearing_arc(type_name: TypeName) -> Arc<Self> {
        Arc::new(Self::NotSchemaBearing { type_name })
    }

    /// Construct a cyclic composition error from the chain of visited types.
    ///
    /// The chain is rendered as `A -> B -> A`.
    #[must_use]
    pub fn cyclic_composition_arc<'a, I>(chain: I) -> Arc<Self>
    where
        I: IntoIterator<Item = &'a TypeName>,
    {
        let cycle = chain
            .into_iter()
            .map(TypeName::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        Arc::new(Self::CyclicComposition { cycle })
    }

    /// Returns the offending keys when this is an unknown-attributes error.
    #[must_use]
    pub fn unknown_keys(&self) -> Option<&[String]> {
        match self {
            Self::UnknownAttributes { keys, .. } => Some(keys),
            _ => None,
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        Self::ManifestParse {
            source: Box::new(err),
        }
    }
}
