//! Ordered attribute schemas and their right-biased merge.

use serde_json::Value;

/// One attribute of a schema: a name and an optional default.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    default: Option<Value>,
}

impl Attribute {
    /// An attribute declared without a default.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// An attribute declared with `default`.
    #[must_use]
    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a default was declared.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Declared default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Value used when construction supplies nothing for this attribute.
    ///
    /// Attributes without a default resolve to `null`.
    #[must_use]
    pub fn resolved_default(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }
}

/// Ordered mapping from attribute name to default value.
///
/// Names are unique. Order reflects declaration and composition order and
/// only matters for rendering.
///
/// # Examples
///
/// ```
/// use attributable::{Attribute, Schema};
/// use serde_json::json;
///
/// let mut schema = Schema::from_declaration(["id", "forename"], [("surname", json!("Bloggs"))]);
/// schema.merge(&Schema::from_names(["surname"]));
///
/// let names: Vec<&str> = schema.names().collect();
/// assert_eq!(names, ["id", "forename", "surname"]);
/// assert!(!schema.get("surname").is_some_and(Attribute::has_default));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Build a schema from one declaration call.
    ///
    /// Bare names come first; a defaulted name that repeats a bare name keeps
    /// the bare name's position and takes the default.
    #[must_use]
    pub fn from_declaration<N, S, D, K>(names: N, defaults: D) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut schema = Self::new();
        for name in names {
            schema.insert(Attribute::bare(name));
        }
        for (name, default) in defaults {
            schema.insert(Attribute::with_default(name, default));
        }
        schema
    }

    /// Build a schema of attributes declared without defaults.
    #[must_use]
    pub fn from_names<N, S>(names: N) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Attribute::bare).collect()
    }

    /// Insert `attribute`, replacing the default of an existing name in place.
    pub fn insert(&mut self, attribute: Attribute) {
        match self.position(&attribute.name) {
            Some(index) => {
                if let Some(existing) = self.attributes.get_mut(index) {
                    *existing = attribute;
                }
            }
            None => self.attributes.push(attribute),
        }
    }

    /// Overlay `other` onto `self`; `other` wins on conflicting names.
    ///
    /// Existing names keep their position, new names are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: &Self) {
        for attribute in &other.attributes {
            self.insert(attribute.clone());
        }
    }

    /// Consume `self`, returning it merged with `other`.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Whether `name` is part of the schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Attribute names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(Attribute::name)
    }

    /// Attributes in schema order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the schema has no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name == name)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl FromIterator<Attribute> for Schema {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut schema = Self::new();
        for attribute in iter {
            schema.insert(attribute);
        }
        schema
    }
}
