//! Type identity and the hierarchy metadata consumed during composition.
//!
//! The registry never reflects over Rust types. Every participating type or
//! trait is identified by a [`TypeName`], and its place in the hierarchy is
//! registered explicitly as a [`TypeDescriptor`].

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identity of a schema-bearing type or trait.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName(Arc<str>);

impl TypeName {
    /// Construct a type name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Hierarchy metadata for one type: its supertype and mixed-in traits.
///
/// # Examples
///
/// ```
/// use attributable::TypeDescriptor;
///
/// let descriptor = TypeDescriptor::new("Columnist")
///     .with_supertype("Person")
///     .with_trait("Author");
/// assert_eq!(descriptor.supertype().map(|t| t.as_str()), Some("Person"));
/// assert_eq!(descriptor.traits().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: TypeName,
    supertype: Option<TypeName>,
    traits: Vec<TypeName>,
}

impl TypeDescriptor {
    /// Describe a type with no supertype and no traits.
    #[must_use]
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            supertype: None,
            traits: Vec::new(),
        }
    }

    /// Set the direct supertype.
    #[must_use]
    pub fn with_supertype(mut self, supertype: impl Into<TypeName>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    /// Mix in a trait after any previously mixed traits.
    ///
    /// Mixing the same trait twice keeps its first position.
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<TypeName>) -> Self {
        let trait_name = name.into();
        if !self.traits.contains(&trait_name) {
            self.traits.push(trait_name);
        }
        self
    }

    /// Identity of the described type.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Direct supertype, if any.
    #[must_use]
    pub const fn supertype(&self) -> Option<&TypeName> {
        self.supertype.as_ref()
    }

    /// Traits in mixing order, first-mixed first.
    #[must_use]
    pub fn traits(&self) -> &[TypeName] {
        &self.traits
    }
}

/// Read-only view of the type hierarchy.
pub trait TypeIntrospection {
    /// Direct supertype of `ty`, if any.
    fn supertype(&self, ty: &TypeName) -> Option<TypeName>;

    /// Traits mixed into `ty`, first-mixed first.
    fn traits(&self, ty: &TypeName) -> Vec<TypeName>;
}
