//! Composition of a type's effective schema from its layered sources.
//!
//! Sources are gathered as [`SchemaLayer`]s in precedence order, lowest
//! first, and folded with the right-biased [`Schema::merge`]:
//!
//! 1. mixed-in traits, first-mixed first;
//! 2. the supertype;
//! 3. the specialisation target;
//! 4. the type's own declarations.
//!
//! The local layer is always last, so declarations win over everything
//! inherited regardless of whether `declare` or `specialise` ran first.

use crate::{Schema, SchemaError, SchemaResult, TypeIntrospection, TypeName, sources};

/// Origin of a schema layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SchemaProvenance {
    /// Schema of a mixed-in trait.
    Trait,
    /// Schema of the direct supertype.
    Ancestor,
    /// Schema of an explicit specialisation target.
    Specialisation,
    /// The type's own declarations.
    Local,
}

/// One source contributing to an effective schema.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaLayer {
    provenance: SchemaProvenance,
    source: TypeName,
    schema: Schema,
}

impl SchemaLayer {
    /// Construct a layer contributed by the trait `source`.
    #[must_use]
    pub const fn mixin(source: TypeName, schema: Schema) -> Self {
        Self {
            provenance: SchemaProvenance::Trait,
            source,
            schema,
        }
    }

    /// Construct a layer contributed by the supertype `source`.
    #[must_use]
    pub const fn ancestor(source: TypeName, schema: Schema) -> Self {
        Self {
            provenance: SchemaProvenance::Ancestor,
            source,
            schema,
        }
    }

    /// Construct a layer contributed by the specialisation target `source`.
    #[must_use]
    pub const fn specialisation(source: TypeName, schema: Schema) -> Self {
        Self {
            provenance: SchemaProvenance::Specialisation,
            source,
            schema,
        }
    }

    /// Construct a layer holding the local declarations of `source`.
    #[must_use]
    pub const fn local(source: TypeName, schema: Schema) -> Self {
        Self {
            provenance: SchemaProvenance::Local,
            source,
            schema,
        }
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> SchemaProvenance {
        self.provenance
    }

    /// Type or trait that contributed the layer.
    #[must_use]
    pub const fn source(&self) -> &TypeName {
        &self.source
    }

    /// Schema carried by the layer.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Consume the layer, returning its schema.
    #[must_use]
    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

/// Fold `layers` in order into one schema; later layers win.
///
/// # Examples
///
/// ```
/// use attributable::{Schema, SchemaLayer, merge_layers};
/// use serde_json::json;
///
/// let layers = [
///     SchemaLayer::ancestor("User".into(), Schema::from_declaration(["id"], [("surname", json!("Bloggs"))])),
///     SchemaLayer::local("Admin".into(), Schema::from_declaration(["level"], [("surname", json!("Smith"))])),
/// ];
/// let schema = merge_layers(&layers);
/// let names: Vec<&str> = schema.names().collect();
/// assert_eq!(names, ["id", "surname", "level"]);
/// assert_eq!(schema.get("surname").and_then(|a| a.default_value()), Some(&json!("Smith")));
/// ```
#[must_use]
pub fn merge_layers(layers: &[SchemaLayer]) -> Schema {
    layers
        .iter()
        .fold(Schema::new(), |acc, layer| acc.merged(layer.schema()))
}

/// Registry view required to compose schemas.
pub(crate) trait SchemaCatalog: TypeIntrospection {
    /// Local declarations of `ty`, if it is registered.
    fn local_schema(&self, ty: &TypeName) -> Option<&Schema>;

    /// Recorded specialisation target of `ty`.
    fn specialisation(&self, ty: &TypeName) -> Option<&TypeName>;
}

/// Composes effective schemas against a catalog snapshot.
///
/// The composer tracks the chain of types being composed so that a type
/// reachable from its own sources is reported instead of recursing forever.
pub(crate) struct SchemaComposer<'a, C: ?Sized> {
    catalog: &'a C,
    in_progress: Vec<TypeName>,
}

impl<'a, C> SchemaComposer<'a, C>
where
    C: SchemaCatalog + ?Sized,
{
    pub(crate) const fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            in_progress: Vec::new(),
        }
    }

    pub(crate) const fn catalog(&self) -> &'a C {
        self.catalog
    }

    /// Effective schema of `ty`.
    pub(crate) fn compose(&mut self, ty: &TypeName) -> SchemaResult<Schema> {
        let layers = self.layers(ty)?;
        Ok(merge_layers(&layers))
    }

    /// Provenance-tagged sources of `ty`, lowest precedence first.
    pub(crate) fn layers(&mut self, ty: &TypeName) -> SchemaResult<Vec<SchemaLayer>> {
        if let Some(start) = self.in_progress.iter().position(|name| name == ty) {
            let chain = self.in_progress.iter().skip(start).chain(std::iter::once(ty));
            return Err(SchemaError::cyclic_composition_arc(chain));
        }
        self.in_progress.push(ty.clone());
        let layers = self.collect_layers(ty);
        self.in_progress.pop();
        layers
    }

    fn collect_layers(&mut self, ty: &TypeName) -> SchemaResult<Vec<SchemaLayer>> {
        let mut layers = Vec::new();
        for (name, schema) in sources::trait_schemas(self, ty)? {
            layers.push(SchemaLayer::mixin(name, schema));
        }
        if let Some((name, schema)) = sources::ancestor_schema(self, ty)? {
            layers.push(SchemaLayer::ancestor(name, schema));
        }
        if let Some(target) = self.catalog.specialisation(ty).cloned() {
            let schema = self.compose(&target)?;
            layers.push(SchemaLayer::specialisation(target, schema));
        }
        if let Some(local) = self.catalog.local_schema(ty) {
            layers.push(SchemaLayer::local(ty.clone(), local.clone()));
        }
        for layer in &layers {
            tracing::trace!(
                type_name = %ty,
                source = %layer.source(),
                provenance = ?layer.provenance(),
                attributes = layer.schema().len(),
                "collected schema layer"
            );
        }
        Ok(layers)
    }
}
