//! Discovery of the schemas a type inherits from its supertype and traits.
//!
//! Both lookups return *effective* schemas: a supertype or trait is composed
//! in full before it contributes to the type being composed.

use std::collections::HashSet;

use crate::composer::{SchemaCatalog, SchemaComposer};
use crate::{Schema, SchemaResult, TypeName};

/// Whether `ty` has a registered schema or inherits one from a supertype.
///
/// The supertype walk stops at the first name seen twice, so a malformed
/// hierarchy cannot loop.
pub(crate) fn is_schema_bearing<C>(catalog: &C, ty: &TypeName) -> bool
where
    C: SchemaCatalog + ?Sized,
{
    let mut visited = HashSet::new();
    let mut current = Some(ty.clone());
    while let Some(name) = current {
        if catalog.local_schema(&name).is_some() {
            return true;
        }
        if !visited.insert(name.clone()) {
            return false;
        }
        current = catalog.supertype(&name);
    }
    false
}

/// Effective schema of the supertype of `ty`.
///
/// Returns `None` when `ty` has no supertype or the supertype is not
/// schema-bearing; callers treat that as an empty schema.
pub(crate) fn ancestor_schema<C>(
    composer: &mut SchemaComposer<'_, C>,
    ty: &TypeName,
) -> SchemaResult<Option<(TypeName, Schema)>>
where
    C: SchemaCatalog + ?Sized,
{
    let Some(supertype) = composer.catalog().supertype(ty) else {
        return Ok(None);
    };
    if !is_schema_bearing(composer.catalog(), &supertype) {
        return Ok(None);
    }
    let schema = composer.compose(&supertype)?;
    Ok(Some((supertype, schema)))
}

/// Effective schemas of the schema-bearing traits mixed into `ty`, in mixing
/// order.
pub(crate) fn trait_schemas<C>(
    composer: &mut SchemaComposer<'_, C>,
    ty: &TypeName,
) -> SchemaResult<Vec<(TypeName, Schema)>>
where
    C: SchemaCatalog + ?Sized,
{
    let mut schemas = Vec::new();
    for name in composer.catalog().traits(ty) {
        if !is_schema_bearing(composer.catalog(), &name) {
            continue;
        }
        let schema = composer.compose(&name)?;
        schemas.push((name, schema));
    }
    Ok(schemas)
}
