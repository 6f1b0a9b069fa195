//! Process-local storage of per-type schemas and installed operations.
//!
//! Every declaration-time call on [`SchemaRegistry`] recomposes the affected
//! type and installs a fresh [`RecordType`]. Calls are transactional: when
//! recomposition fails the type's previous entry is restored, and entries of
//! other types are never touched.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::composer::{SchemaCatalog, SchemaComposer};
use crate::{
    Record, RecordType, Schema, SchemaError, SchemaLayer, SchemaResult, TypeDescriptor,
    TypeIntrospection, TypeName, sources,
};

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::default);

/// Registry of schema-bearing types.
///
/// # Examples
///
/// ```
/// use attributable::SchemaRegistry;
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.declare("User", ["id", "forename"], [("surname", json!("Bloggs"))])?;
/// registry.declare("SuperUser", ["password"], [("active", json!(true))])?;
/// registry.specialise("SuperUser", "User")?;
///
/// let bob = registry.construct("SuperUser", [("forename", json!("Bob")), ("active", json!(false))])?;
/// assert_eq!(bob.value("surname"), &json!("Bloggs"));
/// assert_eq!(bob.value("active"), &json!(false));
/// # Ok::<_, std::sync::Arc<attributable::SchemaError>>(())
/// ```
#[derive(Default)]
pub struct SchemaRegistry {
    state: RwLock<RegistryState>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by derived types.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Register or replace the hierarchy metadata of a type.
    ///
    /// A type that already carries a schema is recomposed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CyclicComposition`] when the new hierarchy makes
    /// the type one of its own sources; the previous descriptor is kept.
    pub fn describe(&self, descriptor: TypeDescriptor) -> SchemaResult<()> {
        let type_name = descriptor.name().clone();
        let mut state = self.state.write();
        let previous = state.descriptors.insert(type_name.clone(), descriptor);
        let Some(entry) = state.entries.get(&type_name).cloned() else {
            return Ok(());
        };
        if let Err(err) = state.install(&type_name, entry) {
            state.descriptors.remove(&type_name);
            state
                .descriptors
                .extend(previous.map(|descriptor| (type_name, descriptor)));
            return Err(err);
        }
        Ok(())
    }

    /// Add attributes to the local schema of `type_name`.
    ///
    /// `names` are declared without defaults and `defaults` with them. Calls
    /// are cumulative; a name repeated in a later call takes that call's
    /// default. Returns the operations installed for the new effective
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CyclicComposition`] when the type's sources
    /// refer back to it; the declaration is discarded.
    pub fn declare<N, S, D, K>(
        &self,
        type_name: impl Into<TypeName>,
        names: N,
        defaults: D,
    ) -> SchemaResult<Arc<RecordType>>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let ty = type_name.into();
        let declared = Schema::from_declaration(names, defaults);
        let mut state = self.state.write();
        let mut entry = state.entries.get(&ty).cloned().unwrap_or_default();
        entry.local.merge(&declared);
        state.install(&ty, entry)
    }

    /// Record that `type_name` specialises `target`.
    ///
    /// Calling again with the same target is a no-op apart from
    /// reinstalling operations; a different target replaces the previous
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSpecialisationTarget`] immediately when
    /// `target` is not schema-bearing, and
    /// [`SchemaError::CyclicComposition`] when the specialisation would make
    /// the type one of its own sources. The registry is unchanged in both
    /// cases.
    pub fn specialise(
        &self,
        type_name: impl Into<TypeName>,
        target: impl Into<TypeName>,
    ) -> SchemaResult<Arc<RecordType>> {
        let ty = type_name.into();
        let target_name = target.into();
        let mut state = self.state.write();
        if !sources::is_schema_bearing(&*state, &target_name) {
            return Err(SchemaError::invalid_specialisation_arc(ty, target_name));
        }
        let mut entry = state.entries.get(&ty).cloned().unwrap_or_default();
        if let Some(previous) = entry
            .specialises
            .replace(target_name.clone())
            .filter(|previous| *previous != target_name)
        {
            tracing::warn!(
                type_name = %ty,
                previous = %previous,
                target = %target_name,
                "replacing specialisation target"
            );
        }
        state.install(&ty, entry)
    }

    /// Whether `type_name` has a schema of its own or inherits one.
    #[must_use]
    pub fn is_schema_bearing(&self, type_name: impl Into<TypeName>) -> bool {
        let state = self.state.read();
        sources::is_schema_bearing(&*state, &type_name.into())
    }

    /// Whether `type_name` has been declared or specialised directly.
    #[must_use]
    pub fn is_declared(&self, type_name: impl Into<TypeName>) -> bool {
        self.state.read().entries.contains_key(&type_name.into())
    }

    /// Registered hierarchy metadata of `type_name`.
    #[must_use]
    pub fn descriptor(&self, type_name: impl Into<TypeName>) -> Option<TypeDescriptor> {
        self.state.read().descriptors.get(&type_name.into()).cloned()
    }

    /// Local declarations of `type_name`.
    #[must_use]
    pub fn local_schema(&self, type_name: impl Into<TypeName>) -> Option<Schema> {
        self.state
            .read()
            .entries
            .get(&type_name.into())
            .map(|entry| entry.local.clone())
    }

    /// Recorded specialisation target of `type_name`.
    #[must_use]
    pub fn specialisation(&self, type_name: impl Into<TypeName>) -> Option<TypeName> {
        self.state
            .read()
            .entries
            .get(&type_name.into())
            .and_then(|entry| entry.specialises.clone())
    }

    /// Effective schema of the supertype of `type_name`, or an empty schema
    /// when the supertype is missing or not schema-bearing.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CyclicComposition`] when the supertype cannot
    /// be composed.
    pub fn ancestor_schema(&self, type_name: impl Into<TypeName>) -> SchemaResult<Schema> {
        let state = self.state.read();
        let mut composer = SchemaComposer::new(&*state);
        let ancestor = sources::ancestor_schema(&mut composer, &type_name.into())?;
        Ok(ancestor.map(|(_, schema)| schema).unwrap_or_default())
    }

    /// Effective schemas of the schema-bearing traits mixed into
    /// `type_name`, first-mixed first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CyclicComposition`] when a trait cannot be
    /// composed.
    pub fn trait_schemas(
        &self,
        type_name: impl Into<TypeName>,
    ) -> SchemaResult<Vec<(TypeName, Schema)>> {
        let state = self.state.read();
        let mut composer = SchemaComposer::new(&*state);
        sources::trait_schemas(&mut composer, &type_name.into())
    }

    /// Effective schema of `type_name` composed from the current registry
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotSchemaBearing`] for unknown types and
    /// [`SchemaError::CyclicComposition`] when composition loops.
    pub fn effective_schema(&self, type_name: impl Into<TypeName>) -> SchemaResult<Schema> {
        let ty = type_name.into();
        let state = self.state.read();
        state.ensure_schema_bearing(&ty)?;
        SchemaComposer::new(&*state).compose(&ty)
    }

    /// Provenance-tagged sources of `type_name`, lowest precedence first.
    ///
    /// # Errors
    ///
    /// As for [`SchemaRegistry::effective_schema`].
    pub fn composition_layers(
        &self,
        type_name: impl Into<TypeName>,
    ) -> SchemaResult<Vec<SchemaLayer>> {
        let ty = type_name.into();
        let state = self.state.read();
        state.ensure_schema_bearing(&ty)?;
        SchemaComposer::new(&*state).layers(&ty)
    }

    /// Operations installed for `type_name` by its latest declaration.
    ///
    /// A type that never declared attributes but inherits a schema from its
    /// supertype gets operations synthesised from the current registry
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotSchemaBearing`] for unknown types and
    /// [`SchemaError::CyclicComposition`] when composition loops.
    pub fn record_type(&self, type_name: impl Into<TypeName>) -> SchemaResult<Arc<RecordType>> {
        let ty = type_name.into();
        let state = self.state.read();
        if let Some(installed) = state
            .entries
            .get(&ty)
            .and_then(|entry| entry.installed.clone())
        {
            return Ok(installed);
        }
        state.ensure_schema_bearing(&ty)?;
        let schema = SchemaComposer::new(&*state).compose(&ty)?;
        Ok(Arc::new(RecordType::synthesise(ty, schema)))
    }

    /// Construct a record of `type_name` with its installed constructor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownAttributes`] for keys outside the
    /// schema, plus the errors of [`SchemaRegistry::record_type`].
    pub fn construct<I, K>(&self, type_name: impl Into<TypeName>, values: I) -> SchemaResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.record_type(type_name)?.construct(values)
    }

    /// Validate `values` and fill defaults against the schema of
    /// `type_name` as composed right now.
    ///
    /// Custom constructors call this instead of the installed constructor so
    /// they can compute derived state before or after validation.
    ///
    /// # Errors
    ///
    /// As for [`SchemaRegistry::construct`].
    pub fn initialize_attributes<I, K>(
        &self,
        type_name: impl Into<TypeName>,
        values: I,
    ) -> SchemaResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let ty = type_name.into();
        let schema = self.effective_schema(ty.clone())?;
        RecordType::synthesise(ty, schema).construct(values)
    }
}

#[derive(Default)]
struct RegistryState {
    descriptors: HashMap<TypeName, TypeDescriptor>,
    entries: HashMap<TypeName, SchemaEntry>,
}

#[derive(Clone, Default)]
struct SchemaEntry {
    local: Schema,
    specialises: Option<TypeName>,
    installed: Option<Arc<RecordType>>,
}

impl RegistryState {
    fn ensure_schema_bearing(&self, ty: &TypeName) -> SchemaResult<()> {
        if sources::is_schema_bearing(self, ty) {
            Ok(())
        } else {
            Err(SchemaError::not_schema_bearing_arc(ty.clone()))
        }
    }

    /// Store `entry` for `ty`, recompose, and install the new operations.
    ///
    /// Restores the previous entry when composition fails.
    fn install(&mut self, ty: &TypeName, entry: SchemaEntry) -> SchemaResult<Arc<RecordType>> {
        let previous = self.entries.insert(ty.clone(), entry);
        let composed = SchemaComposer::new(&*self).compose(ty);
        let schema = match composed {
            Ok(schema) => schema,
            Err(err) => {
                self.entries.remove(ty);
                self.entries
                    .extend(previous.map(|previous_entry| (ty.clone(), previous_entry)));
                return Err(err);
            }
        };
        let record_type = Arc::new(RecordType::synthesise(ty.clone(), schema));
        if let Some(current) = self.entries.get_mut(ty) {
            current.installed = Some(Arc::clone(&record_type));
        }
        tracing::debug!(
            type_name = %ty,
            attributes = record_type.schema().len(),
            "installed record operations"
        );
        Ok(record_type)
    }
}

impl TypeIntrospection for RegistryState {
    fn supertype(&self, ty: &TypeName) -> Option<TypeName> {
        self.descriptors
            .get(ty)
            .and_then(|descriptor| descriptor.supertype().cloned())
    }

    fn traits(&self, ty: &TypeName) -> Vec<TypeName> {
        self.descriptors
            .get(ty)
            .map(|descriptor| descriptor.traits().to_vec())
            .unwrap_or_default()
    }
}

impl SchemaCatalog for RegistryState {
    fn local_schema(&self, ty: &TypeName) -> Option<&Schema> {
        self.entries.get(ty).map(|entry| &entry.local)
    }

    fn specialisation(&self, ty: &TypeName) -> Option<&TypeName> {
        self.entries
            .get(ty)
            .and_then(|entry| entry.specialises.as_ref())
    }
}
