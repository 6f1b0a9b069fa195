//! Structured value types built from composable attribute schemas.
//!
//! A type declares a set of named attributes, optionally with defaults, and
//! receives a validating constructor, read-only accessors, structural
//! equality, a matching hash, and an `inspect` rendering. Schemas compose
//! from four sources: mixed-in traits, the supertype, an explicit
//! specialisation target, and the type's own declarations, which always win.
//!
//! ```rust
//! use attributable::SchemaRegistry;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::new();
//! let user = registry.declare("User", ["id", "forename"], [("surname", json!("Bloggs"))])?;
//!
//! let john = user.construct([("forename", json!("John"))])?;
//! assert_eq!(john.inspect(), r#"<User id=null, forename="John", surname="Bloggs">"#);
//! assert!(user.construct([("password", json!("x"))]).is_err());
//! # Ok::<_, std::sync::Arc<attributable::SchemaError>>(())
//! ```
//!
//! The companion `attributable_macros` crate provides
//! `#[derive(Attributable)]`, which declares a Rust type in the global
//! registry and generates typed accessors for it.

pub use attributable_macros::Attributable;

mod composer;
mod declaration;
mod descriptor;
mod error;
#[cfg(feature = "toml")]
pub mod manifest;
mod record;
mod record_type;
mod registry;
mod result_ext;
mod schema;
mod sources;

pub use composer::{SchemaLayer, SchemaProvenance, merge_layers};
pub use declaration::{Attributable, FromRecord, SchemaDeclaration};
pub use descriptor::{TypeDescriptor, TypeIntrospection, TypeName};
pub use error::SchemaError;
#[cfg(feature = "toml")]
pub use manifest::{SchemaManifest, TypeManifest, load_manifest};
pub use record::Record;
pub use record_type::RecordType;
pub use registry::SchemaRegistry;
pub use result_ext::{SchemaResult, SchemaResultExt};
pub use schema::{Attribute, Schema};

#[doc(hidden)]
pub use serde_json;
