//! Procedural macros for `attributable`.
//!
//! `#[derive(Attributable)]` turns a struct into a structured value type
//! backed by the `attributable` schema registry. The struct's shape selects
//! what is generated:
//!
//! - a unit struct declares a mixin trait schema only;
//! - a tuple struct wrapping `Record` gains a `new` constructor, accessors,
//!   equality, hashing, and `Display`;
//! - a named struct with a `#[attributable(record)]` field gains the same
//!   minus `new`, so its author can write a constructor that calls
//!   `initialize_attributes`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `attributable::Attributable`.
///
/// Recognised struct attributes inside `#[attributable(...)]`:
///
/// - `name = "..."` overrides the registry name (defaults to the ident);
/// - `attributes(a, b)` declares attributes without defaults;
/// - `defaults(a = <expr>, ...)` declares attributes with defaults, each
///   expression passed through `serde_json::json!`;
/// - `extends = Type` and `mixes(Trait, ...)` describe the hierarchy;
/// - `specialises = Type` records a specialisation target;
/// - `custom_inspect` skips the generated `Display` implementation;
/// - `crate = "path"` overrides the path used to reach `attributable`.
#[proc_macro_derive(Attributable, attributes(attributable))]
pub fn derive_attributable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
