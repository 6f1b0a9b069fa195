//! Path through which generated code reaches the runtime crate.
//!
//! Derived impls name `SchemaRegistry`, `Record`, and the re-exported
//! `serde_json` through this path. Crates that depend on `attributable`
//! under another name, or re-export it, set
//! `#[attributable(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// `::attributable` unless the struct names another path.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::attributable }, |path| quote! { #path })
}
