//! Token generation for `#[derive(Attributable)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Ident, Member, Path};

use super::crate_path;
use super::parse::{ParsedInput, Shape};

/// Generate every implementation required by the parsed struct.
pub(crate) fn generate(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let declaration = generate_declaration(input, &krate);
    let accessor_trait = generate_accessor_trait(input, &krate);
    let record_member = match &input.shape {
        Shape::Mixin => {
            return quote! {
                #declaration
                #accessor_trait
            };
        }
        Shape::Wrapper => Member::Unnamed(0.into()),
        Shape::Embedded(member) => member.clone(),
    };
    let attributable = generate_attributable(&input.ident, &record_member, &krate);
    let accessors = generate_accessors(input, &krate);
    let inherited = generate_inherited_accessors(input);
    let identity = generate_identity(input, &krate);
    let constructor = if input.shape == Shape::Wrapper {
        generate_constructor(&input.ident, &krate)
    } else {
        quote! {}
    };
    quote! {
        #declaration
        #attributable
        #constructor
        #accessors
        #accessor_trait
        #inherited
        #identity
    }
}

/// `SchemaDeclaration` implementation: registry name, hierarchy, declare.
pub(crate) fn generate_declaration(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let attrs = &input.attrs;
    let type_name = input.type_name();

    let supertype = attrs.extends.iter().map(|path| {
        quote! { .with_supertype(<#path as #krate::SchemaDeclaration>::TYPE_NAME) }
    });
    let traits = attrs.mixes.iter().map(|path| {
        quote! { .with_trait(<#path as #krate::SchemaDeclaration>::TYPE_NAME) }
    });
    let dependencies = attrs
        .extends
        .iter()
        .chain(&attrs.mixes)
        .chain(&attrs.specialises)
        .map(|path| {
            quote! { <#path as #krate::SchemaDeclaration>::ensure_declared(registry)?; }
        });

    let names: Vec<String> = attrs.attributes.iter().map(attribute_name).collect();
    let names_len = names.len();
    let default_names = attrs.defaults.iter().map(|(name, _)| attribute_name(name));
    let default_values = attrs.defaults.iter().map(|(_, value)| value);
    let defaults_len = attrs.defaults.len();
    let specialise = attrs.specialises.as_ref().map(|path| {
        quote! {
            registry.specialise(
                Self::TYPE_NAME,
                <#path as #krate::SchemaDeclaration>::TYPE_NAME,
            )?;
        }
    });

    // A unit struct with nothing to declare is a plain type: described only,
    // so it never becomes schema-bearing on its own.
    let plain = input.shape == Shape::Mixin
        && names_len == 0
        && defaults_len == 0
        && specialise.is_none();
    if plain {
        return quote! {
            impl #krate::SchemaDeclaration for #ident {
                const TYPE_NAME: &'static str = #type_name;

                fn descriptor() -> #krate::TypeDescriptor {
                    #krate::TypeDescriptor::new(Self::TYPE_NAME)
                        #( #supertype )*
                        #( #traits )*
                }

                fn declare(registry: &#krate::SchemaRegistry) -> #krate::SchemaResult<()> {
                    #( #dependencies )*
                    registry.describe(Self::descriptor())
                }
            }
        };
    }

    quote! {
        impl #krate::SchemaDeclaration for #ident {
            const TYPE_NAME: &'static str = #type_name;

            fn descriptor() -> #krate::TypeDescriptor {
                #krate::TypeDescriptor::new(Self::TYPE_NAME)
                    #( #supertype )*
                    #( #traits )*
            }

            fn declare(registry: &#krate::SchemaRegistry) -> #krate::SchemaResult<()> {
                #( #dependencies )*
                registry.describe(Self::descriptor())?;
                let names: [&'static str; #names_len] = [#( #names ),*];
                let defaults: [(&'static str, #krate::serde_json::Value); #defaults_len] = [
                    #( (#default_names, #krate::serde_json::json!(#default_values)) ),*
                ];
                registry.declare(Self::TYPE_NAME, names, defaults)?;
                #specialise
                Ok(())
            }
        }
    }
}

fn generate_attributable(ident: &Ident, member: &Member, krate: &TokenStream) -> TokenStream {
    quote! {
        impl #krate::Attributable for #ident {
            fn record(&self) -> &#krate::Record {
                &self.#member
            }
        }
    }
}

fn generate_constructor(ident: &Ident, krate: &TokenStream) -> TokenStream {
    quote! {
        impl #krate::FromRecord for #ident {
            fn from_record(record: #krate::Record) -> Self {
                Self(record)
            }
        }

        impl #ident {
            /// Construct a value from attribute values using the global
            /// registry.
            ///
            /// # Errors
            ///
            /// Returns an error listing every supplied name that is not an
            /// attribute of this type.
            pub fn new<I, K>(values: I) -> #krate::SchemaResult<Self>
            where
                I: ::core::iter::IntoIterator<Item = (K, #krate::serde_json::Value)>,
                K: ::core::convert::Into<::std::string::String>,
            {
                <Self as #krate::FromRecord>::construct_in(
                    #krate::SchemaRegistry::global(),
                    values,
                )
            }
        }
    }
}

/// One read accessor per locally declared attribute.
pub(crate) fn generate_accessors(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let accessors = local_attributes(input).into_iter().map(|name| {
        let key = attribute_name(name);
        let doc = format!("Value of the `{key}` attribute.");
        quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #name(&self) -> &#krate::serde_json::Value {
                #krate::Attributable::record(self).value(#key)
            }
        }
    });
    quote! {
        impl #ident {
            #( #accessors )*
        }
    }
}

/// `<Ident>Attributes`: provided accessors for the attributes this type
/// declares, implemented by every type that extends, specialises, or mixes
/// it in.
pub(crate) fn generate_accessor_trait(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let vis = &input.vis;
    let trait_ident = accessor_trait_ident(&input.ident);
    let trait_doc = format!(
        "Accessors for the attributes `{}` declares, available on types built from it.",
        input.type_name()
    );
    let accessors = local_attributes(input).into_iter().map(|name| {
        let key = attribute_name(name);
        let doc = format!("Value of the `{key}` attribute.");
        quote! {
            #[doc = #doc]
            #[must_use]
            fn #name(&self) -> &#krate::serde_json::Value {
                #krate::Attributable::record(self).value(#key)
            }
        }
    });
    quote! {
        #[doc = #trait_doc]
        #vis trait #trait_ident: #krate::Attributable {
            #( #accessors )*
        }
    }
}

/// Implement the type's own accessor trait and those of every supertype,
/// specialisation target, and mixed-in trait.
///
/// Inherent accessors take precedence over trait methods, so a local
/// redeclaration of an inherited attribute resolves to the inherent one.
fn generate_inherited_accessors(input: &ParsedInput) -> TokenStream {
    let ident = &input.ident;
    let attrs = &input.attrs;
    let own = accessor_trait_ident(ident);
    let impls = attrs
        .mixes
        .iter()
        .chain(&attrs.extends)
        .chain(&attrs.specialises)
        .map(|path| {
            let trait_path = accessor_trait_path(path);
            quote! { impl #trait_path for #ident {} }
        });
    quote! {
        impl #own for #ident {}
        #( #impls )*
    }
}

fn local_attributes(input: &ParsedInput) -> Vec<&Ident> {
    let attrs = &input.attrs;
    let mut seen = Vec::new();
    for name in attrs
        .attributes
        .iter()
        .chain(attrs.defaults.iter().map(|(name, _)| name))
    {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

fn accessor_trait_ident(ident: &Ident) -> Ident {
    format_ident!("{}Attributes", ident.unraw(), span = ident.span())
}

/// `path::to::User` becomes `path::to::UserAttributes`.
pub(crate) fn accessor_trait_path(path: &Path) -> Path {
    let mut trait_path = path.clone();
    if let Some(last) = trait_path.segments.last_mut() {
        last.ident = accessor_trait_ident(&last.ident);
    }
    trait_path
}

fn generate_identity(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let display = if input.attrs.custom_inspect {
        quote! {}
    } else {
        quote! {
            impl ::core::fmt::Display for #ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::Display::fmt(#krate::Attributable::record(self), f)
                }
            }
        }
    };
    quote! {
        impl ::core::cmp::PartialEq for #ident {
            fn eq(&self, other: &Self) -> bool {
                #krate::Attributable::record(self) == #krate::Attributable::record(other)
            }
        }

        impl ::core::cmp::Eq for #ident {}

        impl ::core::hash::Hash for #ident {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(#krate::Attributable::record(self), state);
            }
        }

        #display
    }
}

fn attribute_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}
