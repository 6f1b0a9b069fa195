//! Parsing utilities for the `Attributable` derive macro.

use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, LitStr, Member, Path, Visibility,
};

#[cfg(test)]
mod tests;

/// Struct-level attributes recognised by `#[derive(Attributable)]`.
#[derive(Default)]
pub(crate) struct StructAttrs {
    pub name: Option<String>,
    pub attributes: Vec<Ident>,
    pub defaults: Vec<(Ident, Expr)>,
    pub extends: Option<Path>,
    pub mixes: Vec<Path>,
    pub specialises: Option<Path>,
    pub custom_inspect: bool,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<Path>,
}

/// How the struct stores its record, which decides what is generated.
#[derive(Debug, PartialEq)]
pub(crate) enum Shape {
    /// Unit struct: a mixin trait schema with no values of its own.
    Mixin,
    /// Tuple struct whose single field is the record.
    Wrapper,
    /// Named struct with a field marked `#[attributable(record)]`.
    Embedded(Member),
}

pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub vis: Visibility,
    pub shape: Shape,
    pub attrs: StructAttrs,
}

impl ParsedInput {
    /// Registry name of the type.
    pub(crate) fn type_name(&self) -> String {
        self.attrs
            .name
            .clone()
            .unwrap_or_else(|| self.ident.unraw().to_string())
    }
}

/// Gathers the struct identifier, its shape, and its attribute metadata.
///
/// Invalid input is rejected eagerly so expansion can fail fast.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Attributable cannot be derived for generic types",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let shape = match &input.data {
        Data::Struct(data) => parse_shape(&data.fields, data.struct_token)?,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Attributable can only be derived for structs",
            ));
        }
    };
    Ok(ParsedInput {
        ident: input.ident.clone(),
        vis: input.vis.clone(),
        shape,
        attrs,
    })
}

fn parse_shape(fields: &Fields, struct_token: syn::token::Struct) -> syn::Result<Shape> {
    match fields {
        Fields::Unit => Ok(Shape::Mixin),
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => Ok(Shape::Wrapper),
        Fields::Named(named) => {
            let mut marked = None;
            for field in &named.named {
                if !is_record_field(&field.attrs)? {
                    continue;
                }
                if marked.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "only one field may be marked #[attributable(record)]",
                    ));
                }
                marked = field.ident.clone().map(Member::Named);
            }
            marked.map(Shape::Embedded).ok_or_else(|| {
                syn::Error::new_spanned(
                    struct_token,
                    "mark the field holding the record with #[attributable(record)]",
                )
            })
        }
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            struct_token,
            "Attributable tuple structs must wrap exactly one Record",
        )),
    }
}

fn is_record_field(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut record = false;
    parse_attributable(attrs, |meta| {
        if meta.path.is_ident("record") {
            record = true;
            Ok(())
        } else {
            Err(meta.error("unsupported field attribute; expected `record`"))
        }
    })?;
    Ok(record)
}

/// Iterate all `#[attributable(...)]` attributes once and apply a callback.
fn parse_attributable<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("attributable")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_attributable(attrs, |meta| apply_struct_meta(meta, &mut out))?;
    Ok(out)
}

fn apply_struct_meta(meta: &ParseNestedMeta, out: &mut StructAttrs) -> syn::Result<()> {
    let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
        return Err(meta.error("expected a simple attribute key"));
    };
    match key.as_str() {
        "name" => {
            out.name = Some(lit_str(meta, "name")?.value());
            Ok(())
        }
        "attributes" => meta.parse_nested_meta(|nested| {
            let ident = attribute_ident(&nested)?;
            out.attributes.push(ident);
            Ok(())
        }),
        "defaults" => meta.parse_nested_meta(|nested| {
            let ident = attribute_ident(&nested)?;
            let value = nested.value()?.parse::<Expr>()?;
            out.defaults.push((ident, value));
            Ok(())
        }),
        "extends" => {
            out.extends = Some(meta.value()?.parse::<Path>()?);
            Ok(())
        }
        "mixes" => meta.parse_nested_meta(|nested| {
            out.mixes.push(nested.path.clone());
            Ok(())
        }),
        "specialises" => {
            out.specialises = Some(meta.value()?.parse::<Path>()?);
            Ok(())
        }
        "custom_inspect" => {
            out.custom_inspect = true;
            Ok(())
        }
        "crate" => {
            out.crate_path = Some(lit_str(meta, "crate")?.parse::<Path>()?);
            Ok(())
        }
        other => Err(meta.error(format!("unknown attributable attribute `{other}`"))),
    }
}

fn attribute_ident(nested: &ParseNestedMeta) -> syn::Result<Ident> {
    nested
        .path
        .get_ident()
        .cloned()
        .ok_or_else(|| nested.error("attribute names must be identifiers"))
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}
