//! Tests for `#[attributable(...)]` parsing behaviour.

use anyhow::{Result, anyhow, ensure};
use quote::ToTokens;
use rstest::rstest;
use syn::{DeriveInput, Member, parse_quote};

use super::{Shape, parse_input};

#[rstest]
fn parses_struct_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[attributable(name = "Admin", attributes(id, forename))]
        #[attributable(defaults(surname = "Bloggs", articles = []))]
        #[attributable(extends = User, mixes(Author, Editor), specialises = Staff)]
        #[attributable(custom_inspect, crate = "my_alias")]
        struct SuperUser(Record);
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let attrs = &parsed.attrs;

    ensure!(parsed.type_name() == "Admin");
    ensure!(parsed.shape == Shape::Wrapper);
    let names: Vec<String> = attrs.attributes.iter().map(ToString::to_string).collect();
    ensure!(names == ["id", "forename"], "unexpected names {names:?}");
    let defaults: Vec<String> = attrs
        .defaults
        .iter()
        .map(|(name, expr)| format!("{name}={}", expr.to_token_stream()))
        .collect();
    ensure!(
        defaults == ["surname=\"Bloggs\"", "articles=[]"],
        "unexpected defaults {defaults:?}"
    );
    ensure!(attrs.extends.as_ref().is_some_and(|p| p.is_ident("User")));
    ensure!(attrs.mixes.len() == 2);
    ensure!(attrs.specialises.as_ref().is_some_and(|p| p.is_ident("Staff")));
    ensure!(attrs.custom_inspect);
    ensure!(attrs.crate_path.as_ref().is_some_and(|p| p.is_ident("my_alias")));
    Ok(())
}

#[rstest]
fn type_name_defaults_to_the_ident() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[attributable(attributes(id))]
        struct User(Record);
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.type_name() == "User");
    Ok(())
}

#[rstest]
fn unit_structs_are_mixins() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[attributable(defaults(articles = []))]
        struct Author;
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.shape == Shape::Mixin);
    Ok(())
}

#[rstest]
fn named_structs_use_the_marked_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[attributable(attributes(forename, surname))]
        struct Person {
            #[attributable(record)]
            inner: Record,
            fullname: String,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let expected: Member = parse_quote!(inner);
    ensure!(parsed.shape == Shape::Embedded(expected));
    Ok(())
}

#[rstest]
#[case::enumeration(parse_quote! { enum Bad { A } }, "only be derived for structs")]
#[case::generic(parse_quote! { struct Bad<T>(T); }, "generic types")]
#[case::pair(parse_quote! { struct Bad(Record, u8); }, "exactly one Record")]
#[case::unmarked(parse_quote! { struct Bad { inner: Record } }, "#[attributable(record)]")]
#[case::unknown_key(
    parse_quote! { #[attributable(colour = "red")] struct Bad(Record); },
    "unknown attributable attribute `colour`"
)]
#[case::non_string_name(
    parse_quote! { #[attributable(name = 5)] struct Bad(Record); },
    "name must be a string"
)]
fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) {
    let err = parse_input(&input).err().map(|err| err.to_string());
    assert!(
        err.as_deref().is_some_and(|text| text.contains(message)),
        "expected error containing {message:?}, got {err:?}"
    );
}
