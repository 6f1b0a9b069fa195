//! Steps that declare, describe, and specialise types.

use crate::fixtures::CompositionState;
use anyhow::{Result, anyhow};
use attributable::{SchemaRegistry, TypeDescriptor};
use rstest_bdd_macros::{given, when};
use serde_json::Value;

fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[given("type {type_name} declares attributes {names}")]
fn declare_attributes(registry: &SchemaRegistry, type_name: String, names: String) -> Result<()> {
    registry
        .declare(type_name, split_names(&names), Vec::<(String, Value)>::new())
        .map_err(|err| anyhow!(err))?;
    Ok(())
}

#[given("type {type_name} declares no attributes")]
fn declare_nothing(registry: &SchemaRegistry, type_name: String) -> Result<()> {
    registry
        .declare(type_name, Vec::<String>::new(), Vec::<(String, Value)>::new())
        .map_err(|err| anyhow!(err))?;
    Ok(())
}

#[given("type {type_name} declares the default {attribute} = {default}")]
fn declare_default(
    registry: &SchemaRegistry,
    type_name: String,
    attribute: String,
    default: String,
) -> Result<()> {
    let value: Value = serde_json::from_str(&default)?;
    registry
        .declare(type_name, Vec::<String>::new(), [(attribute, value)])
        .map_err(|err| anyhow!(err))?;
    Ok(())
}

#[given("type {type_name} extends {supertype}")]
fn describe_supertype(registry: &SchemaRegistry, type_name: String, supertype: String) -> Result<()> {
    registry
        .describe(TypeDescriptor::new(type_name).with_supertype(supertype))
        .map_err(|err| anyhow!(err))
}

#[given("type {type_name} mixes {traits}")]
fn describe_traits(registry: &SchemaRegistry, type_name: String, traits: String) -> Result<()> {
    let current = registry
        .descriptor(type_name.as_str())
        .unwrap_or_else(|| TypeDescriptor::new(type_name.as_str()));
    let described = split_names(&traits)
        .into_iter()
        .fold(current, TypeDescriptor::with_trait);
    registry.describe(described).map_err(|err| anyhow!(err))
}

#[given("type {type_name} specialises {target}")]
fn specialise(registry: &SchemaRegistry, type_name: String, target: String) -> Result<()> {
    registry
        .specialise(type_name, target)
        .map_err(|err| anyhow!(err))?;
    Ok(())
}

#[when("type {type_name} tries to specialise {target}")]
fn try_specialise(
    registry: &SchemaRegistry,
    composition_state: &CompositionState,
    type_name: String,
    target: String,
) {
    if let Err(err) = registry.specialise(type_name, target) {
        composition_state.error.set(err.to_string());
    }
}
