//! Steps that construct records and check their behaviour.

use crate::fixtures::CompositionState;
use anyhow::{Result, anyhow, ensure};
use attributable::{Record, SchemaRegistry};
use rstest_bdd_macros::{then, when};
use serde_json::Value;

fn construct_with(
    registry: &SchemaRegistry,
    type_name: &str,
    values: Vec<(String, Value)>,
) -> Result<Record> {
    registry
        .construct(type_name, values)
        .map_err(|err| anyhow!(err))
}

#[when("a {type_name} is constructed with {attribute} {value}")]
fn construct_one(
    registry: &SchemaRegistry,
    composition_state: &CompositionState,
    type_name: String,
    attribute: String,
    value: String,
) -> Result<()> {
    let parsed: Value = serde_json::from_str(&value)?;
    match registry.construct(type_name.as_str(), [(attribute, parsed)]) {
        Ok(record) => composition_state.record.set(record),
        Err(err) => composition_state.error.set(err.to_string()),
    }
    Ok(())
}

#[when("a {type_name} is constructed without values")]
fn construct_empty(
    registry: &SchemaRegistry,
    composition_state: &CompositionState,
    type_name: String,
) -> Result<()> {
    let record = construct_with(registry, &type_name, Vec::new())?;
    composition_state.record.set(record);
    Ok(())
}

#[when("two {type_name} records are constructed with {attribute} {value}")]
fn construct_pair(
    registry: &SchemaRegistry,
    composition_state: &CompositionState,
    type_name: String,
    attribute: String,
    value: String,
) -> Result<()> {
    let parsed: Value = serde_json::from_str(&value)?;
    let first = construct_with(registry, &type_name, vec![(attribute.clone(), parsed.clone())])?;
    let second = construct_with(registry, &type_name, vec![(attribute, parsed)])?;
    composition_state.record.set(first);
    composition_state.other.set(second);
    Ok(())
}

#[then("the record inspects as {expected}")]
fn record_inspects_as(composition_state: &CompositionState, expected: String) -> Result<()> {
    let inspected = composition_state
        .record
        .with_ref(Record::inspect)
        .ok_or_else(|| anyhow!("expected a record to be constructed"))?;
    ensure!(
        inspected == expected,
        "unexpected inspect {inspected}; expected {expected}"
    );
    Ok(())
}

#[then("the records are equal and hash alike")]
fn records_equal(composition_state: &CompositionState) -> Result<()> {
    let first = composition_state
        .record
        .get()
        .ok_or_else(|| anyhow!("expected a first record"))?;
    let second = composition_state
        .other
        .get()
        .ok_or_else(|| anyhow!("expected a second record"))?;
    ensure!(first == second, "records differ: {first} vs {second}");
    ensure!(first.hash_code() == second.hash_code(), "hashes differ");
    Ok(())
}

#[then("the operation fails with {message}")]
fn operation_fails(composition_state: &CompositionState, message: String) -> Result<()> {
    let error = composition_state
        .error
        .get()
        .ok_or_else(|| anyhow!("expected the operation to fail"))?;
    ensure!(
        error.contains(&message),
        "error {error:?} does not mention {message:?}"
    );
    Ok(())
}
