//! Unit tests for the synthesised constructor and accessors.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::RecordType;
use crate::{Schema, SchemaError};

#[fixture]
fn user() -> RecordType {
    RecordType::synthesise(
        "User".into(),
        Schema::from_declaration(["id", "forename"], [("surname", json!("Bloggs"))]),
    )
}

#[rstest]
fn accepts_every_attribute(user: RecordType) -> Result<()> {
    let record = user
        .construct([
            ("id", json!(1)),
            ("forename", json!("John")),
            ("surname", json!("Doe")),
        ])
        .map_err(|err| anyhow!(err))?;
    ensure!(record.value("id") == &json!(1));
    ensure!(record.value("forename") == &json!("John"));
    ensure!(record.value("surname") == &json!("Doe"));
    Ok(())
}

#[rstest]
#[case::defaults_only(vec![("forename", json!("John"))], Value::Null, json!("John"), json!("Bloggs"))]
#[case::bare_names_null(vec![("surname", json!("Doe"))], Value::Null, Value::Null, json!("Doe"))]
#[case::empty(Vec::new(), Value::Null, Value::Null, json!("Bloggs"))]
fn fills_missing_attributes(
    user: RecordType,
    #[case] values: Vec<(&str, Value)>,
    #[case] id: Value,
    #[case] forename: Value,
    #[case] surname: Value,
) -> Result<()> {
    let record = user.construct(values).map_err(|err| anyhow!(err))?;
    ensure!(record.value("id") == &id);
    ensure!(record.value("forename") == &forename);
    ensure!(record.value("surname") == &surname);
    Ok(())
}

#[rstest]
fn keeps_schema_order_whatever_the_supplied_order(user: RecordType) -> Result<()> {
    let record = user
        .construct([("surname", json!("Doe")), ("id", json!(7))])
        .map_err(|err| anyhow!(err))?;
    let names: Vec<&str> = record.names().collect();
    ensure!(names == ["id", "forename", "surname"], "unexpected order {names:?}");
    Ok(())
}

#[rstest]
fn rejects_unknown_keys_in_supplied_order(user: RecordType) {
    let err = user
        .construct([
            ("password", json!("x")),
            ("id", json!(1)),
            ("email", json!("a@b")),
        ])
        .err();
    match err.as_deref() {
        Some(SchemaError::UnknownAttributes { type_name, keys }) => {
            assert_eq!(type_name.as_str(), "User");
            assert_eq!(keys, &["password", "email"]);
        }
        other => panic!("expected unknown attributes error, got {other:?}"),
    }
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("Unknown attributes: password, email")
    );
}

#[rstest]
fn exposes_one_accessor_per_attribute(user: RecordType) {
    let names: Vec<&str> = user.accessor_names().collect();
    assert_eq!(names, ["id", "forename", "surname"]);
    assert!(user.has_accessor("surname"));
    assert!(!user.has_accessor("address"));
}
