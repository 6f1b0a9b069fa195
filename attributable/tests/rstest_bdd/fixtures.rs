//! Shared fixtures for the behaviour scenarios.

use attributable::{Record, SchemaRegistry};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Outcomes recorded by `when` steps and checked by `then` steps.
#[derive(Debug, Default, ScenarioState)]
pub struct CompositionState {
    pub record: Slot<Record>,
    pub other: Slot<Record>,
    pub error: Slot<String>,
}

/// A fresh state for each scenario.
#[fixture]
pub fn composition_state() -> CompositionState {
    CompositionState::default()
}

/// An isolated registry so scenarios never observe each other's types.
#[fixture]
pub fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
}
