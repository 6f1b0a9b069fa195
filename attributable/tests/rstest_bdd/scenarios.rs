//! Binds the feature files to the step registry.

use crate::fixtures::{CompositionState, composition_state, registry};
use attributable::SchemaRegistry;
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/schema_composition.feature",
    fixtures = [registry: SchemaRegistry, composition_state: CompositionState]
);
scenarios!(
    "tests/features/record_behaviour.feature",
    fixtures = [registry: SchemaRegistry, composition_state: CompositionState]
);
