//! Step definitions for the behaviour scenarios.

mod declaration_steps;
mod record_steps;
