//! `rstest-bdd` behaviour scenarios for schema composition.
//!
//! Fixtures hold an isolated registry per scenario, [`steps`] drives it, and
//! [`scenarios`] binds the `.feature` files to both.

mod fixtures;
mod scenarios;
mod steps;
