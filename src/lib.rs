//! Trackpilot - adaptive track selection
//!
//! This library crate re-exports the tp-* crates and adds the JSON scenario
//! format used by the CLI and the integration tests.

pub mod scenario;

pub use tp_core;
pub use tp_mapping;
pub use tp_select;

pub use scenario::Scenario;
