//! Behavioural step helpers for export scenarios.

mod assertions;
mod state;
mod steps;

pub use state::{ExportScenario, export_scenario};
