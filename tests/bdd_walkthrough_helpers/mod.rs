//! Behavioural step helpers for walkthrough scenarios.

mod assertions;
mod state;
mod steps;

pub use state::{WalkthroughScenario, walkthrough_scenario};
