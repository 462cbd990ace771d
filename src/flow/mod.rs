//! The bookstore's transaction process and its interactive walkthrough.
//!
//! - [`registry`]: canonical, validated step definitions and diagram links.
//! - [`controller`]: walkthrough state and its transitions.
//! - [`session`]: the controller driven by a cancellable autoplay timer.
//! - [`document`]: the JSON data document used for export and import.

mod bookstore;
pub mod controller;
pub mod document;
pub mod registry;
pub mod session;

pub use bookstore::{FLOW_DESCRIPTION, FLOW_TITLE};
pub use controller::{
    IDLE_HINT, InfoPanel, PlaybackStatus, Progress, TickOutcome, WalkthroughController,
    WalkthroughState,
};
pub use document::{FLOW_DOCUMENT_VERSION, FlowDocument};
pub use registry::{Link, LinkDirection, Step, StepCategory, StepRegistry};
pub use session::{DEFAULT_AUTOPLAY_INTERVAL, WalkthroughSession};
