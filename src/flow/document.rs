//! The flow data document written by JSON exports and read back by imports.
//!
//! The document carries the step list only. Imported registries therefore
//! link their steps in canonical order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::bookstore::{FLOW_DESCRIPTION, FLOW_TITLE};
use super::registry::{Step, StepCategory, StepRegistry};
use crate::error::FlowError;

/// Format version stamped into every document.
pub const FLOW_DOCUMENT_VERSION: &str = "1.0";

/// One step as it appears in the data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DocumentStep {
    id: String,
    title: String,
    description: String,
    #[serde(rename = "type")]
    category: StepCategory,
    #[serde(default)]
    delay: f64,
}

impl From<&Step> for DocumentStep {
    fn from(step: &Step) -> Self {
        Self {
            id: step.id.clone(),
            title: step.title.clone(),
            description: step.description.clone(),
            category: step.category,
            delay: step.display_delay,
        }
    }
}

impl From<DocumentStep> for Step {
    fn from(step: DocumentStep) -> Self {
        Self::new(
            step.id,
            step.title,
            step.description,
            step.category,
            step.delay.max(0.0),
        )
    }
}

/// Serialisable snapshot of a process flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    /// Diagram title.
    pub title: String,
    /// One-line summary of the process.
    pub description: String,
    steps: Vec<DocumentStep>,
    /// When the document was produced.
    pub export_date: String,
    /// Document format version.
    pub version: String,
}

impl FlowDocument {
    /// Snapshot the bookstore flow described by `registry`.
    #[must_use]
    pub fn capture(registry: &StepRegistry, exported_at: DateTime<Utc>) -> Self {
        Self {
            title: String::from(FLOW_TITLE),
            description: String::from(FLOW_DESCRIPTION),
            steps: registry.steps().iter().map(DocumentStep::from).collect(),
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: String::from(FLOW_DOCUMENT_VERSION),
        }
    }

    /// Step ids in document order.
    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.id.as_str())
    }

    /// Pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::DecodeFailed` when the text is not a flow document.
    pub fn from_json(text: &str) -> Result<Self, FlowError> {
        serde_json::from_str(text).map_err(|error| FlowError::DecodeFailed {
            message: error.to_string(),
        })
    }

    /// Build a validated registry from the document's steps.
    ///
    /// # Errors
    ///
    /// Returns the registry validation errors of [`StepRegistry::linear`].
    pub fn into_registry(self) -> Result<StepRegistry, FlowError> {
        StepRegistry::linear(self.steps.into_iter().map(Step::from).collect())
    }
}
