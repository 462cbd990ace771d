//! Then-step assertions for export behavioural scenarios.

use rstest_bdd_macros::then;
use storeflow::export::ExportOutcome;

use super::state::{CaptureRequest, ExportScenario, StepResult};

fn outcome(export_scenario: &ExportScenario) -> StepResult<ExportOutcome> {
    export_scenario
        .outcome
        .get()
        .ok_or_else(|| String::from("an export should have been attempted"))
}

fn read_artefact(export_scenario: &ExportScenario, file: &str) -> StepResult<Vec<u8>> {
    let path = export_scenario.output_dir()?.join(file);
    std::fs::read(path.as_std_path()).map_err(|error| format!("failed to read {path}: {error}"))
}

#[then("the export completed")]
fn the_export_completed(export_scenario: &ExportScenario) -> StepResult<()> {
    match outcome(export_scenario)? {
        ExportOutcome::Completed(_) => Ok(()),
        ExportOutcome::Failed => Err(String::from("expected the export to complete")),
    }
}

#[then("the export failed")]
fn the_export_failed(export_scenario: &ExportScenario) -> StepResult<()> {
    match outcome(export_scenario)? {
        ExportOutcome::Failed => Ok(()),
        ExportOutcome::Completed(path) => Err(format!("expected a failure, got {path}")),
    }
}

#[then("the artefact {file} is written")]
fn the_artefact_is_written(export_scenario: &ExportScenario, file: String) -> StepResult<()> {
    let bytes = read_artefact(export_scenario, &file)?;
    if bytes.is_empty() {
        Err(format!("{file} should not be empty"))
    } else {
        Ok(())
    }
}

#[then("the artefact {file} starts with {prefix}")]
fn the_artefact_starts_with(
    export_scenario: &ExportScenario,
    file: String,
    prefix: String,
) -> StepResult<()> {
    let bytes = read_artefact(export_scenario, &file)?;
    if bytes.starts_with(prefix.as_bytes()) {
        Ok(())
    } else {
        Err(format!("{file} should start with {prefix}"))
    }
}

#[then("no artefact is written")]
fn no_artefact_is_written(export_scenario: &ExportScenario) -> StepResult<()> {
    let dir = export_scenario.output_dir()?;
    if dir.exists() {
        Err(format!("{dir} should not have been created"))
    } else {
        Ok(())
    }
}

#[then("the data document lists {count} steps")]
fn the_data_document_lists_steps(
    export_scenario: &ExportScenario,
    count: usize,
) -> StepResult<()> {
    let bytes = read_artefact(export_scenario, "bookstore-process-flowchart-data.json")?;
    let document: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|error| format!("data document should be JSON: {error}"))?;
    let steps = document
        .get("steps")
        .and_then(serde_json::Value::as_array)
        .map_or(0, Vec::len);
    if steps == count {
        Ok(())
    } else {
        Err(format!("expected {count} steps, got {steps}"))
    }
}

#[then("the flow region was captured at {width} by {height} with scale {scale}")]
fn the_flow_region_was_captured_at(
    export_scenario: &ExportScenario,
    width: u32,
    height: u32,
    scale: u32,
) -> StepResult<()> {
    let expected = CaptureRequest {
        width,
        height,
        scale,
    };
    match export_scenario.capture.get() {
        Some(actual) if actual == expected => Ok(()),
        other => Err(format!("expected capture {expected:?}, got {other:?}")),
    }
}

#[then("the exporter is idle")]
fn the_exporter_is_idle(export_scenario: &ExportScenario) -> StepResult<()> {
    if export_scenario.still_exporting.get() == Some(false) {
        Ok(())
    } else {
        Err(String::from("the exporting flag should be cleared"))
    }
}
