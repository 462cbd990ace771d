//! Shared behavioural-test state for export scenarios.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use storeflow::config::ExportConfig;
use storeflow::export::ExportOutcome;
use tempfile::TempDir;

/// Step result type for export BDD tests.
pub type StepResult<T> = Result<T, String>;

/// Logical size and scale handed to the rasteriser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Logical width.
    pub(crate) width: u32,
    /// Logical height.
    pub(crate) height: u32,
    /// Pixel density multiplier.
    pub(crate) scale: u32,
}

/// Shared scenario state for export behavioural tests.
#[derive(Default, ScenarioState)]
pub struct ExportScenario {
    /// Temporary directory owning every artefact written by the scenario.
    pub(crate) workspace: Slot<Arc<TempDir>>,

    /// Directory handed to the sink.
    pub(crate) output_dir: Slot<Utf8PathBuf>,

    /// Capture settings; defaults when unset.
    pub(crate) settings: Slot<ExportConfig>,

    /// Outcome of the export attempt.
    pub(crate) outcome: Slot<ExportOutcome>,

    /// The last capture the rasteriser was asked for.
    pub(crate) capture: Slot<CaptureRequest>,

    /// Whether the exporter still reported work in progress afterwards.
    pub(crate) still_exporting: Slot<bool>,
}

impl ExportScenario {
    /// Root of the scenario's temporary directory.
    pub(crate) fn workspace_root(&self) -> StepResult<Utf8PathBuf> {
        let workspace = self
            .workspace
            .get()
            .ok_or_else(|| String::from("an export directory should be prepared"))?;
        Utf8PathBuf::from_path_buf(workspace.path().to_path_buf())
            .map_err(|path| format!("temporary path is not UTF-8: {}", path.display()))
    }

    /// Directory artefacts are written into.
    pub(crate) fn output_dir(&self) -> StepResult<Utf8PathBuf> {
        self.output_dir
            .get()
            .ok_or_else(|| String::from("an export directory should be prepared"))
    }

    /// Capture settings for the scenario.
    pub(crate) fn settings(&self) -> ExportConfig {
        self.settings.get().unwrap_or_default()
    }
}

/// Fixture providing fresh state for each export scenario.
#[fixture]
pub fn export_scenario() -> ExportScenario {
    ExportScenario::default()
}
